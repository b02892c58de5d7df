//! JSON configuration for the engine.
//!
//! ```json
//! {
//!   "collapse_equal_branches": false,
//!   "binary_mismatch": "unknown",
//!   "call_patterns": [
//!     { "callee": "document.querySelector", "descriptor": "Element | null" }
//!   ]
//! }
//! ```
//!
//! Every field is optional. Configured call patterns are added on top of the
//! built-in ones and replace a built-in pattern with the same callee.

use std::path::Path;

use anyhow::Context;
use retype_type_inference::{
    Engine,
    call_patterns::{CallPattern, CallPatternRegistry},
    options::InferenceOptions,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetypeConfig {
    #[serde(flatten)]
    pub inference: InferenceOptions,
    pub call_patterns: Vec<CallPattern>,
}

impl RetypeConfig {
    /// # Errors
    ///
    /// Returns an error when `text` is not a valid configuration document.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid retype configuration")
    }

    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("failed to load config file {}", path.display()))?;
        log::debug!(
            "loaded {} with {} extra call pattern(s)",
            path.display(),
            config.call_patterns.len()
        );
        Ok(config)
    }

    #[must_use]
    pub fn engine(&self) -> Engine {
        let mut registry = CallPatternRegistry::builtin();
        registry.extend(self.call_patterns.iter().cloned());
        Engine::new(self.inference.clone(), registry)
    }
}
