//! Fixed result types for recognised call expressions.
//!
//! Calls are not inferred from signatures. Instead the callee is rendered as a dotted
//! path (`document.getElementById`) and looked up here. Adding a pattern never
//! requires touching the engine.

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPattern {
    /// Dotted callee path, e.g. `document.getElementById`.
    pub callee: String,
    /// Type text returned for matching calls.
    pub descriptor: String,
    /// Also match any call whose last path segment equals this pattern's last segment.
    #[serde(default)]
    pub match_simple_name: bool,
}

impl CallPattern {
    #[must_use]
    pub fn new(callee: &str, descriptor: &str) -> Self {
        Self {
            callee: callee.to_string(),
            descriptor: descriptor.to_string(),
            match_simple_name: false,
        }
    }

    #[must_use]
    pub fn with_simple_name_match(mut self) -> Self {
        self.match_simple_name = true;
        self
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.callee)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallPatternRegistry {
    patterns: Vec<CallPattern>,
}

impl Default for CallPatternRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CallPatternRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The patterns recognised out of the box.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(
            CallPattern::new("document.getElementById", "HTMLElement | null")
                .with_simple_name_match(),
        );
        registry
    }

    /// Adds a pattern, replacing any existing pattern with the same callee.
    pub fn register(&mut self, pattern: CallPattern) {
        self.patterns.retain(|existing| existing.callee != pattern.callee);
        self.patterns.push(pattern);
    }

    pub fn extend<I: IntoIterator<Item = CallPattern>>(&mut self, patterns: I) {
        for pattern in patterns {
            self.register(pattern);
        }
    }

    /// Finds the pattern for a callee path: an exact path match first, then the first
    /// pattern that opted into simple-name matching.
    #[must_use]
    pub fn lookup(&self, callee: &str) -> Option<&CallPattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.callee == callee)
            .or_else(|| {
                let name = simple_name(callee);
                self.patterns
                    .iter()
                    .find(|pattern| pattern.match_simple_name && pattern.simple_name() == name)
            })
    }

    #[must_use]
    pub fn resolve(&self, callee: &str) -> Option<TypeDescriptor> {
        self.lookup(callee)
            .map(|pattern| TypeDescriptor::from_text(&pattern.descriptor))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn simple_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
