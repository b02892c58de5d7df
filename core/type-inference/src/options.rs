use serde::{Deserialize, Serialize};

/// What a binary expression yields when its operands infer to different types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryMismatch {
    /// `A | B`
    #[default]
    Union,
    /// `unknown`
    Unknown,
}

/// Engine tuning. Deserializable so it can be read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceOptions {
    /// `c ? "a" : "b"` infers `string` rather than `string | string`.
    pub collapse_equal_branches: bool,
    pub binary_mismatch: BinaryMismatch,
    /// Nesting depth past which a subtree infers as `unknown`.
    pub max_depth: usize,
    /// Type text written for every arrow function parameter.
    pub parameter_placeholder: String,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            collapse_equal_branches: true,
            binary_mismatch: BinaryMismatch::Union,
            max_depth: 256,
            parameter_placeholder: "unknown".to_string(),
        }
    }
}
