//! Textual scan for `any` placeholders.

use core::fmt;
use std::{
    fmt::{Display, Formatter},
    sync::LazyLock,
};

use regex::Regex;
use retype_ast::locator::SourceRange;
use serde::Serialize;

/// The dynamic type token this crate replaces.
pub const PLACEHOLDER: &str = "any";

pub const DIAGNOSTIC_MESSAGE: &str = "Found 'any', consider converting it to a specific type.";

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bany\b").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: SourceRange,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    #[must_use]
    pub fn placeholder(range: SourceRange) -> Self {
        Self {
            range,
            message: DIAGNOSTIC_MESSAGE.to_string(),
            severity: Severity::Warning,
        }
    }
}

/// Reports every whole-word `any` in `source`, including ones inside comments and
/// strings. Ranges are in host coordinates (0-indexed lines, byte columns).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scan_placeholders(source: &str) -> Vec<Diagnostic> {
    source
        .split('\n')
        .enumerate()
        .flat_map(|(line, text)| {
            PLACEHOLDER_PATTERN.find_iter(text).map(move |found| {
                Diagnostic::placeholder(SourceRange::new(
                    line as u32,
                    found.start() as u32,
                    line as u32,
                    found.end() as u32,
                ))
            })
        })
        .collect()
}
