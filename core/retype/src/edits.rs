//! Text edits and the quick fixes built from them.

use anyhow::{anyhow, bail};
use retype_ast::{locator::SourceRange, nodes::Position};
use serde::Serialize;

use crate::placeholders::Diagnostic;

pub const QUICK_FIX_TITLE: &str = "Convert 'any' to specific type";

/// Replaces the text inside `range` (host coordinates) with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: SourceRange,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn new(range: SourceRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// A titled edit that resolves one placeholder diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickFix {
    pub title: String,
    pub diagnostic: Diagnostic,
    pub edit: TextEdit,
}

impl QuickFix {
    #[must_use]
    pub fn new(diagnostic: Diagnostic, new_text: impl Into<String>) -> Self {
        let edit = TextEdit::new(diagnostic.range, new_text);
        Self {
            title: QUICK_FIX_TITLE.to_string(),
            diagnostic,
            edit,
        }
    }
}

/// Byte offset of a host position, or `None` when the line does not exist or the
/// column is past its end or inside a multi-byte character.
#[must_use]
pub fn position_to_offset(source: &str, position: Position) -> Option<usize> {
    let mut offset = 0;
    for (line, text) in source.split('\n').enumerate() {
        if line == position.line as usize {
            let column = position.column as usize;
            return (column <= text.len() && text.is_char_boundary(column))
                .then_some(offset + column);
        }
        offset += text.len() + 1;
    }
    None
}

/// Applies `edits` to `source` and returns the new text.
///
/// Edits are addressed against the original text and applied back to front, so the
/// order they are passed in does not matter.
///
/// # Errors
///
/// Returns an error when an edit range is outside the source, reversed, or overlaps
/// another edit.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> anyhow::Result<String> {
    let mut resolved = Vec::with_capacity(edits.len());
    for edit in edits {
        let start = position_to_offset(source, edit.range.start)
            .ok_or_else(|| anyhow!("edit start {} is outside the source", edit.range))?;
        let end = position_to_offset(source, edit.range.end)
            .ok_or_else(|| anyhow!("edit end {} is outside the source", edit.range))?;
        if start > end {
            bail!("edit range {} is reversed", edit.range);
        }
        resolved.push((start, end, edit));
    }
    resolved.sort_by_key(|(start, end, _)| (*start, *end));
    for pair in resolved.windows(2) {
        let (_, previous_end, previous) = pair[0];
        let (next_start, _, next) = pair[1];
        if previous_end > next_start {
            bail!(
                "edit {} overlaps edit {}",
                previous.range,
                next.range
            );
        }
    }

    let mut result = source.to_string();
    for (start, end, edit) in resolved.iter().rev() {
        result.replace_range(*start..*end, &edit.new_text);
    }
    Ok(result)
}
