//! Range lookup: find the most specific node covering a host selection.

use core::fmt;
use std::fmt::{Display, Formatter};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{arena::Arena, nodes::Position};

/// A selection in host coordinates: lines and columns are both 0-indexed.
///
/// Node spans use 1-indexed lines, so every comparison goes through
/// [`SourceRange::to_span_coordinates`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    #[must_use]
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// An empty range at a cursor position.
    #[must_use]
    pub const fn caret(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    /// Converts to the parser's convention (1-indexed lines, columns unchanged).
    #[must_use]
    pub const fn to_span_coordinates(&self) -> (Position, Position) {
        (
            Position::new(self.start.line + 1, self.start.column),
            Position::new(self.end.line + 1, self.end.column),
        )
    }
}

impl Display for SourceRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LocateOptions {
    /// Upper bound on the number of nodes examined.
    pub max_visits: usize,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            max_visits: 100_000,
        }
    }
}

/// Returns the deepest node under `node` whose span contains `range`, or `None`.
///
/// See [`locate_with`].
#[must_use]
pub fn locate(arena: &Arena, node: u32, range: SourceRange) -> Option<u32> {
    let mut visited = FxHashSet::default();
    locate_with(arena, node, range, &LocateOptions::default(), &mut visited)
}

/// Descends from `node` into the first child that contains `range`, as long as one
/// exists, and returns the last node that matched.
///
/// A containing child always beats its parent, so the program root is only returned
/// when nothing below it covers the range. Ids already in `visited` are treated as
/// non-matching, which keeps aliased or cyclic trees from being walked twice. When the
/// visit budget runs out the best match found so far is returned.
#[must_use]
pub fn locate_with(
    arena: &Arena,
    node: u32,
    range: SourceRange,
    options: &LocateOptions,
    visited: &mut FxHashSet<u32>,
) -> Option<u32> {
    let (start, end) = range.to_span_coordinates();
    let mut budget = options.max_visits;

    let matches = |id: u32| {
        arena
            .find_node(id)
            .is_some_and(|candidate| candidate.location.contains(start, end))
    };

    if budget == 0 || !visited.insert(node) || !matches(node) {
        log::debug!("no node contains {range}");
        return None;
    }
    budget -= 1;

    let mut best = node;
    'descend: loop {
        let children = arena
            .find_node(best)
            .map(crate::nodes::SyntaxNode::children)
            .unwrap_or_default();
        for child in children {
            if budget == 0 {
                log::debug!("visit budget exhausted while locating {range}");
                break 'descend;
            }
            if !visited.insert(child) {
                continue;
            }
            budget -= 1;
            if matches(child) {
                best = child;
                continue 'descend;
            }
        }
        break;
    }

    if let Some(found) = arena.find_node(best) {
        log::debug!(
            "located {} (id {}) at {} for {range}",
            found.kind_name(),
            found.id,
            found.location
        );
    }
    Some(best)
}
