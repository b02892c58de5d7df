//! Error types for the AST crate.
//!
//! This module defines structured errors for turning source text into a syntax tree.

use thiserror::Error;

use crate::nodes::Location;

/// Errors that can occur while parsing source code and building the arena.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// The grammar could not be loaded into the tree-sitter parser.
    #[error("failed to load the TypeScript grammar: {0}")]
    LanguageError(String),

    /// tree-sitter did not produce a tree at all.
    #[error("failed to parse source code")]
    ParseError,

    /// The tree contains ERROR or MISSING nodes.
    #[error("syntax error at {location} near '{snippet}' ({total} error(s) in total)")]
    SyntaxError {
        location: Location,
        snippet: String,
        total: usize,
    },

    /// The CST nests deeper than the builder is willing to recurse.
    #[error("source nests deeper than {limit} levels at {location}")]
    TooDeep { location: Location, limit: usize },

    /// The CST root is not a `program` node.
    #[error("expected a root node of kind `program`, found `{0}`")]
    UnexpectedRoot(String),
}
