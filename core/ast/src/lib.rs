#![warn(clippy::pedantic)]
//! Syntax tree for the retype engine.
//!
//! - [`builder`] turns a tree-sitter CST into an [`arena::Arena`] of [`nodes::SyntaxNode`]s
//! - [`parents`] adds parent back-references
//! - [`locator`] finds the most specific node covering a source range
pub mod arena;
pub mod builder;
pub mod errors;
pub mod locator;
pub mod nodes;
pub(crate) mod nodes_impl;
pub mod parents;
