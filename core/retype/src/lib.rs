#![warn(clippy::pedantic)]
//! `any` Placeholder Replacement for TypeScript
//!
//! This crate ties the pieces of the pipeline together. Given source text and a
//! selection, it returns the type text that should replace an `any` placeholder.
//!
//! ## Pipeline
//!
//! ```text
//! source → tree-sitter → arena AST → augment (parent links) → locate → resolve target → infer
//! ```
//!
//! Each stage lives in its own crate or module:
//!
//! - [`parse`] builds a [`retype_ast::arena::Arena`] from source text.
//! - [`retype_ast::parents::augment`] writes the parent links that target resolution
//!   climbs; [`parse_augmented`] does both.
//! - [`retype_ast::locator::locate`] finds the deepest node covering the selection.
//! - [`target::resolve_target`] maps a selected `any` annotation to the value it
//!   describes.
//! - [`retype_type_inference::Engine`] renders the value's structural type.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retype::{infer_at, retype_ast::locator::SourceRange};
//!
//! let source = "const xs: any = [1, 2, 3];";
//! // Host coordinates: 0-indexed lines and columns.
//! let descriptor = infer_at(source, SourceRange::new(0, 10, 0, 13));
//! assert_eq!(descriptor.to_string(), "number[]");
//! ```
//!
//! ## Editor Workflow
//!
//! [`placeholders::scan_placeholders`] reports every `any` as a warning, and
//! [`quick_fixes`] turns the ones sitting in type positions into edits that
//! [`edits::apply_edits`] can write back:
//!
//! ```rust,no_run
//! use retype::{edits::apply_edits, quick_fixes};
//!
//! let source = "const user: any = { name: \"Jane\" };";
//! let fixes = quick_fixes(source)?;
//! let edits: Vec<_> = fixes.into_iter().map(|fix| fix.edit).collect();
//! assert_eq!(apply_edits(source, &edits)?, "const user: { name: string } = { name: \"Jane\" };");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Failure Model
//!
//! The `infer_at*` functions never fail. Malformed source, an unmatched selection, or
//! an unsupported annotation position all yield `unknown`, and the reason is logged.
//! The `try_*` variants and [`parse`] report parse failures to callers that want them.

pub mod config;
pub mod edits;
pub mod placeholders;
pub mod target;

pub use retype_ast;
pub use retype_type_inference;

use retype_ast::{
    arena::Arena,
    builder::Builder,
    errors::AstError,
    locator::{SourceRange, locate},
    parents::augment,
};
use retype_type_inference::{Engine, descriptor::TypeDescriptor};

use crate::{
    edits::QuickFix,
    placeholders::scan_placeholders,
    target::{Target, resolve_target},
};

/// Parses TypeScript source code into an arena-based AST.
///
/// Parent links are not written; see [`parse_augmented`].
///
/// # Errors
///
/// Returns an error if:
/// - The TypeScript grammar cannot be loaded
/// - tree-sitter fails to produce a tree
/// - The source contains syntax errors
pub fn parse(source_code: &str) -> anyhow::Result<Arena> {
    let language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT;
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| AstError::LanguageError(e.to_string()))?;
    let tree = parser
        .parse(source_code, None)
        .ok_or(AstError::ParseError)?;
    let code = source_code.as_bytes();
    let root_node = tree.root_node();
    let mut builder = Builder::new();
    builder.add_source_code(root_node, code);
    let arena = builder.build_ast()?;
    Ok(arena)
}

/// [`parse`] followed by [`augment`].
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_augmented(source_code: &str) -> anyhow::Result<Arena> {
    let mut arena = parse(source_code)?;
    augment(&mut arena);
    Ok(arena)
}

/// Locates `range` in an augmented arena and infers the resolved target.
#[must_use]
pub fn infer_in_arena(engine: &Engine, arena: &Arena, range: SourceRange) -> TypeDescriptor {
    let Some(root) = arena.root() else {
        return TypeDescriptor::Unknown;
    };
    let Some(located) = locate(arena, root, range) else {
        log::info!("no node found at {range}");
        return TypeDescriptor::Unknown;
    };
    match resolve_target(arena, located).node() {
        Some(target) => engine.infer(arena, target),
        None => TypeDescriptor::Unknown,
    }
}

/// # Errors
///
/// Returns an error when `source_code` cannot be parsed.
pub fn try_infer_at_with(
    engine: &Engine,
    source_code: &str,
    range: SourceRange,
) -> anyhow::Result<TypeDescriptor> {
    let arena = parse_augmented(source_code)?;
    Ok(infer_in_arena(engine, &arena, range))
}

/// Infers the replacement for the selection at `range`, degrading to `unknown` when
/// the source does not parse.
#[must_use]
pub fn infer_at_with(engine: &Engine, source_code: &str, range: SourceRange) -> TypeDescriptor {
    try_infer_at_with(engine, source_code, range).unwrap_or_else(|error| {
        log::warn!("could not infer at {range}: {error:#}");
        TypeDescriptor::Unknown
    })
}

/// [`infer_at_with`] using the default engine.
#[must_use]
pub fn infer_at(source_code: &str, range: SourceRange) -> TypeDescriptor {
    infer_at_with(&Engine::default(), source_code, range)
}

/// Builds one quick fix per placeholder that sits in a type annotation.
///
/// Placeholders in comments, strings or identifiers are reported by
/// [`scan_placeholders`] but get no fix. A placeholder whose owner is not supported
/// is replaced with `unknown`.
///
/// # Errors
///
/// Returns an error when `source_code` cannot be parsed.
pub fn quick_fixes_with(engine: &Engine, source_code: &str) -> anyhow::Result<Vec<QuickFix>> {
    let diagnostics = scan_placeholders(source_code);
    if diagnostics.is_empty() {
        return Ok(Vec::new());
    }
    let arena = parse_augmented(source_code)?;
    let Some(root) = arena.root() else {
        return Ok(Vec::new());
    };
    let mut fixes = Vec::new();
    for diagnostic in diagnostics {
        let Some(located) = locate(&arena, root, diagnostic.range) else {
            continue;
        };
        let Target::Annotation(target) = resolve_target(&arena, located) else {
            log::debug!("placeholder at {} is not a type annotation", diagnostic.range);
            continue;
        };
        let descriptor = target.map_or(TypeDescriptor::Unknown, |id| engine.infer(&arena, id));
        if descriptor.is_unknown() {
            log::debug!("no specific type for placeholder at {}", diagnostic.range);
        }
        fixes.push(QuickFix::new(diagnostic, descriptor.to_string()));
    }
    Ok(fixes)
}

/// [`quick_fixes_with`] using the default engine.
///
/// # Errors
///
/// Returns an error when `source_code` cannot be parsed.
pub fn quick_fixes(source_code: &str) -> anyhow::Result<Vec<QuickFix>> {
    quick_fixes_with(&Engine::default(), source_code)
}
