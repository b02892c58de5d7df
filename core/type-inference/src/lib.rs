#![warn(clippy::pedantic)]
//! Type Descriptor Inference for JavaScript/TypeScript Expressions
//!
//! This crate derives a best-effort static type for an expression from its syntactic
//! shape alone. It exists to replace `any` placeholders with something more specific,
//! and it is deliberately not a type checker: identifiers are never resolved, call
//! signatures are never consulted, and anything outside a fixed set of shapes
//! infers as `unknown`.
//!
//! ## Supported Shapes
//!
//! - Literals: `"a"` → `string`, `1` → `number`, `true` → `boolean`, `null` → `null`
//! - Arrays: `[1, 2]` → `number[]`, `[1, "a"]` → `Array<number | string>`
//! - Objects: `{ a: 1 }` → `{ a: number }`, nested objects compose recursively
//! - Arrow functions: `(a, b) => a + b` → `(a: unknown, b: unknown) => unknown`
//! - Conditionals and binary expressions: unions of the branch/operand types
//! - Calls: fixed results from a [`call_patterns::CallPatternRegistry`],
//!   e.g. `document.getElementById(..)` → `HTMLElement | null`
//! - Variable declarations: the initializer's type
//!
//! ## Quick Start
//!
//! ```ignore
//! use retype_type_inference::Engine;
//!
//! let arena = parse("const xs = [1, 2, 3];")?;
//! let statement = arena.top_level_statements()[0];
//! assert_eq!(Engine::default().infer(&arena, statement).to_string(), "number[]");
//! ```
//!
//! ## Policies
//!
//! Two behaviours are configurable through [`options::InferenceOptions`]:
//!
//! - `collapse_equal_branches` (default `true`): `c ? 1 : 2` infers `number`
//!   instead of `number | number`.
//! - `binary_mismatch` (default [`options::BinaryMismatch::Union`]): `1 + "a"` infers
//!   `number | string`; the alternative is `unknown`.
//!
//! ## Guarantees
//!
//! Inference never mutates the arena, never panics on malformed input, and
//! terminates on any arena, including ones with shared or cyclic node references,
//! because recursion depth is bounded by `max_depth`.

pub mod call_patterns;
pub mod descriptor;
pub mod engine;
pub mod options;

pub use engine::Engine;

use retype_ast::arena::Arena;

use crate::descriptor::TypeDescriptor;

/// Infers the descriptor of node `id` with the default options and call patterns.
#[must_use]
pub fn infer(arena: &Arena, id: u32) -> TypeDescriptor {
    Engine::default().infer(arena, id)
}
