//! Configurable behaviour of the engine.

use crate::utils::{build_augmented, first_statement};
use retype_type_inference::{
    Engine,
    call_patterns::{CallPattern, CallPatternRegistry},
    options::{BinaryMismatch, InferenceOptions},
};

fn infer_with(engine: &Engine, source: &str) -> String {
    let arena = build_augmented(source);
    engine.infer(&arena, first_statement(&arena)).to_string()
}

fn engine_with(options: InferenceOptions) -> Engine {
    Engine::new(options, CallPatternRegistry::builtin())
}

#[test]
fn test_always_union_conditionals() {
    let engine = engine_with(InferenceOptions {
        collapse_equal_branches: false,
        ..InferenceOptions::default()
    });
    assert_eq!(infer_with(&engine, "const v = c ? 1 : 2;"), "number | number");
    assert_eq!(
        infer_with(&engine, "const v = c ? \"a\" : 1;"),
        "string | number"
    );
}

#[test]
fn test_binary_mismatch_unknown() {
    let engine = engine_with(InferenceOptions {
        binary_mismatch: BinaryMismatch::Unknown,
        ..InferenceOptions::default()
    });
    assert_eq!(infer_with(&engine, "const v = 1 + \"a\";"), "unknown");
    assert_eq!(infer_with(&engine, "const v = 1 + 2;"), "number");
}

#[test]
fn test_parameter_placeholder() {
    let engine = engine_with(InferenceOptions {
        parameter_placeholder: "any".to_string(),
        ..InferenceOptions::default()
    });
    assert_eq!(
        infer_with(&engine, "const f = (a) => a;"),
        "(a: any) => unknown"
    );
}

#[test]
fn test_depth_limit() {
    let source = "const v = [[[[1]]]];";
    let shallow = engine_with(InferenceOptions {
        max_depth: 3,
        ..InferenceOptions::default()
    });
    assert_eq!(infer_with(&shallow, source), "unknown[][]");
    assert_eq!(infer_with(&Engine::default(), source), "number[][][][]");
}

#[test]
fn test_registered_pattern() {
    let mut registry = CallPatternRegistry::builtin();
    registry.register(CallPattern::new("document.querySelector", "Element | null"));
    let engine = Engine::new(InferenceOptions::default(), registry);
    assert_eq!(
        infer_with(&engine, "const el = document.querySelector(\"#a\");"),
        "Element | null"
    );
    assert_eq!(
        infer_with(&engine, "const el = other.querySelector(\"#a\");"),
        "unknown"
    );
    assert_eq!(
        infer_with(&engine, "const el = document.getElementById(\"a\");"),
        "HTMLElement | null"
    );
}

#[test]
fn test_registered_pattern_replaces_builtin() {
    let mut registry = CallPatternRegistry::builtin();
    registry.register(CallPattern::new("document.getElementById", "HTMLDivElement"));
    let engine = Engine::new(InferenceOptions::default(), registry);
    assert_eq!(
        infer_with(&engine, "const el = document.getElementById(\"a\");"),
        "HTMLDivElement"
    );
    // the replacement did not opt into simple-name matching
    assert_eq!(
        infer_with(&engine, "const el = root.getElementById(\"a\");"),
        "unknown"
    );
}

#[test]
fn test_empty_registry() {
    let engine = Engine::new(InferenceOptions::default(), CallPatternRegistry::empty());
    assert_eq!(
        infer_with(&engine, "const el = document.getElementById(\"a\");"),
        "unknown"
    );
}

#[test]
fn test_pattern_returning_primitive() {
    let mut registry = CallPatternRegistry::empty();
    registry.register(CallPattern::new("Date.now", "number"));
    let engine = Engine::new(InferenceOptions::default(), registry);
    assert_eq!(infer_with(&engine, "const t = [Date.now(), 1];"), "number[]");
}
