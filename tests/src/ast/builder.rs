use crate::utils::{build_ast, first_statement, literal_raw, nodes_of_kind, single_of_kind};
use retype_ast::nodes::{ArrowBody, DeclarationKind, LiteralValue, NodeKind};

#[test]
fn test_parse_const_declaration() {
    let arena = build_ast("const xs: any = [1, 2, 3];");
    let statement = arena.find_node(first_statement(&arena)).unwrap();
    let NodeKind::VariableDeclaration { kind, declarations } = &statement.kind else {
        panic!("expected a declaration, got {}", statement.kind_name());
    };
    assert_eq!(*kind, DeclarationKind::Const);
    assert_eq!(declarations.len(), 1);

    let declarator = arena.find_node(declarations[0]).unwrap();
    let NodeKind::VariableDeclarator {
        type_annotation: Some(annotation),
        init: Some(init),
        ..
    } = &declarator.kind
    else {
        panic!("expected an annotated declarator");
    };
    assert_eq!(
        arena.find_node(*annotation).unwrap().kind,
        NodeKind::TypeAnnotation {
            text: "any".to_string()
        }
    );
    assert_eq!(arena.find_node(*init).unwrap().kind_name(), "ArrayExpression");
}

#[test]
fn test_parse_multiple_declarators() {
    let arena = build_ast("let a = 1, b = \"x\";");
    let statement = arena.find_node(first_statement(&arena)).unwrap();
    let NodeKind::VariableDeclaration { kind, declarations } = &statement.kind else {
        panic!("expected a declaration");
    };
    assert_eq!(*kind, DeclarationKind::Let);
    assert_eq!(declarations.len(), 2);
}

#[test]
fn test_parse_var_declaration() {
    let arena = build_ast("var v;");
    let statement = arena.find_node(first_statement(&arena)).unwrap();
    let NodeKind::VariableDeclaration { kind, declarations } = &statement.kind else {
        panic!("expected a declaration");
    };
    assert_eq!(*kind, DeclarationKind::Var);
    let declarator = arena.find_node(declarations[0]).unwrap();
    assert!(matches!(
        declarator.kind,
        NodeKind::VariableDeclarator { init: None, .. }
    ));
}

#[test]
fn test_parse_array_holes() {
    let arena = build_ast("const xs = [1, , 3];");
    let array = single_of_kind(&arena, "ArrayExpression");
    let NodeKind::ArrayExpression { elements } = &array.kind else {
        unreachable!();
    };
    assert_eq!(elements.len(), 3);
    assert!(elements[0].is_some());
    assert!(elements[1].is_none());
    assert!(elements[2].is_some());
}

#[test]
fn test_parse_leading_hole() {
    let arena = build_ast("const xs = [, 1];");
    let array = single_of_kind(&arena, "ArrayExpression");
    let NodeKind::ArrayExpression { elements } = &array.kind else {
        unreachable!();
    };
    assert_eq!(elements.len(), 2);
    assert!(elements[0].is_none());
}

#[test]
fn test_parse_comments_are_dropped() {
    let arena = build_ast("// leading\nconst xs = [1, /* two */ 2];");
    assert_eq!(arena.top_level_statements().len(), 1);
    let array = single_of_kind(&arena, "ArrayExpression");
    let NodeKind::ArrayExpression { elements } = &array.kind else {
        unreachable!();
    };
    assert_eq!(elements.len(), 2);
    assert!(nodes_of_kind(&arena, "comment").is_empty());
}

#[test]
fn test_parse_parenthesized_is_unwrapped() {
    let arena = build_ast("const x = ((1));");
    assert!(nodes_of_kind(&arena, "parenthesized_expression").is_empty());
    assert_eq!(nodes_of_kind(&arena, "Literal").len(), 1);
}

#[test]
fn test_parse_literals() {
    let arena = build_ast("const xs = [\"a\", 'b', 1.5, true, false, null, 10n, /re/g];");
    let values: Vec<LiteralValue> = nodes_of_kind(&arena, "Literal")
        .into_iter()
        .map(|node| match &node.kind {
            NodeKind::Literal { value, .. } => value.clone(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            LiteralValue::String("a".to_string()),
            LiteralValue::String("b".to_string()),
            LiteralValue::Number("1.5".to_string()),
            LiteralValue::Boolean(true),
            LiteralValue::Boolean(false),
            LiteralValue::Null,
            LiteralValue::BigInt("10n".to_string()),
            LiteralValue::RegExp("/re/g".to_string()),
        ]
    );
}

#[test]
fn test_parse_shorthand_property_shares_node() {
    let arena = build_ast("const o = { a };");
    let property = single_of_kind(&arena, "Property");
    let NodeKind::Property {
        key,
        value,
        shorthand,
        ..
    } = &property.kind
    else {
        unreachable!();
    };
    assert!(*shorthand);
    assert_eq!(key, value);
}

#[test]
fn test_parse_computed_and_method_properties() {
    let arena = build_ast("const o = { [\"k\"]: 1, m() { return 1; }, ...rest };");
    let properties = nodes_of_kind(&arena, "Property");
    assert_eq!(properties.len(), 2);
    assert!(matches!(
        properties[0].kind,
        NodeKind::Property { computed: true, .. }
    ));
    assert!(matches!(
        properties[1].kind,
        NodeKind::Property { method: true, .. }
    ));
    assert_eq!(nodes_of_kind(&arena, "SpreadElement").len(), 1);
}

#[test]
fn test_parse_arrow_functions() {
    let arena = build_ast("const f = x => x;\nconst g = (a, b = 1): any => { return a; };");
    let arrows = nodes_of_kind(&arena, "ArrowFunctionExpression");
    assert_eq!(arrows.len(), 2);

    let NodeKind::ArrowFunctionExpression {
        params,
        body,
        return_type,
    } = &arrows[0].kind
    else {
        unreachable!();
    };
    assert_eq!(params.len(), 1);
    assert!(matches!(body, ArrowBody::Expression(_)));
    assert!(return_type.is_none());

    let NodeKind::ArrowFunctionExpression {
        params,
        body,
        return_type,
    } = &arrows[1].kind
    else {
        unreachable!();
    };
    assert_eq!(params.len(), 2);
    assert!(matches!(body, ArrowBody::Block(_)));
    assert!(return_type.is_some());
    let defaulted = arena.find_node(params[1]).unwrap();
    assert!(matches!(
        defaulted.kind,
        NodeKind::Parameter {
            default: Some(_),
            ..
        }
    ));
}

#[test]
fn test_parse_as_expression() {
    let arena = build_ast("const el = value as any;");
    let cast = single_of_kind(&arena, "AsExpression");
    let NodeKind::AsExpression {
        expression,
        type_annotation,
    } = &cast.kind
    else {
        unreachable!();
    };
    assert_eq!(arena.find_node(*expression).unwrap().kind_name(), "Identifier");
    assert_eq!(
        arena.find_node(*type_annotation).unwrap().kind,
        NodeKind::TypeAnnotation {
            text: "any".to_string()
        }
    );
}

#[test]
fn test_parse_member_call() {
    let arena = build_ast("document.getElementById(\"app\");");
    let statement = arena.find_node(first_statement(&arena)).unwrap();
    assert_eq!(statement.kind_name(), "ExpressionStatement");
    let call = single_of_kind(&arena, "CallExpression");
    let NodeKind::CallExpression { callee, arguments } = &call.kind else {
        unreachable!();
    };
    assert_eq!(arguments.len(), 1);
    assert!(matches!(
        arena.find_node(*callee).unwrap().kind,
        NodeKind::MemberExpression {
            computed: false,
            ..
        }
    ));
}

#[test]
fn test_parse_unsupported_statements_keep_children() {
    let arena = build_ast("if (ok) { const x = [1]; }");
    let statement = arena.find_node(first_statement(&arena)).unwrap();
    assert_eq!(statement.kind_name(), "if_statement");
    assert_eq!(nodes_of_kind(&arena, "ArrayExpression").len(), 1);
}

#[test]
fn test_parse_locations() {
    let arena = build_ast("const a = 1;\nconst b = 22;");
    let literals = nodes_of_kind(&arena, "Literal");
    assert_eq!(literal_raw(literals[1]), Some("22"));
    let location = literals[1].location;
    assert_eq!(location.start_line, 2);
    assert_eq!(location.start_column, 10);
    assert_eq!(location.end_line, 2);
    assert_eq!(location.end_column, 12);
    assert_eq!(location.offset_start, 23);
    assert_eq!(location.offset_end, 25);
}

#[test]
fn test_ids_are_unique_and_root_is_program() {
    let arena = build_ast("const a = [1, 2];\nconst b = { c: 3 };");
    let root = arena.find_node(arena.root().unwrap()).unwrap();
    assert_eq!(root.kind_name(), "Program");
    let mut ids: Vec<u32> = arena.filter_nodes(|_| true).iter().map(|n| n.id).collect();
    let total = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(!ids.contains(&0));
}

#[test]
fn test_parse_empty_source() {
    let arena = build_ast("");
    assert!(arena.top_level_statements().is_empty());
    assert_eq!(arena.len(), 1);
}

#[test]
fn test_syntax_error_is_reported() {
    let error = retype::parse("const broken = [1, 2;").unwrap_err();
    assert!(error.to_string().contains("syntax error"), "{error}");
}

#[test]
fn test_builder_rejects_missing_source() {
    let mut builder = retype_ast::builder::Builder::new();
    assert!(builder.build_ast().is_err());
}

fn nested_arrays(depth: usize) -> String {
    format!("const x: any = {}1{};", "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn test_deep_nesting_is_rejected() {
    let error = retype::parse(&nested_arrays(10_000)).unwrap_err();
    assert!(error.to_string().contains("nests deeper than"), "{error}");
}

#[test]
fn test_nesting_within_limit_builds() {
    let arena = build_ast(&nested_arrays(100));
    assert_eq!(nodes_of_kind(&arena, "ArrayExpression").len(), 100);
}
