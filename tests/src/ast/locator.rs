use crate::utils::{build_augmented, literal_raw};
use retype_ast::{
    arena::Arena,
    locator::{LocateOptions, SourceRange, locate, locate_with},
    nodes::{LiteralValue, Location, NodeKind},
};
use rustc_hash::FxHashSet;

fn locate_in(source: &str, range: SourceRange) -> Option<(Arena, u32)> {
    let arena = build_augmented(source);
    let found = locate(&arena, arena.root().unwrap(), range)?;
    Some((arena, found))
}

mod deepest_match {
    use super::*;

    #[test]
    fn test_nested_literal_not_ancestor() {
        let (arena, found) =
            locate_in("const xs = [1, [2, 3]];", SourceRange::new(0, 19, 0, 20)).unwrap();
        let node = arena.find_node(found).unwrap();
        assert_eq!(node.kind_name(), "Literal");
        assert_eq!(literal_raw(node), Some("3"));
    }

    #[test]
    fn test_caret_inside_literal() {
        let (arena, found) =
            locate_in("const s = \"hello\";", SourceRange::caret(0, 13)).unwrap();
        let node = arena.find_node(found).unwrap();
        assert_eq!(literal_raw(node), Some("\"hello\""));
    }

    #[test]
    fn test_annotation_is_found() {
        let (arena, found) =
            locate_in("const xs: any = [1];", SourceRange::new(0, 10, 0, 13)).unwrap();
        assert_eq!(
            arena.find_node(found).unwrap().kind,
            NodeKind::TypeAnnotation {
                text: "any".to_string()
            }
        );
    }

    #[test]
    fn test_range_spanning_siblings_stops_at_parent() {
        let (arena, found) =
            locate_in("const xs = [1, 2];", SourceRange::new(0, 12, 0, 16)).unwrap();
        assert_eq!(arena.find_node(found).unwrap().kind_name(), "ArrayExpression");
    }

    #[test]
    fn test_root_only_as_last_resort() {
        let (arena, found) =
            locate_in("const a = 1;\n\nconst b = 2;", SourceRange::caret(1, 0)).unwrap();
        assert_eq!(found, arena.root().unwrap());
    }

    #[test]
    fn test_second_statement() {
        let (arena, found) =
            locate_in("const a = 1;\nconst b = 2;", SourceRange::new(1, 10, 1, 11)).unwrap();
        let node = arena.find_node(found).unwrap();
        assert_eq!(literal_raw(node), Some("2"));
        assert_eq!(node.location.start_line, 2);
    }
}

mod multi_line {
    use super::*;

    const SOURCE: &str = "const o = {\n  a: 1,\n  b: \"two\",\n};";

    #[test]
    fn test_literal_on_inner_line() {
        let (arena, found) = locate_in(SOURCE, SourceRange::new(2, 5, 2, 10)).unwrap();
        assert_eq!(literal_raw(arena.find_node(found).unwrap()), Some("\"two\""));
    }

    #[test]
    fn test_key_on_inner_line() {
        let (arena, found) = locate_in(SOURCE, SourceRange::caret(2, 2)).unwrap();
        assert_eq!(
            arena.find_node(found).unwrap().kind,
            NodeKind::Identifier {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn test_column_outside_first_line_is_still_inside_span() {
        // column 0 on the closing line is left of the object's start column,
        // but the object spans several lines, so it still contains the caret.
        let (arena, found) = locate_in(SOURCE, SourceRange::caret(3, 0)).unwrap();
        assert_eq!(arena.find_node(found).unwrap().kind_name(), "ObjectExpression");
    }

    #[test]
    fn test_range_across_properties() {
        let (arena, found) = locate_in(SOURCE, SourceRange::new(1, 2, 2, 10)).unwrap();
        assert_eq!(arena.find_node(found).unwrap().kind_name(), "ObjectExpression");
    }
}

mod not_found {
    use super::*;

    #[test]
    fn test_range_past_end() {
        assert!(locate_in("const a = 1;", SourceRange::caret(5, 0)).is_none());
    }

    #[test]
    fn test_reversed_range() {
        assert!(locate_in("const a = 1;", SourceRange::new(0, 8, 0, 2)).is_none());
    }

    #[test]
    fn test_unknown_start_node() {
        let arena = build_augmented("const a = 1;");
        assert!(locate(&arena, 9999, SourceRange::caret(0, 0)).is_none());
    }
}

mod guards {
    use super::*;

    fn span(end_column: u32) -> Location {
        Location::new(0, end_column, 1, 0, 1, end_column)
    }

    /// Program -> Array -> [Literal, Program]; the array points back at the root.
    fn cyclic_arena() -> (Arena, u32, u32, u32) {
        let mut arena = Arena::new();
        let literal = arena.alloc(
            Location::new(1, 2, 1, 1, 1, 2),
            NodeKind::Literal {
                value: LiteralValue::Number("1".to_string()),
                raw: "1".to_string(),
            },
        );
        let array = arena.alloc(
            span(10),
            NodeKind::ArrayExpression {
                elements: vec![Some(literal)],
            },
        );
        let root = arena.alloc(span(10), NodeKind::Program { body: vec![array] });
        arena.set_root(root);
        arena.replace_kind(
            array,
            NodeKind::ArrayExpression {
                elements: vec![Some(root), Some(literal)],
            },
        );
        (arena, root, array, literal)
    }

    #[test]
    fn test_cycle_terminates() {
        let (arena, _, _, literal) = cyclic_arena();
        let found = locate(&arena, arena.root().unwrap(), SourceRange::caret(0, 1));
        assert_eq!(found, Some(literal));
    }

    #[test]
    fn test_cycle_without_deeper_match() {
        let (arena, root, array, _) = cyclic_arena();
        let found = locate(&arena, root, SourceRange::caret(0, 8));
        assert_eq!(found, Some(array));
    }

    #[test]
    fn test_visit_budget_returns_best_so_far() {
        let (arena, root, _, _) = cyclic_arena();
        let mut visited = FxHashSet::default();
        let found = locate_with(
            &arena,
            root,
            SourceRange::caret(0, 1),
            &LocateOptions { max_visits: 1 },
            &mut visited,
        );
        assert_eq!(found, Some(root));
    }

    #[test]
    fn test_zero_budget_finds_nothing() {
        let (arena, root, _, _) = cyclic_arena();
        let mut visited = FxHashSet::default();
        let found = locate_with(
            &arena,
            root,
            SourceRange::caret(0, 1),
            &LocateOptions { max_visits: 0 },
            &mut visited,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn test_visited_nodes_are_skipped() {
        let (arena, root, array, _) = cyclic_arena();
        let mut visited = FxHashSet::default();
        visited.insert(array);
        let found = locate_with(
            &arena,
            root,
            SourceRange::caret(0, 1),
            &LocateOptions::default(),
            &mut visited,
        );
        assert_eq!(found, Some(root));
    }
}
