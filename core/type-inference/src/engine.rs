//! Structural inference: maps the shape of a node to a [`TypeDescriptor`].
//!
//! | Node                     | Result                                                   |
//! |--------------------------|----------------------------------------------------------|
//! | `VariableDeclaration`    | declarator types joined with `\|`, in order, no dedup     |
//! | `VariableDeclarator`     | initializer type, or `unknown`                           |
//! | `Literal`                | `string`, `number`, `boolean`, `null`, `bigint`, `RegExp` |
//! | `ArrayExpression`        | `T[]` or `Array<A \| B>` over first-seen element types   |
//! | `ObjectExpression`       | `{ k: T; ... }` in declaration order                     |
//! | `ArrowFunctionExpression`| `(a: unknown) => T`, `T` from an expression body only    |
//! | `ConditionalExpression`  | `A \| B`, or `A` when both branches agree                |
//! | `BinaryExpression`       | operand type when equal, else `A \| B`                   |
//! | `CallExpression`         | registry lookup on the callee path                       |
//! | anything else            | `unknown`                                                |
//!
//! The engine only reads the arena and never fails; shapes it cannot make sense of
//! yield `unknown` for that subtree alone.
//!
//! Arenas built from source are trees, but handcrafted ones may share or cycle ids.
//! Within one call a node is inferred at most once: a node reached again while its own
//! inference is still running yields `unknown`, and a finished node's descriptor is
//! reused for every later reference.

use rustc_hash::{FxHashMap, FxHashSet};

use retype_ast::{
    arena::Arena,
    nodes::{ArrowBody, LiteralValue, NodeKind, SyntaxNode},
};

use crate::{
    call_patterns::CallPatternRegistry,
    descriptor::{Primitive, TypeDescriptor},
    options::{BinaryMismatch, InferenceOptions},
};

/// Per-call bookkeeping threaded through the recursive walk.
#[derive(Default)]
struct Walk {
    in_progress: FxHashSet<u32>,
    finished: FxHashMap<u32, TypeDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: InferenceOptions,
    call_patterns: CallPatternRegistry,
}

impl Engine {
    #[must_use]
    pub fn new(options: InferenceOptions, call_patterns: CallPatternRegistry) -> Self {
        Self {
            options,
            call_patterns,
        }
    }

    #[must_use]
    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    #[must_use]
    pub fn call_patterns(&self) -> &CallPatternRegistry {
        &self.call_patterns
    }

    /// Infers the descriptor of node `id`. Unknown ids and unmapped kinds give `unknown`.
    #[must_use]
    pub fn infer(&self, arena: &Arena, id: u32) -> TypeDescriptor {
        self.infer_node(arena, id, 0, &mut Walk::default())
    }

    fn infer_node(
        &self,
        arena: &Arena,
        id: u32,
        depth: usize,
        walk: &mut Walk,
    ) -> TypeDescriptor {
        if let Some(done) = walk.finished.get(&id) {
            return done.clone();
        }
        if depth > self.options.max_depth {
            log::debug!("depth limit reached at node {id}");
            return TypeDescriptor::Unknown;
        }
        let Some(node) = arena.find_node(id) else {
            return TypeDescriptor::Unknown;
        };
        if !walk.in_progress.insert(id) {
            log::debug!("node {id} references itself");
            return TypeDescriptor::Unknown;
        }
        let descriptor = self.infer_kind(arena, node, depth + 1, walk);
        walk.in_progress.remove(&id);
        walk.finished.insert(id, descriptor.clone());
        descriptor
    }

    fn infer_kind(
        &self,
        arena: &Arena,
        node: &SyntaxNode,
        depth: usize,
        walk: &mut Walk,
    ) -> TypeDescriptor {
        match &node.kind {
            NodeKind::VariableDeclaration { declarations, .. } => TypeDescriptor::union(
                declarations
                    .iter()
                    .map(|declarator| self.infer_node(arena, *declarator, depth, walk))
                    .collect(),
            ),
            NodeKind::VariableDeclarator { init, .. } => init
                .map_or(TypeDescriptor::Unknown, |init| {
                    self.infer_node(arena, init, depth, walk)
                }),
            NodeKind::Literal { value, .. } => Self::infer_literal(value),
            NodeKind::ArrayExpression { elements } => {
                self.infer_array(arena, elements.iter().flatten().copied(), depth, walk)
            }
            NodeKind::ObjectExpression { properties } => {
                self.infer_object(arena, properties, depth, walk)
            }
            NodeKind::ArrowFunctionExpression { params, body, .. } => {
                self.infer_arrow_function(arena, params, *body, depth, walk)
            }
            NodeKind::ConditionalExpression {
                consequent,
                alternate,
                ..
            } => {
                let consequent = self.infer_node(arena, *consequent, depth, walk);
                let alternate = self.infer_node(arena, *alternate, depth, walk);
                if self.options.collapse_equal_branches && consequent == alternate {
                    consequent
                } else {
                    TypeDescriptor::union(vec![consequent, alternate])
                }
            }
            NodeKind::BinaryExpression { left, right, .. } => {
                let left = self.infer_node(arena, *left, depth, walk);
                let right = self.infer_node(arena, *right, depth, walk);
                if left == right {
                    left
                } else {
                    match self.options.binary_mismatch {
                        BinaryMismatch::Union => TypeDescriptor::union(vec![left, right]),
                        BinaryMismatch::Unknown => TypeDescriptor::Unknown,
                    }
                }
            }
            NodeKind::CallExpression { callee, .. } => {
                match Self::callee_path(arena, *callee, self.options.max_depth) {
                    Some(path) => self.call_patterns.resolve(&path).unwrap_or_else(|| {
                        log::debug!("no call pattern for `{path}`");
                        TypeDescriptor::Unknown
                    }),
                    None => TypeDescriptor::Unknown,
                }
            }
            NodeKind::Program { .. }
            | NodeKind::ExpressionStatement { .. }
            | NodeKind::BlockStatement { .. }
            | NodeKind::ReturnStatement { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::Property { .. }
            | NodeKind::SpreadElement { .. }
            | NodeKind::Parameter { .. }
            | NodeKind::MemberExpression { .. }
            | NodeKind::TemplateLiteral { .. }
            | NodeKind::UnaryExpression { .. }
            | NodeKind::AsExpression { .. }
            | NodeKind::TypeAnnotation { .. }
            | NodeKind::Other { .. } => TypeDescriptor::Unknown,
        }
    }

    fn infer_literal(value: &LiteralValue) -> TypeDescriptor {
        match value {
            LiteralValue::String(_) => TypeDescriptor::Primitive(Primitive::String),
            LiteralValue::Number(_) => TypeDescriptor::Primitive(Primitive::Number),
            LiteralValue::Boolean(_) => TypeDescriptor::Primitive(Primitive::Boolean),
            LiteralValue::Null => TypeDescriptor::Primitive(Primitive::Null),
            LiteralValue::BigInt(_) => TypeDescriptor::Primitive(Primitive::BigInt),
            LiteralValue::RegExp(_) => TypeDescriptor::Named("RegExp".to_string()),
        }
    }

    fn infer_array(
        &self,
        arena: &Arena,
        elements: impl Iterator<Item = u32>,
        depth: usize,
        walk: &mut Walk,
    ) -> TypeDescriptor {
        let mut distinct: Vec<TypeDescriptor> = Vec::new();
        for element in elements {
            let ty = self.infer_node(arena, element, depth, walk);
            if !distinct.contains(&ty) {
                distinct.push(ty);
            }
        }
        match distinct.len() {
            0 => TypeDescriptor::array(TypeDescriptor::Unknown),
            1 => TypeDescriptor::array(distinct.remove(0)),
            _ => TypeDescriptor::GenericArray(distinct),
        }
    }

    fn infer_object(
        &self,
        arena: &Arena,
        properties: &[u32],
        depth: usize,
        walk: &mut Walk,
    ) -> TypeDescriptor {
        let mut fields = Vec::with_capacity(properties.len());
        for property in properties {
            let Some(SyntaxNode {
                kind:
                    NodeKind::Property {
                        key,
                        value,
                        computed,
                        ..
                    },
                ..
            }) = arena.find_node(*property)
            else {
                // spread elements and malformed members contribute no field
                continue;
            };
            let Some(key) = Self::property_key(arena, *key, *computed) else {
                continue;
            };
            fields.push((key, self.infer_node(arena, *value, depth, walk)));
        }
        TypeDescriptor::Record(fields)
    }

    /// Identifier keys by name; literal keys by value, quoted as written when the value is
    /// not a valid identifier. Computed keys only resolve when they are literals.
    fn property_key(arena: &Arena, key: u32, computed: bool) -> Option<String> {
        match &arena.find_node(key)?.kind {
            NodeKind::Identifier { name } if !computed => Some(name.clone()),
            NodeKind::Literal { value, raw } => {
                let text = value.key_text();
                if matches!(value, LiteralValue::String(_)) && !is_identifier(&text) {
                    Some(raw.clone())
                } else {
                    Some(text)
                }
            }
            _ => None,
        }
    }

    fn infer_arrow_function(
        &self,
        arena: &Arena,
        params: &[u32],
        body: ArrowBody,
        depth: usize,
        walk: &mut Walk,
    ) -> TypeDescriptor {
        let placeholder = TypeDescriptor::from_text(&self.options.parameter_placeholder);
        let params = params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let name = Self::parameter_name(arena, *param)
                    .unwrap_or_else(|| format!("p{}", index + 1));
                (name, placeholder.clone())
            })
            .collect();
        let returns = match body {
            ArrowBody::Expression(expression) => self.infer_node(arena, expression, depth, walk),
            ArrowBody::Block(_) => TypeDescriptor::Unknown,
        };
        TypeDescriptor::Function {
            params,
            returns: Box::new(returns),
        }
    }

    fn parameter_name(arena: &Arena, param: u32) -> Option<String> {
        let pattern = match &arena.find_node(param)?.kind {
            NodeKind::Parameter { pattern, .. } => *pattern,
            _ => param,
        };
        match &arena.find_node(pattern)?.kind {
            NodeKind::Identifier { name } => Some(name.clone()),
            _ => None,
        }
    }

    /// Renders `a.b.c` callees as a dotted path. Computed members and any other callee
    /// shape have no path.
    fn callee_path(arena: &Arena, callee: u32, max_depth: usize) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = callee;
        for _ in 0..=max_depth {
            match &arena.find_node(current)?.kind {
                NodeKind::Identifier { name } => {
                    segments.push(name.as_str());
                    segments.reverse();
                    return Some(segments.join("."));
                }
                NodeKind::MemberExpression {
                    object,
                    property,
                    computed: false,
                } => {
                    let NodeKind::Identifier { name } = &arena.find_node(*property)?.kind else {
                        return None;
                    };
                    segments.push(name.as_str());
                    current = *object;
                }
                _ => return None,
            }
        }
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
