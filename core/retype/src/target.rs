//! Maps a located node to the node whose type should replace it.
//!
//! A placeholder selection usually lands on a type annotation, which carries no type
//! information of its own. The value it describes is found through the parent links
//! written by [`retype_ast::parents::augment`].

use retype_ast::{
    arena::Arena,
    nodes::{ArrowBody, NodeKind},
};

use crate::placeholders::PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The range selected an annotation. Holds the node describing the annotated value,
    /// or `None` when the annotation is not a bare placeholder or its owner is not one
    /// of the supported positions.
    Annotation(Option<u32>),
    /// The range selected an expression, which is inferred directly.
    Expression(u32),
}

impl Target {
    #[must_use]
    pub fn node(&self) -> Option<u32> {
        match self {
            Target::Annotation(node) => *node,
            Target::Expression(node) => Some(*node),
        }
    }
}

/// Supported annotation owners:
///
/// - `const x: any = value` infers `value` (through the declarator)
/// - `value as any` infers `value`
/// - `(): any => value` infers `value`
///
/// Everything else, parameter annotations included, resolves to `Annotation(None)`.
#[must_use]
pub fn resolve_target(arena: &Arena, located: u32) -> Target {
    let Some(node) = arena.find_node(located) else {
        return Target::Annotation(None);
    };
    let NodeKind::TypeAnnotation { text } = &node.kind else {
        return Target::Expression(located);
    };
    if text.trim() != PLACEHOLDER {
        log::debug!("annotation `{text}` at {} is not a bare placeholder", node.location);
        return Target::Annotation(None);
    }
    let owner = node.parent.and_then(|parent| arena.find_node(parent));
    let Some(owner) = owner else {
        log::debug!("annotation {located} has no parent; was the arena augmented?");
        return Target::Annotation(None);
    };
    let target = match &owner.kind {
        NodeKind::VariableDeclarator {
            type_annotation: Some(annotation),
            ..
        } if *annotation == located => Some(owner.id),
        NodeKind::AsExpression {
            expression,
            type_annotation,
        } if *type_annotation == located => Some(*expression),
        NodeKind::ArrowFunctionExpression {
            return_type: Some(annotation),
            body: ArrowBody::Expression(body),
            ..
        } if *annotation == located => Some(*body),
        _ => None,
    };
    if target.is_none() {
        log::debug!(
            "placeholder owned by unsupported {} at {}",
            owner.kind_name(),
            owner.location
        );
    }
    Target::Annotation(target)
}
