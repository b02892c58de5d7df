use super::nodes::{LiteralValue, Location, NodeKind, SyntaxNode};

impl SyntaxNode {
    #[must_use]
    pub fn new(id: u32, location: Location, kind: NodeKind) -> Self {
        SyntaxNode {
            id,
            location,
            kind,
            parent: None,
        }
    }

    #[must_use]
    pub fn children(&self) -> Vec<u32> {
        self.kind.children()
    }

    #[must_use]
    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }
}

impl NodeKind {
    /// Declared children in source order. Shared children are listed once per reference.
    #[must_use]
    pub fn children(&self) -> Vec<u32> {
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => body.clone(),
            NodeKind::VariableDeclaration { declarations, .. } => declarations.clone(),
            NodeKind::VariableDeclarator {
                id,
                type_annotation,
                init,
            } => std::iter::once(*id)
                .chain(*type_annotation)
                .chain(*init)
                .collect(),
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::ReturnStatement { argument } => argument.iter().copied().collect(),
            NodeKind::Literal { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::TypeAnnotation { .. } => vec![],
            NodeKind::ArrayExpression { elements } => elements.iter().flatten().copied().collect(),
            NodeKind::ObjectExpression { properties } => properties.clone(),
            NodeKind::Property { key, value, .. } => vec![*key, *value],
            NodeKind::SpreadElement { argument } => vec![*argument],
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                return_type,
            } => params
                .iter()
                .copied()
                .chain(*return_type)
                .chain(std::iter::once(body.id()))
                .collect(),
            NodeKind::Parameter {
                pattern,
                type_annotation,
                default,
            } => std::iter::once(*pattern)
                .chain(*type_annotation)
                .chain(*default)
                .collect(),
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            NodeKind::BinaryExpression { left, right, .. } => vec![*left, *right],
            NodeKind::CallExpression { callee, arguments } => std::iter::once(*callee)
                .chain(arguments.iter().copied())
                .collect(),
            NodeKind::MemberExpression {
                object, property, ..
            } => vec![*object, *property],
            NodeKind::TemplateLiteral { expressions } => expressions.clone(),
            NodeKind::UnaryExpression { argument, .. } => vec![*argument],
            NodeKind::AsExpression {
                expression,
                type_annotation,
            } => vec![*expression, *type_annotation],
            NodeKind::Other { children, .. } => children.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeKind::Parameter { .. } => "Parameter",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::AsExpression { .. } => "AsExpression",
            NodeKind::TypeAnnotation { .. } => "TypeAnnotation",
            NodeKind::Other { kind, .. } => kind,
        }
    }
}

impl LiteralValue {
    /// The literal rendered as property-key text: strings without quotes, numbers as written.
    #[must_use]
    pub fn key_text(&self) -> String {
        match self {
            LiteralValue::String(value)
            | LiteralValue::Number(value)
            | LiteralValue::BigInt(value)
            | LiteralValue::RegExp(value) => value.clone(),
            LiteralValue::Boolean(value) => value.to_string(),
            LiteralValue::Null => "null".to_string(),
        }
    }
}
