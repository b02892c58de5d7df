//! AST builder that converts tree-sitter concrete syntax trees (CST) into arena nodes.
//!
//! The `Builder` processes a tree produced by the `tree-sitter-typescript` grammar and
//! constructs an ESTree-shaped syntax tree stored in an [`Arena`]. It handles:
//!
//! - Mapping CST node kinds to [`NodeKind`] variants
//! - Assigning sequential ids to each node (starting from 1)
//! - Unwrapping parenthesized expressions and dropping comments
//! - Rejecting trees that contain ERROR or MISSING nodes
//! - Rejecting trees nested deeper than [`MAX_NESTING_DEPTH`]
//! - Extracting source location information
//!
//! # Example
//!
//! ```no_run
//! use retype_ast::builder::Builder;
//! use tree_sitter::Parser;
//!
//! let source = "const xs: any = [1, 2, 3];";
//! let mut parser = Parser::new();
//! parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()).unwrap();
//! let tree = parser.parse(source, None).unwrap();
//!
//! let mut builder = Builder::new();
//! builder.add_source_code(tree.root_node(), source.as_bytes());
//! let arena = builder.build_ast().unwrap();
//! ```
//!
//! # Coverage
//!
//! Constructs the type inference engine understands get dedicated variants. Everything
//! else becomes [`NodeKind::Other`], which keeps the tree-sitter kind name and its
//! named children, so range lookups still reach nodes nested inside unsupported
//! statements such as `if` blocks or function declarations.
//!
//! Parent links are not written here; run [`crate::parents::augment`] afterwards.

use tree_sitter::Node;

use crate::{
    arena::Arena,
    errors::AstError,
    nodes::{
        ArrowBody, BinaryOperator, DeclarationKind, LiteralValue, Location, NodeKind,
        UnaryOperator,
    },
};

/// Deepest CST nesting accepted by [`Builder::build_ast`]. Building recurses once per
/// level, so this also bounds the stack the builder uses.
pub const MAX_NESTING_DEPTH: usize = 256;

pub struct Builder<'a> {
    arena: Arena,
    source_code: Option<(Node<'a>, &'a [u8])>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            source_code: None,
        }
    }

    /// Sets the CST root and the source text it was parsed from.
    pub fn add_source_code(&mut self, root: Node<'a>, code: &'a [u8]) {
        self.source_code = Some((root, code));
    }

    /// Builds the arena from the registered root node.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnexpectedRoot`] if no `program` root was registered and
    /// [`AstError::SyntaxError`] if the CST contains ERROR or MISSING nodes, and
    /// [`AstError::TooDeep`] if it nests deeper than [`MAX_NESTING_DEPTH`].
    pub fn build_ast(&mut self) -> Result<Arena, AstError> {
        let Some((root, code)) = self.source_code else {
            return Err(AstError::UnexpectedRoot("<none>".to_string()));
        };
        if root.kind() != "program" {
            return Err(AstError::UnexpectedRoot(root.kind().to_string()));
        }
        Self::collect_errors(&root, code)?;
        Self::check_depth(&root)?;

        let body = Self::named_children(&root)
            .iter()
            .map(|child| self.build_node(child, code))
            .collect();
        let id = self
            .arena
            .alloc(Self::get_location(&root), NodeKind::Program { body });
        self.arena.set_root(id);
        log::debug!("built syntax tree with {} node(s)", self.arena.len());
        Ok(std::mem::take(&mut self.arena))
    }

    fn build_node(&mut self, node: &Node, code: &[u8]) -> u32 {
        match node.kind() {
            // statements
            "lexical_declaration" | "variable_declaration" => {
                self.build_variable_declaration(node, code)
            }
            "variable_declarator" => self.build_variable_declarator(node, code),
            "expression_statement" => match Self::named_children(node).first() {
                Some(expression) => {
                    let expression = self.build_node(expression, code);
                    self.alloc(node, NodeKind::ExpressionStatement { expression })
                }
                None => self.build_other(node, code),
            },
            "statement_block" => {
                let body = self.build_children(node, code);
                self.alloc(node, NodeKind::BlockStatement { body })
            }
            "return_statement" => {
                let argument = Self::named_children(node)
                    .first()
                    .map(|argument| self.build_node(argument, code));
                self.alloc(node, NodeKind::ReturnStatement { argument })
            }

            // literals
            "string" => {
                let raw = Self::text(node, code);
                let value = Self::unquote(&raw);
                self.alloc(
                    node,
                    NodeKind::Literal {
                        value: LiteralValue::String(value),
                        raw,
                    },
                )
            }
            "number" => {
                let raw = Self::text(node, code);
                let value = if raw.ends_with('n') {
                    LiteralValue::BigInt(raw.clone())
                } else {
                    LiteralValue::Number(raw.clone())
                };
                self.alloc(node, NodeKind::Literal { value, raw })
            }
            "true" | "false" => {
                let raw = Self::text(node, code);
                let value = LiteralValue::Boolean(raw == "true");
                self.alloc(node, NodeKind::Literal { value, raw })
            }
            "null" => self.alloc(
                node,
                NodeKind::Literal {
                    value: LiteralValue::Null,
                    raw: "null".to_string(),
                },
            ),
            "regex" => {
                let raw = Self::text(node, code);
                self.alloc(
                    node,
                    NodeKind::Literal {
                        value: LiteralValue::RegExp(raw.clone()),
                        raw,
                    },
                )
            }
            "template_string" => {
                let mut expressions = Vec::new();
                for substitution in Self::named_children(node)
                    .iter()
                    .filter(|child| child.kind() == "template_substitution")
                {
                    for expression in Self::named_children(substitution) {
                        expressions.push(self.build_node(&expression, code));
                    }
                }
                self.alloc(node, NodeKind::TemplateLiteral { expressions })
            }

            // names
            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "private_property_identifier"
            | "undefined"
            | "this" => {
                let name = Self::text(node, code);
                self.alloc(node, NodeKind::Identifier { name })
            }

            // expressions
            "array" => self.build_array_expression(node, code),
            "object" => self.build_object_expression(node, code),
            "spread_element" => match Self::named_children(node).first() {
                Some(argument) => {
                    let argument = self.build_node(argument, code);
                    self.alloc(node, NodeKind::SpreadElement { argument })
                }
                None => self.build_other(node, code),
            },
            "arrow_function" => self.build_arrow_function(node, code),
            "ternary_expression" => {
                let fields = (
                    node.child_by_field_name("condition"),
                    node.child_by_field_name("consequence"),
                    node.child_by_field_name("alternative"),
                );
                match fields {
                    (Some(test), Some(consequent), Some(alternate)) => {
                        let test = self.build_node(&test, code);
                        let consequent = self.build_node(&consequent, code);
                        let alternate = self.build_node(&alternate, code);
                        self.alloc(
                            node,
                            NodeKind::ConditionalExpression {
                                test,
                                consequent,
                                alternate,
                            },
                        )
                    }
                    _ => self.build_other(node, code),
                }
            }
            "binary_expression" => self.build_binary_expression(node, code),
            "unary_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .and_then(|op| op.kind().parse::<UnaryOperator>().ok());
                match (operator, node.child_by_field_name("argument")) {
                    (Some(operator), Some(argument)) => {
                        let argument = self.build_node(&argument, code);
                        self.alloc(node, NodeKind::UnaryExpression { operator, argument })
                    }
                    _ => self.build_other(node, code),
                }
            }
            "call_expression" => self.build_call_expression(node, code),
            "member_expression" | "subscript_expression" => {
                let computed = node.kind() == "subscript_expression";
                let property_field = if computed { "index" } else { "property" };
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name(property_field),
                ) {
                    (Some(object), Some(property)) => {
                        let object = self.build_node(&object, code);
                        let property = self.build_node(&property, code);
                        self.alloc(
                            node,
                            NodeKind::MemberExpression {
                                object,
                                property,
                                computed,
                            },
                        )
                    }
                    _ => self.build_other(node, code),
                }
            }
            "parenthesized_expression" => match Self::named_children(node).as_slice() {
                [inner] => self.build_node(inner, code),
                _ => self.build_other(node, code),
            },
            "as_expression" => {
                let children = Self::named_children(node);
                match (children.first(), children.last()) {
                    (Some(expression), Some(ty)) if children.len() == 2 => {
                        let expression = self.build_node(expression, code);
                        let type_annotation = self.build_type(ty, code);
                        self.alloc(
                            node,
                            NodeKind::AsExpression {
                                expression,
                                type_annotation,
                            },
                        )
                    }
                    _ => self.build_other(node, code),
                }
            }
            "type_annotation" => match Self::named_children(node).first() {
                Some(ty) => self.build_type(ty, code),
                None => self.build_type(node, code),
            },
            _ => self.build_other(node, code),
        }
    }

    fn build_variable_declaration(&mut self, node: &Node, code: &[u8]) -> u32 {
        let keyword = node.child_by_field_name("kind").or_else(|| {
            let mut cursor = node.walk();
            node.children(&mut cursor).next()
        });
        let kind = match keyword.map(|keyword| Self::text(&keyword, code)).as_deref() {
            Some("const") => DeclarationKind::Const,
            Some("let") => DeclarationKind::Let,
            _ => DeclarationKind::Var,
        };
        let declarations = Self::named_children(node)
            .iter()
            .filter(|child| child.kind() == "variable_declarator")
            .map(|child| self.build_variable_declarator(child, code))
            .collect();
        self.alloc(node, NodeKind::VariableDeclaration { kind, declarations })
    }

    fn build_variable_declarator(&mut self, node: &Node, code: &[u8]) -> u32 {
        let Some(name) = node.child_by_field_name("name") else {
            return self.build_other(node, code);
        };
        let id = self.build_node(&name, code);
        let type_annotation = node
            .child_by_field_name("type")
            .map(|ty| self.build_node(&ty, code));
        let init = node
            .child_by_field_name("value")
            .map(|value| self.build_node(&value, code));
        self.alloc(
            node,
            NodeKind::VariableDeclarator {
                id,
                type_annotation,
                init,
            },
        )
    }

    /// Elided elements have no CST node; they are recovered from consecutive commas.
    fn build_array_expression(&mut self, node: &Node, code: &[u8]) -> u32 {
        let mut elements = Vec::new();
        let mut expecting_element = true;
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in &children {
            match child.kind() {
                "[" | "]" | "comment" => {}
                "," => {
                    if expecting_element {
                        elements.push(None);
                    }
                    expecting_element = true;
                }
                _ => {
                    elements.push(Some(self.build_node(child, code)));
                    expecting_element = false;
                }
            }
        }
        self.alloc(node, NodeKind::ArrayExpression { elements })
    }

    fn build_object_expression(&mut self, node: &Node, code: &[u8]) -> u32 {
        let mut properties = Vec::new();
        for child in Self::named_children(node) {
            let property = match child.kind() {
                "pair" => {
                    match (
                        child.child_by_field_name("key"),
                        child.child_by_field_name("value"),
                    ) {
                        (Some(key), Some(value)) => {
                            let (key, computed) = self.build_property_key(&key, code);
                            let value = self.build_node(&value, code);
                            self.alloc(
                                &child,
                                NodeKind::Property {
                                    key,
                                    value,
                                    computed,
                                    shorthand: false,
                                    method: false,
                                },
                            )
                        }
                        _ => self.build_other(&child, code),
                    }
                }
                "shorthand_property_identifier" => {
                    let name = self.build_node(&child, code);
                    self.alloc(
                        &child,
                        NodeKind::Property {
                            key: name,
                            value: name,
                            computed: false,
                            shorthand: true,
                            method: false,
                        },
                    )
                }
                "method_definition" => match child.child_by_field_name("name") {
                    Some(name) => {
                        let (key, computed) = self.build_property_key(&name, code);
                        let value = self.build_other(&child, code);
                        self.alloc(
                            &child,
                            NodeKind::Property {
                                key,
                                value,
                                computed,
                                shorthand: false,
                                method: true,
                            },
                        )
                    }
                    None => self.build_other(&child, code),
                },
                _ => self.build_node(&child, code),
            };
            properties.push(property);
        }
        self.alloc(node, NodeKind::ObjectExpression { properties })
    }

    fn build_property_key(&mut self, key: &Node, code: &[u8]) -> (u32, bool) {
        if key.kind() == "computed_property_name" {
            if let Some(inner) = Self::named_children(key).first() {
                return (self.build_node(inner, code), true);
            }
        }
        (self.build_node(key, code), false)
    }

    fn build_arrow_function(&mut self, node: &Node, code: &[u8]) -> u32 {
        let mut params = Vec::new();
        if let Some(parameter) = node.child_by_field_name("parameter") {
            let pattern = self.build_node(&parameter, code);
            params.push(self.alloc(
                &parameter,
                NodeKind::Parameter {
                    pattern,
                    type_annotation: None,
                    default: None,
                },
            ));
        } else if let Some(parameters) = node.child_by_field_name("parameters") {
            for parameter in Self::named_children(&parameters) {
                params.push(self.build_parameter(&parameter, code));
            }
        }
        let return_type = node
            .child_by_field_name("return_type")
            .map(|ty| self.build_node(&ty, code));
        let Some(body_node) = node.child_by_field_name("body") else {
            return self.build_other(node, code);
        };
        let body_id = self.build_node(&body_node, code);
        let body = if body_node.kind() == "statement_block" {
            ArrowBody::Block(body_id)
        } else {
            ArrowBody::Expression(body_id)
        };
        self.alloc(
            node,
            NodeKind::ArrowFunctionExpression {
                params,
                body,
                return_type,
            },
        )
    }

    fn build_parameter(&mut self, node: &Node, code: &[u8]) -> u32 {
        let kind = match node.kind() {
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = node.child_by_field_name("pattern") else {
                    return self.build_other(node, code);
                };
                let pattern = self.build_node(&pattern, code);
                let type_annotation = node
                    .child_by_field_name("type")
                    .map(|ty| self.build_node(&ty, code));
                let default = node
                    .child_by_field_name("value")
                    .map(|value| self.build_node(&value, code));
                NodeKind::Parameter {
                    pattern,
                    type_annotation,
                    default,
                }
            }
            "assignment_pattern" => {
                let Some(left) = node.child_by_field_name("left") else {
                    return self.build_other(node, code);
                };
                let pattern = self.build_node(&left, code);
                let default = node
                    .child_by_field_name("right")
                    .map(|right| self.build_node(&right, code));
                NodeKind::Parameter {
                    pattern,
                    type_annotation: None,
                    default,
                }
            }
            _ => NodeKind::Parameter {
                pattern: self.build_node(node, code),
                type_annotation: None,
                default: None,
            },
        };
        self.alloc(node, kind)
    }

    fn build_binary_expression(&mut self, node: &Node, code: &[u8]) -> u32 {
        let operator = node
            .child_by_field_name("operator")
            .and_then(|op| op.kind().parse::<BinaryOperator>().ok());
        match (
            operator,
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) {
            (Some(operator), Some(left), Some(right)) => {
                let left = self.build_node(&left, code);
                let right = self.build_node(&right, code);
                self.alloc(
                    node,
                    NodeKind::BinaryExpression {
                        operator,
                        left,
                        right,
                    },
                )
            }
            _ => self.build_other(node, code),
        }
    }

    fn build_call_expression(&mut self, node: &Node, code: &[u8]) -> u32 {
        let Some(function) = node.child_by_field_name("function") else {
            return self.build_other(node, code);
        };
        let callee = self.build_node(&function, code);
        let arguments = match node.child_by_field_name("arguments") {
            Some(arguments) if arguments.kind() == "arguments" => {
                self.build_children(&arguments, code)
            }
            Some(template) => vec![self.build_node(&template, code)],
            None => vec![],
        };
        self.alloc(node, NodeKind::CallExpression { callee, arguments })
    }

    /// Types are leaves: only their text and span are kept.
    fn build_type(&mut self, node: &Node, code: &[u8]) -> u32 {
        let text = Self::text(node, code);
        self.alloc(node, NodeKind::TypeAnnotation { text })
    }

    fn build_other(&mut self, node: &Node, code: &[u8]) -> u32 {
        let children = self.build_children(node, code);
        self.alloc(
            node,
            NodeKind::Other {
                kind: node.kind().to_string(),
                children,
            },
        )
    }

    fn build_children(&mut self, node: &Node, code: &[u8]) -> Vec<u32> {
        Self::named_children(node)
            .iter()
            .map(|child| self.build_node(child, code))
            .collect()
    }

    fn alloc(&mut self, node: &Node, kind: NodeKind) -> u32 {
        self.arena.alloc(Self::get_location(node), kind)
    }

    fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn text(node: &Node, code: &[u8]) -> String {
        node.utf8_text(code).unwrap_or_default().to_string()
    }

    fn unquote(raw: &str) -> String {
        let mut chars = raw.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open @ ('"' | '\'')), Some(close)) if open == close => {
                chars.as_str().to_string()
            }
            _ => raw.to_string(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn get_location(node: &Node) -> Location {
        let start_position = node.start_position();
        let end_position = node.end_position();
        Location {
            offset_start: node.start_byte() as u32,
            offset_end: node.end_byte() as u32,
            start_line: start_position.row as u32 + 1,
            start_column: start_position.column as u32,
            end_line: end_position.row as u32 + 1,
            end_column: end_position.column as u32,
        }
    }

    /// Iterative walk, so arbitrarily deep input is rejected before any recursion starts.
    fn check_depth(root: &Node) -> Result<(), AstError> {
        let mut stack = vec![(*root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > MAX_NESTING_DEPTH {
                return Err(AstError::TooDeep {
                    location: Self::get_location(&node),
                    limit: MAX_NESTING_DEPTH,
                });
            }
            let mut cursor = node.walk();
            stack.extend(
                node.named_children(&mut cursor)
                    .map(|child| (child, depth + 1)),
            );
        }
        Ok(())
    }

    /// Walks the whole CST and fails on the first ERROR or MISSING node.
    fn collect_errors(root: &Node, code: &[u8]) -> Result<(), AstError> {
        if !root.has_error() {
            return Ok(());
        }
        let mut errors = Vec::new();
        let mut stack = vec![*root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                errors.push(node);
                continue;
            }
            if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }
        let Some(first) = errors.first() else {
            return Ok(());
        };
        for error in &errors {
            log::debug!(
                "syntax error at {}: {}",
                Self::get_location(error),
                error.kind()
            );
        }
        let location = Self::get_location(first);
        let snippet = String::from_utf8_lossy(
            &code[location.offset_start as usize..location.offset_end as usize],
        );
        Err(AstError::SyntaxError {
            location,
            snippet: snippet.chars().take(30).collect(),
            total: errors.len(),
        })
    }
}
