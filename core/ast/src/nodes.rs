use core::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A point in the parser's coordinate system: 1-indexed line, 0-indexed byte column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source span of a node.
///
/// Lines are 1-indexed and columns are 0-indexed byte columns, following the
/// ESTree `loc` convention. Host ranges use 0-indexed lines and must be
/// converted before being compared against a `Location`
/// (see [`crate::locator::SourceRange`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    pub offset_start: u32,
    pub offset_end: u32,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Location {
    #[must_use]
    pub fn new(
        offset_start: u32,
        offset_end: u32,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            offset_start,
            offset_end,
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    #[must_use]
    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }

    /// Whether `[start, end]` lies within this span. Positions compare
    /// line first, so spans covering several lines are handled correctly.
    #[must_use]
    pub fn contains(&self, start: Position, end: Position) -> bool {
        self.start() <= start && end <= self.end() && start <= end
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    /// Raw numeric text, kept unparsed.
    Number(String),
    Boolean(bool),
    Null,
    BigInt(String),
    RegExp(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    StrictEq,
    Ne,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    NullishCoalescing,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UnsignedShr,
    In,
    InstanceOf,
}

impl BinaryOperator {
    pub const ALL: &'static [BinaryOperator] = &[
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Mod,
        BinaryOperator::Pow,
        BinaryOperator::Eq,
        BinaryOperator::StrictEq,
        BinaryOperator::Ne,
        BinaryOperator::StrictNe,
        BinaryOperator::Lt,
        BinaryOperator::Le,
        BinaryOperator::Gt,
        BinaryOperator::Ge,
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::NullishCoalescing,
        BinaryOperator::BitAnd,
        BinaryOperator::BitOr,
        BinaryOperator::BitXor,
        BinaryOperator::Shl,
        BinaryOperator::Shr,
        BinaryOperator::UnsignedShr,
        BinaryOperator::In,
        BinaryOperator::InstanceOf,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::Eq => "==",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::Ne => "!=",
            BinaryOperator::StrictNe => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Shr => ">>",
            BinaryOperator::UnsignedShr => ">>>",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }
}

impl std::str::FromStr for BinaryOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

impl std::str::FromStr for UnaryOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "!" => Ok(UnaryOperator::Not),
            "-" => Ok(UnaryOperator::Minus),
            "+" => Ok(UnaryOperator::Plus),
            "~" => Ok(UnaryOperator::BitNot),
            "typeof" => Ok(UnaryOperator::TypeOf),
            "void" => Ok(UnaryOperator::Void),
            "delete" => Ok(UnaryOperator::Delete),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ArrowBody {
    Expression(u32),
    Block(u32),
}

impl ArrowBody {
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            ArrowBody::Expression(id) | ArrowBody::Block(id) => *id,
        }
    }
}

/// Kind-specific payload of a [`SyntaxNode`]. Children are referenced by node id.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NodeKind {
    Program {
        body: Vec<u32>,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        declarations: Vec<u32>,
    },
    VariableDeclarator {
        id: u32,
        type_annotation: Option<u32>,
        init: Option<u32>,
    },
    ExpressionStatement {
        expression: u32,
    },
    BlockStatement {
        body: Vec<u32>,
    },
    ReturnStatement {
        argument: Option<u32>,
    },
    Literal {
        value: LiteralValue,
        raw: String,
    },
    Identifier {
        name: String,
    },
    ArrayExpression {
        /// `None` marks an elided element (`[1, , 2]`).
        elements: Vec<Option<u32>>,
    },
    ObjectExpression {
        properties: Vec<u32>,
    },
    /// An object member. For shorthand members `key` and `value` are the same node.
    Property {
        key: u32,
        value: u32,
        computed: bool,
        shorthand: bool,
        method: bool,
    },
    SpreadElement {
        argument: u32,
    },
    ArrowFunctionExpression {
        params: Vec<u32>,
        body: ArrowBody,
        return_type: Option<u32>,
    },
    Parameter {
        pattern: u32,
        type_annotation: Option<u32>,
        default: Option<u32>,
    },
    ConditionalExpression {
        test: u32,
        consequent: u32,
        alternate: u32,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: u32,
        right: u32,
    },
    CallExpression {
        callee: u32,
        arguments: Vec<u32>,
    },
    MemberExpression {
        object: u32,
        property: u32,
        computed: bool,
    },
    TemplateLiteral {
        expressions: Vec<u32>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        argument: u32,
    },
    /// `expression as T`
    AsExpression {
        expression: u32,
        type_annotation: u32,
    },
    /// A TypeScript type in annotation position; `text` is the type's source text.
    TypeAnnotation {
        text: String,
    },
    /// Any construct without a dedicated variant. `kind` is the tree-sitter kind.
    Other {
        kind: String,
        children: Vec<u32>,
    },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: u32,
    pub location: Location,
    pub kind: NodeKind,
    /// Navigation-only link to the enclosing node, written by [`crate::parents::augment`].
    pub parent: Option<u32>,
}
