//! Type Descriptors
//!
//! This module defines the structured form of the type text produced by the engine.
//!
//! A [`TypeDescriptor`] renders (via `Display`) to a TypeScript type expression:
//! - Primitives: `string`, `number`, `boolean`, `null`, `bigint`
//! - Homogeneous arrays: `T[]`
//! - Heterogeneous arrays: `Array<A | B>`
//! - Structural records: `{ k1: T1; k2: T2 }`
//! - Arrow function types: `(a: unknown) => T`
//! - Unions: `A | B`
//! - Fixed text from the call-pattern registry, and the `unknown` fallback
//!
//! Rendering adds parentheses where TypeScript precedence requires them, so the output
//! can be pasted over a placeholder without further checks.

use core::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    BigInt,
}

impl Primitive {
    pub const ALL: &'static [Primitive] = &[
        Primitive::String,
        Primitive::Number,
        Primitive::Boolean,
        Primitive::Null,
        Primitive::BigInt,
    ];

    #[must_use = "returns the string representation without modifying self"]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::BigInt => "bigint",
        }
    }
}

impl std::str::FromStr for Primitive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|primitive| primitive.as_str() == s)
            .copied()
            .ok_or(())
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Hash, Default)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// `T[]`
    Array(Box<TypeDescriptor>),
    /// `Array<A | B>`, members in first-seen order.
    GenericArray(Vec<TypeDescriptor>),
    /// `{ k: T; ... }`, fields in declaration order.
    Record(Vec<(String, TypeDescriptor)>),
    /// `(p: T) => R`
    Function {
        params: Vec<(String, TypeDescriptor)>,
        returns: Box<TypeDescriptor>,
    },
    /// `A | B`. Never nested and never a single member; build with [`TypeDescriptor::union`].
    Union(Vec<TypeDescriptor>),
    /// Verbatim type text, e.g. `HTMLElement | null` or `RegExp`.
    Named(String),
    #[default]
    Unknown,
}

impl TypeDescriptor {
    #[must_use]
    pub fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::Primitive(Primitive::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    #[must_use]
    pub fn null() -> Self {
        Self::Primitive(Primitive::Null)
    }

    #[must_use]
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// Builds a descriptor from type text, recognising primitives and `unknown`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text == "unknown" {
            return Self::Unknown;
        }
        text.parse::<Primitive>()
            .map_or_else(|()| Self::Named(text.to_string()), Self::Primitive)
    }

    /// Joins members positionally, flattening nested unions. Duplicates are kept.
    /// No members yields `unknown`; one member yields that member.
    #[must_use]
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Unknown,
            1 => flat.pop().unwrap_or_default(),
            _ => Self::Union(flat),
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    fn is_function_like(&self) -> bool {
        match self {
            Self::Function { .. } => true,
            Self::Named(text) => text.contains("=>"),
            _ => false,
        }
    }

    fn is_union_like(&self) -> bool {
        match self {
            Self::Union(_) => true,
            Self::Named(text) => text.contains('|'),
            _ => false,
        }
    }

    fn fmt_array_element(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_function_like() || self.is_union_like() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }

    fn fmt_union_member(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_function_like() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{}", primitive.as_str()),
            Self::Array(element) => {
                element.fmt_array_element(f)?;
                write!(f, "[]")
            }
            Self::GenericArray(members) => {
                write!(f, "Array<")?;
                fmt_separated(f, members, " | ", Self::fmt_union_member)?;
                write!(f, ">")
            }
            Self::Record(fields) => {
                if fields.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{key}: {ty}")?;
                }
                write!(f, " }}")
            }
            Self::Function { params, returns } => {
                write!(f, "(")?;
                for (i, (name, ty)) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, ") => {returns}")
            }
            Self::Union(members) => fmt_separated(f, members, " | ", Self::fmt_union_member),
            Self::Named(text) => write!(f, "{text}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

fn fmt_separated(
    f: &mut Formatter,
    items: &[TypeDescriptor],
    separator: &str,
    fmt_item: fn(&TypeDescriptor, &mut Formatter) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        fmt_item(item, f)?;
    }
    Ok(())
}
