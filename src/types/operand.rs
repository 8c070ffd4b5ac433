use std::fmt;

use super::condition::{Condition, Operator};

/// Names a field relative to the scope a predicate is resolved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// The field that owns the predicate.
    This,
    /// A sibling field on the same document.
    Named(String),
}

/// One side of a [`Condition`].
///
/// Literals are emitted verbatim. Field references and lookups are rewritten
/// into document paths when the owning predicate is resolved against a
/// [`Scope`](super::Scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(String),
    Field(FieldRef),
    /// Reads `attribute` from the document whose path is stored in `via`.
    Lookup { via: FieldRef, attribute: String },
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Literal(v.to_owned())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Literal(v)
    }
}

impl From<FieldRef> for Operand {
    fn from(v: FieldRef) -> Self {
        Operand::Field(v)
    }
}

impl FieldRef {
    pub(crate) fn from_name(name: &str) -> FieldRef {
        if name == "this" {
            FieldRef::This
        } else {
            FieldRef::Named(name.to_owned())
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::This => write!(f, "this"),
            FieldRef::Named(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{v}"),
            Operand::Field(r) => write!(f, "${r}"),
            Operand::Lookup { via, attribute } => write!(f, "@{via}.{attribute}"),
        }
    }
}

impl Operand {
    #[must_use]
    pub fn eq(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Eq, other)
    }

    #[must_use]
    pub fn neq(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Neq, other)
    }

    #[must_use]
    pub fn lt(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Lt, other)
    }

    #[must_use]
    pub fn lte(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Lte, other)
    }

    #[must_use]
    pub fn gt(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Gt, other)
    }

    #[must_use]
    pub fn gte(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Gte, other)
    }

    /// Membership: `self in other`.
    #[must_use]
    pub fn is_in(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::In, other)
    }

    #[must_use]
    pub fn not_in(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::NotIn, other)
    }

    /// Type test: `self is other`.
    #[must_use]
    pub fn is(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::Is, other)
    }

    /// `other` is an element of the list `self`.
    #[must_use]
    pub fn contains(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::ArrayContains, other)
    }

    /// The list `self` shares at least one element with `other`.
    #[must_use]
    pub fn contains_any(self, other: impl Into<Operand>) -> Condition {
        Condition::new(self, Operator::ArrayContainsAny, other)
    }
}

/// The field that owns the predicate being built.
#[must_use]
pub fn this() -> Operand {
    Operand::Field(FieldRef::This)
}

/// A sibling field on the same document.
#[must_use]
pub fn sibling(name: &str) -> Operand {
    Operand::Field(FieldRef::Named(name.to_owned()))
}

/// Reads `attribute` from the foreign document referenced by field `via`.
///
/// `via` may be `"this"` to follow the owning field.
#[must_use]
pub fn lookup(via: &str, attribute: &str) -> Operand {
    Operand::Lookup {
        via: FieldRef::from_name(via),
        attribute: attribute.to_owned(),
    }
}

/// An already-resolved expression, emitted as-is.
#[must_use]
pub fn lit(expr: &str) -> Operand {
    Operand::Literal(expr.to_owned())
}
