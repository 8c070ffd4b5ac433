use std::fmt;

use super::operand::Operand;

/// Operators a [`Condition`] can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Is,
    ArrayContains,
    ArrayContainsAny,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::In,
        Operator::NotIn,
        Operator::Is,
        Operator::ArrayContains,
        Operator::ArrayContainsAny,
    ];

    /// Render `left <op> right` in the target rule language.
    ///
    /// Most operators are infix. The negated and list-containment forms have no
    /// infix spelling in the target language and are rewritten.
    #[must_use]
    pub fn apply(self, left: &str, right: &str) -> String {
        match self {
            Operator::NotIn => format!("!({left} in {right})"),
            Operator::ArrayContains => format!("{right} in {left}"),
            Operator::ArrayContainsAny => format!("{left}.hasAny({right})"),
            op => format!("{left} {op} {right}"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "=="),
            Operator::Neq => write!(f, "!="),
            Operator::Lt => write!(f, "<"),
            Operator::Lte => write!(f, "<="),
            Operator::Gt => write!(f, ">"),
            Operator::Gte => write!(f, ">="),
            Operator::In => write!(f, "in"),
            Operator::NotIn => write!(f, "not-in"),
            Operator::Is => write!(f, "is"),
            Operator::ArrayContains => write!(f, "array-contains"),
            Operator::ArrayContainsAny => write!(f, "array-contains-any"),
        }
    }
}

/// A single comparison: `left <op> right`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub left: Operand,
    pub op: Operator,
    pub right: Operand,
}

impl Condition {
    #[must_use]
    pub fn new(left: impl Into<Operand>, op: Operator, right: impl Into<Operand>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
