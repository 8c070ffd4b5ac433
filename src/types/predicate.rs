use std::fmt;

use super::condition::Condition;
use super::error::BuildError;
use super::resolved::Resolved;
use super::scope::Scope;

/// How the children of a [`Predicate`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub(crate) fn joiner(self) -> &'static str {
        match self {
            Combinator::And => " && ",
            Combinator::Or => " || ",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// A child of a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Predicate(Predicate),
    Condition(Condition),
    /// An already-resolved expression. Blank literals are dropped on resolve.
    Literal(String),
}

impl Term {
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Term::Literal(s) if s.trim().is_empty())
    }
}

impl From<Predicate> for Term {
    fn from(v: Predicate) -> Self {
        Term::Predicate(v)
    }
}

impl From<Condition> for Term {
    fn from(v: Condition) -> Self {
        Term::Condition(v)
    }
}

impl From<&str> for Term {
    fn from(v: &str) -> Self {
        Term::Literal(v.to_owned())
    }
}

impl From<String> for Term {
    fn from(v: String) -> Self {
        Term::Literal(v)
    }
}

/// A boolean AND/OR tree over conditions and literal expressions.
///
/// Predicates are built once and never mutated after they are handed to a
/// field or collection. Field references inside them stay symbolic until
/// [`resolve`](Predicate::resolve) rewrites them for a concrete [`Scope`].
///
/// # Example
///
/// ```
/// use rulesmith::{all, sibling, Predicate};
///
/// let owner: Predicate = all([sibling("owner").eq("request.auth.uid")]);
/// assert_eq!(owner.terms.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub combinator: Combinator,
    pub terms: Vec<Term>,
}

impl Predicate {
    #[must_use]
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            terms: Vec::new(),
        }
    }

    /// Append a child term.
    #[must_use]
    pub fn with(mut self, term: impl Into<Term>) -> Self {
        self.terms.push(term.into());
        self
    }

    /// Append a child term if one is present. Absent terms are skipped.
    #[must_use]
    pub fn with_opt<T: Into<Term>>(mut self, term: Option<T>) -> Self {
        if let Some(term) = term {
            self.terms.push(term.into());
        }
        self
    }

    /// Rewrite every field reference against `scope`, producing a tree of
    /// plain expression strings ready for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a reference cannot be resolved in `scope`
    /// or a condition has a blank operand.
    pub fn resolve(&self, scope: &Scope) -> Result<Resolved, BuildError> {
        crate::resolve::resolve(self, scope)
    }

    /// Parse a predicate from its shorthand text form.
    ///
    /// # Errors
    ///
    /// Returns [`RulesmithError::Parse`](crate::RulesmithError::Parse) if the
    /// input is not valid shorthand.
    pub fn from_dsl(input: &str) -> Result<Self, crate::RulesmithError> {
        Ok(crate::parse::parse(input)?)
    }
}

impl From<Condition> for Predicate {
    fn from(v: Condition) -> Self {
        all([v])
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.combinator)?;
            }
            match term {
                Term::Predicate(p) => write!(f, "{p}")?,
                Term::Condition(c) => write!(f, "{c}")?,
                Term::Literal(l) => write!(f, "{l}")?,
            }
        }
        write!(f, ")")
    }
}

/// An AND node over `terms`.
#[must_use]
pub fn all<I, T>(terms: I) -> Predicate
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Predicate {
        combinator: Combinator::And,
        terms: terms.into_iter().map(Into::into).collect(),
    }
}

/// An OR node over `terms`.
#[must_use]
pub fn any<I, T>(terms: I) -> Predicate
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Predicate {
        combinator: Combinator::Or,
        terms: terms.into_iter().map(Into::into).collect(),
    }
}

/// The default access rule: always deny.
#[must_use]
pub fn deny() -> Predicate {
    all(["false"])
}

/// Always allow.
#[must_use]
pub fn allow() -> Predicate {
    all(["true"])
}
