use super::error::BuildError;
use super::predicate::Combinator;

/// A child of a [`Resolved`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTerm {
    Expr(String),
    Node(Resolved),
}

impl ResolvedTerm {
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, ResolvedTerm::Expr(s) if s.trim().is_empty())
    }
}

impl From<Resolved> for ResolvedTerm {
    fn from(v: Resolved) -> Self {
        ResolvedTerm::Node(v)
    }
}

impl From<String> for ResolvedTerm {
    fn from(v: String) -> Self {
        ResolvedTerm::Expr(v)
    }
}

impl From<&str> for ResolvedTerm {
    fn from(v: &str) -> Self {
        ResolvedTerm::Expr(v.to_owned())
    }
}

/// A predicate tree whose leaves are all plain expression strings.
///
/// Produced by [`Predicate::resolve`](super::Predicate::resolve) and by the
/// schema builders, consumed by [`render`](Resolved::render).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub combinator: Combinator,
    pub terms: Vec<ResolvedTerm>,
}

impl Resolved {
    #[must_use]
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            terms: Vec::new(),
        }
    }

    #[must_use]
    pub fn and<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResolvedTerm>,
    {
        Self {
            combinator: Combinator::And,
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn or<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResolvedTerm>,
    {
        Self {
            combinator: Combinator::Or,
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, term: impl Into<ResolvedTerm>) {
        self.terms.push(term.into());
    }

    /// True when no terms were collected. Blank terms still count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Render this tree as a single boolean expression.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyPredicate`] if this node, or any node
    /// beneath it, has no usable terms.
    pub fn render(&self) -> Result<String, BuildError> {
        crate::render::render(self)
    }
}
