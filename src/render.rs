use crate::types::{BuildError, Resolved, ResolvedTerm};

/// Render a resolved tree as one boolean expression.
///
/// Blank terms are dropped first. A node left with no terms is an error, a
/// node with exactly one term renders that term bare, and a node with several
/// terms joins them with its combinator inside a single pair of parentheses.
pub(crate) fn render(rule: &Resolved) -> Result<String, BuildError> {
    let terms: Vec<&ResolvedTerm> = rule.terms.iter().filter(|t| !t.is_blank()).collect();

    match terms.as_slice() {
        [] => Err(BuildError::EmptyPredicate),
        [only] => render_term(only),
        many => {
            let parts = many
                .iter()
                .map(|t| render_term(t))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("({})", parts.join(rule.combinator.joiner())))
        }
    }
}

fn render_term(term: &ResolvedTerm) -> Result<String, BuildError> {
    match term {
        ResolvedTerm::Expr(expr) => Ok(expr.clone()),
        ResolvedTerm::Node(node) => render(node),
    }
}
