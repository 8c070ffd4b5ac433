mod error;
mod grammar;

pub use error::ParseError;

use crate::Predicate;

/// Parse predicate shorthand into a [`Predicate`].
///
/// ```
/// use rulesmith::{parse, Combinator};
///
/// let p = parse::parse("$owner == request.auth.uid OR false").unwrap();
/// assert_eq!(p.combinator, Combinator::Or);
/// ```
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid shorthand.
pub fn parse(input: &str) -> Result<Predicate, ParseError> {
    use winnow::Parser;
    grammar::parse_predicate
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string(), e.offset()))
}
