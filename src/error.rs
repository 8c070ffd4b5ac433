use thiserror::Error;

use crate::parse::ParseError;
use crate::BuildError;

/// Unified error type covering parsing, building, and I/O.
///
/// Returned by convenience methods like
/// [`Predicate::from_dsl()`](crate::Predicate::from_dsl) and
/// [`Root::write_to_file()`](crate::Root::write_to_file).
#[derive(Debug, Error)]
pub enum RulesmithError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
