use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("attempted to render a rule that has no conditions")]
    EmptyPredicate,

    #[error("condition has a blank operand")]
    BlankOperand,

    #[error("'this' referenced outside of a field rule")]
    UnboundThis,

    #[error("field reference has a blank name")]
    BlankReference,

    #[error("failed to encode value list: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("in collection '{path}': {source}")]
    Collection {
        path: String,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    /// Returns the innermost error, skipping any collection wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &BuildError {
        match self {
            BuildError::Collection { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
