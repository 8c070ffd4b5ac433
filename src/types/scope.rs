use super::error::BuildError;
use super::operand::FieldRef;

/// The document context a predicate is resolved in.
///
/// `document` is the path expression of the enclosing document or map, with
/// no trailing separator (`resource.data`, `data.storage`). `owner` is the full
/// expression of the field that owns the predicate, if any; `this` references
/// resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    document: String,
    owner: Option<String>,
}

impl Scope {
    #[must_use]
    pub fn document(path: impl Into<String>) -> Self {
        Self {
            document: path.into(),
            owner: None,
        }
    }

    /// Bind `this` to the field `name` of the current document.
    #[must_use]
    pub fn owned_by(mut self, name: &str) -> Self {
        self.owner = Some(join(&self.document, name));
        self
    }

    /// Bind `this` to an arbitrary expression, such as a list element binding.
    #[must_use]
    pub fn owned_by_expr(mut self, expr: impl Into<String>) -> Self {
        self.owner = Some(expr.into());
        self
    }

    #[must_use]
    pub fn document_path(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// The expression a field reference names in this scope.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnboundThis`] for `this` in a scope without an owner,
    /// [`BuildError::BlankReference`] for an empty field name.
    pub fn field_expr(&self, field: &FieldRef) -> Result<String, BuildError> {
        match field {
            FieldRef::This => self.owner.clone().ok_or(BuildError::UnboundThis),
            FieldRef::Named(name) if name.is_empty() => Err(BuildError::BlankReference),
            FieldRef::Named(name) => Ok(join(&self.document, name)),
        }
    }
}

/// Join two path segments with a single `.` separator.
pub(crate) fn join(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_owned()
    } else {
        format!("{base}.{segment}")
    }
}
