use std::path::Path;

use tracing::debug;

use super::build_result::{BuildResult, Line};
use super::collection::Collection;
use super::error::BuildError;
use crate::RulesmithError;

/// Placeholder database id, matching any database.
pub const DEFAULT_DATABASE: &str = "{database}";

const RULES_VERSION: &str = "rules_version = '2';";
const SERVICE: &str = "service cloud.firestore {";

/// The top of a rules document: the database match wrapping every
/// top-level collection.
///
/// # Example
///
/// ```
/// use rulesmith::{allow, Root};
///
/// let rules = Root::new()
///     .collection("posts", "postId", |c| {
///         c.field("title", |f| f.string()).allow_read_if(allow())
///     })
///     .render()
///     .unwrap();
/// assert!(rules.starts_with("rules_version = '2';\nservice cloud.firestore {"));
/// assert!(rules.contains("    match /posts/{postId} {"));
/// ```
#[derive(Debug, Clone)]
pub struct Root {
    database: String,
    collections: Vec<Collection>,
}

impl Default for Root {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_owned(),
            collections: Vec::new(),
        }
    }
}

impl Root {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one database id instead of every database.
    #[must_use]
    pub fn database(mut self, id: &str) -> Self {
        self.database = id.to_owned();
        self
    }

    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database
    }

    /// `/databases/<id>/documents`
    #[must_use]
    pub fn path(&self) -> String {
        format!("/databases/{}/documents", self.database)
    }

    /// Declare a top-level collection. The closure configures it.
    #[must_use]
    pub fn collection(
        mut self,
        name: &str,
        document_id: &str,
        f: impl FnOnce(Collection) -> Collection,
    ) -> Self {
        self.collections.push(f(Collection::new(name, document_id)));
        self
    }

    #[must_use]
    pub fn add_collection(mut self, collection: Collection) -> Self {
        self.collections.push(collection);
        self
    }

    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Build the full line tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Collection`] naming the first collection whose
    /// rules fail to build.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let mut database = vec![Line::text(format!("match {} {{", self.path()))];
        for collection in &self.collections {
            database.push(Line::Block(collection.build()?));
        }
        database.push(Line::text("}"));

        Ok(BuildResult::new(vec![
            Line::text(RULES_VERSION),
            Line::text(SERVICE),
            Line::Block(database),
            Line::text("}"),
        ]))
    }

    /// Build and flatten into the final rules text, without a trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any collection fails to build.
    pub fn render(&self) -> Result<String, BuildError> {
        let result = self.build()?;
        let lines = result.lines();
        debug!(
            database = %self.database,
            collections = self.collections.len(),
            lines = lines.len(),
            "rendered rules"
        );
        Ok(lines.join("\n"))
    }

    /// Render and write the rules text to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesmithError::Build`] if rendering fails, or
    /// [`RulesmithError::Io`] if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), RulesmithError> {
        let rules = self.render()?;
        std::fs::write(path, rules)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{all, lit};

    #[test]
    fn empty_root_renders_frame() {
        assert_eq!(
            Root::new().render().unwrap(),
            "rules_version = '2';\n\
             service cloud.firestore {\n\
             \x20 match /databases/{database}/documents {\n\
             \x20 }\n\
             }"
        );
    }

    #[test]
    fn database_id_is_configurable() {
        let root = Root::new().database("(default)");
        assert_eq!(root.database_id(), "(default)");
        assert_eq!(root.path(), "/databases/(default)/documents");
    }

    #[test]
    fn collections_nest_under_database() {
        let root = Root::new()
            .collection("a", "aId", |c| c)
            .collection("b", "bId", |c| c);
        let lines = root.build().unwrap().lines();
        assert_eq!(lines[3], "    match /a/{aId} {");
        assert_eq!(lines[4], "      function isValidSchema(data) { return (data.keys().hasAll([]) && data.keys().hasOnly([])); }");
        assert_eq!(lines[10], "    }");
        assert_eq!(lines[11], "    match /b/{bId} {");
        assert_eq!(lines.last().map(String::as_str), Some("}"));
    }

    #[test]
    fn render_is_deterministic() {
        let root = Root::new().collection("users", "userId", |c| {
            c.field("name", |f| f.string())
                .allow_full_access_if(all([lit("userId").eq("request.auth.uid")]))
        });
        assert_eq!(root.render().unwrap(), root.render().unwrap());
    }

    #[test]
    fn build_errors_surface_from_render() {
        let root = Root::new().collection("users", "userId", |c| {
            c.allow_get_if(all([crate::types::this().eq("1")]))
        });
        let err = root.render().unwrap_err();
        assert!(err.to_string().starts_with("in collection '/users/{userId}'"));
    }
}
