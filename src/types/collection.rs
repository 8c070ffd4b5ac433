use std::fmt;

use tracing::debug;

use super::build_result::Line;
use super::error::BuildError;
use super::field::Field;
use super::predicate::{deny, Predicate};
use super::resolved::{Resolved, ResolvedTerm};
use super::schema::Schema;
use super::scope::Scope;
use super::validator::Entry;

/// The stored document, as seen by reads and deletes.
pub const STORED_DOCUMENT: &str = "resource.data";
/// The document as it will be after a create or update.
pub const INCOMING_DOCUMENT: &str = "request.resource.data";
const SCHEMA_PARAM: &str = "data";

/// A guarded operation on a collection's documents, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Create,
    Update,
    List,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::List,
        Operation::Delete,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => write!(f, "get"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::List => write!(f, "list"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone)]
struct Access {
    get: Predicate,
    create: Predicate,
    update: Predicate,
    list: Predicate,
    delete: Predicate,
}

impl Default for Access {
    fn default() -> Self {
        Self {
            get: deny(),
            create: deny(),
            update: deny(),
            list: deny(),
            delete: deny(),
        }
    }
}

/// One addressable collection: its document schema, access rules and child
/// collections.
///
/// Every access rule starts as deny. Access predicates are resolved against
/// the stored document for get, list and delete, and against the incoming
/// document for create and update. Collection-level predicates have no
/// owning field, so they name fields with [`sibling`](crate::sibling) or
/// [`lookup`](crate::lookup) rather than [`this`](crate::this).
///
/// # Example
///
/// ```
/// use rulesmith::{all, lit, Collection};
///
/// let users = Collection::new("users", "userId")
///     .field("name", |f| f.string())
///     .allow_full_access_if(all([lit("userId").eq("request.auth.uid")]));
/// assert_eq!(users.relative_path(), "/users/{userId}");
/// ```
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    document_id: String,
    schema: Schema,
    children: Vec<Collection>,
    access: Access,
    prevent_access_blocking_edits: bool,
}

impl Collection {
    #[must_use]
    pub fn new(name: &str, document_id: &str) -> Self {
        Self {
            name: name.to_owned(),
            document_id: document_id.to_owned(),
            schema: Schema::new(),
            children: Vec::new(),
            access: Access::default(),
            prevent_access_blocking_edits: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// `/<name>/{<document id>}`
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("/{}/{{{}}}", self.name, self.document_id)
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn children(&self) -> &[Collection] {
        &self.children
    }

    #[must_use]
    pub fn access(&self, op: Operation) -> &Predicate {
        match op {
            Operation::Get => &self.access.get,
            Operation::Create => &self.access.create,
            Operation::Update => &self.access.update,
            Operation::List => &self.access.list,
            Operation::Delete => &self.access.delete,
        }
    }

    #[must_use]
    pub fn prevents_access_blocking_edits(&self) -> bool {
        self.prevent_access_blocking_edits
    }

    /// Declare a document field. The closure configures its type assertions.
    #[must_use]
    pub fn field(mut self, name: &str, f: impl FnOnce(Field) -> Field) -> Self {
        self.schema = self.schema.field(name, f);
        self
    }

    #[must_use]
    pub fn add_field(mut self, field: Field) -> Self {
        self.schema = self.schema.add_field(field);
        self
    }

    /// Declare a document field checked by a validator.
    #[must_use]
    pub fn validate(mut self, name: &str, entry: impl Into<Entry>) -> Self {
        self.schema = self.schema.validate(name, entry);
        self
    }

    /// Append every member of `schema` to this collection's document schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = self.schema.extend(schema);
        self
    }

    /// Declare a child collection. The closure configures it.
    #[must_use]
    pub fn collection(
        mut self,
        name: &str,
        document_id: &str,
        f: impl FnOnce(Collection) -> Collection,
    ) -> Self {
        self.children.push(f(Collection::new(name, document_id)));
        self
    }

    #[must_use]
    pub fn add_collection(mut self, child: Collection) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn allow_get_if(mut self, rule: impl Into<Predicate>) -> Self {
        self.access.get = rule.into();
        self
    }

    #[must_use]
    pub fn allow_create_if(mut self, rule: impl Into<Predicate>) -> Self {
        self.access.create = rule.into();
        self
    }

    #[must_use]
    pub fn allow_update_if(mut self, rule: impl Into<Predicate>) -> Self {
        self.access.update = rule.into();
        self
    }

    #[must_use]
    pub fn allow_list_if(mut self, rule: impl Into<Predicate>) -> Self {
        self.access.list = rule.into();
        self
    }

    #[must_use]
    pub fn allow_delete_if(mut self, rule: impl Into<Predicate>) -> Self {
        self.access.delete = rule.into();
        self
    }

    /// Sets get and list.
    #[must_use]
    pub fn allow_read_if(self, rule: impl Into<Predicate>) -> Self {
        let rule = rule.into();
        self.allow_get_if(rule.clone()).allow_list_if(rule)
    }

    /// Sets create, update and delete.
    #[must_use]
    pub fn allow_write_if(self, rule: impl Into<Predicate>) -> Self {
        let rule = rule.into();
        self.allow_create_if(rule.clone())
            .allow_update_if(rule.clone())
            .allow_delete_if(rule)
    }

    /// Sets all five operations to the same rule.
    #[must_use]
    pub fn allow_full_access_if(self, rule: impl Into<Predicate>) -> Self {
        let rule = rule.into();
        self.allow_read_if(rule.clone()).allow_write_if(rule)
    }

    /// Let an update produce a document the updater could no longer update.
    ///
    /// By default the update rule must hold for the incoming document as
    /// well as the stored one.
    #[must_use]
    pub fn allow_access_removing_edits(mut self) -> Self {
        self.prevent_access_blocking_edits = false;
        self
    }

    /// The body of `isValidSchema`: key guards plus every field's type
    /// predicate, against the function's `data` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any field fails to build.
    pub fn schema_rule(&self) -> Result<Resolved, BuildError> {
        self.schema.build_rules(SCHEMA_PARAM)
    }

    /// The full guard emitted for `op`, before rendering.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the stored access predicate fails to resolve.
    pub fn access_rule(&self, op: Operation) -> Result<Resolved, BuildError> {
        let stored = Scope::document(STORED_DOCUMENT);
        let incoming = Scope::document(INCOMING_DOCUMENT);
        let valid_write = ResolvedTerm::Expr(format!("isValidSchema({INCOMING_DOCUMENT})"));

        let rule = match op {
            Operation::Get => self.access.get.resolve(&stored)?,
            Operation::List => self.access.list.resolve(&stored)?,
            Operation::Delete => self.access.delete.resolve(&stored)?,
            Operation::Create => {
                let create = ResolvedTerm::from(self.access.create.resolve(&incoming)?);
                Resolved::and([create, valid_write])
            }
            Operation::Update => {
                let mut rule = Resolved::and([valid_write]);
                rule.push(self.access.update.resolve(&stored)?);
                if self.prevent_access_blocking_edits {
                    rule.push(self.access.update.resolve(&incoming)?);
                }
                rule
            }
        };
        Ok(rule)
    }

    /// The `match` block for this collection, children included.
    pub(crate) fn build(&self) -> Result<Vec<Line>, BuildError> {
        self.build_block().map_err(|source| BuildError::Collection {
            path: self.relative_path(),
            source: Box::new(source),
        })
    }

    fn build_block(&self) -> Result<Vec<Line>, BuildError> {
        let schema = self.schema_rule()?.render()?;
        let mut body = vec![Line::text(format!(
            "function isValidSchema({SCHEMA_PARAM}) {{ return {schema}; }}"
        ))];

        for op in Operation::ALL {
            let guard = self.access_rule(op)?.render()?;
            body.push(Line::text(format!("allow {op}: if {guard};")));
        }

        for child in &self.children {
            body.extend(child.build()?);
        }

        debug!(
            path = %self.relative_path(),
            fields = self.schema.len(),
            children = self.children.len(),
            anti_lockout = self.prevent_access_blocking_edits,
            "built collection block"
        );

        Ok(vec![
            Line::text(format!("match {} {{", self.relative_path())),
            Line::Block(body),
            Line::text("}"),
        ])
    }
}
