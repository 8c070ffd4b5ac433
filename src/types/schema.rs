use super::error::BuildError;
use super::field::Field;
use super::predicate::Combinator;
use super::resolved::Resolved;
use super::scope::{join, Scope};
use super::validator::Entry;

/// One declared key of a [`Schema`].
#[derive(Debug, Clone)]
pub enum Member {
    Field(Field),
    Validated { name: String, entry: Entry },
}

impl Member {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => field.name(),
            Member::Validated { name, .. } => name,
        }
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Member::Field(field) => field.is_optional(),
            Member::Validated { entry, .. } => entry.is_optional(),
        }
    }

    /// The member's own type predicate against the document at `document`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a nested predicate fails to resolve.
    pub fn build_rules(&self, document: &str) -> Result<Resolved, BuildError> {
        match self {
            Member::Field(field) => field.build_rules(document),
            Member::Validated { name, entry } => entry
                .validator()
                .validate(&Scope::document(document).owned_by(name)),
        }
    }
}

/// An ordered set of declared keys: the shape of a document or nested map.
///
/// Members are either [`Field`] descriptors built with chained calls or
/// named [`Validator`](super::Validator)s from the
/// [`validation`](crate::validation) library. Both kinds mix freely.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    members: Vec<Member>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. The closure configures its type assertions.
    #[must_use]
    pub fn field(self, name: &str, f: impl FnOnce(Field) -> Field) -> Self {
        self.add_field(f(Field::new(name)))
    }

    /// Declare a field. Redeclaring a name replaces the earlier member in place.
    #[must_use]
    pub fn add_field(self, field: Field) -> Self {
        self.insert(Member::Field(field))
    }

    /// Declare a key checked by a validator.
    #[must_use]
    pub fn validate(self, name: &str, entry: impl Into<Entry>) -> Self {
        self.insert(Member::Validated {
            name: name.to_owned(),
            entry: entry.into(),
        })
    }

    /// Append every member of `other`, keeping order. Members of `other`
    /// replace same-named members already declared.
    #[must_use]
    pub fn extend(self, other: Schema) -> Self {
        other.members.into_iter().fold(self, Schema::insert)
    }

    fn insert(mut self, member: Member) -> Self {
        match self.members.iter_mut().find(|m| m.name() == member.name()) {
            Some(slot) => *slot = member,
            None => self.members.push(member),
        }
        self
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `hasAll` over required keys and `hasOnly` over every declared key.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Encoding`] if the key list fails to encode.
    pub fn key_guards(&self, document: &str) -> Result<Resolved, BuildError> {
        let required: Vec<&str> = self
            .members
            .iter()
            .filter(|m| !m.is_optional())
            .map(Member::name)
            .collect();
        let declared: Vec<&str> = self.members.iter().map(Member::name).collect();
        let keys = join(document, "keys()");

        Ok(Resolved::and([
            format!("{keys}.hasAll({})", serde_json::to_string(&required)?),
            format!("{keys}.hasOnly({})", serde_json::to_string(&declared)?),
        ]))
    }

    /// Key guards ANDed with every member's type predicate. Members with no
    /// type predicate are skipped. An optional member's predicate only has to
    /// hold when its key is present.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any member fails to build.
    pub fn build_rules(&self, document: &str) -> Result<Resolved, BuildError> {
        let mut rules = Resolved::and([self.key_guards(document)?]);

        for member in &self.members {
            let rule = member.build_rules(document)?;
            if rule.is_empty() {
                continue;
            }
            if member.is_optional() {
                let absent = format!(
                    "!{}.hasAny({})",
                    join(document, "keys()"),
                    serde_json::to_string(&[member.name()])?
                );
                let mut guarded = Resolved::new(Combinator::Or);
                guarded.push(absent);
                guarded.push(rule);
                rules.push(guarded);
            } else {
                rules.push(rule);
            }
        }

        Ok(rules)
    }
}

/// A nested map descriptor: a named [`Schema`] used as a field's value.
#[derive(Debug, Clone)]
pub struct FieldMap {
    name: String,
    schema: Schema,
}

impl FieldMap {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            schema: Schema::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

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

    #[must_use]
    pub fn validate(mut self, name: &str, entry: impl Into<Entry>) -> Self {
        self.schema = self.schema.validate(name, entry);
        self
    }

    /// Guards and member predicates for the map stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if any member fails to build.
    pub fn build_rules(&self, path: &str) -> Result<Resolved, BuildError> {
        self.schema.build_rules(path)
    }
}
