use super::condition::{Condition, Operator};
use super::enum_value::{encode_values, EnumValue};
use super::error::BuildError;
use super::operand::this;
use super::predicate::{all, Predicate};
use super::resolved::Resolved;
use super::schema::Schema;
use super::scope::Scope;

/// A reusable field check, independent of any collection.
///
/// Validators are built by the free functions in
/// [`validation`](crate::validation) and attached to a [`Schema`] by name.
/// When validated, `this` names the field the validator is attached to.
#[derive(Debug, Clone)]
pub enum Validator {
    /// A single condition on the field, ANDed with an optional extra rule.
    Check {
        check: Condition,
        rule: Option<Predicate>,
    },
    /// Membership in a fixed value set.
    Enum {
        values: Vec<EnumValue>,
        rule: Option<Predicate>,
    },
    /// A map with its own declared keys.
    Map {
        rule: Option<Predicate>,
        structure: Schema,
    },
    /// Valid if any inner validator is.
    AnyOf(Vec<Validator>),
}

impl Validator {
    /// Resolve this validator for the field `scope` is owned by.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnboundThis`] if `scope` has no owning field, or any
    /// error from resolving an attached predicate.
    pub fn validate(&self, scope: &Scope) -> Result<Resolved, BuildError> {
        match self {
            Validator::Check { check, rule } => all([check.clone()])
                .with_opt(rule.clone())
                .resolve(scope),
            Validator::Enum { values, rule } => {
                let members = encode_values(values)?;
                all([Condition::new(this(), Operator::In, members)])
                    .with_opt(rule.clone())
                    .resolve(scope)
            }
            Validator::Map { rule, structure } => {
                let target = scope.owner().ok_or(BuildError::UnboundThis)?;
                let mut resolved = all([this().is("map")])
                    .with_opt(rule.clone())
                    .resolve(scope)?;
                resolved.push(structure.build_rules(target)?);
                Ok(resolved)
            }
            Validator::AnyOf(validators) => {
                let terms = validators
                    .iter()
                    .map(|v| v.validate(scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Resolved::or(terms))
            }
        }
    }
}

/// A validator tagged with whether its key may be omitted.
#[derive(Debug, Clone)]
pub enum Entry {
    Required(Validator),
    Optional(Validator),
}

impl Entry {
    #[must_use]
    pub fn validator(&self) -> &Validator {
        match self {
            Entry::Required(v) | Entry::Optional(v) => v,
        }
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Entry::Optional(_))
    }
}

impl From<Validator> for Entry {
    fn from(v: Validator) -> Self {
        Entry::Required(v)
    }
}
