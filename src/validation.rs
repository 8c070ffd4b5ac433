//! Prebuilt validators for declaring schemas as named entries rather than
//! chained [`Field`](crate::Field) calls.
//!
//! ```
//! use rulesmith::validation::{map, nullable, number, optional, or, string};
//! use rulesmith::Schema;
//!
//! let schema = Schema::new()
//!     .validate("name", string(None))
//!     .validate("printCount", optional(number(None)))
//!     .validate(
//!         "gps",
//!         or([
//!             nullable(None),
//!             map(None, Schema::new()
//!                 .validate("latitude", number(None))
//!                 .validate("longitude", number(None))),
//!         ]),
//!     );
//! assert_eq!(schema.len(), 3);
//! ```

use crate::types::{this, EnumValue, Entry, NativeEnum, Predicate, Schema, Validator};

fn type_check(kind: &str, rule: impl Into<Option<Predicate>>) -> Validator {
    Validator::Check {
        check: this().is(kind),
        rule: rule.into(),
    }
}

#[must_use]
pub fn string(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("string", rule)
}

#[must_use]
pub fn number(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("number", rule)
}

#[must_use]
pub fn boolean(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("bool", rule)
}

#[must_use]
pub fn timestamp(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("timestamp", rule)
}

/// A document reference.
#[must_use]
pub fn path(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("path", rule)
}

/// A list whose elements are not checked.
#[must_use]
pub fn unsafe_list(rule: impl Into<Option<Predicate>>) -> Validator {
    type_check("list", rule)
}

#[must_use]
pub fn nullable(rule: impl Into<Option<Predicate>>) -> Validator {
    Validator::Check {
        check: this().eq("null"),
        rule: rule.into(),
    }
}

#[must_use]
pub fn enum_validation<I, V>(rule: impl Into<Option<Predicate>>, values: I) -> Validator
where
    I: IntoIterator<Item = V>,
    V: Into<EnumValue>,
{
    Validator::Enum {
        values: values.into_iter().map(Into::into).collect(),
        rule: rule.into(),
    }
}

#[must_use]
pub fn native_enum<E: NativeEnum>(rule: impl Into<Option<Predicate>>) -> Validator {
    enum_validation(rule, E::values())
}

/// A map whose keys are declared by `structure`.
#[must_use]
pub fn map(rule: impl Into<Option<Predicate>>, structure: Schema) -> Validator {
    Validator::Map {
        rule: rule.into(),
        structure,
    }
}

/// Valid if any of `validators` is.
#[must_use]
pub fn or<I>(validators: I) -> Validator
where
    I: IntoIterator<Item = Validator>,
{
    Validator::AnyOf(validators.into_iter().collect())
}

/// Let the key be omitted. The validator still applies when it is present.
#[must_use]
pub fn optional(validator: Validator) -> Entry {
    Entry::Optional(validator)
}
