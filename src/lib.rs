mod error;
pub mod parse;
mod render;
mod resolve;
mod types;
pub mod validation;

pub use error::RulesmithError;
pub use types::{
    all, allow, any, deny, lit, lookup, sibling, this, BuildError, BuildResult, Collection,
    Combinator, Condition, Entry, EnumValue, Field, FieldMap, FieldRef, Line, Member, NativeEnum,
    Operand, Operation, Operator, Predicate, Resolved, ResolvedTerm, Root, Schema, Scope, Term,
    TypeTag, Validator, DEFAULT_DATABASE, INCOMING_DOCUMENT, INDENT, STORED_DOCUMENT,
};
