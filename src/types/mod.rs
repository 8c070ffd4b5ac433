mod build_result;
mod collection;
mod condition;
mod enum_value;
mod error;
mod field;
mod operand;
mod predicate;
mod resolved;
mod root;
mod schema;
mod scope;
mod validator;

pub use build_result::{BuildResult, Line, INDENT};
pub use collection::{Collection, Operation, INCOMING_DOCUMENT, STORED_DOCUMENT};
pub use condition::{Condition, Operator};
pub use enum_value::{EnumValue, NativeEnum};
pub use error::BuildError;
pub use field::{Field, TypeTag};
pub use operand::{lit, lookup, sibling, this, FieldRef, Operand};
pub use predicate::{all, allow, any, deny, Combinator, Predicate, Term};
pub use resolved::{Resolved, ResolvedTerm};
pub use root::{Root, DEFAULT_DATABASE};
pub use schema::{FieldMap, Member, Schema};
pub use scope::Scope;
pub use validator::{Entry, Validator};
