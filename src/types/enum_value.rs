use serde::Serialize;

use super::error::BuildError;

/// A primitive value an enum field may take.
///
/// Encoded as JSON when it appears in a membership list, so strings are
/// quoted and integers are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

impl From<&str> for EnumValue {
    fn from(v: &str) -> Self {
        EnumValue::Str(v.to_owned())
    }
}

impl From<String> for EnumValue {
    fn from(v: String) -> Self {
        EnumValue::Str(v)
    }
}

impl From<i64> for EnumValue {
    fn from(v: i64) -> Self {
        EnumValue::Int(v)
    }
}

impl From<i32> for EnumValue {
    fn from(v: i32) -> Self {
        EnumValue::Int(i64::from(v))
    }
}

/// An externally defined enumeration whose underlying primitive values can be
/// listed. Implement this for a Rust enum to use it with
/// [`Field::native_enum`](super::Field::native_enum).
pub trait NativeEnum {
    fn values() -> Vec<EnumValue>;
}

pub(crate) fn encode_values(values: &[EnumValue]) -> Result<String, BuildError> {
    Ok(serde_json::to_string(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_quoted() {
        let values = vec![EnumValue::from("A"), EnumValue::from("B")];
        assert_eq!(encode_values(&values).unwrap(), r#"["A","B"]"#);
    }

    #[test]
    fn integers_are_bare() {
        let values = vec![EnumValue::from(0_i64), EnumValue::from(1_i32)];
        assert_eq!(encode_values(&values).unwrap(), "[0,1]");
    }

    #[test]
    fn quotes_inside_values_are_escaped() {
        let values = vec![EnumValue::from("say \"hi\"")];
        assert_eq!(encode_values(&values).unwrap(), r#"["say \"hi\""]"#);
    }

    #[test]
    fn empty_list() {
        assert_eq!(encode_values(&[]).unwrap(), "[]");
    }
}
