//! Host-side values crossing the generated-method boundary.

use crate::plan::PrimitiveType;
use clarity::{Address, Uint256};

/// A call argument or decoded result.
///
/// One variant per mapped primitive type; `Opaque` carries a raw ABI word
/// for the shapes the type mapper does not specialize for.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Address(Address),
    Uint(Uint256),
    Bool(bool),
    Text(String),
    Opaque(Vec<u8>),
}

impl Value {
    /// Whether this value can be encoded where `expected` is declared
    pub fn matches(&self, expected: PrimitiveType) -> bool {
        matches!(
            (self, expected),
            (Value::Address(_), PrimitiveType::Address)
                | (Value::Uint(_), PrimitiveType::Integer)
                | (Value::Bool(_), PrimitiveType::Boolean)
                | (Value::Text(_), PrimitiveType::Text)
                | (Value::Opaque(_), PrimitiveType::Opaque)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Address(_) => "address",
            Value::Uint(_) => "integer",
            Value::Bool(_) => "bool",
            Value::Text(_) => "string",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn as_uint(&self) -> Option<Uint256> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Value {
        Value::Address(v)
    }
}

impl From<Uint256> for Value {
    fn from(v: Uint256) -> Value {
        Value::Uint(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Value {
        Value::Uint(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::Uint(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::Uint(v.into())
    }
}

impl From<u128> for Value {
    fn from(v: u128) -> Value {
        Value::Uint(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Text(v.to_owned())
    }
}

/// The decoded result of a query, shaped per the entry's declared outputs
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MethodOutput {
    /// The entry declares no outputs
    Empty,
    Single(Value),
    /// Named fields, zipped from each output's declared (or positional
    /// fallback) name
    Record(Vec<(String, Value)>),
}

impl MethodOutput {
    pub fn into_single(self) -> Option<Value> {
        match self {
            MethodOutput::Single(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up a field of a record output by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            MethodOutput::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(5u8), Value::Uint(5u8.into()));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("DAI"), Value::Text("DAI".to_owned()));
    }

    #[test]
    fn type_matching() {
        assert!(Value::from(5u32).matches(PrimitiveType::Integer));
        assert!(!Value::from(5u32).matches(PrimitiveType::Boolean));
        assert!(Value::Opaque(vec![0; 32]).matches(PrimitiveType::Opaque));
        assert!(!Value::from("text").matches(PrimitiveType::Opaque));
    }

    #[test]
    fn record_field_lookup() {
        let out = MethodOutput::Record(vec![
            ("reserve0".to_owned(), Value::from(10u8)),
            ("reserve1".to_owned(), Value::from(20u8)),
        ]);
        assert_eq!(out.field("reserve1"), Some(&Value::Uint(20u8.into())));
        assert_eq!(out.field("missing"), None);
    }
}
