use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::fmt;

/// The declared mutability of an ABI function entry.
///
/// This is the single source of truth for whether a generated method
/// becomes a query or a mutation; see `plan::MethodKind`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StateMutability {
    /// Specified to not read blockchain state
    Pure,
    /// Specified to not modify the blockchain state
    View,
    /// Function does not accept ether
    Nonpayable,
    /// Function accepts ether
    Payable,
}

impl StateMutability {
    /// True when calls never alter on-chain state
    pub fn is_constant(self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }
}

impl<'de> Deserialize<'de> for StateMutability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(StateMutabilityVisitor)
    }
}

struct StateMutabilityVisitor;

impl<'de> Visitor<'de> for StateMutabilityVisitor {
    type Value = StateMutability;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a string")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match s {
            "pure" => Ok(StateMutability::Pure),
            "view" => Ok(StateMutability::View),
            "nonpayable" => Ok(StateMutability::Nonpayable),
            "payable" => Ok(StateMutability::Payable),
            _ => Err(de::Error::invalid_value(Unexpected::Str(s), &self)),
        }
    }
}

#[test]
fn deserialize_pure() {
    let data = r#""pure""#;
    let state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
    assert_eq!(state, StateMutability::Pure);
}

#[test]
fn deserialize_view() {
    let data = r#""view""#;
    let state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
    assert_eq!(state, StateMutability::View);
}

#[test]
fn deserialize_nonpayable() {
    let data = r#""nonpayable""#;
    let state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
    assert_eq!(state, StateMutability::Nonpayable);
}

#[test]
fn deserialize_payable() {
    let data = r#""payable""#;
    let state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
    assert_eq!(state, StateMutability::Payable);
}

#[test]
#[should_panic]
fn deserialize_wrong_type() {
    let data = r#"123"#;
    let _state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
}

#[test]
#[should_panic]
fn deserialize_wrong_value() {
    let data = r#""unknown""#;
    let _state: StateMutability = serde_json::from_str(data).expect("Unable to parse");
}
