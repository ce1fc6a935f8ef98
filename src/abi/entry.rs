use crate::abi::operation::Operation;
use crate::abi::param::Param;
use crate::abi::state_mutability::StateMutability;

/// One entry of a contract interface.
///
/// `name`, `outputs` and `stateMutability` are optional at the parsing
/// layer because constructors and events legitimately omit them; the
/// planner enforces their presence for any entry actually selected for
/// generation.
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct Entry {
    #[serde(rename = "type", default)]
    pub operation: Operation,
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Param>,
    pub outputs: Option<Vec<Param>>,
    #[serde(rename = "stateMutability")]
    pub state_mutability: Option<StateMutability>,
}

impl Entry {
    pub fn is_function(&self) -> bool {
        self.operation == Operation::Function
    }

    /// The canonical signature used to derive the four byte method
    /// selector, e.g. `transfer(address,uint256)`. None for nameless
    /// entries (constructors, fallback).
    pub fn signature(&self) -> Option<String> {
        let name = self.name.as_ref()?;
        let types: Vec<&str> = self.inputs.iter().map(|p| p.type_.as_str()).collect();
        Some(format!("{}({})", name, types.join(",")))
    }
}
