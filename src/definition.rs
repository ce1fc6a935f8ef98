//! The client emitter: assembles a full client definition from a set of
//! selected ABI entries.
//!
//! A definition is a table of method plans interpreted at call time by
//! [`crate::client::ContractClient`], one plan per selected entry. Each
//! generated method belongs to exactly one of query or mutation, decided
//! here and never re-evaluated afterwards. Emission is a pure function of
//! the ABI and the selection list.

use crate::abi::contract::ContractAbi;
use crate::error::Error;
use crate::plan::MethodPlan;

/// A generated client definition: one planned method per selected entry
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDefinition {
    contract: String,
    methods: Vec<MethodPlan>,
}

impl ClientDefinition {
    /// Generates a definition covering every function entry of the ABI
    pub fn generate(contract: &str, abi: &ContractAbi) -> Result<ClientDefinition, Error> {
        let mut definition = ClientDefinition {
            contract: contract.to_owned(),
            methods: Vec::new(),
        };
        for entry in abi.functions() {
            definition.push(MethodPlan::new(entry)?)?;
        }
        Ok(definition)
    }

    /// Generates a definition for an explicit subset of function names,
    /// the programmatic form of an interactive selection step. Unknown
    /// names fail generation, nothing partial is produced.
    pub fn generate_subset(
        contract: &str,
        abi: &ContractAbi,
        selection: &[&str],
    ) -> Result<ClientDefinition, Error> {
        let mut definition = ClientDefinition {
            contract: contract.to_owned(),
            methods: Vec::new(),
        };
        for name in selection {
            let entry = abi
                .function(name)
                .ok_or_else(|| Error::UnknownMethod((*name).to_owned()))?;
            definition.push(MethodPlan::new(entry)?)?;
        }
        Ok(definition)
    }

    // one entry per function name; overloads by parameter type are out of
    // scope and a duplicate selection would make dispatch ambiguous
    fn push(&mut self, plan: MethodPlan) -> Result<(), Error> {
        if self.method(&plan.name).is_some() {
            return Err(Error::BadAbi(format!(
                "duplicate function name {}",
                plan.name
            )));
        }
        self.methods.push(plan);
        Ok(())
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn methods(&self) -> &[MethodPlan] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodPlan> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{MethodKind, OutputShape, PrimitiveType};

    const GAME_ITEMS_ABI: &str = r#"[
        {"type": "function", "name": "totalSupply",
         "inputs": [{"name": "tokenId", "type": "uint256"}],
         "outputs": [{"name": "", "type": "uint256"}],
         "stateMutability": "view"},
        {"type": "function", "name": "uri",
         "inputs": [{"name": "tokenId", "type": "uint256"}],
         "outputs": [{"name": "", "type": "string"}],
         "stateMutability": "view"},
        {"type": "function", "name": "mint",
         "inputs": [
            {"name": "account", "type": "address"},
            {"name": "tokenId", "type": "uint256"},
            {"name": "amount", "type": "uint256"}],
         "outputs": [],
         "stateMutability": "nonpayable"},
        {"type": "event", "name": "TransferSingle", "inputs": []},
        {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"}
    ]"#;

    #[test]
    fn generate_covers_all_functions() {
        let abi: ContractAbi = GAME_ITEMS_ABI.parse().unwrap();
        let definition = ClientDefinition::generate("GameItems", &abi).unwrap();

        assert_eq!(definition.contract(), "GameItems");
        assert_eq!(definition.methods().len(), 3);

        let total_supply = definition.method("totalSupply").unwrap();
        assert_eq!(total_supply.kind, MethodKind::Query);
        assert_eq!(
            total_supply.output,
            OutputShape::Single(PrimitiveType::Integer)
        );

        let mint = definition.method("mint").unwrap();
        assert_eq!(mint.kind, MethodKind::Mutation);
        assert_eq!(mint.signature, "mint(address,uint256,uint256)");

        // events and constructors never become methods
        assert!(definition.method("TransferSingle").is_none());
    }

    #[test]
    fn generate_subset_selects_by_name() {
        let abi: ContractAbi = GAME_ITEMS_ABI.parse().unwrap();
        let definition =
            ClientDefinition::generate_subset("GameItems", &abi, &["mint"]).unwrap();
        assert_eq!(definition.methods().len(), 1);
        assert!(definition.method("totalSupply").is_none());
    }

    #[test]
    fn generate_subset_rejects_unknown_name() {
        let abi: ContractAbi = GAME_ITEMS_ABI.parse().unwrap();
        let res = ClientDefinition::generate_subset("GameItems", &abi, &["burn"]);
        assert!(matches!(res, Err(Error::UnknownMethod(_))));
    }

    #[test]
    fn generate_subset_rejects_duplicate_selection() {
        let abi: ContractAbi = GAME_ITEMS_ABI.parse().unwrap();
        let res = ClientDefinition::generate_subset("GameItems", &abi, &["mint", "mint"]);
        assert!(matches!(res, Err(Error::BadAbi(_))));
    }

    #[test]
    fn nameless_function_fails_generation() {
        let abi: ContractAbi = r#"[
            {"type": "function", "inputs": [], "outputs": [],
             "stateMutability": "view"}
        ]"#
        .parse()
        .unwrap();
        let res = ClientDefinition::generate("Broken", &abi);
        assert!(matches!(res, Err(Error::BadAbi(_))));
    }
}
