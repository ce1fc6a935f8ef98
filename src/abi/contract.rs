use crate::abi::entry::Entry;
use crate::error::Error;
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::de::SeqAccess;
use serde::de::Visitor;
use std::fmt;
use std::io;
use std::str::FromStr;

/// A parsed contract interface: the ordered sequence of ABI entries.
///
/// Deserialization only accepts a JSON array; any other shape (a single
/// object, a string, a number) is rejected up front so no generation can
/// proceed from a malformed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractAbi {
    entries: Vec<Entry>,
}

impl ContractAbi {
    pub fn from_reader<T: io::Read>(reader: T) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(|e| Error::BadAbi(e.to_string()))
    }

    /// Loads the `abi` field out of a compiled-contract artifact, the
    /// wrapper object solc based toolchains write to disk.
    pub fn from_artifact<T: io::Read>(reader: T) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct Artifact {
            abi: ContractAbi,
        }
        let artifact: Artifact =
            serde_json::from_reader(reader).map_err(|e| Error::BadAbi(e.to_string()))?;
        Ok(artifact.abi)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// All function entries, in document order
    pub fn functions(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_function())
    }

    /// Finds a function entry by name. Overloads by parameter type are out
    /// of scope, so the first match is the only match.
    pub fn function(&self, name: &str) -> Option<&Entry> {
        self.functions()
            .find(|e| e.name.as_deref() == Some(name))
    }
}

impl FromStr for ContractAbi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(|e| Error::BadAbi(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for ContractAbi {
    fn deserialize<D>(deserializer: D) -> Result<ContractAbi, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ContractAbiVisitor)
    }
}

struct ContractAbiVisitor;

impl<'a> Visitor<'a> for ContractAbiVisitor {
    type Value = ContractAbi;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of abi entries")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'a>,
    {
        let mut result = ContractAbi {
            entries: Vec::new(),
        };
        while let Some(entry) = seq.next_element()? {
            result.entries.push(entry)
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::operation::Operation;
    use crate::abi::state_mutability::StateMutability;
    use std::io::BufReader;

    const ERC1155_ABI: &str = r#"[
  {
    "inputs": [
      {
        "name": "tokenId",
        "type": "uint256"
      }
    ],
    "name": "totalSupply",
    "outputs": [
      {
        "name": "",
        "type": "uint256"
      }
    ],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [
      {
        "name": "account",
        "type": "address"
      },
      {
        "name": "tokenId",
        "type": "uint256"
      },
      {
        "name": "amount",
        "type": "uint256"
      }
    ],
    "name": "mint",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  },
  {
    "anonymous": false,
    "inputs": [
      {
        "indexed": true,
        "name": "account",
        "type": "address"
      },
      {
        "indexed": false,
        "name": "amount",
        "type": "uint256"
      }
    ],
    "name": "Minted",
    "type": "event"
  },
  {
    "inputs": [],
    "stateMutability": "nonpayable",
    "type": "constructor"
  }
]"#;

    #[test]
    fn decode_contract() {
        let abi = ContractAbi::from_reader(BufReader::new(ERC1155_ABI.as_bytes()))
            .expect("Unable to load contract");

        assert_eq!(abi.entries().len(), 4);
        assert_eq!(abi.functions().count(), 2);

        let total_supply = abi.function("totalSupply").unwrap();
        assert_eq!(total_supply.operation, Operation::Function);
        assert_eq!(total_supply.state_mutability, Some(StateMutability::View));
        assert_eq!(total_supply.inputs.len(), 1);
        assert_eq!(total_supply.inputs[0].type_, "uint256");
        assert_eq!(
            total_supply.outputs.as_ref().unwrap()[0].type_,
            "uint256"
        );

        let mint = abi.function("mint").unwrap();
        assert_eq!(
            mint.state_mutability,
            Some(StateMutability::Nonpayable)
        );
        assert_eq!(mint.signature().unwrap(), "mint(address,uint256,uint256)");

        // the event parses but is not addressable as a function
        assert!(abi.function("Minted").is_none());
    }

    #[test]
    fn artifact_wrapper() {
        let artifact = format!(
            r#"{{"contractName": "GameItems", "abi": {ERC1155_ABI}, "bytecode": "0x"}}"#
        );
        let abi = ContractAbi::from_artifact(artifact.as_bytes()).unwrap();
        assert_eq!(abi.functions().count(), 2);
    }

    #[test]
    fn rejects_single_object() {
        let doc = r#"{"name": "totalSupply", "inputs": [], "outputs": [],
                      "stateMutability": "view", "type": "function"}"#;
        let res: Result<ContractAbi, Error> = doc.parse();
        assert!(matches!(res, Err(Error::BadAbi(_))));
    }

    #[test]
    fn rejects_scalar() {
        let res: Result<ContractAbi, Error> = "42".parse();
        assert!(matches!(res, Err(Error::BadAbi(_))));
    }
}
