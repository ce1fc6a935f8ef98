//! Analysis of ABI entries into method plans.
//!
//! Three pure steps happen here: mapping raw ABI type strings into the
//! closed [`PrimitiveType`] model, classifying each entry as a query or a
//! mutation from its declared mutability, and planning the generated
//! method's input and output shape. The resulting [`MethodPlan`] is the
//! unit the client emitter assembles into a definition and the runtime
//! interprets at call time.

use crate::abi::entry::Entry;
use crate::abi::state_mutability::StateMutability;
use crate::error::Error;

/// Host-side representation of an ABI parameter type.
///
/// The mapping is intentionally conservative: integer widths all map to an
/// arbitrary-precision integer so no precision is ever lost, and shapes
/// this crate does not specialize for (arrays, tuples, fixed-size byte
/// arrays) stay [`PrimitiveType::Opaque`] so a caller must supply and
/// interpret them explicitly rather than have them silently miscoded.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrimitiveType {
    /// 20 byte account or contract address
    Address,
    /// Any `uint*` / `int*` width, represented as a 256 bit integer
    Integer,
    Boolean,
    /// Solidity `string`, utf-8 text
    Text,
    /// Everything else, passed through unmodified as one raw ABI word
    Opaque,
}

/// Maps a single ABI type name to its host representation
pub fn map_type(abi_type: &str) -> PrimitiveType {
    match abi_type {
        "address" => PrimitiveType::Address,
        "bool" => PrimitiveType::Boolean,
        "string" => PrimitiveType::Text,
        other => {
            let width = other
                .strip_prefix("uint")
                .or_else(|| other.strip_prefix("int"));
            match width {
                // "uint256", "int8", and the bare "uint"/"int" aliases;
                // "uint256[]" falls through because of the brackets
                Some(rest) if rest.chars().all(|c| c.is_ascii_digit()) => PrimitiveType::Integer,
                _ => PrimitiveType::Opaque,
            }
        }
    }
}

/// Which of the two fixed execution templates a generated method uses.
///
/// The classification is total: every legal mutability value maps to
/// exactly one kind, there is no unknown class. It is decided once at
/// generation time and never re-evaluated at call time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MethodKind {
    /// Read-only simulated call, works on any connection kind
    Query,
    /// Submitted transaction, requires a transaction-capable connection
    Mutation,
}

impl From<StateMutability> for MethodKind {
    fn from(mutability: StateMutability) -> MethodKind {
        if mutability.is_constant() {
            MethodKind::Query
        } else {
            MethodKind::Mutation
        }
    }
}

/// The declared output shape of a generated method
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OutputShape {
    /// The entry declares no outputs, nothing is decoded
    Empty,
    /// Exactly one output, returned bare
    Single(PrimitiveType),
    /// Two or more outputs, returned as named fields. Unnamed outputs get
    /// the positional fallback name `output<i>`.
    Record(Vec<(String, PrimitiveType)>),
}

/// Everything the runtime needs to execute one generated method
#[derive(Debug, PartialEq, Clone)]
pub struct MethodPlan {
    pub name: String,
    /// Canonical signature the selector is derived from
    pub signature: String,
    pub kind: MethodKind,
    /// Ordered `(name, type)` input pairs, ABI order preserved
    pub inputs: Vec<(String, PrimitiveType)>,
    pub output: OutputShape,
}

impl MethodPlan {
    /// Plans one classified entry. Fails when the entry is missing the
    /// fields generation depends on (nameless or without a declared
    /// mutability), which malformed or non-function entries are.
    pub fn new(entry: &Entry) -> Result<MethodPlan, Error> {
        let name = match &entry.name {
            Some(name) => name.clone(),
            None => return Err(Error::BadAbi("function entry without a name".to_string())),
        };
        let mutability = match entry.state_mutability {
            Some(m) => m,
            None => {
                return Err(Error::BadAbi(format!(
                    "entry {name} has no stateMutability"
                )))
            }
        };
        let types: Vec<&str> = entry.inputs.iter().map(|p| p.type_.as_str()).collect();
        let signature = format!("{}({})", name, types.join(","));

        let inputs = entry
            .inputs
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let name = if p.name.is_empty() {
                    format!("input{i}")
                } else {
                    p.name.clone()
                };
                (name, map_type(&p.type_))
            })
            .collect();

        let outputs = entry.outputs.as_deref().unwrap_or(&[]);
        let output = match outputs {
            [] => OutputShape::Empty,
            [single] => OutputShape::Single(map_type(&single.type_)),
            many => OutputShape::Record(
                many.iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let name = if p.name.is_empty() {
                            format!("output{i}")
                        } else {
                            p.name.clone()
                        };
                        (name, map_type(&p.type_))
                    })
                    .collect(),
            ),
        };

        Ok(MethodPlan {
            name,
            signature,
            kind: MethodKind::from(mutability),
            inputs,
            output,
        })
    }

    /// Whether the generated method additionally accepts an optional
    /// attached value and fee-price override. Queries never carry
    /// transaction pricing because they never submit a transaction.
    pub fn accepts_tx_options(&self) -> bool {
        self.kind == MethodKind::Mutation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::param::Param;

    #[test]
    fn type_mapping_table() {
        assert_eq!(map_type("address"), PrimitiveType::Address);
        assert_eq!(map_type("uint256"), PrimitiveType::Integer);
        assert_eq!(map_type("uint8"), PrimitiveType::Integer);
        assert_eq!(map_type("int128"), PrimitiveType::Integer);
        assert_eq!(map_type("uint"), PrimitiveType::Integer);
        assert_eq!(map_type("bool"), PrimitiveType::Boolean);
        assert_eq!(map_type("string"), PrimitiveType::Text);
        // unknown shapes fall through instead of failing
        assert_eq!(map_type("uint256[]"), PrimitiveType::Opaque);
        assert_eq!(map_type("address[]"), PrimitiveType::Opaque);
        assert_eq!(map_type("bytes32"), PrimitiveType::Opaque);
        assert_eq!(map_type("bytes"), PrimitiveType::Opaque);
        assert_eq!(map_type("tuple"), PrimitiveType::Opaque);
        assert_eq!(map_type("interest"), PrimitiveType::Opaque);
    }

    #[test]
    fn classification_is_total() {
        assert_eq!(
            MethodKind::from(StateMutability::Pure),
            MethodKind::Query
        );
        assert_eq!(
            MethodKind::from(StateMutability::View),
            MethodKind::Query
        );
        assert_eq!(
            MethodKind::from(StateMutability::Nonpayable),
            MethodKind::Mutation
        );
        assert_eq!(
            MethodKind::from(StateMutability::Payable),
            MethodKind::Mutation
        );
    }

    fn function(name: &str, mutability: StateMutability, inputs: Vec<Param>, outputs: Vec<Param>) -> Entry {
        Entry {
            operation: crate::abi::operation::Operation::Function,
            name: Some(name.to_owned()),
            inputs,
            outputs: Some(outputs),
            state_mutability: Some(mutability),
        }
    }

    #[test]
    fn plan_query_single_output() {
        let entry = function(
            "totalSupply",
            StateMutability::View,
            vec![Param::new("tokenId", "uint256")],
            vec![Param::new("", "uint256")],
        );
        let plan = MethodPlan::new(&entry).unwrap();
        assert_eq!(plan.kind, MethodKind::Query);
        assert_eq!(plan.signature, "totalSupply(uint256)");
        assert_eq!(
            plan.inputs,
            vec![("tokenId".to_owned(), PrimitiveType::Integer)]
        );
        assert_eq!(plan.output, OutputShape::Single(PrimitiveType::Integer));
        assert!(!plan.accepts_tx_options());
    }

    #[test]
    fn plan_mutation_accepts_tx_options() {
        let entry = function(
            "mint",
            StateMutability::Nonpayable,
            vec![
                Param::new("account", "address"),
                Param::new("tokenId", "uint256"),
                Param::new("amount", "uint256"),
            ],
            vec![],
        );
        let plan = MethodPlan::new(&entry).unwrap();
        assert_eq!(plan.kind, MethodKind::Mutation);
        assert_eq!(plan.output, OutputShape::Empty);
        assert!(plan.accepts_tx_options());
    }

    #[test]
    fn plan_record_output_with_fallback_names() {
        let entry = function(
            "getReserves",
            StateMutability::View,
            vec![],
            vec![
                Param::new("reserve0", "uint112"),
                Param::new("", "uint112"),
                Param::new("blockTimestampLast", "uint32"),
            ],
        );
        let plan = MethodPlan::new(&entry).unwrap();
        assert_eq!(
            plan.output,
            OutputShape::Record(vec![
                ("reserve0".to_owned(), PrimitiveType::Integer),
                ("output1".to_owned(), PrimitiveType::Integer),
                ("blockTimestampLast".to_owned(), PrimitiveType::Integer),
            ])
        );
    }

    #[test]
    fn plan_unnamed_inputs_get_positional_names() {
        let entry = function(
            "balanceOf",
            StateMutability::View,
            vec![Param::new("", "address")],
            vec![Param::new("", "uint256")],
        );
        let plan = MethodPlan::new(&entry).unwrap();
        assert_eq!(
            plan.inputs,
            vec![("input0".to_owned(), PrimitiveType::Address)]
        );
    }

    #[test]
    fn plan_rejects_nameless_entry() {
        let entry = Entry {
            operation: crate::abi::operation::Operation::Function,
            name: None,
            inputs: vec![],
            outputs: Some(vec![]),
            state_mutability: Some(StateMutability::Nonpayable),
        };
        assert!(matches!(MethodPlan::new(&entry), Err(Error::BadAbi(_))));
    }

    #[test]
    fn plan_rejects_missing_mutability() {
        let entry = Entry {
            operation: crate::abi::operation::Operation::Function,
            name: Some("mystery".to_owned()),
            inputs: vec![],
            outputs: Some(vec![]),
            state_mutability: None,
        };
        assert!(matches!(MethodPlan::new(&entry), Err(Error::BadAbi(_))));
    }
}
