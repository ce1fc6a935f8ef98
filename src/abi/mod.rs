//! Data model for contract ABI JSON documents.
//!
//! The JSON format for a contract's interface is an array of function,
//! event and constructor descriptions. Only function entries carry the
//! full `name`/`inputs`/`outputs`/`stateMutability` shape this crate
//! generates methods from; everything else parses but is never selected.
//!
//! https://solidity.readthedocs.io/en/develop/abi-spec.html#abi-json

pub mod contract;
pub mod entry;
pub mod operation;
pub mod param;
pub mod state_mutability;

pub use contract::ContractAbi;
pub use entry::Entry;
pub use operation::Operation;
pub use param::Param;
pub use state_mutability::StateMutability;
