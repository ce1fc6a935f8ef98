//! # Introduction
//! Contract30 builds strongly typed Ethereum contract clients from nothing
//! but an ABI JSON document.
//!
//! ## Features
//! * ABI parsing with strict shape validation (a document that is not an
//!   array of entries is rejected before anything is generated)
//! * A closed primitive type model: `address`, integers of any width,
//!   `bool` and `string` map to typed host values, everything else passes
//!   through opaquely
//! * Total classification of every function into a read-only query or a
//!   state-changing mutation, fixed at generation time
//! * A dual-mode runtime client holding exactly one connection, either
//!   query-only or transaction-capable, validated at construction
//!
//! ## Getting started
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use contract30::abi::ContractAbi;
//! use contract30::client::ContractClient;
//! use contract30::definition::ClientDefinition;
//! use contract30::rpc::HttpConnection;
//! use contract30::Address;
//!
//! # async fn run() -> Result<(), contract30::Error> {
//! let abi: ContractAbi = r#"[{
//!     "type": "function", "name": "totalSupply",
//!     "inputs": [], "outputs": [{"name": "", "type": "uint256"}],
//!     "stateMutability": "view"
//! }]"#.parse()?;
//!
//! let definition = ClientDefinition::generate("Erc20", &abi)?;
//! let connection =
//!     HttpConnection::new("http://localhost:8545", 1, Duration::from_secs(30)).await?;
//! let token: Address = "0x6b175474e89094c44da98b954eedeac495271d0f"
//!     .parse()
//!     .unwrap();
//! let client = ContractClient::new(definition, token, 1, Some(Arc::new(connection)), None)?;
//! let supply = client.query("totalSupply", &[]).await?;
//! # let _ = supply;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod abi;
pub mod client;
pub mod codec;
pub mod connection;
pub mod definition;
pub mod error;
pub mod jsonrpc;
pub mod plan;
pub mod rpc;
pub mod types;
pub mod value;

pub use abi::ContractAbi;
pub use clarity::{Address, Uint256};
pub use client::{ContractClient, TxOption};
pub use connection::{Connection, MutationConnection, QueryConnection};
pub use definition::ClientDefinition;
pub use error::Error;
pub use plan::{MethodKind, PrimitiveType};
pub use value::{MethodOutput, Value};
