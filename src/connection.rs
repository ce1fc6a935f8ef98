//! The capability seam between the generated client and the network.
//!
//! A connection is an external collaborator: already authenticated,
//! already bound to one chain. The client only ever sees the two traits
//! here plus the [`Connection`] variant enforcing that an instance holds
//! exactly one connection kind.

use crate::error::Error;
use crate::types::TransactionReceipt;
use async_trait::async_trait;
use clarity::{Address, Uint256};
use std::sync::Arc;

/// Read-only access to one chain.
///
/// The futures are not required to be `Send`: concrete connections are
/// built on awc's single threaded client and run under an actix system,
/// the same execution model web30 uses.
#[async_trait(?Send)]
pub trait QueryConnection {
    /// The chain this connection is bound to
    fn chain_id(&self) -> u64;

    /// Executes a read-only simulated call against `contract` and returns
    /// the raw encoded result bytes
    async fn call(&self, contract: Address, payload: Vec<u8>) -> Result<Vec<u8>, Error>;
}

/// Transaction-capable access to one chain. Every transaction-capable
/// connection can also perform read-only calls.
#[async_trait(?Send)]
pub trait MutationConnection: QueryConnection {
    /// Submits a state-changing transaction carrying `payload` to
    /// `contract` and returns its hash. `value` is the attached ether,
    /// `fee_price` an optional gas price override; when `fee_price` is
    /// None the connection picks its own price.
    async fn submit(
        &self,
        contract: Address,
        payload: Vec<u8>,
        value: Uint256,
        fee_price: Option<Uint256>,
    ) -> Result<Uint256, Error>;

    /// Awaits the settlement receipt of a previously submitted transaction
    async fn wait_for_receipt(&self, txid: Uint256) -> Result<TransactionReceipt, Error>;
}

/// The single connection a contract client instance holds for its
/// lifetime: either query-only or transaction-capable, never both,
/// never neither.
#[derive(Clone)]
pub enum Connection {
    ReadOnly(Arc<dyn QueryConnection>),
    ReadWrite(Arc<dyn MutationConnection>),
}

impl Connection {
    /// Builds a connection from the optional pair a caller supplies,
    /// enforcing the exactly-one rule before anything touches the network
    pub fn from_parts(
        query: Option<Arc<dyn QueryConnection>>,
        readwrite: Option<Arc<dyn MutationConnection>>,
    ) -> Result<Connection, Error> {
        match (query, readwrite) {
            (Some(_), Some(_)) => Err(Error::BothConnections),
            (None, None) => Err(Error::NoConnection),
            (Some(query), None) => Ok(Connection::ReadOnly(query)),
            (None, Some(readwrite)) => Ok(Connection::ReadWrite(readwrite)),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Connection::ReadOnly(c) => c.chain_id(),
            Connection::ReadWrite(c) => c.chain_id(),
        }
    }

    /// Read-only calls work on both connection kinds
    pub(crate) async fn call(
        &self,
        contract: Address,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, Error> {
        match self {
            Connection::ReadOnly(c) => c.call(contract, payload).await,
            Connection::ReadWrite(c) => c.call(contract, payload).await,
        }
    }

    /// The transaction capability, present only on read-write connections
    pub(crate) fn signer(&self) -> Option<&Arc<dyn MutationConnection>> {
        match self {
            Connection::ReadOnly(_) => None,
            Connection::ReadWrite(c) => Some(c),
        }
    }
}
