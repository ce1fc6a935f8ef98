//! The runtime contract client: one contract address, one chain, one
//! connection, and a generated definition interpreted at call time.

use crate::codec;
use crate::connection::{Connection, MutationConnection, QueryConnection};
use crate::definition::ClientDefinition;
use crate::error::Error;
use crate::plan::{MethodKind, MethodPlan};
use crate::types::TransactionReceipt;
use crate::value::{MethodOutput, Value};
use clarity::{Address, Uint256};
use std::sync::Arc;

/// Optional extras for mutation calls. Queries never take these because
/// they never submit a transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TxOption {
    /// Ether attached to the transaction, defaults to zero
    Value(Uint256),
    /// Fee price override, passed to the connection instead of its own
    /// price discovery
    GasPrice(Uint256),
}

/// A contract client instance.
///
/// Bound at construction to a contract address, a chain id and exactly one
/// connection; none of the three can change for the instance's lifetime.
/// Queries may run concurrently against one instance; mutation ordering is
/// delegated entirely to the connection.
#[derive(Clone)]
pub struct ContractClient {
    definition: ClientDefinition,
    contract: Address,
    chain_id: u64,
    connection: Connection,
}

impl ContractClient {
    /// Validates the exactly-one-connection rule and the chain binding.
    /// Both checks fail synchronously, before any network interaction.
    pub fn new(
        definition: ClientDefinition,
        contract: Address,
        chain_id: u64,
        query: Option<Arc<dyn QueryConnection>>,
        readwrite: Option<Arc<dyn MutationConnection>>,
    ) -> Result<ContractClient, Error> {
        let connection = Connection::from_parts(query, readwrite)?;
        if connection.chain_id() != chain_id {
            return Err(Error::ChainIdMismatch {
                declared: chain_id,
                connected: connection.chain_id(),
            });
        }
        Ok(ContractClient {
            definition,
            contract,
            chain_id,
            connection,
        })
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn definition(&self) -> &ClientDefinition {
        &self.definition
    }

    fn plan(&self, method: &str, kind: MethodKind) -> Result<&MethodPlan, Error> {
        let plan = self
            .definition
            .method(method)
            .ok_or_else(|| Error::UnknownMethod(method.to_owned()))?;
        if plan.kind != kind {
            // the kind binding is fixed at generation time, a call through
            // the wrong template is caller error
            return Err(Error::BadInput(format!(
                "method {method} was generated as {:?}",
                plan.kind
            )));
        }
        Ok(plan)
    }

    /// Executes a generated query method: encode, dispatch as a read-only
    /// call, decode per the entry's output shape. Works on both connection
    /// kinds and never mutates network state.
    pub async fn query(&self, method: &str, args: &[Value]) -> Result<MethodOutput, Error> {
        let plan = self.plan(method, MethodKind::Query)?;
        let payload = codec::encode_call(&plan.signature, &plan.inputs, args)?;
        trace!(
            "querying {} on {} at {}",
            plan.signature,
            self.definition.contract(),
            self.contract
        );
        let raw = self.connection.call(self.contract, payload).await?;
        codec::decode_output(&plan.output, &raw)
    }

    /// Executes a generated mutation method: encode, submit as a
    /// transaction, await its settlement receipt. Requires the instance to
    /// hold a transaction-capable connection; on a query-only instance the
    /// call fails before any network interaction is attempted.
    pub async fn mutate(
        &self,
        method: &str,
        args: &[Value],
        options: Vec<TxOption>,
    ) -> Result<TransactionReceipt, Error> {
        let plan = self.plan(method, MethodKind::Mutation)?;
        let signer = match self.connection.signer() {
            Some(signer) => signer,
            None => return Err(Error::QueryOnlyConnection(method.to_owned())),
        };

        let mut value = Uint256::from(0u8);
        let mut fee_price = None;
        for option in options {
            match option {
                TxOption::Value(v) => value = v,
                TxOption::GasPrice(price) => fee_price = Some(price),
            }
        }

        let payload = codec::encode_call(&plan.signature, &plan.inputs, args)?;
        trace!(
            "submitting {} to {} at {}",
            plan.signature,
            self.definition.contract(),
            self.contract
        );
        let txid = signer
            .submit(self.contract, payload, value, fee_price)
            .await?;
        signer.wait_for_receipt(txid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::ContractAbi;
    use actix::System;
    use async_trait::async_trait;

    const ECHO_ABI: &str = r#"[
        {"type": "function", "name": "echo",
         "inputs": [{"name": "value", "type": "uint256"}],
         "outputs": [{"name": "", "type": "uint256"}],
         "stateMutability": "view"},
        {"type": "function", "name": "store",
         "inputs": [{"name": "value", "type": "uint256"}],
         "outputs": [],
         "stateMutability": "nonpayable"}
    ]"#;

    /// Returns the encoded arguments unchanged, selector stripped
    struct EchoConnection {
        chain: u64,
    }

    #[async_trait(?Send)]
    impl QueryConnection for EchoConnection {
        fn chain_id(&self) -> u64 {
            self.chain
        }
        async fn call(&self, _contract: Address, payload: Vec<u8>) -> Result<Vec<u8>, Error> {
            Ok(payload[4..].to_vec())
        }
    }

    fn test_client(chain_declared: u64, chain_connected: u64) -> Result<ContractClient, Error> {
        let abi: ContractAbi = ECHO_ABI.parse().unwrap();
        let definition = ClientDefinition::generate("Echo", &abi).unwrap();
        ContractClient::new(
            definition,
            "0x6b175474e89094c44da98b954eedeac495271d0f"
                .parse()
                .unwrap(),
            chain_declared,
            Some(Arc::new(EchoConnection {
                chain: chain_connected,
            })),
            None,
        )
    }

    #[test]
    fn chain_id_mismatch_rejected() {
        let res = test_client(1, 100);
        assert!(matches!(
            res,
            Err(Error::ChainIdMismatch {
                declared: 1,
                connected: 100
            })
        ));
    }

    #[test]
    fn query_round_trips_through_echo() {
        let runner = System::new();
        let client = test_client(1, 1).unwrap();
        runner.block_on(async move {
            let out = client.query("echo", &[42u8.into()]).await.unwrap();
            assert_eq!(out, MethodOutput::Single(Value::Uint(42u8.into())));
        })
    }

    #[test]
    fn unknown_method_rejected() {
        let runner = System::new();
        let client = test_client(1, 1).unwrap();
        runner.block_on(async move {
            let res = client.query("burn", &[]).await;
            assert!(matches!(res, Err(Error::UnknownMethod(_))));
        })
    }

    #[test]
    fn kind_binding_enforced() {
        let runner = System::new();
        let client = test_client(1, 1).unwrap();
        runner.block_on(async move {
            // store was generated as a mutation, the query template must
            // refuse it
            let res = client.query("store", &[5u8.into()]).await;
            assert!(matches!(res, Err(Error::BadInput(_))));
        })
    }

    #[test]
    fn mutation_requires_readwrite_connection() {
        let runner = System::new();
        let client = test_client(1, 1).unwrap();
        runner.block_on(async move {
            let res = client.mutate("store", &[5u8.into()], Vec::new()).await;
            assert!(matches!(res, Err(Error::QueryOnlyConnection(_))));
        })
    }
}
