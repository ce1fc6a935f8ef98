//! Bundled connections speaking Ethereum JSON-RPC over HTTP.
//!
//! [`HttpConnection`] is the query-only kind, [`SigningConnection`] wraps
//! one together with a private key to form the transaction-capable kind.
//! Both verify at construction that the endpoint really serves the chain
//! they claim to be bound to.

use crate::connection::{MutationConnection, QueryConnection};
use crate::error::Error;
use crate::jsonrpc::HttpClient;
use crate::types::{Data, TransactionReceipt, TransactionRequest};
use async_trait::async_trait;
use clarity::utils::bytes_to_hex_str;
use clarity::{Address, PrivateKey, Transaction, Uint256};
use futures::future::join;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// How often a pending transaction is polled for its receipt
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default ceiling on awaiting a receipt. Settlement takes whole blocks,
/// not one HTTP round trip, so this is deliberately separate from the
/// per-request timeout.
const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

fn low_u64(value: Uint256) -> u64 {
    let bytes = value.to_be_bytes();
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[24..]);
    u64::from_be_bytes(out)
}

/// A query-only connection to one JSON-RPC endpoint
#[derive(Clone)]
pub struct HttpConnection {
    jsonrpc_client: HttpClient,
    chain_id: u64,
    timeout: Duration,
}

impl HttpConnection {
    /// Connects to `url` and confirms the endpoint serves `chain_id`
    /// before handing the connection out
    pub async fn new(url: &str, chain_id: u64, timeout: Duration) -> Result<HttpConnection, Error> {
        let connection = HttpConnection {
            jsonrpc_client: HttpClient::new(url),
            chain_id,
            timeout,
        };
        connection.verify_chain_id().await?;
        Ok(connection)
    }

    pub fn url(&self) -> &str {
        self.jsonrpc_client.url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn verify_chain_id(&self) -> Result<(), Error> {
        let connected = self.eth_chain_id().await?;
        if connected != self.chain_id.into() {
            return Err(Error::ChainIdMismatch {
                declared: self.chain_id,
                connected: low_u64(connected),
            });
        }
        Ok(())
    }

    pub async fn eth_chain_id(&self) -> Result<Uint256, Error> {
        self.jsonrpc_client
            .request_method("eth_chainId", Vec::<String>::new(), self.timeout)
            .await
    }

    pub async fn eth_call(&self, transaction: TransactionRequest) -> Result<Data, Error> {
        self.jsonrpc_client
            .request_method("eth_call", (transaction, "latest"), self.timeout)
            .await
    }

    pub async fn eth_get_transaction_count(&self, address: Address) -> Result<Uint256, Error> {
        self.jsonrpc_client
            .request_method(
                "eth_getTransactionCount",
                vec![address.to_string(), "latest".to_string()],
                self.timeout,
            )
            .await
    }

    pub async fn eth_gas_price(&self) -> Result<Uint256, Error> {
        self.jsonrpc_client
            .request_method("eth_gasPrice", Vec::<String>::new(), self.timeout)
            .await
    }

    pub async fn eth_estimate_gas(&self, transaction: TransactionRequest) -> Result<Uint256, Error> {
        self.jsonrpc_client
            .request_method("eth_estimateGas", vec![transaction], self.timeout)
            .await
    }

    pub async fn eth_send_raw_transaction(&self, data: Vec<u8>) -> Result<Uint256, Error> {
        self.jsonrpc_client
            .request_method(
                "eth_sendRawTransaction",
                vec![format!("0x{}", bytes_to_hex_str(&data))],
                self.timeout,
            )
            .await
    }

    /// None while the transaction is pending or unknown
    pub async fn eth_get_transaction_receipt(
        &self,
        hash: Uint256,
    ) -> Result<Option<TransactionReceipt>, Error> {
        self.jsonrpc_client
            .request_method(
                "eth_getTransactionReceipt",
                vec![format!("{hash:#066x}")],
                self.timeout,
            )
            .await
    }
}

#[async_trait(?Send)]
impl QueryConnection for HttpConnection {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn call(&self, contract: Address, payload: Vec<u8>) -> Result<Vec<u8>, Error> {
        let res = self
            .eth_call(TransactionRequest::quick_call(contract, payload))
            .await?;
        Ok(res.0)
    }
}

/// A transaction-capable connection: a query connection plus the key it
/// signs with. Transactions are signed locally and submitted raw, the
/// endpoint never sees the key.
#[derive(Clone)]
pub struct SigningConnection {
    http: HttpConnection,
    key: PrivateKey,
    receipt_timeout: Duration,
}

impl SigningConnection {
    pub async fn new(
        url: &str,
        chain_id: u64,
        timeout: Duration,
        key: PrivateKey,
    ) -> Result<SigningConnection, Error> {
        let http = HttpConnection::new(url, chain_id, timeout).await?;
        Ok(SigningConnection::from_connection(http, key))
    }

    /// Wraps an already verified query connection with a signing key
    pub fn from_connection(http: HttpConnection, key: PrivateKey) -> SigningConnection {
        SigningConnection {
            http,
            key,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }

    /// Overrides how long a submitted transaction is awaited before
    /// giving up with a timeout
    pub fn with_receipt_timeout(mut self, receipt_timeout: Duration) -> SigningConnection {
        self.receipt_timeout = receipt_timeout;
        self
    }

    pub fn receipt_timeout(&self) -> Duration {
        self.receipt_timeout
    }

    pub fn own_address(&self) -> Address {
        self.key.to_address()
    }
}

#[async_trait(?Send)]
impl QueryConnection for SigningConnection {
    fn chain_id(&self) -> u64 {
        self.http.chain_id
    }

    async fn call(&self, contract: Address, payload: Vec<u8>) -> Result<Vec<u8>, Error> {
        self.http.call(contract, payload).await
    }
}

#[async_trait(?Send)]
impl MutationConnection for SigningConnection {
    async fn submit(
        &self,
        contract: Address,
        payload: Vec<u8>,
        value: Uint256,
        fee_price: Option<Uint256>,
    ) -> Result<Uint256, Error> {
        let own_address = self.key.to_address();

        // request in parallel
        let (nonce, gas_price) = join(
            self.http.eth_get_transaction_count(own_address),
            self.http.eth_gas_price(),
        )
        .await;
        let nonce = nonce?;
        let gas_price = match fee_price {
            Some(price) => price,
            None => gas_price?,
        };

        let gas_limit = self
            .http
            .eth_estimate_gas(TransactionRequest {
                from: Some(own_address),
                to: contract,
                gas: None,
                gas_price: Some(gas_price.into()),
                value: Some(value.into()),
                data: Some(payload.clone().into()),
                nonce: Some(nonce.into()),
            })
            .await?;

        let transaction = Transaction::Legacy {
            nonce,
            gas_price,
            gas_limit,
            to: contract,
            value,
            data: payload,
            signature: None,
        };
        let transaction = transaction.sign(&self.key, Some(self.http.chain_id));

        trace!(
            "sending transaction from {} to {} nonce {}",
            own_address,
            contract,
            nonce
        );
        self.http
            .eth_send_raw_transaction(transaction.to_bytes())
            .await
    }

    async fn wait_for_receipt(&self, txid: Uint256) -> Result<TransactionReceipt, Error> {
        let start = Instant::now();
        loop {
            sleep(RECEIPT_POLL_INTERVAL).await;
            match self.http.eth_get_transaction_receipt(txid).await {
                Ok(Some(receipt)) => return Ok(receipt),
                // still pending, keep polling
                Ok(None) => {}
                // nodes briefly error on very fresh hashes, treat like
                // pending until the deadline
                Err(e) => warn!("receipt poll failed {}", e),
            }
            if Instant::now() - start > self.receipt_timeout {
                return Err(Error::TransactionTimeout {
                    time: self.receipt_timeout,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_u64_takes_trailing_bytes() {
        assert_eq!(low_u64(1u8.into()), 1);
        assert_eq!(low_u64(0xdeadbeefu32.into()), 0xdeadbeef);
        assert_eq!(low_u64(u64::MAX.into()), u64::MAX);
    }

    #[test]
    fn receipt_deadline_is_separate_from_request_timeout() {
        let http = HttpConnection {
            jsonrpc_client: HttpClient::new("http://localhost:8545"),
            chain_id: 1,
            timeout: Duration::from_secs(5),
        };
        let key: PrivateKey = "0xc85ef7d79691fe79573b1a7064c19c1a9819ebdbd1faaab1a8ec92344438aaf4"
            .parse()
            .unwrap();

        let signing = SigningConnection::from_connection(http, key);
        assert_eq!(signing.receipt_timeout(), DEFAULT_RECEIPT_TIMEOUT);
        assert_ne!(signing.receipt_timeout(), signing.http.timeout);

        let signing = signing.with_receipt_timeout(Duration::from_secs(600));
        assert_eq!(signing.receipt_timeout(), Duration::from_secs(600));
    }
}
