//! Wire types shared between the runtime client and the JSON-RPC
//! collaborator.

use clarity::utils::{bytes_to_hex_str, hex_str_to_bytes};
use clarity::{Address, Uint256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// Serializes a slice of data as the "UNFORMATTED DATA" format required
/// by the Ethereum JSONRPC API.
///
/// See more https://ethereum.org/en/developers/docs/apis/json-rpc/#hex-encoding
pub fn data_serialize<S>(x: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format!("0x{}", bytes_to_hex_str(x)))
}

/// Deserializes a slice of data from the "UNFORMATTED DATA" format required
/// by the Ethereum JSONRPC API.
pub fn data_deserialize<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    hex_str_to_bytes(&s).map_err(serde::de::Error::custom)
}

/// Raw bytes with 0x-prefixed hex representation on the wire
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq, Hash)]
pub struct Data(
    #[serde(
        serialize_with = "data_serialize",
        deserialize_with = "data_deserialize"
    )]
    pub Vec<u8>,
);

impl Deref for Data {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(v: Vec<u8>) -> Self {
        Data(v)
    }
}

/// A quantity serialized as minimal-length 0x-prefixed hex, the QUANTITY
/// format of the JSONRPC API (no leading zeroes, unlike DATA)
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UnpaddedHex(pub Uint256);

impl Serialize for UnpaddedHex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

impl From<Uint256> for UnpaddedHex {
    fn from(v: Uint256) -> Self {
        UnpaddedHex(v)
    }
}

impl From<u64> for UnpaddedHex {
    fn from(v: u64) -> Self {
        UnpaddedHex(v.into())
    }
}

/// The call object handed to eth_call and eth_estimateGas. Unset fields
/// are omitted entirely, nodes fill their own defaults.
#[derive(Serialize, Clone, Eq, PartialEq, Debug)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<UnpaddedHex>,
    #[serde(rename = "gasPrice")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<UnpaddedHex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<UnpaddedHex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<UnpaddedHex>,
}

impl TransactionRequest {
    /// A request with only target and payload set, enough for a read call
    pub fn quick_call(to: Address, payload: Vec<u8>) -> TransactionRequest {
        TransactionRequest {
            from: None,
            to,
            gas: None,
            gas_price: None,
            value: None,
            data: Some(payload.into()),
            nonce: None,
        }
    }
}

/// As received by getTransactionReceipt, trimmed to the fields the client
/// consumes.
///
/// See more: https://ethereum.org/en/developers/docs/apis/json-rpc/#eth_gettransactionreceipt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// hash of the transaction
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Data,
    /// block number this transaction settled in, null while pending
    #[serde(rename = "blockNumber")]
    pub block_number: Option<Uint256>,
    /// address of the sender
    pub from: Address,
    /// address of the receiver (null for contract deploys)
    pub to: Option<Address>,
    /// amount of gas used by this transaction alone
    #[serde(rename = "gasUsed")]
    pub gas_used: Uint256,
    /// The contract address created, if the transaction was a contract
    /// creation, otherwise null
    #[serde(rename = "contractAddress")]
    pub contract_address: Option<Address>,
    /// either 1 (success) or 0 (failure) - post Byzantium only
    pub status: Option<Uint256>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        match &self.status {
            Some(status) => *status == 1u8.into(),
            // pre Byzantium receipts carry no status, assume inclusion
            // means success
            None => true,
        }
    }
}
