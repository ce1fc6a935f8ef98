use awc::error::SendRequestError as ActixError;
use clarity::Error as ClarityError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::time::Duration;

/// Every failure the crate surfaces, in three broad families: configuration
/// errors raised before any network interaction, encode/decode errors raised
/// when values do not fit an entry's declared shape, and network errors
/// propagated unchanged from the underlying connection.
#[derive(Debug)]
pub enum Error {
    /// The ABI document or a selected entry cannot be used for generation
    BadAbi(String),
    /// A client was constructed with neither connection kind
    NoConnection,
    /// A client was constructed with both connection kinds at once
    BothConnections,
    /// The connection reports a different chain than the client declares
    ChainIdMismatch {
        declared: u64,
        connected: u64,
    },
    /// A mutation method was invoked on an instance holding only a
    /// query-only connection
    QueryOnlyConnection(String),
    /// No generated method with this name exists in the client definition
    UnknownMethod(String),
    BadInput(String),
    /// Supplied arguments do not match the entry's declared inputs
    Encode(String),
    /// A raw result cannot be decoded against the entry's output shape
    Decode(String),
    FailedToSend(ActixError),
    JsonRpcError {
        code: i64,
        message: String,
        data: String,
    },
    BadResponse(String),
    TransactionTimeout {
        time: Duration,
    },
    ClarityError(ClarityError),
}

impl Error {
    /// True for errors raised synchronously, before any network interaction
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::BadAbi(_)
                | Error::NoConnection
                | Error::BothConnections
                | Error::ChainIdMismatch { .. }
                | Error::QueryOnlyConnection(_)
                | Error::UnknownMethod(_)
                | Error::BadInput(_)
        )
    }
}

impl From<ClarityError> for Error {
    fn from(error: ClarityError) -> Self {
        Error::ClarityError(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Error::BadAbi(val) => write!(f, "Unusable ABI {val}"),
            Error::NoConnection => {
                write!(f, "Contract client requires a connection, none supplied")
            }
            Error::BothConnections => write!(
                f,
                "Contract client takes exactly one connection, both kinds supplied"
            ),
            Error::ChainIdMismatch {
                declared,
                connected,
            } => write!(
                f,
                "Client declares chain {declared} but connection is bound to chain {connected}"
            ),
            Error::QueryOnlyConnection(val) => write!(
                f,
                "Method {val} mutates state and needs a transaction-capable connection"
            ),
            Error::UnknownMethod(val) => write!(f, "No generated method named {val}"),
            Error::BadInput(val) => write!(f, "Bad input {val}"),
            Error::Encode(val) => write!(f, "Failed to encode call {val}"),
            Error::Decode(val) => write!(f, "Failed to decode result {val}"),
            Error::FailedToSend(val) => write!(f, "Failed to send {val}"),
            Error::JsonRpcError {
                code,
                message,
                data,
            } => write!(
                f,
                "Response error code {code} message {message} data {data:?}"
            ),
            Error::BadResponse(val) => write!(f, "Bad response {val}"),
            Error::TransactionTimeout { time } => write!(
                f,
                "Transaction did not enter the chain within {} seconds",
                time.as_secs()
            ),
            Error::ClarityError(val) => write!(f, "ClarityError {val}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_reports_the_real_deadline() {
        let err = Error::TransactionTimeout {
            time: Duration::from_secs(120),
        };
        assert!(err.to_string().contains("120 seconds"));
    }
}
