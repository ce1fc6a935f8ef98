//! The JSON-RPC 2.0 request and response envelopes.

use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Request<T> {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: T,
}

impl<T> Request<T> {
    pub fn new(id: u64, method: &str, params: T) -> Self {
        Request {
            id,
            jsonrpc: "2.0",
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ResponseData<R> {
    Error { error: RpcError },
    Success { result: R },
}

impl<R> ResponseData<R> {
    /// Consume response and return value
    pub fn into_result(self) -> Result<R, RpcError> {
        match self {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(error),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Response<R> {
    pub id: Value,
    pub jsonrpc: String,
    #[serde(flatten)]
    pub data: ResponseData<R>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape() {
        let request = Request::new(7, "eth_chainId", Vec::<String>::new());
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"jsonrpc":"2.0","method":"eth_chainId","params":[]}"#
        );
    }

    #[test]
    fn success_response() {
        let response: Response<u64> =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "result": 19, "id": 1}"#).unwrap();
        assert_eq!(response.id.as_u64().unwrap(), 1);
        assert_eq!(response.data.into_result().unwrap(), 19);
    }

    #[test]
    fn error_response() {
        let response: Response<Value> = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": "1"}"#,
        )
        .unwrap();
        assert_eq!(response.id.as_str().unwrap(), "1");
        let err = response.data.into_result().unwrap_err();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");
    }
}
