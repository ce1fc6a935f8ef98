use crate::error::Error;
use crate::jsonrpc::envelope::{Request, Response};
use awc::http::header;
use awc::Client;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ceiling on response body size, large enough for any single call result
/// while bounding memory against a misbehaving endpoint
const RESPONSE_SIZE_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct HttpClient {
    id_counter: Arc<Mutex<RefCell<u64>>>,
    url: String,
    client: Client,
}

impl HttpClient {
    pub fn new(url: &str) -> Self {
        Self {
            id_counter: Arc::new(Mutex::new(RefCell::new(0u64))),
            url: url.to_string(),
            client: Client::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        let counter = self.id_counter.clone();
        let counter = match counter.lock() {
            Ok(counter) => counter,
            // a panic while holding the lock leaves the counter usable,
            // ids only need to be unique within a client
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut value = counter.borrow_mut();
        *value += 1;
        *value
    }

    pub async fn request_method<T, R>(
        &self,
        method: &str,
        params: T,
        timeout: Duration,
    ) -> Result<R, Error>
    where
        R: 'static,
        for<'de> R: Deserialize<'de>,
        T: Serialize,
        T: std::fmt::Debug,
        R: std::fmt::Debug,
    {
        trace!("Making request {} {:?}", method, params);
        let payload = Request::new(self.next_id(), method, params);
        let res = self
            .client
            .post(&self.url)
            .append_header((header::CONTENT_TYPE, "application/json"))
            .timeout(timeout)
            .send_json(&payload)
            .await;
        let mut res = match res {
            Ok(val) => val,
            Err(e) => return Err(Error::FailedToSend(e)),
        };

        trace!("response headers {:?}", res.headers());

        let body_bytes = match res.body().limit(RESPONSE_SIZE_LIMIT).await {
            Ok(val) => val,
            Err(e) => {
                return Err(Error::BadResponse(format!(
                    "Size limit {RESPONSE_SIZE_LIMIT} error {e}"
                )))
            }
        };

        let decoded: Response<R> = match serde_json::from_slice(&body_bytes) {
            Ok(val) => val,
            Err(e) => {
                let body_str = String::from_utf8_lossy(&body_bytes);
                return Err(Error::BadResponse(format!(
                    "Failed to deserialize response: {e}\nRaw response: {body_str}"
                )));
            }
        };
        trace!("got response {:#?}", decoded);

        match decoded.data.into_result() {
            Ok(r) => Ok(r),
            Err(e) => Err(Error::JsonRpcError {
                code: e.code,
                message: e.message,
                data: format!("{:?}", e.data),
            }),
        }
    }
}
