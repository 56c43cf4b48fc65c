//! JSON-RPC transport

use super::helpers::with_headers;
use super::types::{RpcRequest, RpcResponse};
use super::{BetfairClient, ExchangeError, Result};
use crate::domain::UpstreamFault;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

impl BetfairClient {
    /// Invoke `method` on `url` and decode its result
    pub(crate) async fn call<P, T>(&self, url: &str, method: &str, params: P) -> Result<T>
    where
        P: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        let headers = self.auth_headers()?;
        let request = RpcRequest::new(method, params);

        debug!("[RPC] -> {}", method);

        let response = with_headers(self.http.post(url), headers)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<RpcResponse<T>>(&body) {
            Ok(envelope) => decode_response(method, envelope),
            Err(_) if !status.is_success() => Err(ExchangeError::ApiError(format!(
                "{} ({}): {}",
                method, status, body
            ))),
            Err(e) => Err(ExchangeError::DeserializeFailed(format!("{}: {}", method, e))),
        }
    }
}

/// Unwrap a JSON-RPC response, mapping an error object to its upstream fault.
///
/// The error's `message` carries the upstream code (e.g. "DSC-0018").
pub(crate) fn decode_response<T>(method: &str, envelope: RpcResponse<T>) -> Result<T> {
    if let Some(error) = envelope.error {
        let fault = UpstreamFault::from_code(&error.message);
        warn!(
            "[RPC] {} failed: {} [{}] {}",
            method,
            error.message,
            fault.category(),
            error.exception_code().unwrap_or("-")
        );
        return Err(ExchangeError::Upstream(fault));
    }

    envelope.result.ok_or_else(|| {
        ExchangeError::DeserializeFailed(format!("{}: response has neither result nor error", method))
    })
}
