//! Shared HTTP helper functions for the exchange client

use reqwest::RequestBuilder;
use std::collections::HashMap;

use super::ExchangeError;

/// Extract error message from a failed API response
pub async fn extract_api_error(response: reqwest::Response, context: &str) -> ExchangeError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    ExchangeError::ApiError(format!("{} ({}): {}", context, status, error_text))
}

/// Check if response is successful, returning the response or an error
pub async fn require_success(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response, ExchangeError> {
    if !response.status().is_success() {
        return Err(extract_api_error(response, context).await);
    }
    Ok(response)
}

/// Add headers from a HashMap to a request builder
pub fn with_headers(req: RequestBuilder, headers: HashMap<&'static str, String>) -> RequestBuilder {
    headers.into_iter().fold(req, |r, (k, v)| r.header(k, v))
}

/// Deserialize JSON response with proper error handling
pub async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ExchangeError> {
    response
        .json()
        .await
        .map_err(|e| ExchangeError::DeserializeFailed(e.to_string()))
}
