//! Certificate login and session keep-alive

use super::helpers::{parse_json, require_success, with_headers};
use super::types::{KeepAliveResponse, LoginResponse};
use super::{BetfairClient, ExchangeError, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const SUCCESS: &str = "SUCCESS";

impl BetfairClient {
    /// Log in with the client certificate and store the session token
    pub async fn login(&self) -> Result<()> {
        info!("[Auth] Logging in as {}", self.credentials.username);

        let form = [
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];
        let response = self
            .http
            .post(&self.config.login_url)
            .header("X-Application", &self.credentials.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;
        let response = require_success(response, "Login request failed").await?;

        let login: LoginResponse = parse_json(response).await?;
        let token = session_token_from(login)?;
        self.set_session_token(token);

        info!("[Auth] Login succeeded");
        Ok(())
    }

    /// Extend the session; the exchange expires idle sessions
    pub async fn keep_alive(&self) -> Result<()> {
        let headers = self.auth_headers()?;

        debug!("[Auth] Sending keep-alive");

        let response = with_headers(self.http.post(&self.config.keep_alive_url), headers)
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = require_success(response, "Keep-alive request failed").await?;

        let keep_alive: KeepAliveResponse = parse_json(response).await?;
        if let Some(token) = refreshed_token_from(keep_alive)? {
            self.set_session_token(token);
        }

        debug!("[Auth] Session extended");
        Ok(())
    }

    /// Headers carried by every authenticated call
    pub(crate) fn auth_headers(&self) -> Result<HashMap<&'static str, String>> {
        let token = self.session_token().ok_or(ExchangeError::NotLoggedIn)?;

        Ok(HashMap::from([
            ("X-Application", self.credentials.api_key.clone()),
            ("X-Authentication", token),
        ]))
    }
}

fn session_token_from(login: LoginResponse) -> Result<String> {
    if login.login_status != SUCCESS {
        warn!("[Auth] Login rejected: {}", login.login_status);
        return Err(ExchangeError::Login(login.login_status));
    }

    login
        .session_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ExchangeError::Login("SUCCESS without a session token".to_string()))
}

fn refreshed_token_from(response: KeepAliveResponse) -> Result<Option<String>> {
    if response.status != SUCCESS {
        let reason = response.error.unwrap_or(response.status);
        warn!("[Auth] Keep-alive rejected: {}", reason);
        return Err(ExchangeError::Login(reason));
    }

    Ok(response.token.filter(|token| !token.is_empty()))
}
