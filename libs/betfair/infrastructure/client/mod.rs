//! Betfair exchange client
//!
//! Split into focused modules:
//! - `auth`: certificate login and session keep-alive
//! - `rpc`: JSON-RPC envelope and upstream error mapping
//! - `operations`: betting and account calls behind [`ExchangeGateway`]
//! - `types`: wire records

mod auth;
pub mod gateway;
mod helpers;
mod operations;
mod rpc;
pub mod types;

pub use gateway::ExchangeGateway;
pub use types::{
    AccountFunds, CatalogueQuery, CompetitionResult, ExecutionReportStatus, MarketBook,
    MarketCatalogue, PlaceExecutionReport, PlaceOrdersRequest,
};

use crate::domain::UpstreamFault;
use crate::infrastructure::config::{ClientConfig, Credentials};
use parking_lot::RwLock;
use reqwest::{Client, Identity};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Upstream fault: {0}")]
    Upstream(#[from] UpstreamFault),

    #[error("Order rejected: {error_code}")]
    OrderRejected { error_code: String },

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Client certificate error: {0}")]
    Certificate(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl ExchangeError {
    pub fn upstream_fault(&self) -> Option<&UpstreamFault> {
        match self {
            ExchangeError::Upstream(fault) => Some(fault),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Authenticated JSON-RPC client for the exchange
pub struct BetfairClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
    pub(crate) credentials: Credentials,
    session: RwLock<Option<String>>,
}

impl BetfairClient {
    /// Build a client presenting the credentials' certificate on every request
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let identity = load_identity(&credentials.cert_path, &credentials.key_path)?;

        let http = Client::builder()
            .identity(identity)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            config,
            credentials,
            session: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_token(&self) -> Option<String> {
        self.session.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_some()
    }

    pub(crate) fn set_session_token(&self, token: String) {
        *self.session.write() = Some(token);
    }
}

/// Read the PEM certificate and key into a TLS client identity
fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity> {
    let read = |path: &Path| {
        std::fs::read(path)
            .map_err(|e| ExchangeError::Certificate(format!("{}: {}", path.display(), e)))
    };
    let cert = read(cert_path)?;
    let key = read(key_path)?;

    debug!("Loaded client certificate from {}", cert_path.display());

    Identity::from_pkcs8_pem(&cert, &key).map_err(|e| ExchangeError::Certificate(e.to_string()))
}
