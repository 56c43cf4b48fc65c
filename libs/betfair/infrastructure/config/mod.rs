use crate::domain::MarketType;
use crate::infrastructure::client::types::CatalogueQuery;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarMissing(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const DEFAULT_LOGIN_URL: &str = "https://identitysso-cert.betfair.com/api/certlogin";
pub const DEFAULT_KEEP_ALIVE_URL: &str = "https://identitysso.betfair.com/api/keepAlive";
pub const DEFAULT_BETTING_URL: &str = "https://api.betfair.com/exchange/betting/json-rpc/v1";
pub const DEFAULT_ACCOUNT_URL: &str = "https://api.betfair.com/exchange/account/json-rpc/v1";

/// Upper bound the exchange accepts for listMarketCatalogue maxResults
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Exchange client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_keep_alive_url")]
    pub keep_alive_url: String,
    #[serde(default = "default_betting_url")]
    pub betting_url: String,
    #[serde(default = "default_account_url")]
    pub account_url: String,
    /// Per-request HTTP timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// maxResults sent with listMarketCatalogue (1..=1000)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Market ids per listMarketBook request
    #[serde(default = "default_chunk_size")]
    pub market_book_chunk_size: usize,
    /// Sessions expire after a period of inactivity; keep-alive is sent this often
    #[serde(default = "default_keep_alive_interval")]
    pub keep_alive_interval_secs: u64,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub catalogue: CatalogueQuery,
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

fn default_keep_alive_url() -> String {
    DEFAULT_KEEP_ALIVE_URL.to_string()
}

fn default_betting_url() -> String {
    DEFAULT_BETTING_URL.to_string()
}

fn default_account_url() -> String {
    DEFAULT_ACCOUNT_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_results() -> u32 {
    MAX_RESULTS_LIMIT
}

fn default_chunk_size() -> usize {
    40
}

fn default_keep_alive_interval() -> u64 {
    900
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            keep_alive_url: default_keep_alive_url(),
            betting_url: default_betting_url(),
            account_url: default_account_url(),
            request_timeout_secs: default_request_timeout(),
            max_results: default_max_results(),
            market_book_chunk_size: default_chunk_size(),
            keep_alive_interval_secs: default_keep_alive_interval(),
            log_level: default_log_level(),
            catalogue: CatalogueQuery::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("login_url", &self.login_url),
            ("keep_alive_url", &self.keep_alive_url),
            ("betting_url", &self.betting_url),
            ("account_url", &self.account_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.market_book_chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "market_book_chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_results must be between 1 and {}",
                MAX_RESULTS_LIMIT
            )));
        }

        if self.catalogue.market_types.is_empty() {
            return Err(ConfigError::ValidationError(
                "catalogue.market_types must list at least one market type".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        let market_types: Vec<&str> = self
            .catalogue
            .market_types
            .iter()
            .map(MarketType::as_str)
            .collect();

        info!("Configuration loaded:");
        info!("  Betting endpoint: {}", self.betting_url);
        info!("  Account endpoint: {}", self.account_url);
        info!("  Request timeout: {}s", self.request_timeout_secs);
        info!("  Market book chunk size: {}", self.market_book_chunk_size);
        info!("  Keep-alive interval: {}s", self.keep_alive_interval_secs);
        info!("  Event type: {}", self.catalogue.event_type_id);
        info!("  Market types: {}", market_types.join(", "));
        info!("  Days ahead: {}", self.catalogue.days_ahead);
        info!("  Log level: {}", self.log_level);
    }
}

/// Login credentials, read from the environment (never from YAML)
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Credentials {
    pub const USERNAME_VAR: &'static str = "BETFAIR_USERNAME";
    pub const PASSWORD_VAR: &'static str = "BETFAIR_PASSWORD";
    pub const API_KEY_VAR: &'static str = "BETFAIR_API_KEY";
    pub const CERT_VAR: &'static str = "BETFAIR_CLIENT_CERT";
    pub const KEY_VAR: &'static str = "BETFAIR_CLIENT_CERT_KEY";

    /// Load credentials from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            username: require_env(Self::USERNAME_VAR)?,
            password: require_env(Self::PASSWORD_VAR)?,
            api_key: require_env(Self::API_KEY_VAR)?,
            cert_path: require_env(Self::CERT_VAR)?.into(),
            key_path: require_env(Self::KEY_VAR)?.into(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("api_key", &"***")
            .field("cert_path", &self.cert_path)
            .field("key_path", &self.key_path)
            .finish()
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::EnvVarMissing(name.to_string())),
    }
}
