//! Infrastructure Layer
//!
//! HTTP client, configuration and logging.
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;
pub mod logging;

pub use client::{BetfairClient, ExchangeError, ExchangeGateway};
pub use config::{ClientConfig, ConfigError, Credentials};
pub use logging::{init_tracing, init_tracing_with_level};
