//! Betfair Exchange Client - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI parsing, banners)
//! - **betfair**: Exchange client and catalog core (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use betfair_exchange_client::bin_common::{load_config_from_env, ConfigType};
//! use betfair_exchange_client::betfair::ExchangeApp;
//! ```

// Re-export workspace library for convenience
pub use betfair;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, print_banner, print_shutdown, ConfigType};
}
