//! Betfair Exchange Client
//!
//! Certificate login, JSON-RPC betting/account calls, and a deduplicated
//! Event → Market → Runner catalog with best back/lay price queries.
//!
//! ## Architecture
//!
//! - `domain`: catalog graph, prices and error taxonomy
//! - `application`: catalog assembly, price reconciliation, [`ExchangeApp`]
//! - `infrastructure`: HTTP client, configuration, logging
//! - `utils`: session heartbeat and shutdown handling

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

pub use application::{assemble, reconcile, AppError, ExchangeApp};
pub use domain::{
    CatalogError, Competition, Event, FaultCategory, Market, MarketId, MarketType, Runner,
    RunnerId, RunnerPrice, Side, UpstreamFault,
};
pub use infrastructure::client::types::{
    AccountFunds, CatalogueQuery, MarketBook, MarketCatalogue, PlaceExecutionReport,
    PlaceOrdersRequest,
};
pub use infrastructure::{
    init_tracing, init_tracing_with_level, BetfairClient, ClientConfig, ConfigError, Credentials,
    ExchangeError, ExchangeGateway,
};
pub use utils::{SessionHeartbeat, ShutdownManager};
