//! Application Layer
//!
//! Catalog assembly, price reconciliation and the facade binaries use.
//! Depends on the domain and infrastructure layers.

pub mod catalog;
pub mod facade;
pub mod reconcile;

pub use catalog::{assemble, parse_timestamp, BETFAIR_DATETIME_FORMAT};
pub use facade::{AppError, ExchangeApp, DEFAULT_CHUNK_SIZE};
pub use reconcile::reconcile;
