//! Domain Layer
//!
//! Contains the normalized catalog graph (Event → Market → Runner) and
//! the error taxonomy. This layer has no dependencies on infrastructure
//! or application layers.

pub mod competition;
pub mod errors;
pub mod event;
pub mod market;
pub mod market_type;
pub mod runner;
pub mod runner_price;

pub use competition::Competition;
pub use errors::{CatalogError, FaultCategory, UpstreamFault};
pub use event::Event;
pub use market::{Market, MarketId};
pub use market_type::MarketType;
pub use runner::{Runner, RunnerId};
pub use runner_price::{RunnerPrice, Side};
