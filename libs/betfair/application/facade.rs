//! Application Facade
//!
//! Public API for binaries: wires a gateway to the catalog assembler and
//! price reconciler, and owns the resulting event graph.

use super::{catalog, reconcile};
use crate::domain::errors::CatalogError;
use crate::domain::{Competition, Event, Market, Runner, RunnerPrice, Side};
use crate::infrastructure::client::types::{
    AccountFunds, CatalogueQuery, ExecutionReportStatus, MarketBook, PlaceExecutionReport,
    PlaceOrdersRequest,
};
use crate::infrastructure::client::{ExchangeError, ExchangeGateway};
use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Default number of market ids per listMarketBook request
pub const DEFAULT_CHUNK_SIZE: usize = 40;

/// Catalog and price facade over an [`ExchangeGateway`]
pub struct ExchangeApp<G: ExchangeGateway> {
    gateway: G,
    events: Vec<Event>,
    chunk_size: usize,
}

impl<G: ExchangeGateway> ExchangeApp<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            events: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Market ids per price-book request (at least 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the catalogue for `query` and replace the held event graph
    pub async fn fetch_upcoming_events(&mut self, query: &CatalogueQuery) -> Result<&[Event]> {
        let records = self.gateway.list_market_catalogue(query).await?;
        let events = catalog::assemble(&records)?;

        info!(
            "Assembled {} events from {} market records",
            events.len(),
            records.len()
        );

        self.events = events;
        Ok(self.events.as_slice())
    }

    /// Replace the held graph with one assembled elsewhere
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Fetch price books for every held market and reconcile them.
    ///
    /// Chunks are fetched concurrently; reconciliation runs once over all
    /// books, so a lookup failure leaves every price untouched. Returns the
    /// number of market books applied.
    pub async fn refresh_prices(&mut self) -> Result<usize> {
        let market_ids: Vec<String> = self
            .events
            .iter()
            .flat_map(|event| event.market_ids().map(str::to_string))
            .collect();

        if market_ids.is_empty() {
            debug!("No markets held, skipping price refresh");
            return Ok(0);
        }

        let requests = market_ids
            .chunks(self.chunk_size)
            .map(|chunk| self.gateway.list_market_book(chunk));
        let responses = try_join_all(requests).await?;

        warn_if_delayed(&responses);

        let books: Vec<MarketBook> = responses.into_iter().flatten().collect();
        reconcile::reconcile(&mut self.events, &books)?;

        debug!(
            "Refreshed prices for {} of {} markets",
            books.len(),
            market_ids.len()
        );
        Ok(books.len())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn list_events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    /// Find a held market across all events
    pub fn market(&self, market_id: &str) -> Option<&Market> {
        self.events.iter().find_map(|event| event.market(market_id))
    }

    pub fn list_markets<'a>(&self, event: &'a Event) -> Vec<&'a Market> {
        event.markets().collect()
    }

    pub fn list_runners<'a>(&self, market: &'a Market) -> Vec<&'a Runner> {
        market.runners().collect()
    }

    pub fn best_back_price(&self, runner: &Runner) -> RunnerPrice {
        runner.best_back_price()
    }

    pub fn best_lay_price(&self, runner: &Runner) -> RunnerPrice {
        runner.best_lay_price()
    }

    pub fn all_available_prices(&self, runner: &Runner) -> Vec<RunnerPrice> {
        runner.all_available_prices()
    }

    // =========================================================================
    // Pass-through operations
    // =========================================================================

    pub async fn list_competitions(
        &self,
        country_codes: &[String],
        event_type_ids: &[u32],
    ) -> Result<Vec<Competition>> {
        let results = self
            .gateway
            .list_competitions(country_codes, event_type_ids)
            .await?;

        let competitions = results
            .iter()
            .map(|result| {
                let raw = &result.competition;
                raw.id
                    .trim()
                    .parse::<u64>()
                    .map(|id| Competition::new(&raw.name, id))
                    .map_err(|e| CatalogError::Parse {
                        field: "competition.id",
                        value: raw.id.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(competitions)
    }

    pub async fn account_funds(&self) -> Result<AccountFunds> {
        Ok(self.gateway.account_funds().await?)
    }

    /// Place a single LIMIT order that lapses in-play
    pub async fn place_order(
        &self,
        market: &Market,
        runner: &Runner,
        price: f64,
        side: Side,
        size: f64,
    ) -> Result<PlaceExecutionReport> {
        let request = PlaceOrdersRequest::limit(market.id(), runner.id(), side, price, size);
        let report = self.gateway.place_orders(&request).await?;

        if report.status == ExecutionReportStatus::Failure {
            let error_code = rejection_code(&report);
            error!(
                "Order on {} / {} rejected: {}",
                market.id(),
                runner.name(),
                error_code
            );
            return Err(ExchangeError::OrderRejected { error_code }.into());
        }

        info!(
            "Order placed: {} {} @ {} x {} ({:?})",
            side,
            runner.name(),
            price,
            size,
            report.status
        );
        Ok(report)
    }
}

/// First record of the first chunk decides the delayed-data warning
fn warn_if_delayed(responses: &[Vec<MarketBook>]) {
    let delayed = responses
        .first()
        .and_then(|books| books.first())
        .map(|book| book.is_market_data_delayed)
        .unwrap_or(false);

    if delayed {
        warn!("Market data is delayed. The application key may need live data access.");
    }
}

fn rejection_code(report: &PlaceExecutionReport) -> String {
    report
        .error_code
        .clone()
        .or_else(|| {
            report
                .instruction_reports
                .iter()
                .find_map(|instruction| instruction.error_code.clone())
        })
        .unwrap_or_else(|| "UNKNOWN".to_string())
}
