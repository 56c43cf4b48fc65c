use super::types::{
    AccountFunds, CatalogueQuery, CompetitionResult, MarketBook, MarketCatalogue,
    PlaceExecutionReport, PlaceOrdersRequest,
};
use super::Result;
use async_trait::async_trait;

/// Authenticated exchange calls returning decoded wire records
///
/// [`BetfairClient`](super::BetfairClient) is the HTTP implementation;
/// tests substitute in-memory gateways.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Competitions with markets in the given countries and sports
    async fn list_competitions(
        &self,
        country_codes: &[String],
        event_type_ids: &[u32],
    ) -> Result<Vec<CompetitionResult>>;

    /// One catalogue record per market matching `query`
    async fn list_market_catalogue(&self, query: &CatalogueQuery) -> Result<Vec<MarketCatalogue>>;

    /// Best offers for each of `market_ids`
    async fn list_market_book(&self, market_ids: &[String]) -> Result<Vec<MarketBook>>;

    /// Submit orders; the execution report is returned as received
    async fn place_orders(&self, request: &PlaceOrdersRequest) -> Result<PlaceExecutionReport>;

    async fn account_funds(&self) -> Result<AccountFunds>;
}
