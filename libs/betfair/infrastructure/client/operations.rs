//! Betting and account operations

use super::gateway::ExchangeGateway;
use super::types::*;
use super::{BetfairClient, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

pub const LIST_COMPETITIONS: &str = "SportsAPING/v1.0/listCompetitions";
pub const LIST_MARKET_CATALOGUE: &str = "SportsAPING/v1.0/listMarketCatalogue";
pub const LIST_MARKET_BOOK: &str = "SportsAPING/v1.0/listMarketBook";
pub const PLACE_ORDERS: &str = "SportsAPING/v1.0/placeOrders";
pub const GET_ACCOUNT_FUNDS: &str = "AccountAPING/v1.0/getAccountFunds";

#[derive(Serialize)]
struct FilterParams {
    filter: MarketFilter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueParams {
    filter: MarketFilter,
    max_results: u32,
    market_projection: &'static [&'static str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceProjection {
    price_data: [&'static str; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketBookParams<'a> {
    market_ids: &'a [String],
    price_projection: PriceProjection,
}

#[derive(Serialize)]
struct EmptyParams {}

#[async_trait]
impl ExchangeGateway for BetfairClient {
    async fn list_competitions(
        &self,
        country_codes: &[String],
        event_type_ids: &[u32],
    ) -> Result<Vec<CompetitionResult>> {
        let params = FilterParams {
            filter: MarketFilter {
                event_type_ids: event_type_ids.iter().map(|id| id.to_string()).collect(),
                market_countries: Some(country_codes.to_vec()),
                ..Default::default()
            },
        };

        let competitions: Vec<CompetitionResult> = self
            .call(&self.config.betting_url, LIST_COMPETITIONS, params)
            .await?;

        debug!("Fetched {} competitions", competitions.len());
        Ok(competitions)
    }

    async fn list_market_catalogue(&self, query: &CatalogueQuery) -> Result<Vec<MarketCatalogue>> {
        let params = CatalogueParams {
            filter: query.to_market_filter(Utc::now().date_naive()),
            max_results: self.config.max_results,
            market_projection: CATALOGUE_PROJECTION,
        };

        let records: Vec<MarketCatalogue> = self
            .call(&self.config.betting_url, LIST_MARKET_CATALOGUE, params)
            .await?;

        info!(
            "Fetched {} catalogue records ({} days ahead)",
            records.len(),
            query.days_ahead
        );
        Ok(records)
    }

    async fn list_market_book(&self, market_ids: &[String]) -> Result<Vec<MarketBook>> {
        let params = MarketBookParams {
            market_ids,
            price_projection: PriceProjection {
                price_data: ["EX_BEST_OFFERS"],
            },
        };

        let books: Vec<MarketBook> = self
            .call(&self.config.betting_url, LIST_MARKET_BOOK, params)
            .await?;

        debug!("Fetched {} market books", books.len());
        Ok(books)
    }

    async fn place_orders(&self, request: &PlaceOrdersRequest) -> Result<PlaceExecutionReport> {
        info!(
            "Placing {} instruction(s) on market {}",
            request.instructions.len(),
            request.market_id
        );

        self.call(&self.config.betting_url, PLACE_ORDERS, request)
            .await
    }

    async fn account_funds(&self) -> Result<AccountFunds> {
        self.call(&self.config.account_url, GET_ACCOUNT_FUNDS, EmptyParams {})
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_book_params() {
        let ids = vec!["1.171796736".to_string(), "1.171796737".to_string()];
        let params = MarketBookParams {
            market_ids: &ids,
            price_projection: PriceProjection {
                price_data: ["EX_BEST_OFFERS"],
            },
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "marketIds": ["1.171796736", "1.171796737"],
                "priceProjection": { "priceData": ["EX_BEST_OFFERS"] }
            })
        );
    }

    #[test]
    fn test_catalogue_params() {
        let params = CatalogueParams {
            filter: MarketFilter::default(),
            max_results: 1000,
            market_projection: CATALOGUE_PROJECTION,
        };
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["maxResults"], 1000);
        assert_eq!(value["marketProjection"].as_array().unwrap().len(), 6);
        assert_eq!(value["filter"], json!({}));
    }
}
