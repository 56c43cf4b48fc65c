//! Common test utilities for exchange client integration tests
//!
//! Raw JSON fixtures shaped like exchange responses, plus an in-memory
//! gateway for facade tests.

#![allow(dead_code)]

use async_trait::async_trait;
use betfair::infrastructure::client::types::{
    AccountFunds, CatalogueQuery, CompetitionResult, MarketBook, MarketCatalogue,
    PlaceExecutionReport, PlaceOrdersRequest,
};
use betfair::infrastructure::client::Result;
use betfair::{ExchangeError, ExchangeGateway, UpstreamFault};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Check if required environment variables are set for live tests
pub fn has_api_credentials() -> bool {
    [
        "BETFAIR_USERNAME",
        "BETFAIR_PASSWORD",
        "BETFAIR_API_KEY",
        "BETFAIR_CLIENT_CERT",
        "BETFAIR_CLIENT_CERT_KEY",
    ]
    .iter()
    .all(|name| std::env::var(name).is_ok())
}

pub mod fixtures {
    use super::*;

    pub const EVENT_ID: u64 = 29939806;
    pub const MARKET_ID: &str = "1.171796736";
    pub const COMPETITION_ID: u64 = 12117172;
    pub const WANDERERS: u64 = 6480414;
    pub const PERTH: u64 = 370132;
    pub const DRAW: u64 = 58805;

    /// Match odds record for Western Sydney Wanderers v Perth Glory
    pub fn match_odds_record() -> Value {
        market_record(
            MARKET_ID,
            "Match Odds",
            &EVENT_ID.to_string(),
            "Western Sydney Wanderers v Perth Glory",
        )
    }

    pub fn market_record(market_id: &str, market_name: &str, event_id: &str, event_name: &str) -> Value {
        json!({
            "marketId": market_id,
            "marketName": market_name,
            "marketStartTime": "2020-08-04T09:30:00.000000Z",
            "runners": [
                { "selectionId": WANDERERS, "runnerName": "Western Sydney Wanderers", "handicap": 0.0 },
                { "selectionId": PERTH, "runnerName": " Perth Glory ", "handicap": -2.0 },
                { "selectionId": DRAW, "runnerName": "The Draw", "handicap": 1.0 }
            ],
            "eventType": { "id": "1", "name": "Soccer" },
            "competition": { "id": COMPETITION_ID.to_string(), "name": "Australian A-League" },
            "event": {
                "id": event_id,
                "name": event_name,
                "countryCode": "AU",
                "openDate": "2020-08-04T09:30:00.000000Z"
            }
        })
    }

    /// Decode raw JSON records the way the client does
    pub fn catalogue(records: Vec<Value>) -> Vec<MarketCatalogue> {
        serde_json::from_value(Value::Array(records)).unwrap()
    }

    pub fn runner_book(selection_id: u64, back: &[(f64, f64)], lay: &[(f64, f64)]) -> Value {
        let levels = |raw: &[(f64, f64)]| -> Vec<Value> {
            raw.iter()
                .map(|(price, size)| json!({ "price": price, "size": size }))
                .collect()
        };
        json!({
            "selectionId": selection_id,
            "status": "ACTIVE",
            "ex": {
                "availableToBack": levels(back),
                "availableToLay": levels(lay),
                "tradedVolume": []
            }
        })
    }

    pub fn market_book(market_id: &str, delayed: bool, runners: Vec<Value>) -> Value {
        json!({
            "marketId": market_id,
            "isMarketDataDelayed": delayed,
            "status": "OPEN",
            "runners": runners
        })
    }

    pub fn books(records: Vec<Value>) -> Vec<MarketBook> {
        serde_json::from_value(Value::Array(records)).unwrap()
    }

    /// Price book quoting the fixture market's runners
    pub fn match_odds_book() -> Value {
        market_book(
            MARKET_ID,
            false,
            vec![
                runner_book(WANDERERS, &[(2.5, 100.0), (2.6, 50.0)], &[(2.7, 30.0), (2.8, 80.0)]),
                runner_book(PERTH, &[(3.1, 12.0)], &[(3.3, 40.0), (3.25, 5.0)]),
                runner_book(DRAW, &[], &[]),
            ],
        )
    }
}

/// In-memory gateway replaying canned responses
///
/// Market books are served per requested id from `books`; ids with no
/// entry are omitted, as the exchange does for closed markets.
#[derive(Default)]
pub struct FakeGateway {
    pub catalogue: Vec<MarketCatalogue>,
    pub books: Vec<MarketBook>,
    pub competitions: Vec<CompetitionResult>,
    pub funds: AccountFunds,
    pub place_response: Option<Value>,
    pub fault: Option<UpstreamFault>,
    pub book_requests: Mutex<Vec<Vec<String>>>,
    pub placed: Mutex<Vec<PlaceOrdersRequest>>,
}

impl FakeGateway {
    fn check_fault(&self) -> Result<()> {
        match &self.fault {
            Some(fault) => Err(ExchangeError::Upstream(fault.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExchangeGateway for FakeGateway {
    async fn list_competitions(
        &self,
        _country_codes: &[String],
        _event_type_ids: &[u32],
    ) -> Result<Vec<CompetitionResult>> {
        self.check_fault()?;
        Ok(self.competitions.clone())
    }

    async fn list_market_catalogue(&self, _query: &CatalogueQuery) -> Result<Vec<MarketCatalogue>> {
        self.check_fault()?;
        Ok(self.catalogue.clone())
    }

    async fn list_market_book(&self, market_ids: &[String]) -> Result<Vec<MarketBook>> {
        self.check_fault()?;
        self.book_requests.lock().push(market_ids.to_vec());

        Ok(market_ids
            .iter()
            .filter_map(|id| self.books.iter().find(|book| &book.market_id == id))
            .cloned()
            .collect())
    }

    async fn place_orders(&self, request: &PlaceOrdersRequest) -> Result<PlaceExecutionReport> {
        self.check_fault()?;
        self.placed.lock().push(request.clone());

        let response = self.place_response.clone().unwrap_or_else(|| {
            json!({
                "status": "SUCCESS",
                "marketId": request.market_id,
                "instructionReports": [{
                    "status": "SUCCESS",
                    "betId": "31645233727",
                    "placedDate": "2020-08-04T08:00:00.000Z",
                    "averagePriceMatched": 0.0,
                    "sizeMatched": 0.0
                }]
            })
        });
        serde_json::from_value(response).map_err(|e| ExchangeError::DeserializeFailed(e.to_string()))
    }

    async fn account_funds(&self) -> Result<AccountFunds> {
        self.check_fault()?;
        Ok(self.funds.clone())
    }
}
