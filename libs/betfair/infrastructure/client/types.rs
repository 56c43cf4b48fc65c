//! Wire types for the Betfair JSON-RPC API
//!
//! These mirror the exchange payloads one-to-one. The catalog assembler and
//! price reconciler turn them into the domain graph.

use crate::domain::{MarketType, Side};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// =============================================================================
// JSON-RPC envelope
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u32,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object. `message` carries the upstream error code
/// (e.g. "ANGX-0001", "DSC-0018").
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// Exception detail code from the `data` block (e.g. "TOO_MUCH_DATA")
    pub fn exception_code(&self) -> Option<&str> {
        let data = self.data.as_ref()?;
        ["APINGException", "AccountAPINGException"]
            .iter()
            .find_map(|key| data.get(key)?.get("errorCode")?.as_str())
    }
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub session_token: Option<String>,
    pub login_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeepAliveResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Catalogue
// =============================================================================

/// One market row from listMarketCatalogue
///
/// The embedded event and competition repeat across every market of the
/// same event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCatalogue {
    pub market_id: String,
    pub market_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<CompetitionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventTypeDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runners: Option<Vec<RunnerDescription>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country_code: String,
    pub open_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionDescription {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeDescription {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerDescription {
    pub selection_id: u64,
    pub runner_name: String,
    #[serde(default)]
    pub handicap: f64,
}

/// One row from listCompetitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResult {
    pub competition: CompetitionDescription,
    #[serde(default)]
    pub market_count: Option<u32>,
    #[serde(default)]
    pub competition_region: Option<String>,
}

// =============================================================================
// Market book
// =============================================================================

/// One market from listMarketBook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBook {
    pub market_id: String,
    #[serde(default)]
    pub is_market_data_delayed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub runners: Vec<RunnerBook>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerBook {
    pub selection_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_price_traded: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ex: Option<ExchangePrices>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePrices {
    #[serde(default)]
    pub available_to_back: Vec<PriceSize>,
    #[serde(default)]
    pub available_to_lay: Vec<PriceSize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceSize {
    pub price: f64,
    pub size: f64,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
}

/// What happens to the unmatched part of an order when the market turns in-play
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistenceType {
    Lapse,
    Persist,
    MarketOnClose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    pub size: f64,
    pub price: f64,
    pub persistence_type: PersistenceType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInstruction {
    pub selection_id: u64,
    pub side: Side,
    pub order_type: OrderType,
    pub limit_order: LimitOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrdersRequest {
    pub market_id: String,
    pub instructions: Vec<PlaceInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,
}

impl PlaceOrdersRequest {
    /// Single LIMIT order that lapses when the market turns in-play
    pub fn limit(market_id: impl Into<String>, selection_id: u64, side: Side, price: f64, size: f64) -> Self {
        Self {
            market_id: market_id.into(),
            instructions: vec![PlaceInstruction {
                selection_id,
                side,
                order_type: OrderType::Limit,
                limit_order: LimitOrder {
                    size,
                    price,
                    persistence_type: PersistenceType::Lapse,
                },
            }],
            customer_ref: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionReportStatus {
    Success,
    Failure,
    ProcessedWithErrors,
    Timeout,
}

/// placeOrders response, surfaced to the caller unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceExecutionReport {
    pub status: ExecutionReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,
    #[serde(default)]
    pub instruction_reports: Vec<PlaceInstructionReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInstructionReport {
    pub status: ExecutionReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price_matched: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_matched: Option<f64>,
}

// =============================================================================
// Account
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFunds {
    #[serde(default)]
    pub available_to_bet_balance: f64,
    #[serde(default)]
    pub exposure: f64,
    #[serde(default)]
    pub retained_commission: f64,
    #[serde(default)]
    pub exposure_limit: f64,
    #[serde(default)]
    pub discount_rate: f64,
    #[serde(default)]
    pub points_balance: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

// =============================================================================
// Filters
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_type_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub market_type_codes: Vec<MarketType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_start_time: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_ids: Option<Vec<String>>,
}

/// Parameters for an upcoming-events catalogue fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueQuery {
    /// Sport, e.g. 1 for soccer
    pub event_type_id: u32,
    pub market_types: Vec<MarketType>,
    #[serde(default)]
    pub country_codes: Option<Vec<String>>,
    #[serde(default)]
    pub text_query: Option<String>,
    #[serde(default)]
    pub competition_ids: Option<Vec<u64>>,
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    7
}

impl Default for CatalogueQuery {
    fn default() -> Self {
        Self {
            event_type_id: 1,
            market_types: vec![MarketType::MatchOdds],
            country_codes: None,
            text_query: None,
            competition_ids: None,
            days_ahead: default_days_ahead(),
        }
    }
}

impl CatalogueQuery {
    /// Build the market filter for a window starting on `today`.
    ///
    /// The window ends `days_ahead + 1` days later so the last day is
    /// covered in full.
    pub fn to_market_filter(&self, today: NaiveDate) -> MarketFilter {
        let to = today + Duration::days(i64::from(self.days_ahead) + 1);

        MarketFilter {
            event_type_ids: vec![self.event_type_id.to_string()],
            market_type_codes: self.market_types.clone(),
            market_start_time: Some(TimeRange {
                from: today.format("%Y-%m-%d").to_string(),
                to: to.format("%Y-%m-%d").to_string(),
            }),
            market_countries: self.country_codes.clone(),
            text_query: self.text_query.clone(),
            competition_ids: self
                .competition_ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.to_string()).collect()),
        }
    }
}

/// Projections requested for catalogue fetches
pub const CATALOGUE_PROJECTION: &[&str] = &[
    "COMPETITION",
    "EVENT",
    "EVENT_TYPE",
    "RUNNER_DESCRIPTION",
    "RUNNER_METADATA",
    "MARKET_START_TIME",
];
