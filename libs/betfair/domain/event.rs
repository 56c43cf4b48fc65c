//! Event domain entity

use super::competition::Competition;
use super::market::{Market, MarketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Real-world sporting occurrence owning its markets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: u64,
    name: String,
    start_time: DateTime<Utc>,
    competition: Competition,
    country_code: String,
    markets: BTreeMap<MarketId, Market>,
}

impl Event {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        competition: Competition,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            competition,
            country_code: country_code.into(),
            markets: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Add a market unless one with the same id is already present.
    ///
    /// Returns true when the market was inserted.
    pub fn add_market(&mut self, market: Market) -> bool {
        if self.markets.contains_key(market.id()) {
            return false;
        }
        self.markets.insert(market.id().to_string(), market);
        true
    }

    pub fn market(&self, id: &str) -> Option<&Market> {
        self.markets.get(id)
    }

    pub fn market_mut(&mut self, id: &str) -> Option<&mut Market> {
        self.markets.get_mut(id)
    }

    pub fn markets(&self) -> impl Iterator<Item = &Market> {
        self.markets.values()
    }

    pub fn market_ids(&self) -> impl Iterator<Item = &str> {
        self.markets.keys().map(String::as_str)
    }

    pub fn market_count(&self) -> usize {
        self.markets.len()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} ({})",
            self.name,
            self.start_time,
            self.competition.name(),
            self.country_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_event() -> Event {
        Event::new(
            97531,
            "testEvent",
            Utc.with_ymd_and_hms(1990, 6, 6, 0, 0, 0).unwrap(),
            Competition::new("testCompetition", 24),
            "GB",
        )
    }

    fn first_market() -> Market {
        Market::new(
            "1.234567",
            "firstTestMarket",
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn second_market() -> Market {
        Market::new(
            "7.654321",
            "secondTestMarket",
            Utc.with_ymd_and_hms(1980, 12, 12, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_add_market_single() {
        let mut event = test_event();
        event.add_market(first_market());

        assert_eq!(event.market_count(), 1);
        assert_eq!(event.markets().next().unwrap().id(), "1.234567");
    }

    #[test]
    fn test_add_market_duplicate() {
        let mut event = test_event();
        assert!(event.add_market(first_market()));
        assert!(!event.add_market(first_market()));

        assert_eq!(event.market_count(), 1);
    }

    #[test]
    fn test_add_market_duplicate_keeps_first() {
        let mut event = test_event();
        event.add_market(first_market());
        event.add_market(Market::new(
            "1.234567",
            "impostor",
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        ));

        assert_eq!(event.market("1.234567").unwrap().name(), "firstTestMarket");
    }

    #[test]
    fn test_add_market_multiple() {
        let mut event = test_event();
        event.add_market(first_market());
        event.add_market(second_market());

        assert_eq!(event.market_count(), 2);
        let ids: Vec<&str> = event.market_ids().collect();
        assert!(ids.contains(&"1.234567"));
        assert!(ids.contains(&"7.654321"));
    }

    #[test]
    fn test_display() {
        let event = test_event();
        assert_eq!(
            event.to_string(),
            "testEvent (1990-06-06 00:00:00 UTC) - testCompetition (GB)"
        );
    }
}
