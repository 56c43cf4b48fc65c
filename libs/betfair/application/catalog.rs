//! Catalog assembly
//!
//! Turns denormalized listMarketCatalogue rows (one per market, with the
//! event and competition repeated on every row) into a deduplicated
//! Event → Market → Runner graph.

use crate::domain::errors::{CatalogError, Result};
use crate::domain::{Competition, Event, Market, Runner};
use crate::infrastructure::client::types::{MarketCatalogue, RunnerDescription};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Exchange timestamp format, e.g. `2020-08-04T09:30:00.000Z`
pub const BETFAIR_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Assemble catalogue records into events, in first-seen order.
///
/// Any malformed record aborts the whole call; no partial catalog is
/// returned. A market id belongs to exactly one event.
pub fn assemble(records: &[MarketCatalogue]) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = Vec::new();
    let mut index_by_event_id: HashMap<&str, usize> = HashMap::new();
    let mut owner_by_market_id: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let raw_event = record
            .event
            .as_ref()
            .ok_or_else(|| malformed(record, "event"))?;
        let raw_competition = record
            .competition
            .as_ref()
            .ok_or_else(|| malformed(record, "competition"))?;
        let raw_runners = record
            .runners
            .as_ref()
            .ok_or_else(|| malformed(record, "runners"))?;
        let raw_start = record
            .market_start_time
            .as_deref()
            .ok_or_else(|| malformed(record, "marketStartTime"))?;

        let index = match index_by_event_id.get(raw_event.id.as_str()) {
            Some(&index) => index,
            None => {
                let competition = Competition::new(
                    &raw_competition.name,
                    parse_id("competition.id", &raw_competition.id)?,
                );
                let event = Event::new(
                    parse_id("event.id", &raw_event.id)?,
                    raw_event.name.as_str(),
                    parse_timestamp("event.openDate", &raw_event.open_date)?,
                    competition,
                    raw_event.country_code.as_str(),
                );
                debug!("New event {} ({})", event.name(), event.id());

                events.push(event);
                index_by_event_id.insert(raw_event.id.as_str(), events.len() - 1);
                events.len() - 1
            }
        };

        let mut market = Market::new(
            record.market_id.as_str(),
            record.market_name.as_str(),
            parse_timestamp("marketStartTime", raw_start)?,
        );
        for raw_runner in raw_runners {
            market.add_runner(build_runner(raw_runner));
        }

        if let Some(&owner) = owner_by_market_id.get(record.market_id.as_str()) {
            if owner != index {
                return Err(CatalogError::ConflictingMarket {
                    market_id: record.market_id.clone(),
                    first_event_id: events[owner].id(),
                    second_event_id: events[index].id(),
                });
            }
        }

        if events[index].add_market(market) {
            owner_by_market_id.insert(record.market_id.as_str(), index);
        } else {
            debug!("Duplicate market {} ignored", record.market_id);
        }
    }

    Ok(events)
}

fn build_runner(raw: &RunnerDescription) -> Runner {
    Runner::new(raw.selection_id, &raw.runner_name, raw.handicap)
}

fn malformed(record: &MarketCatalogue, field: &'static str) -> CatalogError {
    CatalogError::MalformedRecord {
        market_id: record.market_id.clone(),
        field,
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| CatalogError::Parse {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an exchange timestamp into UTC
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, BETFAIR_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CatalogError::Parse {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
