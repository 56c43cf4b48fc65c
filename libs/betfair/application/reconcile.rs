//! Price reconciliation
//!
//! Merges listMarketBook results into an assembled event graph. The book is
//! not partitioned per event, so lookups run against the union of every
//! supplied event's markets.

use crate::domain::errors::{CatalogError, Result};
use crate::domain::{Event, RunnerPrice, Side};
use crate::infrastructure::client::types::{MarketBook, PriceSize};
use std::collections::HashMap;
use tracing::debug;

/// Replace runner prices from `books`.
///
/// All-or-nothing: every market and runner id is resolved before any
/// runner is touched, so a lookup failure leaves `events` unmodified.
/// Markets and runners absent from `books` keep their current prices.
pub fn reconcile(events: &mut [Event], books: &[MarketBook]) -> Result<()> {
    let plan = resolve(events, books)?;

    for (book, event_index) in books.iter().zip(plan) {
        let Some(market) = events[event_index].market_mut(&book.market_id) else {
            continue;
        };

        for runner_book in &book.runners {
            let Some(runner) = market.runner_mut(runner_book.selection_id) else {
                continue;
            };

            let (back, lay) = match &runner_book.ex {
                Some(ex) => (
                    to_prices(Side::Back, &ex.available_to_back),
                    to_prices(Side::Lay, &ex.available_to_lay),
                ),
                None => (Vec::new(), Vec::new()),
            };
            runner.update_back_prices(back);
            runner.update_lay_prices(lay);
        }

        debug!(
            "Reconciled {} runners for market {}",
            book.runners.len(),
            book.market_id
        );
    }

    Ok(())
}

/// Owning event index for every book, in book order
fn resolve(events: &[Event], books: &[MarketBook]) -> Result<Vec<usize>> {
    let event_by_market: HashMap<&str, usize> = events
        .iter()
        .enumerate()
        .flat_map(|(index, event)| event.market_ids().map(move |id| (id, index)))
        .collect();

    books
        .iter()
        .map(|book| {
            let index = *event_by_market
                .get(book.market_id.as_str())
                .ok_or_else(|| CatalogError::UnknownMarket {
                    market_id: book.market_id.clone(),
                })?;

            let market = events[index]
                .market(&book.market_id)
                .ok_or_else(|| CatalogError::UnknownMarket {
                    market_id: book.market_id.clone(),
                })?;

            if let Some(missing) = book
                .runners
                .iter()
                .find(|runner| market.runner(runner.selection_id).is_none())
            {
                return Err(CatalogError::UnknownRunner {
                    market_id: book.market_id.clone(),
                    runner_id: missing.selection_id,
                });
            }

            Ok(index)
        })
        .collect()
}

fn to_prices(side: Side, levels: &[PriceSize]) -> Vec<RunnerPrice> {
    levels
        .iter()
        .map(|level| RunnerPrice::new(side, level.price, level.size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Competition, Market, Runner};
    use crate::infrastructure::client::types::{ExchangePrices, RunnerBook};
    use chrono::{TimeZone, Utc};

    fn graph() -> Vec<Event> {
        let start = Utc.with_ymd_and_hms(2020, 8, 4, 9, 30, 0).unwrap();
        let mut event = Event::new(1, "a v b", start, Competition::new("league", 9), "GB");
        let mut market = Market::new("1.1", "Match Odds", start);
        market.add_runner(Runner::new(10, "a", 0.0));
        market.add_runner(Runner::new(20, "b", 0.0));
        event.add_market(market);
        vec![event]
    }

    fn book(market_id: &str, runners: Vec<RunnerBook>) -> MarketBook {
        MarketBook {
            market_id: market_id.to_string(),
            is_market_data_delayed: false,
            status: None,
            runners,
        }
    }

    fn runner_book(selection_id: u64, back: &[(f64, f64)], lay: &[(f64, f64)]) -> RunnerBook {
        let levels = |raw: &[(f64, f64)]| -> Vec<PriceSize> {
            raw.iter()
                .map(|&(price, size)| PriceSize { price, size })
                .collect()
        };
        RunnerBook {
            selection_id,
            status: None,
            last_price_traded: None,
            ex: Some(ExchangePrices {
                available_to_back: levels(back),
                available_to_lay: levels(lay),
            }),
        }
    }

    #[test]
    fn test_replaces_prices() {
        let mut events = graph();
        reconcile(
            &mut events,
            &[book("1.1", vec![runner_book(10, &[(2.0, 5.0)], &[(2.2, 7.0)])])],
        )
        .unwrap();
        reconcile(
            &mut events,
            &[book("1.1", vec![runner_book(10, &[(3.0, 1.0)], &[])])],
        )
        .unwrap();

        let runner = events[0].market("1.1").unwrap().runner(10).unwrap();
        assert_eq!(runner.back_prices(), &[RunnerPrice::new(Side::Back, 3.0, 1.0)]);
        assert!(runner.lay_prices().is_empty());
    }

    #[test]
    fn test_absent_runner_keeps_prices() {
        let mut events = graph();
        reconcile(
            &mut events,
            &[book("1.1", vec![runner_book(20, &[(4.0, 2.0)], &[])])],
        )
        .unwrap();
        reconcile(&mut events, &[book("1.1", vec![])]).unwrap();

        let runner = events[0].market("1.1").unwrap().runner(20).unwrap();
        assert_eq!(runner.best_back_price(), RunnerPrice::new(Side::Back, 4.0, 2.0));
    }

    #[test]
    fn test_missing_ex_block_clears_prices() {
        let mut events = graph();
        reconcile(
            &mut events,
            &[book("1.1", vec![runner_book(10, &[(2.0, 5.0)], &[])])],
        )
        .unwrap();

        let mut bare = runner_book(10, &[], &[]);
        bare.ex = None;
        reconcile(&mut events, &[book("1.1", vec![bare])]).unwrap();

        let runner = events[0].market("1.1").unwrap().runner(10).unwrap();
        assert!(runner.best_back_price().is_sentinel());
    }

    #[test]
    fn test_unknown_runner_rejected() {
        let mut events = graph();
        let err = reconcile(
            &mut events,
            &[book("1.1", vec![runner_book(10, &[(2.0, 5.0)], &[]), runner_book(99, &[], &[])])],
        )
        .unwrap_err();

        assert_eq!(
            err,
            CatalogError::UnknownRunner {
                market_id: "1.1".to_string(),
                runner_id: 99,
            }
        );
        let runner = events[0].market("1.1").unwrap().runner(10).unwrap();
        assert!(runner.back_prices().is_empty());
    }
}
