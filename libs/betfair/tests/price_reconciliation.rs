//! Integration tests for merging price books into an assembled catalog

mod common;

use betfair::{assemble, reconcile, CatalogError, Event, RunnerPrice, Side};
use common::fixtures::*;

fn assembled() -> Vec<Event> {
    assemble(&catalogue(vec![
        match_odds_record(),
        market_record("1.171796740", "Over/Under 2.5 Goals", &EVENT_ID.to_string(), "Western Sydney Wanderers v Perth Glory"),
        market_record("1.900000001", "Match Odds", "30000001", "Melbourne City v Sydney FC"),
    ]))
    .unwrap()
}

fn snapshot(events: &[Event]) -> Vec<(String, u64, Vec<RunnerPrice>)> {
    events
        .iter()
        .flat_map(|event| event.markets())
        .flat_map(|market| {
            market
                .runners()
                .map(move |runner| (market.id().to_string(), runner.id(), runner.all_available_prices()))
        })
        .collect()
}

#[test]
fn test_best_back_after_reconcile() {
    let mut events = assemble(&catalogue(vec![match_odds_record()])).unwrap();
    reconcile(&mut events, &books(vec![match_odds_book()])).unwrap();

    let runner = events[0].market(MARKET_ID).unwrap().runner(WANDERERS).unwrap();
    assert_eq!(runner.best_back_price(), RunnerPrice::new(Side::Back, 2.6, 50.0));
    assert_eq!(runner.best_lay_price(), RunnerPrice::new(Side::Lay, 2.7, 30.0));

    let perth = events[0].market(MARKET_ID).unwrap().runner(PERTH).unwrap();
    assert_eq!(perth.best_lay_price(), RunnerPrice::new(Side::Lay, 3.25, 5.0));

    let draw = events[0].market(MARKET_ID).unwrap().runner(DRAW).unwrap();
    assert_eq!(draw.best_back_price(), RunnerPrice::new(Side::Back, 0.0, 0.0));
    assert_eq!(draw.best_lay_price(), RunnerPrice::new(Side::Lay, 0.0, 0.0));
    assert!(draw.all_available_prices().is_empty());
}

#[test]
fn test_round_trip_over_every_id() {
    let mut events = assembled();
    let event_count = events.len();

    let runner_ids = [WANDERERS, PERTH, DRAW];
    let market_ids: Vec<String> = events
        .iter()
        .flat_map(|event| event.market_ids().map(str::to_string))
        .collect();

    let raw_books = market_ids
        .iter()
        .enumerate()
        .map(|(m, market_id)| {
            let runners = runner_ids
                .iter()
                .enumerate()
                .map(|(r, id)| {
                    let base = 1.5 + m as f64 + r as f64 / 10.0;
                    runner_book(*id, &[(base + 0.02, 10.0), (base, 20.0)], &[(base + 0.1, 30.0)])
                })
                .collect();
            market_book(market_id, false, runners)
        })
        .collect();
    let price_books = books(raw_books);

    reconcile(&mut events, &price_books).unwrap();

    assert_eq!(events.len(), event_count);
    for book in &price_books {
        let market = events
            .iter()
            .find_map(|event| event.market(&book.market_id))
            .unwrap();
        for runner_book in &book.runners {
            let runner = market.runner(runner_book.selection_id).unwrap();
            let ex = runner_book.ex.as_ref().unwrap();

            let expected_back: Vec<RunnerPrice> = ex
                .available_to_back
                .iter()
                .map(|level| RunnerPrice::new(Side::Back, level.price, level.size))
                .collect();
            let expected_lay: Vec<RunnerPrice> = ex
                .available_to_lay
                .iter()
                .map(|level| RunnerPrice::new(Side::Lay, level.price, level.size))
                .collect();

            assert_eq!(runner.back_prices(), expected_back.as_slice());
            assert_eq!(runner.lay_prices(), expected_lay.as_slice());
        }
    }
}

#[test]
fn test_unknown_market_leaves_graph_untouched() {
    let mut events = assembled();
    reconcile(&mut events, &books(vec![match_odds_book()])).unwrap();
    let before = snapshot(&events);

    let update = books(vec![
        market_book(
            MARKET_ID,
            false,
            vec![runner_book(WANDERERS, &[(9.0, 1.0)], &[])],
        ),
        market_book("1.999999999", false, vec![]),
    ]);
    let err = reconcile(&mut events, &update).unwrap_err();

    assert_eq!(
        err,
        CatalogError::UnknownMarket {
            market_id: "1.999999999".to_string(),
        }
    );
    assert!(err.is_reconciliation());
    assert_eq!(snapshot(&events), before);
}

#[test]
fn test_union_of_events() {
    let mut events = assembled();
    let update = books(vec![
        market_book(
            "1.900000001",
            false,
            vec![runner_book(DRAW, &[(3.4, 15.0)], &[])],
        ),
        market_book(
            MARKET_ID,
            false,
            vec![runner_book(DRAW, &[(3.6, 25.0)], &[])],
        ),
    ]);

    reconcile(&mut events, &update).unwrap();

    let second_event = events.iter().find(|event| event.id() == 30000001).unwrap();
    let draw = second_event.market("1.900000001").unwrap().runner(DRAW).unwrap();
    assert_eq!(draw.best_back_price().price(), 3.4);

    let first_event = events.iter().find(|event| event.id() == EVENT_ID).unwrap();
    let draw = first_event.market(MARKET_ID).unwrap().runner(DRAW).unwrap();
    assert_eq!(draw.best_back_price().price(), 3.6);
}

#[test]
fn test_market_under_two_events_is_rejected() {
    let records = catalogue(vec![
        market_record("1.1", "Match Odds", "100", "A v B"),
        market_record("1.1", "Match Odds", "200", "C v D"),
    ]);

    let err = assemble(&records).unwrap_err();
    assert_eq!(
        err,
        CatalogError::ConflictingMarket {
            market_id: "1.1".to_string(),
            first_event_id: 100,
            second_event_id: 200,
        }
    );
}

#[test]
fn test_repeated_market_in_one_event_gets_prices() {
    let mut events = assemble(&catalogue(vec![
        market_record("1.1", "Match Odds", "100", "A v B"),
        market_record("1.1", "Match Odds", "100", "A v B"),
    ]))
    .unwrap();

    reconcile(
        &mut events,
        &books(vec![market_book(
            "1.1",
            false,
            vec![runner_book(WANDERERS, &[(2.0, 5.0)], &[])],
        )]),
    )
    .unwrap();

    assert_eq!(events.len(), 1);
    let runner = events[0].market("1.1").unwrap().runner(WANDERERS).unwrap();
    assert_eq!(runner.best_back_price(), RunnerPrice::new(Side::Back, 2.0, 5.0));
}
