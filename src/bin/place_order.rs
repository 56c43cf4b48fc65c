//! Place a single LIMIT order
//!
//! Usage: place_order <market_id> <selection_id> <BACK|LAY> <price> <size>

use anyhow::{anyhow, bail, Result};
use betfair::{init_tracing_with_level, BetfairClient, ClientConfig, Credentials, ExchangeApp, Side};
use betfair_exchange_client::bin_common::{load_config_from_env, parse_args, ConfigType};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();
    if args.len() != 5 {
        bail!("usage: place_order <market_id> <selection_id> <BACK|LAY> <price> <size>");
    }
    let market_id = args[0].as_str();
    let selection_id: u64 = args[1].parse()?;
    let side: Side = args[2].parse().map_err(|e: String| anyhow!(e))?;
    let price: f64 = args[3].parse()?;
    let size: f64 = args[4].parse()?;

    let config_path = load_config_from_env(ConfigType::Client);
    let config = ClientConfig::load(&config_path)?;
    init_tracing_with_level(&config.log_level);

    let client = BetfairClient::new(config.clone(), Credentials::from_env()?)?;
    client.login().await?;

    let mut app = ExchangeApp::new(client);
    app.fetch_upcoming_events(&config.catalogue).await?;

    let market = app.market(market_id).ok_or_else(|| {
        anyhow!(
            "market {} not in the configured catalogue (event type {}, {} days ahead)",
            market_id,
            config.catalogue.event_type_id,
            config.catalogue.days_ahead
        )
    })?;
    let runner = market
        .runner(selection_id)
        .ok_or_else(|| anyhow!("runner {} not in market {}", selection_id, market_id))?;

    info!(
        "Placing {} {:.2} @ {:.2} on {} / {}",
        side,
        size,
        price,
        market.name(),
        runner.name()
    );

    let report = app.place_order(market, runner, price, side, size).await?;
    for instruction in &report.instruction_reports {
        info!(
            "Bet {} {:?}: matched {:.2} @ {:.2}",
            instruction.bet_id.as_deref().unwrap_or("-"),
            instruction.status,
            instruction.size_matched.unwrap_or_default(),
            instruction.average_price_matched.unwrap_or_default()
        );
    }

    Ok(())
}
