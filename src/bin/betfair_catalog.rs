use anyhow::Result;
use betfair::{
    init_tracing_with_level, BetfairClient, ClientConfig, Credentials, ExchangeApp,
    SessionHeartbeat, ShutdownManager,
};
use betfair_exchange_client::bin_common::{
    load_config_from_env, parse_args, print_banner, print_shutdown, ConfigType,
};
use std::time::Duration;
use tracing::{error, info, warn};

/// Seconds between price refreshes unless given as the first argument
const DEFAULT_REFRESH_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config first (before logging is initialized)
    let config_path = load_config_from_env(ConfigType::Client);
    let config = ClientConfig::load(&config_path)?;

    init_tracing_with_level(&config.log_level);
    config.log();

    let refresh_secs = match parse_args().first() {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_REFRESH_SECS,
    };

    let credentials = Credentials::from_env()?;
    let client = BetfairClient::new(config.clone(), credentials)?;
    client.login().await?;

    let mut app = ExchangeApp::new(client).with_chunk_size(config.market_book_chunk_size);

    let funds = app.account_funds().await?;
    info!(
        "Available to bet: {:.2} (exposure {:.2})",
        funds.available_to_bet_balance, funds.exposure
    );

    let events = app.fetch_upcoming_events(&config.catalogue).await?;
    info!("Tracking {} upcoming events", events.len());

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();
    let mut heartbeat = SessionHeartbeat::new(config.keep_alive_interval_secs);

    print_banner(
        "Betfair catalog monitor",
        &[
            ("Refresh interval", format!("{}s", refresh_secs)),
            ("Keep-alive interval", format!("{}s", config.keep_alive_interval_secs)),
        ],
    );

    while shutdown.is_running() {
        if heartbeat.is_due() {
            match app.gateway().keep_alive().await {
                Ok(()) => heartbeat.refreshed(),
                Err(e) => {
                    warn!("Keep-alive failed ({}), logging in again", e);
                    app.gateway().login().await?;
                    heartbeat.refreshed();
                }
            }
        }

        match app.refresh_prices().await {
            Ok(count) => {
                info!("Refreshed {} markets", count);
                log_best_prices(&app);
            }
            Err(e) => error!("Price refresh failed: {}", e),
        }

        shutdown.sleep(Duration::from_secs(refresh_secs)).await;
    }

    print_shutdown("Catalog monitor");
    Ok(())
}

fn log_best_prices(app: &ExchangeApp<BetfairClient>) {
    for event in app.list_events() {
        info!("{}", event);
        for market in app.list_markets(event) {
            info!("  {} [{}]", market.name(), market.id());
            for runner in app.list_runners(market) {
                info!("    {}", runner.format_summary());
            }
        }
    }
}
