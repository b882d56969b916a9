// flux-core/src/bin/monitor.rs
// Polls one Hyperliquid wallet and logs every account, order and ticker change.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use flux_core::config::Settings;
use flux_core::dto::{Account, Order, Ticker};
use flux_core::exchange::HyperliquidInfoClient;
use flux_core::flux::{AccountFlux, Change, FnHandler, OrderFlux, Scheduler, TickerFlux};
use flux_core::persistence::InMemoryOrderRepository;

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();

    let settings = Settings::new().context("Failed to load settings")?;
    let address = settings
        .exchange
        .address
        .as_deref()
        .context("exchange.address is not set (FLUX__EXCHANGE__ADDRESS)")?;

    let client = Arc::new(
        HyperliquidInfoClient::new(address, settings.exchange.testnet)
            .context("Failed to build Hyperliquid client")?,
    );
    info!(
        address = %client.address(),
        endpoint = %client.base_url(),
        pairs = settings.ticker.pairs.len(),
        "Flux monitor starting"
    );

    let mut accounts = AccountFlux::from_user_service(
        settings.flux.account.poller_config("account"),
        client.clone(),
    );
    accounts.register(Arc::new(FnHandler::new(|change: &Change<Account>| {
        let account = &change.entity;
        info!(
            kind = %change.kind,
            account = %account.account_id,
            balances = account.balances.len(),
            "Account changed"
        );
        Ok(())
    })));

    let repository = Arc::new(InMemoryOrderRepository::new());
    let mut orders = OrderFlux::from_trade_service(
        settings.flux.order.poller_config("order"),
        client.clone(),
        repository.clone(),
    )
    .await
    .context("Failed to seed order flux")?;
    orders.register(Arc::new(FnHandler::new(|change: &Change<Order>| {
        let order = &change.entity;
        info!(
            kind = %change.kind,
            order = %order.order_id,
            pair = %order.currency_pair,
            status = %order.status,
            remaining = %order.remaining_amount(),
            "Order changed"
        );
        Ok(())
    })));

    let mut tickers = TickerFlux::from_market_service(
        settings.flux.ticker.poller_config("ticker"),
        client.clone(),
        settings.ticker.pairs.clone(),
    );
    tickers.register(Arc::new(FnHandler::new(|change: &Change<Ticker>| {
        let ticker = &change.entity;
        info!(
            kind = %change.kind,
            pair = %ticker.currency_pair,
            last = %ticker.last,
            "Ticker moved"
        );
        Ok(())
    })));

    let mut account_scheduler = Scheduler::start(accounts);
    let mut order_scheduler = Scheduler::start(orders);
    let mut ticker_scheduler = Scheduler::start(tickers);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutdown requested, waiting for in-flight cycles");

    account_scheduler.stop().await;
    order_scheduler.stop().await;
    ticker_scheduler.stop().await;

    info!(persisted_orders = repository.len(), "Flux monitor stopped");
    Ok(())
}
