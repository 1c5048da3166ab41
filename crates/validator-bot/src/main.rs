//! eth2 validator bot
//!
//! Telegram webhook server answering `/start`, `/help` and `/stats`, and
//! echoing any other text. `/stats` reports the balance and returns of the
//! staked validator using CoinMarketCap prices and beaconcha.in balances.

mod config;
mod error;
mod handlers;
mod state;
mod telegram;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use validator_returns::{
    explorer::BeaconChainClient, market::CoinMarketCapClient, CommandDispatcher, StatsPipeline,
};

use crate::config::BotConfig;
use crate::state::AppState;
use crate::telegram::TelegramClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    // One client, one timeout, for every outbound call
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    let pipeline = StatsPipeline::new(
        Arc::new(CoinMarketCapClient::new(http.clone(), config.cmc_api_key.clone())),
        Arc::new(BeaconChainClient::new(http.clone())),
    );
    let params = pipeline.params();
    tracing::info!(
        entry_price = %params.entry_price,
        start_date = %params.start_date,
        stake_size = %params.stake_size,
        "Stake parameters"
    );

    let telegram = Arc::new(TelegramClient::new(http, config.token.clone()));

    let state = AppState {
        dispatcher: Arc::new(CommandDispatcher::new(pipeline)),
        sender: telegram.clone(),
        webhook_token: Arc::from(config.token.as_str()),
    };

    let app = handlers::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("validator bot listening on {}", addr);

    match telegram.set_webhook(&config.webhook_url()).await {
        Ok(()) => tracing::info!("✓ Webhook registered"),
        Err(e) => {
            tracing::warn!(error = %e, "⚠ Webhook registration failed - updates will not arrive");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
