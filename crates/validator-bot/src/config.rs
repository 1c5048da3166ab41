//! Bot Configuration
//!
//! Read once from the environment at startup.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{BotError, Result};

pub const DEFAULT_PORT: u16 = 8443;
pub const DEFAULT_WEBHOOK_BASE_URL: &str = "https://eth2-validator-status.herokuapp.com/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token, also used as the webhook path
    pub token: String,

    /// CoinMarketCap Pro API key
    pub cmc_api_key: String,

    /// Port the webhook server listens on
    pub port: u16,

    /// Public URL prefix Telegram posts updates to
    pub webhook_base_url: String,

    /// Timeout applied to every outbound request
    pub http_timeout_secs: u64,
}

impl BotConfig {
    /// Load from `TOKEN`, `COINMARKETCAP`, `PORT`, `WEBHOOK_BASE_URL`, `HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| BotError::Config(format!("{key} not set")))
        };

        let token = required("TOKEN")?;
        let cmc_api_key = required("COINMARKETCAP")?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| BotError::Config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    BotError::Config(format!("HTTP_TIMEOUT_SECS must be a positive integer: {raw}"))
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let webhook_base_url = lookup("WEBHOOK_BASE_URL")
            .unwrap_or_else(|| DEFAULT_WEBHOOK_BASE_URL.into());

        Ok(Self {
            token,
            cmc_api_key,
            port,
            webhook_base_url,
            http_timeout_secs,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Full URL registered with `setWebhook`
    pub fn webhook_url(&self) -> String {
        format!("{}/{}", self.webhook_base_url.trim_end_matches('/'), self.token)
    }
}

/// Masks secrets so the config can be logged
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &mask(&self.token))
            .field("cmc_api_key", &mask(&self.cmc_api_key))
            .field("port", &self.port)
            .field("webhook_base_url", &self.webhook_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}...")
}
