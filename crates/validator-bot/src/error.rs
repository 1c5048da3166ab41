//! Bot Error Types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bot API call failed: API error, network or unreadable response
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}
