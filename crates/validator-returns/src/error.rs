//! Error Types for Validator Returns

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StakingError>;

/// Reply sent to the chat whenever the stats pipeline fails.
pub const ERROR_REPLY: &str = "Error";

#[derive(Error, Debug)]
pub enum StakingError {
    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),
    
    #[error("Validator unavailable: {0}")]
    ValidatorUnavailable(String),
    
    #[error("Invalid stake parameters: {0}")]
    InvalidParameters(String),
}

impl StakingError {
    /// Text shown to the chat user. Never leaks the underlying cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PriceUnavailable(_)
            | Self::ValidatorUnavailable(_)
            | Self::InvalidParameters(_) => ERROR_REPLY,
        }
    }
}
