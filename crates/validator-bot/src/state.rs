//! Application State

use std::sync::Arc;

use validator_returns::CommandDispatcher;

use crate::telegram::ReplySender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Command handling, including the `/stats` pipeline
    pub dispatcher: Arc<CommandDispatcher>,
    
    /// Where replies go (Telegram Bot API)
    pub sender: Arc<dyn ReplySender>,
    
    /// Bot token; updates are only accepted on `/{token}`
    pub webhook_token: Arc<str>,
}
