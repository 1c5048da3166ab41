//! Chat Commands
//!
//! Maps incoming chat text to a reply.

use chrono::NaiveDate;

use crate::pipeline::StatsPipeline;

pub const START_REPLY: &str = "Hi!";

pub const HELP_REPLY: &str = "Commands\n\n\
    /stats - Validator balance, earnings and returns\n\
    /help - Show this message\n\n\
    Any other text is echoed back.";

/// A parsed chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Stats,
    /// Non-command text, replied verbatim
    Echo(String),
    /// A `/command` the bot does not handle
    Unknown(String),
}

impl Command {
    /// Parse message text. `/cmd@botname` is accepted for group chats.
    pub fn parse(text: &str) -> Self {
        let head = text.split_whitespace().next();
        let Some(raw_command) = head.filter(|head| head.starts_with('/')) else {
            return Self::Echo(text.to_string());
        };

        let command = raw_command
            .split_once('@')
            .map_or(raw_command, |(head, _)| head);

        match command {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/stats" => Self::Stats,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Routes commands to their handlers
#[derive(Clone)]
pub struct CommandDispatcher {
    stats: StatsPipeline,
}

impl CommandDispatcher {
    pub fn new(stats: StatsPipeline) -> Self {
        Self { stats }
    }
    
    /// Reply for `text`, or `None` when the message is ignored
    pub async fn handle(&self, text: &str, today: NaiveDate) -> Option<String> {
        match Command::parse(text) {
            Command::Start => Some(START_REPLY.into()),
            Command::Help => Some(HELP_REPLY.into()),
            Command::Stats => Some(self.stats.reply(today).await),
            Command::Echo(text) => Some(text),
            Command::Unknown(command) => {
                tracing::debug!(%command, "Ignoring unknown command");
                None
            }
        }
    }
}
