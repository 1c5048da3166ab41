//! Telegram Bot API
//!
//! Incoming updates are `teloxide` types; replies and webhook registration
//! go through a `teloxide::Bot` sharing the process-wide HTTP client.

use async_trait::async_trait;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{Update, UpdateKind};

use crate::error::{BotError, Result};

/// Chat id and text of a plain text message, if the update carries one.
///
/// Edited messages, media and every other update kind yield `None`.
pub fn text_message(update: &Update) -> Option<(ChatId, &str)> {
    match &update.kind {
        UpdateKind::Message(message) => message.text().map(|text| (message.chat.id, text)),
        _ => None,
    }
}

/// Outbound replies
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

/// Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    /// The `http` client carries the request timeout.
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            bot: Bot::with_client(token, http),
        }
    }

    /// Point the client at another Bot API server (local server, tests)
    pub fn with_api_url(self, api_url: Url) -> Self {
        Self {
            bot: self.bot.set_api_url(api_url),
        }
    }

    /// Register `url` as the webhook Telegram delivers updates to
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let url = Url::parse(url)
            .map_err(|e| BotError::Config(format!("invalid webhook URL {url}: {e}")))?;
        self.bot.set_webhook(url).await?;
        Ok(())
    }
}

#[async_trait]
impl ReplySender for TelegramClient {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;

    /// (method, raw request body) pairs seen by the fake Bot API
    type Calls = Arc<Mutex<Vec<(String, String)>>>;

    fn sent_message(chat_id: i64, text: &str) -> serde_json::Value {
        json!({
            "message_id": 1,
            "date": 1_639_353_600,
            "chat": {"id": chat_id, "type": "private", "first_name": "Val"},
            "text": text
        })
    }

    async fn bot_api(
        State(calls): State<Calls>,
        Path((bot, method)): Path<(String, String)>,
        body: String,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if bot != "bottest-token" {
            let error = json!({"ok": false, "error_code": 401, "description": "Unauthorized"});
            return (StatusCode::UNAUTHORIZED, Json(error));
        }

        let method = method.to_ascii_lowercase();
        calls.lock().await.push((method.clone(), body));

        let result = if method == "sendmessage" {
            sent_message(42, "Hi!")
        } else {
            json!(true)
        };
        (StatusCode::OK, Json(json!({"ok": true, "result": result})))
    }

    /// Fake Bot API recording every call; only `test-token` is authorized
    async fn fake_bot_api() -> (Url, Calls) {
        let calls: Calls = Arc::default();
        let app = Router::new()
            .route("/{bot}/{method}", post(bot_api))
            .with_state(calls.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (Url::parse(&format!("http://{addr}")).unwrap(), calls)
    }

    fn client(token: &str, api_url: Url) -> TelegramClient {
        TelegramClient::new(reqwest::Client::new(), token).with_api_url(api_url)
    }

    #[test]
    fn test_parse_text_update() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1_639_353_600,
                "chat": {"id": 777, "type": "private", "first_name": "Val"},
                "from": {"id": 777, "is_bot": false, "first_name": "Val"},
                "text": "/stats"
            }
        }))
        .unwrap();

        assert_eq!(text_message(&update), Some((ChatId(777), "/stats")));
    }

    #[test]
    fn test_non_text_update() {
        let photo: Update = serde_json::from_value(json!({
            "update_id": 11,
            "message": {
                "message_id": 6,
                "date": 1_639_353_600,
                "chat": {"id": 777, "type": "private", "first_name": "Val"},
                "photo": [{
                    "file_id": "AgADBAADr6cxG",
                    "file_unique_id": "AQADr6cxG",
                    "file_size": 1234,
                    "width": 90,
                    "height": 67
                }]
            }
        }))
        .unwrap();
        assert_eq!(text_message(&photo), None);

        let edited: Update = serde_json::from_value(json!({
            "update_id": 12,
            "edited_message": {
                "message_id": 5,
                "date": 1_639_353_600,
                "edit_date": 1_639_353_660,
                "chat": {"id": 777, "type": "private", "first_name": "Val"},
                "text": "/stats"
            }
        }))
        .unwrap();
        assert_eq!(text_message(&edited), None);
    }

    #[tokio::test]
    async fn test_send_message() {
        let (api_url, calls) = fake_bot_api().await;

        client("test-token", api_url).send_message(ChatId(42), "Hi!").await.unwrap();

        let calls = calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sendmessage");
        let payload: serde_json::Value = serde_json::from_str(&calls[0].1).unwrap();
        assert_eq!(payload["chat_id"], 42);
        assert_eq!(payload["text"], "Hi!");
    }

    #[tokio::test]
    async fn test_set_webhook() {
        let (api_url, calls) = fake_bot_api().await;

        let telegram = client("test-token", api_url);
        telegram.set_webhook("https://bot.example.com/test-token").await.unwrap();

        let calls = calls.lock().await;
        assert_eq!(calls[0].0, "setwebhook");
        assert!(calls[0].1.contains("https://bot.example.com/test-token"));
    }

    #[tokio::test]
    async fn test_invalid_webhook_url() {
        let (api_url, calls) = fake_bot_api().await;

        let err = client("test-token", api_url).set_webhook("not a url").await.unwrap_err();
        assert!(matches!(err, BotError::Config(msg) if msg.contains("not a url")));
        assert!(calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_api_error() {
        let (api_url, calls) = fake_bot_api().await;

        let err = client("wrong", api_url).send_message(ChatId(42), "Hi!").await.unwrap_err();
        assert!(matches!(err, BotError::Telegram(_)));
        assert!(calls.lock().await.is_empty());
    }
}
