// src/services/notifier.rs

//! Message delivery.
//!
//! Article notifications and operator alerts both go through [`Notifier`].
//! They share one Telegram chat unless a separate alert chat is configured.
//! Docs: <https://core.telegram.org/bots/api#sendmessage>

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::TelegramConfig;
use crate::utils::text::truncate_graphemes;

/// Longest message Telegram accepts, in UTF-16 code units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Delivers a text message to one fixed destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Telegram Bot API `sendMessage` client for a single chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(client: reqwest::Client, api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
            chat_id: chat_id.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        // Article messages arrive pre-fitted; this bounds alerts.
        let text = truncate_graphemes(text, TELEGRAM_MESSAGE_LIMIT);
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
        };

        // without_url(): the endpoint carries the bot token
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::notify(e.without_url()))?;

        let status = response.status();
        let reply: Option<ApiResponse> = response.json().await.ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(()),
            Some(reply) => Err(AppError::notify(format!(
                "Telegram rejected message ({status}): {}",
                reply.description.as_deref().unwrap_or("no description")
            ))),
            None => Err(AppError::notify(format!(
                "unexpected Telegram response ({status})"
            ))),
        }
    }
}

/// Writes messages to the log instead of sending them.
pub struct LogNotifier {
    label: &'static str,
}

impl LogNotifier {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        log::info!("[dry run] {} message:\n{}", self.label, text);
        Ok(())
    }
}

/// Destinations for article notifications and operator alerts.
#[derive(Clone)]
pub struct Channels {
    pub content: Arc<dyn Notifier>,
    pub alerts: Arc<dyn Notifier>,
}

impl Channels {
    /// Use one notifier for both kinds of message.
    pub fn shared(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            content: Arc::clone(&notifier),
            alerts: notifier,
        }
    }

    /// Telegram channels from configuration.
    pub fn telegram(config: &TelegramConfig, client: reqwest::Client) -> Self {
        let content: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
            client.clone(),
            &config.api_base,
            &config.token,
            &config.chat_id,
        ));

        let alert_chat = config.alert_chat();
        if alert_chat == config.chat_id {
            return Self::shared(content);
        }
        Self {
            content,
            alerts: Arc::new(TelegramNotifier::new(
                client,
                &config.api_base,
                &config.token,
                alert_chat,
            )),
        }
    }

    /// Log-only channels for dry runs.
    pub fn dry_run() -> Self {
        Self {
            content: Arc::new(LogNotifier::new("article")),
            alerts: Arc::new(LogNotifier::new("alert")),
        }
    }
}
