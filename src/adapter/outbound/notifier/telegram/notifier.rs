//! Telegram delivery of listing alerts.
//!
//! [`TelegramNotifier::notify`] never blocks: alerts go onto a bounded queue
//! drained by one background task, which honours Telegram's flood-control
//! `retry_after` once per message before giving up on it. Short-lived
//! commands await that task before exiting.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::RequestError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::port::outbound::notifier::{Event, Notifier};

use super::format::format_event_message;

const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ENV: &str = "TELEGRAM_CHAT_ID";

/// Alerts waiting for delivery before new ones are dropped.
const QUEUE_CAPACITY: usize = 64;

/// Credentials plus delivery options.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
    /// Also send a message when a scan finishes without growth.
    pub notify_scans: bool,
}

impl TelegramConfig {
    /// Read `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// `None` when either is missing, empty or the chat id is not a number.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())?;
        let chat_id = std::env::var(CHAT_ENV).ok()?.trim().parse().ok()?;

        Some(Self {
            bot_token,
            chat_id,
            notify_scans: false,
        })
    }

    #[must_use]
    pub fn with_notify_scans(mut self, notify_scans: bool) -> Self {
        self.notify_scans = notify_scans;
        self
    }
}

/// Pushes new-listing alerts to one chat.
pub struct TelegramNotifier {
    queue: mpsc::Sender<String>,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Spawn the delivery task. Must be called within a Tokio runtime.
    ///
    /// The returned task drains the queue and finishes once the notifier is
    /// dropped, so awaiting it delivers every accepted alert.
    #[must_use]
    pub fn spawn(config: TelegramConfig) -> (Self, JoinHandle<()>) {
        let (queue, pending) = mpsc::channel(QUEUE_CAPACITY);
        let bot = Bot::new(&config.bot_token);
        let delivery = tokio::spawn(deliver(bot, ChatId(config.chat_id), pending));
        info!(chat_id = config.chat_id, "Telegram notifier started");
        (Self { queue, config }, delivery)
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: Event) {
        let Some(text) = format_event_message(&event, &self.config) else {
            return;
        };
        match self.queue.try_send(text) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Telegram queue full, dropping alert");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("Telegram delivery task stopped, dropping alert");
            }
        }
    }
}

async fn deliver(bot: Bot, chat: ChatId, mut pending: mpsc::Receiver<String>) {
    while let Some(text) = pending.recv().await {
        match send_markdown(&bot, chat, &text).await {
            Err(RequestError::RetryAfter(wait)) => {
                let wait: Duration = wait.duration();
                debug!(wait_ms = wait.as_millis() as u64, "Telegram flood control");
                tokio::time::sleep(wait).await;
                if let Err(e) = send_markdown(&bot, chat, &text).await {
                    error!(error = %e, "Failed to send Telegram alert after retry");
                }
            }
            Err(e) => error!(error = %e, "Failed to send Telegram alert"),
            Ok(()) => {}
        }
    }
    debug!("Telegram delivery task finished");
}

async fn send_markdown(bot: &Bot, chat: ChatId, text: &str) -> std::result::Result<(), RequestError> {
    bot.send_message(chat, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await
        .map(|_| ())
}

/// Send one plain-text message and wait for Telegram to accept it.
pub async fn send_test_message(config: &TelegramConfig, text: &str) -> Result<()> {
    Bot::new(&config.bot_token)
        .send_message(ChatId(config.chat_id), text)
        .await
        .map_err(|e| Error::Notification(e.to_string()))?;
    Ok(())
}
