//! Telegram delivery for signal reports.

use std::time::Duration;

use async_trait::async_trait;
use shared::{cap_message, Notifier, SignalError};
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::{debug, error};

pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    /// Bot whose HTTP client gives up after `timeout`.
    pub fn new(token: &str, chat_id: &str, timeout: Duration) -> Result<Self, SignalError> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .map_err(|e| SignalError::transport("telegram", e))?;

        Ok(Self {
            bot: Bot::with_client(token, client),
            recipient: parse_recipient(chat_id),
        })
    }
}

/// Numeric ids address chats directly, anything else is a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> bool {
        let message = cap_message(text);
        match self
            .bot
            .send_message(self.recipient.clone(), message)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => {
                debug!("Telegram message delivered to {:?}", self.recipient);
                true
            }
            Err(e) => {
                error!("Failed to send Telegram message: {}", e);
                false
            }
        }
    }
}
