//! Telegram channel — sends the reminder via the Bot API `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use chime_core::render::render_window;
use chime_core::{render_message, Channel, Outcome, PayloadBag, Result};

use crate::{check_status, transport_error, DEFAULT_TIMEOUT};

pub struct TelegramChannel {
    bot_token: String,
    chat_id: String,
    timeout: Duration,
    is_final: bool,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>, is_final: bool) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: DEFAULT_TIMEOUT,
            is_final,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send(&self, payloads: &PayloadBag) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": telegram_text(payloads)?,
                "parse_mode": "Markdown"
            }))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error("Telegram", e))?;
        check_status("Telegram API", resp).await?;
        Ok(())
    }
}

/// Markdown body: bold reminder, italic time window.
pub fn telegram_text(payloads: &PayloadBag) -> Result<String> {
    let message = render_message(payloads, true)?;
    let mut text = format!("⏰ *{}*", escape_markdown(&message));
    if let Some(window) = render_window(payloads) {
        text.push_str(&format!("\n\n_{}_", escape_markdown(&window)));
    }
    Ok(text)
}

/// Escape Telegram MarkdownV1 special characters.
fn escape_markdown(s: &str) -> String {
    s.replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace('`', "\\`")
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    async fn deliver(&self, payloads: &PayloadBag) -> Outcome {
        if payloads.schedule().is_none() {
            return Outcome::Unsupported;
        }
        match self.send(payloads).await {
            Ok(()) => {
                tracing::info!("✅ Telegram notification sent to chat {}", self.chat_id);
                self.success()
            }
            Err(e) => {
                tracing::warn!("⚠️ Telegram notification failed: {e}");
                Outcome::Failed
            }
        }
    }
}
