//! Discord channel — posts the reminder as a webhook embed.

use std::time::Duration;

use async_trait::async_trait;
use chime_core::render::render_window;
use chime_core::{render_message, Channel, ChimeError, Outcome, PayloadBag, Result};

use crate::{check_status, transport_error, DEFAULT_TIMEOUT};

pub struct DiscordChannel {
    webhook_url: String,
    timeout: Duration,
    is_final: bool,
    client: reqwest::Client,
}

impl DiscordChannel {
    pub fn new(webhook_url: impl Into<String>, is_final: bool) -> Self {
        Self {
            webhook_url: webhook_url.into(),
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
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&discord_body(payloads)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error("Discord", e))?;
        check_status("Discord webhook", resp).await?;
        Ok(())
    }
}

/// Embed payload; the color tracks the cycle phase.
pub fn discord_body(payloads: &PayloadBag) -> Result<serde_json::Value> {
    let schedule = payloads.schedule().ok_or(ChimeError::MissingSchedule)?;
    let color = match payloads.cycle() {
        Some(c) if c.work => 0x00AAFF, // Blue
        Some(_) => 0x44CC66,           // Green
        None => 0x888888,              // Gray
    };
    let window = render_window(payloads).unwrap_or_default();

    Ok(serde_json::json!({
        "embeds": [{
            "title": render_message(payloads, true)?,
            "color": color,
            "footer": {
                "text": format!("#{} • {}", schedule.index(), window)
            }
        }]
    }))
}

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
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
                tracing::info!("✅ Discord notification sent");
                self.success()
            }
            Err(e) => {
                tracing::warn!("⚠️ Discord notification failed: {e}");
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::{CycleInfo, ScheduleInfo};
    use chrono::{TimeZone, Utc};

    fn bag() -> PayloadBag {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 10, 5, 0).unwrap();
        PayloadBag::for_schedule(ScheduleInfo::new(7, "Break", start, end).unwrap())
    }

    #[test]
    fn test_embed() {
        let body = discord_body(&bag().with_payload(CycleInfo::rest(2)).unwrap()).unwrap();
        let embed = &body["embeds"][0];
        assert_eq!(embed["title"], "Break (rest cycle 2 starting)");
        assert_eq!(embed["color"], 0x44CC66);
        assert_eq!(embed["footer"]["text"], "#7 • 10:00–10:05 UTC");
    }

    #[test]
    fn test_embed_color_without_cycle() {
        let body = discord_body(&bag()).unwrap();
        assert_eq!(body["embeds"][0]["color"], 0x888888);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        let channel = DiscordChannel::new("http://127.0.0.1:9/webhook", true)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(channel.deliver(&bag()).await, Outcome::Failed);
    }
}
