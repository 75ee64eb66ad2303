//! Generic HTTP webhook channel — POSTs the reminder as JSON.

use std::time::Duration;

use async_trait::async_trait;
use chime_core::{render_message, Channel, ChimeError, Outcome, PayloadBag, Result};

use crate::{check_status, transport_error, DEFAULT_TIMEOUT};

pub struct WebhookChannel {
    url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    is_final: bool,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(url: impl Into<String>, headers: Vec<(String, String)>, is_final: bool) -> Self {
        Self {
            url: url.into(),
            headers,
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
        let mut req = self
            .client
            .post(&self.url)
            .json(&webhook_body(payloads)?)
            .timeout(self.timeout);

        for (key, value) in &self.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let resp = req.send().await.map_err(|e| transport_error("Webhook", e))?;
        check_status("Webhook", resp).await?;
        Ok(())
    }
}

/// JSON document posted to the webhook.
pub fn webhook_body(payloads: &PayloadBag) -> Result<serde_json::Value> {
    let schedule = payloads.schedule().ok_or(ChimeError::MissingSchedule)?;
    let users: Vec<_> = payloads.users().map(|u| u.value().clone()).collect();

    Ok(serde_json::json!({
        "message": render_message(payloads, true)?,
        "title": schedule.message(),
        "index": schedule.index(),
        "start_time": schedule.start_time().to_rfc3339(),
        "end_time": schedule.end_time().to_rfc3339(),
        "duration_secs": schedule.duration().num_seconds(),
        "cycle": payloads.cycle(),
        "user": users,
    }))
}

#[async_trait]
impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
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
                tracing::info!("✅ Webhook notification sent to {}", self.url);
                self.success()
            }
            Err(e) => {
                tracing::warn!("⚠️ Webhook notification to {} failed: {e}", self.url);
                Outcome::Failed
            }
        }
    }
}
