//! Push channel — trigger-style push service.
//!
//! One GET per reminder: `url?id=<code>&text=<message>&type=json`. The
//! service answers `{"code": 0, "msg": "..."}`; any non-zero code is a
//! failed delivery.

use std::time::Duration;

use async_trait::async_trait;
use chime_core::{render_message, Channel, ChimeError, Outcome, PayloadBag, Result};
use serde::Deserialize;

use crate::{check_status, transport_error, DEFAULT_TIMEOUT};

/// Reply from the push service.
#[derive(Debug, Clone, Deserialize)]
pub struct PushReply {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

impl PushReply {
    pub fn into_result(self) -> Result<()> {
        if self.code == 0 {
            Ok(())
        } else {
            Err(ChimeError::channel(format!(
                "push service failed with code {}: {}",
                self.code, self.msg
            )))
        }
    }
}

pub struct PushChannel {
    url: String,
    code: String,
    timeout: Duration,
    is_final: bool,
    client: reqwest::Client,
}

impl PushChannel {
    pub fn new(url: impl Into<String>, code: impl Into<String>, is_final: bool) -> Self {
        Self {
            url: url.into(),
            code: code.into(),
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
        let text = render_message(payloads, true)?;
        let resp = self
            .client
            .get(&self.url)
            .query(&[("id", self.code.as_str()), ("text", text.as_str()), ("type", "json")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error("Push", e))?;
        let reply: PushReply = check_status("Push service", resp)
            .await?
            .json()
            .await
            .map_err(|e| ChimeError::http(format!("Push service returned malformed reply: {e}")))?;
        reply.into_result()
    }
}

#[async_trait]
impl Channel for PushChannel {
    fn name(&self) -> &str {
        "push"
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
                tracing::info!("✅ Push notification sent");
                self.success()
            }
            Err(e) => {
                tracing::error!("❌ Push notification failed: {e}");
                Outcome::Failed
            }
        }
    }
}
