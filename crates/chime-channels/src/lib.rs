//! # Chime Channels
//! Notification channel plugins and the config-driven hub factory.
//!
//! Every channel implements [`chime_core::Channel`]: it returns
//! `Unsupported` when the bag has no schedule, `Failed` on any transport or
//! service error, and routes success through `success()` so a final channel
//! ends the chain.

pub mod discord;
pub mod factory;
pub mod log;
pub mod push;
pub mod telegram;
pub mod webhook;

pub use discord::DiscordChannel;
pub use factory::{build_channel, build_hub};
pub use log::LogChannel;
pub use push::PushChannel;
pub use telegram::TelegramChannel;
pub use webhook::WebhookChannel;

use chime_core::ChimeError;
use std::time::Duration;

/// Default per-request bound for HTTP channels.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Map a transport error, keeping timeouts distinguishable in logs.
pub(crate) fn transport_error(channel: &str, e: reqwest::Error) -> ChimeError {
    if e.is_timeout() {
        ChimeError::Timeout(format!("{channel}: {e}"))
    } else {
        ChimeError::Http(format!("{channel} send failed: {e}"))
    }
}

/// Turn a non-2xx response into an error carrying status and body.
pub(crate) async fn check_status(channel: &str, resp: reqwest::Response) -> chime_core::Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ChimeError::Http(format!("{channel} error {status}: {body}")))
}
