//! Build a hub tree from configuration.
//! Called once at startup; entries are registered in file order.

use std::sync::Arc;
use std::time::Duration;

use chime_core::config::{ChannelEntry, ChimeConfig, HubChannelConfig};
use chime_core::{Channel, ChannelHub, Result};

use crate::{DiscordChannel, LogChannel, PushChannel, TelegramChannel, WebhookChannel};

/// Build the root hub described by `config`.
pub fn build_hub(config: &ChimeConfig) -> Result<ChannelHub> {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let mut hub = ChannelHub::new(config.name.clone());
    register_all(&mut hub, &config.channels, timeout)?;
    tracing::info!("🔔 Hub '{}' ready with {} channels", config.name, hub.len());
    Ok(hub)
}

fn register_all(hub: &mut ChannelHub, entries: &[ChannelEntry], timeout: Duration) -> Result<()> {
    for entry in entries {
        if let Some(channel) = build_channel(entry, timeout)? {
            hub.register(channel);
        }
    }
    Ok(())
}

/// Build one channel. Disabled entries yield `None`.
pub fn build_channel(entry: &ChannelEntry, timeout: Duration) -> Result<Option<Arc<dyn Channel>>> {
    if !entry.enabled() {
        tracing::debug!("⏭️ Skipping disabled {} channel", entry.kind());
        return Ok(None);
    }

    let channel: Arc<dyn Channel> = match entry {
        ChannelEntry::Log(c) => {
            Arc::new(LogChannel::from_level_name(&c.level, c.is_final)?.with_cycle(c.include_cycle))
        }
        ChannelEntry::Webhook(c) => Arc::new(
            WebhookChannel::new(c.url.clone(), c.headers.clone(), c.is_final).with_timeout(timeout),
        ),
        ChannelEntry::Telegram(c) => Arc::new(
            TelegramChannel::new(c.bot_token.clone(), c.chat_id.clone(), c.is_final)
                .with_timeout(timeout),
        ),
        ChannelEntry::Discord(c) => {
            Arc::new(DiscordChannel::new(c.webhook_url.clone(), c.is_final).with_timeout(timeout))
        }
        ChannelEntry::Push(c) => Arc::new(
            PushChannel::new(c.url.clone(), c.code.clone(), c.is_final).with_timeout(timeout),
        ),
        ChannelEntry::Hub(c) => Arc::new(build_sub_hub(c, timeout)?),
    };
    Ok(Some(channel))
}

fn build_sub_hub(config: &HubChannelConfig, timeout: Duration) -> Result<ChannelHub> {
    let mut hub = ChannelHub::new(config.name.clone()).with_final(config.is_final);
    register_all(&mut hub, &config.channels, timeout)?;
    Ok(hub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::{Outcome, PayloadBag, ScheduleInfo};
    use chrono::Utc;

    fn config(toml_str: &str) -> ChimeConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_order_and_disabled_entries() {
        let hub = build_hub(&config(
            r#"
            [[channels]]
            kind = "telegram"
            bot_token = "t"
            chat_id = "1"

            [[channels]]
            kind = "push"
            enabled = false
            code = "c"

            [[channels]]
            kind = "hub"
            name = "backup"
            final = true

            [[channels.channels]]
            kind = "log"

            [[channels]]
            kind = "log"
            final = true
            "#,
        ))
        .unwrap();

        let names: Vec<_> = hub.channels().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["telegram", "backup", "log"]);
        assert!(hub.channels()[1].is_final());
        assert!(hub.channels()[2].is_final());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let result = build_hub(&config(
            r#"
            [[channels]]
            kind = "log"
            level = "shout"
            "#,
        ));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_built_chain_delivers() {
        let hub = build_hub(&config(
            r#"
            [[channels]]
            kind = "hub"
            name = "inner"

            [[channels.channels]]
            kind = "log"
            level = "debug"

            [[channels]]
            kind = "log"
            final = true
            "#,
        ))
        .unwrap();

        let now = Utc::now();
        let payloads = PayloadBag::for_schedule(ScheduleInfo::new(0, "Meeting", now, now).unwrap());
        assert_eq!(hub.deliver(&payloads).await, Outcome::Finished);
        assert_eq!(hub.deliver(&PayloadBag::new()).await, Outcome::Unsupported);
    }

    #[tokio::test]
    async fn test_empty_config_builds_empty_hub() {
        let hub = build_hub(&ChimeConfig::default()).unwrap();
        assert!(hub.is_empty());
        assert_eq!(hub.deliver(&PayloadBag::new()).await, Outcome::Empty);
    }
}
