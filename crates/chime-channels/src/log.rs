//! Log channel — writes the reminder to the tracing log.
//! Handy as the final, authoritative record at the end of a chain.

use async_trait::async_trait;
use chime_core::{render_message, Channel, ChimeError, Outcome, PayloadBag, Result};
use tracing::Level;

pub struct LogChannel {
    level: Level,
    include_cycle: bool,
    is_final: bool,
}

impl LogChannel {
    pub fn new(level: Level, is_final: bool) -> Self {
        Self {
            level,
            include_cycle: true,
            is_final,
        }
    }

    /// Build from a level name such as `"info"` or `"warn"`.
    pub fn from_level_name(level: &str, is_final: bool) -> Result<Self> {
        let level = level
            .parse::<Level>()
            .map_err(|_| ChimeError::config(format!("unknown log level: {level}")))?;
        Ok(Self::new(level, is_final))
    }

    pub fn with_cycle(mut self, include_cycle: bool) -> Self {
        self.include_cycle = include_cycle;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

#[async_trait]
impl Channel for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    async fn deliver(&self, payloads: &PayloadBag) -> Outcome {
        let message = match render_message(payloads, self.include_cycle) {
            Ok(message) => message,
            Err(ChimeError::MissingSchedule) => return Outcome::Unsupported,
            Err(e) => {
                tracing::error!("log channel: {e}");
                return Outcome::Failed;
            }
        };

        match self.level {
            Level::ERROR => tracing::error!("⏰ {message}"),
            Level::WARN => tracing::warn!("⏰ {message}"),
            Level::INFO => tracing::info!("⏰ {message}"),
            Level::DEBUG => tracing::debug!("⏰ {message}"),
            _ => tracing::trace!("⏰ {message}"),
        }
        self.success()
    }
}
