//! Chime configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChimeError, Result};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChimeConfig {
    /// Name of the root hub.
    #[serde(default = "default_hub_name")]
    pub name: String,
    /// Per-request bound for HTTP channels.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    /// Delivery chain, in order.
    #[serde(default)]
    pub channels: Vec<ChannelEntry>,
}

fn default_hub_name() -> String { "chime".into() }
fn default_http_timeout() -> u64 { 10 }
fn bool_true() -> bool { true }

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            name: default_hub_name(),
            http_timeout_secs: default_http_timeout(),
            channels: Vec::new(),
        }
    }
}

impl ChimeConfig {
    /// Starter config written by `chime init`: a single final log channel.
    pub fn starter() -> Self {
        Self {
            channels: vec![ChannelEntry::Log(LogChannelConfig {
                enabled: true,
                is_final: true,
                level: default_log_level(),
                include_cycle: true,
            })],
            ..Self::default()
        }
    }

    /// Load config from the default path (~/.chime/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChimeError::Config(format!("Failed to read config {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ChimeError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChimeError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Chime home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chime")
    }
}

/// One entry of the delivery chain, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelEntry {
    Log(LogChannelConfig),
    Webhook(WebhookChannelConfig),
    Telegram(TelegramChannelConfig),
    Discord(DiscordChannelConfig),
    Push(PushChannelConfig),
    Hub(HubChannelConfig),
}

impl ChannelEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            ChannelEntry::Log(_) => "log",
            ChannelEntry::Webhook(_) => "webhook",
            ChannelEntry::Telegram(_) => "telegram",
            ChannelEntry::Discord(_) => "discord",
            ChannelEntry::Push(_) => "push",
            ChannelEntry::Hub(_) => "hub",
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            ChannelEntry::Log(c) => c.enabled,
            ChannelEntry::Webhook(c) => c.enabled,
            ChannelEntry::Telegram(c) => c.enabled,
            ChannelEntry::Discord(c) => c.enabled,
            ChannelEntry::Push(c) => c.enabled,
            ChannelEntry::Hub(c) => c.enabled,
        }
    }

    pub fn is_final(&self) -> bool {
        match self {
            ChannelEntry::Log(c) => c.is_final,
            ChannelEntry::Webhook(c) => c.is_final,
            ChannelEntry::Telegram(c) => c.is_final,
            ChannelEntry::Discord(c) => c.is_final,
            ChannelEntry::Push(c) => c.is_final,
            ChannelEntry::Hub(c) => c.is_final,
        }
    }
}

/// Writes the reminder to the tracing log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// trace, debug, info, warn, or error.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "bool_true")]
    pub include_cycle: bool,
}

fn default_log_level() -> String { "info".into() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    pub webhook_url: String,
}

/// Trigger-style push service: GET `url?id=<code>&text=<message>&type=json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default = "default_push_url")]
    pub url: String,
    /// Trigger code identifying the recipient.
    pub code: String,
}

fn default_push_url() -> String { "http://miaotixing.com/trigger".into() }

/// A nested hub with its own chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubChannelConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default = "default_hub_name")]
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelEntry>,
}
