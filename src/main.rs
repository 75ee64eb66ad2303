//! # Chime — reminder dispatch CLI
//!
//! Fires one reminder through the configured channel chain.
//!
//! Usage:
//!   chime init                                   # Write a starter config
//!   chime channels                               # Show the configured chain
//!   chime send -m "Stand-up" --minutes 15        # Dispatch a reminder
//!   chime send -m "Focus" --cycle 3 --work       # ...with cycle state

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chime_core::config::ChannelEntry;
use chime_core::{Channel, ChimeConfig, CycleInfo, Outcome, PayloadBag, ScheduleInfo, UserData};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chime", version, about = "⏰ Chime — pluggable reminder dispatch")]
struct Cli {
    /// Config file (default: ~/.chime/config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch one reminder through the chain
    Send(SendArgs),
    /// Print the configured channel chain
    Channels,
    /// Write a starter config if none exists
    Init,
}

#[derive(Args)]
struct SendArgs {
    /// Reminder text
    #[arg(short, long)]
    message: String,

    /// Position within the day's agenda
    #[arg(long, default_value = "0")]
    index: usize,

    /// Event start (RFC 3339, default: now)
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Event end (RFC 3339)
    #[arg(long, conflicts_with = "minutes")]
    end: Option<DateTime<Utc>>,

    /// Event length in minutes, as an alternative to --end
    #[arg(long)]
    minutes: Option<i64>,

    /// Cycle ordinal
    #[arg(long)]
    cycle: Option<usize>,

    /// The cycle is a work interval
    #[arg(long, requires = "cycle", conflicts_with = "rest")]
    work: bool,

    /// The cycle is a rest interval
    #[arg(long, requires = "cycle")]
    rest: bool,

    /// Extra JSON data for channels (repeatable)
    #[arg(long = "data")]
    data: Vec<String>,
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(ChimeConfig::default_path)
}

fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "chime=debug,chime_core=debug,chime_channels=debug"
    } else {
        "chime=info,chime_core=info,chime_channels=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Build the bag for one fired event from command-line arguments.
fn build_bag(args: &SendArgs) -> Result<PayloadBag> {
    let start = args.start.unwrap_or_else(Utc::now);
    let end = match (args.end, args.minutes) {
        (Some(end), _) => end,
        (None, Some(minutes)) => chrono::TimeDelta::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or_else(|| anyhow!("--minutes out of range: {minutes}"))?,
        (None, None) => start,
    };

    let mut bag = PayloadBag::for_schedule(ScheduleInfo::new(args.index, args.message.clone(), start, end)?);
    if let Some(index) = args.cycle {
        bag.push(CycleInfo { work: !args.rest, index })?;
    }
    for raw in &args.data {
        let value: serde_json::Value =
            serde_json::from_str(raw).with_context(|| format!("--data is not valid JSON: {raw}"))?;
        bag.push(UserData::new(value))?;
    }
    Ok(bag)
}

/// Indented view of the chain, one line per entry.
fn describe_chain(entries: &[ChannelEntry], depth: usize, out: &mut Vec<String>) {
    for entry in entries {
        let mut line = format!("{}- {}", "  ".repeat(depth), entry.kind());
        if let ChannelEntry::Hub(hub) = entry {
            line.push_str(&format!(" '{}'", hub.name));
        }
        if entry.is_final() {
            line.push_str(" [final]");
        }
        if !entry.enabled() {
            line.push_str(" (disabled)");
        }
        out.push(line);
        if let ChannelEntry::Hub(hub) = entry {
            describe_chain(&hub.channels, depth + 1, out);
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<ChimeConfig> {
    if path.exists() {
        Ok(ChimeConfig::load_from(path)?)
    } else {
        tracing::warn!("⚠️ No config at {}, using an empty chain", path.display());
        Ok(ChimeConfig::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let path = config_path(&cli);

    match &cli.command {
        Command::Init => {
            if path.exists() {
                println!("⚠️  Config already exists at {}", path.display());
            } else {
                ChimeConfig::starter().save_to(&path)?;
                println!("✅ Wrote starter config to {}", path.display());
            }
        }
        Command::Channels => {
            let config = load_config(&path)?;
            let mut lines = Vec::new();
            describe_chain(&config.channels, 0, &mut lines);
            println!("🔔 {} ({} entries)", config.name, config.channels.len());
            for line in lines {
                println!("{line}");
            }
        }
        Command::Send(args) => {
            let config = load_config(&path)?;
            let hub = chime_channels::build_hub(&config)?;
            let bag = build_bag(args)?;

            let outcome = hub.deliver(&bag).await;
            println!("{outcome}");
            if outcome == Outcome::Failed {
                tracing::error!("❌ Reminder delivery failed");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
