//! Message rendering — the reminder text a channel sends for a bag.

use crate::error::{ChimeError, Result};
use crate::types::PayloadBag;

/// Render the reminder text for `payloads`.
///
/// The schedule message is the base text. With `include_cycle` set and a
/// cycle entry present, a suffix names the cycle ordinal and whether a work
/// or rest interval is starting.
pub fn render_message(payloads: &PayloadBag, include_cycle: bool) -> Result<String> {
    let schedule = payloads.schedule().ok_or(ChimeError::MissingSchedule)?;
    let mut message = schedule.message().to_string();

    if include_cycle {
        if let Some(cycle) = payloads.cycle() {
            let phase = if cycle.work { "work" } else { "rest" };
            message.push_str(&format!(" ({phase} cycle {} starting)", cycle.index));
        }
    }

    Ok(message)
}

/// Human-readable time window of the bag's schedule, e.g. `09:00–09:45 UTC`.
pub fn render_window(payloads: &PayloadBag) -> Option<String> {
    payloads.schedule().map(|s| {
        format!(
            "{}–{} UTC",
            s.start_time().format("%H:%M"),
            s.end_time().format("%H:%M")
        )
    })
}
