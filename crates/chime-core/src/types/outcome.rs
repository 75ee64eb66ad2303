//! Outcome taxonomy — what a channel reports after one delivery attempt.

use serde::{Deserialize, Serialize};

/// Result of one `deliver` call. Drives chain continuation in the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing ran.
    #[default]
    Empty,
    /// The channel can't handle this bag; skip to the next one.
    Unsupported,
    /// Delivered; keep going.
    Resolved,
    /// Delivered by a final channel; stop.
    Finished,
    /// Delivery attempted and failed; stop.
    Failed,
}

impl Outcome {
    /// `Finished` and `Failed` end a traversal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Finished | Outcome::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Empty => "empty",
            Outcome::Unsupported => "unsupported",
            Outcome::Resolved => "resolved",
            Outcome::Finished => "finished",
            Outcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
