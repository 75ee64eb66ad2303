//! Channel trait — one notification medium in the dispatch chain.

use async_trait::async_trait;

use crate::types::{Outcome, PayloadBag};

/// A delivery target: push service, webhook, log, or a hub of other channels.
///
/// `deliver` runs its side effect at most once and never retries. A channel
/// that needs a payload the bag lacks returns [`Outcome::Unsupported`]; any
/// internal fault (I/O, bad response, timeout) is mapped to
/// [`Outcome::Failed`] before returning.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether a successful delivery should end the chain.
    fn is_final(&self) -> bool;

    /// Attempt one delivery.
    async fn deliver(&self, payloads: &PayloadBag) -> Outcome;

    /// Outcome for a successful delivery: `Finished` if final, else `Resolved`.
    fn success(&self) -> Outcome {
        if self.is_final() {
            Outcome::Finished
        } else {
            Outcome::Resolved
        }
    }
}
