//! Dispatch hub — an ordered chain of channels that is itself a channel.
//!
//! ```text
//! hub.deliver(bag)
//!   ├── telegram  → Unsupported  (skip)
//!   ├── webhook   → Resolved     (continue)
//!   ├── sub-hub   → Resolved     (continue, same rules inside)
//!   └── log       → Finished     (stop)
//! ```
//!
//! `Unsupported` and `Resolved` keep the chain going so every capable
//! channel gets the reminder; `Finished` and `Failed` stop it at once.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::traits::Channel;
use crate::types::{Outcome, PayloadBag};

/// Ordered registry of channels with chain-continuation dispatch.
pub struct ChannelHub {
    name: String,
    is_final: bool,
    channels: Vec<Arc<dyn Channel>>,
}

impl ChannelHub {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_final: false,
            channels: Vec::new(),
        }
    }

    /// A final hub reports `Finished` when its chain resolved.
    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Append a channel. Registering the same instance twice delivers twice.
    pub fn register(&mut self, channel: Arc<dyn Channel>) {
        tracing::debug!("🔗 [{}] registered channel #{}: {}", self.name, self.channels.len(), channel.name());
        self.channels.push(channel);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_channel(mut self, channel: impl Channel + 'static) -> Self {
        self.register(Arc::new(channel));
        self
    }

    pub fn channels(&self) -> &[Arc<dyn Channel>] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[async_trait]
impl Channel for ChannelHub {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    async fn deliver(&self, payloads: &PayloadBag) -> Outcome {
        if self.channels.is_empty() {
            tracing::debug!("[{}] no channels registered", self.name);
            return Outcome::Empty;
        }

        let mut resolved = false;
        let mut unsupported = false;

        for (idx, channel) in self.channels.iter().enumerate() {
            let outcome = match AssertUnwindSafe(channel.deliver(payloads)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::error!("💥 [{}] channel {} panicked during delivery", self.name, channel.name());
                    Outcome::Failed
                }
            };
            tracing::debug!("[{}] #{} {} → {}", self.name, idx, channel.name(), outcome);

            match outcome {
                Outcome::Finished => {
                    tracing::info!("✅ [{}] chain finished at {}", self.name, channel.name());
                    return outcome;
                }
                Outcome::Failed => {
                    tracing::warn!("⚠️ [{}] chain stopped: {} failed", self.name, channel.name());
                    return outcome;
                }
                Outcome::Resolved => resolved = true,
                Outcome::Unsupported => unsupported = true,
                Outcome::Empty => {}
            }
        }

        let outcome = if resolved {
            self.success()
        } else if unsupported {
            Outcome::Unsupported
        } else {
            Outcome::Empty
        };
        tracing::info!("[{}] chain exhausted ({} channels) → {}", self.name, self.channels.len(), outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleInfo;
    use chrono::Utc;
    use std::sync::Mutex;

    type CallLog = Arc<Mutex<Vec<String>>>;

    /// Scripted channel that records every invocation.
    struct Scripted {
        name: String,
        outcome: Outcome,
        is_final: bool,
        calls: CallLog,
    }

    impl Scripted {
        fn new(name: &str, outcome: Outcome, calls: &CallLog) -> Self {
            Self {
                name: name.into(),
                outcome,
                is_final: false,
                calls: calls.clone(),
            }
        }

        /// A final channel whose delivery succeeds.
        fn final_success(name: &str, calls: &CallLog) -> Self {
            Self {
                name: name.into(),
                outcome: Outcome::Resolved,
                is_final: true,
                calls: calls.clone(),
            }
        }
    }

    #[async_trait]
    impl Channel for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_final(&self) -> bool {
            self.is_final
        }

        async fn deliver(&self, _payloads: &PayloadBag) -> Outcome {
            self.calls.lock().unwrap().push(self.name.clone());
            if self.outcome == Outcome::Resolved {
                self.success()
            } else {
                self.outcome
            }
        }
    }

    struct Panicking;

    #[async_trait]
    impl Channel for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn is_final(&self) -> bool {
            false
        }

        async fn deliver(&self, _payloads: &PayloadBag) -> Outcome {
            panic!("boom");
        }
    }

    fn bag() -> PayloadBag {
        let now = Utc::now();
        PayloadBag::for_schedule(ScheduleInfo::new(0, "Meeting", now, now).unwrap())
    }

    fn calls_of(calls: &CallLog) -> Vec<String> {
        calls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_empty_hub() {
        let hub = ChannelHub::new("root");
        assert!(hub.is_empty());
        assert_eq!(hub.deliver(&bag()).await, Outcome::Empty);
    }

    #[tokio::test]
    async fn test_all_resolved_visits_everyone_in_order() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Resolved, &calls))
            .with_channel(Scripted::new("b", Outcome::Resolved, &calls))
            .with_channel(Scripted::new("c", Outcome::Resolved, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Resolved);
        assert_eq!(calls_of(&calls), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_unsupported_resolved_then_final() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Unsupported, &calls))
            .with_channel(Scripted::new("b", Outcome::Resolved, &calls))
            .with_channel(Scripted::final_success("c", &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Finished);
        assert_eq!(calls_of(&calls), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_failed_stops_chain() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Resolved, &calls))
            .with_channel(Scripted::new("b", Outcome::Failed, &calls))
            .with_channel(Scripted::new("c", Outcome::Resolved, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Failed);
        assert_eq!(calls_of(&calls), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_finished_stops_chain() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Finished, &calls))
            .with_channel(Scripted::new("b", Outcome::Resolved, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Finished);
        assert_eq!(calls_of(&calls), vec!["a"]);
    }

    #[tokio::test]
    async fn test_all_unsupported() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Unsupported, &calls))
            .with_channel(Scripted::new("b", Outcome::Unsupported, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Unsupported);
        assert_eq!(calls_of(&calls).len(), 2);
    }

    #[tokio::test]
    async fn test_resolved_survives_trailing_unsupported() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Scripted::new("a", Outcome::Resolved, &calls))
            .with_channel(Scripted::new("b", Outcome::Unsupported, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Resolved);
    }

    #[tokio::test]
    async fn test_nested_hub() {
        let calls = CallLog::default();
        let sub = ChannelHub::new("sub").with_channel(Scripted::new("x", Outcome::Resolved, &calls));
        let parent = ChannelHub::new("parent")
            .with_channel(sub)
            .with_channel(Scripted::new("y", Outcome::Finished, &calls));

        assert_eq!(parent.deliver(&bag()).await, Outcome::Finished);
        assert_eq!(calls_of(&calls), vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_final_sub_hub_ends_parent_chain() {
        let calls = CallLog::default();
        let sub = ChannelHub::new("sub")
            .with_final(true)
            .with_channel(Scripted::new("x", Outcome::Resolved, &calls));
        let parent = ChannelHub::new("parent")
            .with_channel(sub)
            .with_channel(Scripted::new("y", Outcome::Resolved, &calls));

        assert_eq!(parent.deliver(&bag()).await, Outcome::Finished);
        assert_eq!(calls_of(&calls), vec!["x"]);
    }

    #[tokio::test]
    async fn test_same_instance_registered_twice() {
        let calls = CallLog::default();
        let shared: Arc<dyn Channel> = Arc::new(Scripted::new("a", Outcome::Resolved, &calls));
        let mut hub = ChannelHub::new("root");
        hub.register(shared.clone());
        hub.register(shared);

        assert_eq!(hub.len(), 2);
        assert_eq!(hub.deliver(&bag()).await, Outcome::Resolved);
        assert_eq!(calls_of(&calls), vec!["a", "a"]);
    }

    #[tokio::test]
    async fn test_panic_is_contained_as_failed() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root")
            .with_channel(Panicking)
            .with_channel(Scripted::new("after", Outcome::Resolved, &calls));

        assert_eq!(hub.deliver(&bag()).await, Outcome::Failed);
        assert!(calls_of(&calls).is_empty());
    }

    #[tokio::test]
    async fn test_hub_is_reentrant() {
        let calls = CallLog::default();
        let hub = ChannelHub::new("root").with_channel(Scripted::new("a", Outcome::Resolved, &calls));
        let payloads = bag();

        assert_eq!(hub.deliver(&payloads).await, Outcome::Resolved);
        assert_eq!(hub.deliver(&payloads).await, Outcome::Resolved);
        assert_eq!(calls_of(&calls).len(), 2);
    }
}
