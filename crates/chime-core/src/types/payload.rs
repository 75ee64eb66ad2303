//! Payload model — typed units of context handed to every channel.
//!
//! A [`PayloadBag`] is built fresh for each fired event: exactly one
//! [`ScheduleInfo`], at most one [`CycleInfo`], and any number of
//! [`UserData`] entries. Every payload is tagged with its [`PayloadKind`]
//! at insertion, so lookups are plain filters over the tag.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChimeError, Result};

/// The scheduled event being notified about. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleInfo {
    index: usize,
    message: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: Duration,
}

impl ScheduleInfo {
    /// Build a schedule entry. Fails if `end_time` precedes `start_time`.
    pub fn new(
        index: usize,
        message: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        if end_time < start_time {
            return Err(ChimeError::InvalidSchedule(format!(
                "end {} is before start {}",
                end_time.to_rfc3339(),
                start_time.to_rfc3339()
            )));
        }
        Ok(Self {
            index,
            message: message.into(),
            start_time,
            end_time,
            duration: end_time - start_time,
        })
    }

    /// Position within the day's agenda.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Recurrence state at the time the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    /// `true` for a work interval, `false` for a rest interval.
    pub work: bool,
    /// Cycle ordinal.
    pub index: usize,
}

impl CycleInfo {
    pub fn work(index: usize) -> Self {
        Self { work: true, index }
    }

    pub fn rest(index: usize) -> Self {
        Self { work: false, index }
    }
}

/// Opaque caller-supplied data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserData(pub serde_json::Value);

impl UserData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Variant tag of a [`Payload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Schedule,
    Cycle,
    User,
}

/// One unit of context in a bag.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Schedule(ScheduleInfo),
    Cycle(CycleInfo),
    User(UserData),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Schedule(_) => PayloadKind::Schedule,
            Payload::Cycle(_) => PayloadKind::Cycle,
            Payload::User(_) => PayloadKind::User,
        }
    }
}

impl From<ScheduleInfo> for Payload {
    fn from(value: ScheduleInfo) -> Self {
        Payload::Schedule(value)
    }
}

impl From<CycleInfo> for Payload {
    fn from(value: CycleInfo) -> Self {
        Payload::Cycle(value)
    }
}

impl From<UserData> for Payload {
    fn from(value: UserData) -> Self {
        Payload::User(value)
    }
}

/// Ordered, append-only collection of payloads for one dispatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadBag {
    payloads: Vec<Payload>,
}

impl PayloadBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a bag around the event's schedule entry.
    pub fn for_schedule(schedule: ScheduleInfo) -> Self {
        Self {
            payloads: vec![Payload::Schedule(schedule)],
        }
    }

    /// Append one payload. A second schedule or cycle entry is rejected
    /// and leaves the bag untouched.
    pub fn push(&mut self, payload: impl Into<Payload>) -> Result<()> {
        let payload = payload.into();
        self.check_singleton(payload.kind(), 1)?;
        self.payloads.push(payload);
        Ok(())
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Result<Self> {
        self.push(payload)?;
        Ok(self)
    }

    /// Append every payload of `other`, keeping its order. All or nothing.
    pub fn merge(&mut self, other: PayloadBag) -> Result<()> {
        for kind in [PayloadKind::Schedule, PayloadKind::Cycle] {
            self.check_singleton(kind, other.of_kind(kind).count())?;
        }
        self.payloads.extend(other.payloads);
        Ok(())
    }

    /// Builder form of [`merge`](Self::merge).
    pub fn with_payloads(mut self, other: PayloadBag) -> Result<Self> {
        self.merge(other)?;
        Ok(self)
    }

    fn check_singleton(&self, kind: PayloadKind, incoming: usize) -> Result<()> {
        let label = match kind {
            PayloadKind::Schedule => "schedule",
            PayloadKind::Cycle => "cycle",
            PayloadKind::User => return Ok(()),
        };
        if self.of_kind(kind).count() + incoming > 1 {
            return Err(ChimeError::DuplicatePayload(format!(
                "a bag holds at most one {label} entry"
            )));
        }
        Ok(())
    }

    /// Payloads of one variant, in insertion order.
    pub fn of_kind(&self, kind: PayloadKind) -> impl Iterator<Item = &Payload> + Clone + '_ {
        self.payloads.iter().filter(move |p| p.kind() == kind)
    }

    pub fn schedule(&self) -> Option<&ScheduleInfo> {
        self.payloads.iter().find_map(|p| match p {
            Payload::Schedule(s) => Some(s),
            _ => None,
        })
    }

    pub fn cycle(&self) -> Option<&CycleInfo> {
        self.payloads.iter().find_map(|p| match p {
            Payload::Cycle(c) => Some(c),
            _ => None,
        })
    }

    pub fn users(&self) -> impl Iterator<Item = &UserData> + Clone + '_ {
        self.payloads.iter().filter_map(|p| match p {
            Payload::User(u) => Some(u),
            _ => None,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Payload> {
        self.payloads.iter()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl<'a> IntoIterator for &'a PayloadBag {
    type Item = &'a Payload;
    type IntoIter = std::slice::Iter<'a, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
