//! # Chime Core
//!
//! Notification dispatch chain: payload model, outcome taxonomy, the
//! [`Channel`] trait, and the [`ChannelHub`] that walks a chain of channels.
//!
//! ```text
//! scheduler fires event
//!   └── PayloadBag { ScheduleInfo, CycleInfo?, UserData* }
//!         └── ChannelHub::deliver
//!               ├── channel → Unsupported (skip)
//!               ├── channel → Resolved    (continue)
//!               └── channel → Finished | Failed (stop)
//! ```

pub mod config;
pub mod error;
pub mod hub;
pub mod render;
pub mod traits;
pub mod types;

pub use config::ChimeConfig;
pub use error::{ChimeError, Result};
pub use hub::ChannelHub;
pub use render::render_message;
pub use traits::Channel;
pub use types::{CycleInfo, Outcome, Payload, PayloadBag, PayloadKind, ScheduleInfo, UserData};
