pub mod outcome;
pub mod payload;

pub use outcome::Outcome;
pub use payload::{CycleInfo, Payload, PayloadBag, PayloadKind, ScheduleInfo, UserData};
