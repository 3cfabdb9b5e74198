mod activity;
mod channel;
mod reading;
mod session;
mod threshold;

pub use activity::ActivityRecord;
pub use channel::{Channel, Profile};
pub use reading::{Reading, ReadingSnapshot, SampleValue};
pub use session::{SessionInfo, SessionStatus};
pub use threshold::{Classification, ThresholdRange};
