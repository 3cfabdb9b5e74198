mod notice;
mod registry;
mod state;

pub use notice::{Notice, NoticeLevel};
pub use registry::{SessionConfig, SessionHandle, SessionRegistry};
pub use state::{ChannelStatus, DashboardSession, Evaluation};
