mod device;
mod error;
pub mod payload;
mod source;

pub use device::DeviceClient;
pub use error::{FetchError, PushError};
pub use source::{ReadingSource, Source, SyntheticSource};
