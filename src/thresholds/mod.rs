mod store;
pub mod validation;

pub use store::ThresholdStore;
pub use validation::{parse_threshold_input, validate_bound, ThresholdInputError};
