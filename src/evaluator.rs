//! Range classification for single samples.

use crate::models::{Classification, SampleValue, ThresholdRange};

/// Classify `value` against `range`.
///
/// A known value is out of range iff `value < min || value > max`. An
/// `Unknown` value is always out of range. Inverted ranges (`min > max`)
/// are not normalized: every value falls below `min` or above `max`, so
/// an inverted range classifies everything as out of range.
pub fn classify(value: SampleValue, range: &ThresholdRange) -> Classification {
    match value {
        SampleValue::Known(v) if v < range.min || v > range.max => Classification::OutOfRange,
        SampleValue::Known(_) => Classification::InRange,
        SampleValue::Unknown => Classification::OutOfRange,
    }
}
