use serde::{Deserialize, Serialize};

use super::Channel;

/// Acceptable `[min, max]` interval for one channel. `min <= max` is not
/// enforced here; see [`crate::evaluator::classify`] for inverted ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRange {
    pub channel: Channel,
    pub min: f64,
    pub max: f64,
}

impl ThresholdRange {
    pub fn new(channel: impl Into<Channel>, min: f64, max: f64) -> Self {
        Self {
            channel: channel.into(),
            min,
            max,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    InRange,
    OutOfRange,
}

impl Classification {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Classification::OutOfRange)
    }
}
