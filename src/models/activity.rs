use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SampleValue;

/// Running exceedance statistics for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub exceed_count: u64,
    pub last_exceed_time: Option<DateTime<Utc>>,
    pub last_reading: SampleValue,
}

impl Default for ActivityRecord {
    fn default() -> Self {
        Self {
            exceed_count: 0,
            last_exceed_time: None,
            last_reading: SampleValue::Unknown,
        }
    }
}
