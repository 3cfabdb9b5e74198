//! Decoding of the device's `/api/data` JSON body.
//!
//! The body is an object keyed by sensor name. Scalar values map to a
//! channel of the same name; 3-element arrays (IMU axes) expand into
//! `<name>_X`, `<name>_Y` and `<name>_Z`. Anything the profile expects but
//! the body does not provide as a finite number becomes `Unknown`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::{Channel, Profile, ReadingSnapshot, SampleValue, ThresholdRange};

use super::FetchError;

const AXES: [&str; 3] = ["X", "Y", "Z"];

pub fn parse_snapshot(
    profile: Profile,
    body: &Value,
    taken_at: DateTime<Utc>,
) -> Result<ReadingSnapshot, FetchError> {
    let object = body
        .as_object()
        .ok_or_else(|| FetchError::Malformed(format!("expected a JSON object, got {body}")))?;

    let mut decoded: BTreeMap<Channel, SampleValue> = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::Array(items) if items.len() == AXES.len() => {
                for (axis, item) in AXES.iter().zip(items) {
                    decoded.insert(Channel::new(format!("{key}_{axis}")), sample(item));
                }
            }
            Value::Array(_) => {}
            other => {
                decoded.insert(Channel::new(key.as_str()), sample(other));
            }
        }
    }

    let mut snapshot = ReadingSnapshot::new(taken_at);
    for channel in profile.channels() {
        let value = decoded.get(&channel).copied().unwrap_or(SampleValue::Unknown);
        snapshot.insert(channel, value);
    }
    Ok(snapshot)
}

fn sample(value: &Value) -> SampleValue {
    value
        .as_f64()
        .map(SampleValue::from_f64)
        .unwrap_or(SampleValue::Unknown)
}

/// Body of the threshold `POST`: `{"<channel>": [min, max], ...}`.
pub fn thresholds_body(ranges: &[ThresholdRange]) -> BTreeMap<String, [f64; 2]> {
    ranges
        .iter()
        .map(|range| (range.channel.to_string(), [range.min, range.max]))
        .collect()
}

/// Device acknowledgement for a threshold `POST`.
#[derive(Debug, Clone, serde::Deserialize, Serialize)]
pub struct PushAck {
    pub status: String,
}

impl PushAck {
    pub const SUCCESS: &'static str = "success";

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}
