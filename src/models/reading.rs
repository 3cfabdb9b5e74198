//! Sensor samples and full multi-channel snapshots.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Channel;

/// A single sample value. Channels the device did not report are `Unknown`,
/// never zero, so the evaluator can flag them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum SampleValue {
    Known(f64),
    Unknown,
}

impl SampleValue {
    /// Non-finite numbers are folded into `Unknown`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            SampleValue::Known(value)
        } else {
            SampleValue::Unknown
        }
    }

    pub fn known(&self) -> Option<f64> {
        match self {
            SampleValue::Known(value) => Some(*value),
            SampleValue::Unknown => None,
        }
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Known(value) => write!(f, "{value}"),
            SampleValue::Unknown => f.write_str("unknown"),
        }
    }
}

/// One timestamped sample for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub channel: Channel,
    pub value: SampleValue,
    pub timestamp: DateTime<Utc>,
}

/// Every channel's value taken at one polling instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSnapshot {
    pub taken_at: DateTime<Utc>,
    values: BTreeMap<Channel, SampleValue>,
}

impl ReadingSnapshot {
    pub fn new(taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, channel: impl Into<Channel>, value: SampleValue) -> Self {
        self.insert(channel.into(), value);
        self
    }

    pub fn insert(&mut self, channel: Channel, value: SampleValue) {
        self.values.insert(channel, value);
    }

    /// Value for `channel`, `Unknown` when the snapshot never saw it.
    pub fn value(&self, channel: &Channel) -> SampleValue {
        self.values
            .get(channel)
            .copied()
            .unwrap_or(SampleValue::Unknown)
    }

    pub fn reading(&self, channel: &Channel) -> Reading {
        Reading {
            channel: channel.clone(),
            value: self.value(channel),
            timestamp: self.taken_at,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_channel_reads_as_unknown() {
        let snapshot = ReadingSnapshot::new(Utc::now())
            .with_value("Flex Sensor 1", SampleValue::Known(150.0));

        assert_eq!(
            snapshot.value(&Channel::from("Flex Sensor 1")),
            SampleValue::Known(150.0)
        );
        assert_eq!(snapshot.value(&Channel::from("MPU 1")), SampleValue::Unknown);
    }

    #[test]
    fn non_finite_samples_become_unknown() {
        assert_eq!(SampleValue::from_f64(f64::NAN), SampleValue::Unknown);
        assert_eq!(SampleValue::from_f64(f64::INFINITY), SampleValue::Unknown);
        assert_eq!(SampleValue::from_f64(12.5), SampleValue::Known(12.5));
    }
}
