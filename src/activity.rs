//! Incremental per-channel exceedance counters.
//!
//! Counts are taken against whatever range was current when each sample
//! arrived, so they keep counting past exceedances after a threshold
//! change. [`crate::history::HistoryBuffer::count_out_of_range`] is the
//! recomputed counterpart.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{ActivityRecord, Channel, Classification, SampleValue};

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    records: BTreeMap<Channel, ActivityRecord>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the channel's record.
    ///
    /// Each logical sample must be recorded once; recording it again counts
    /// the exceedance again.
    pub fn record(
        &mut self,
        channel: &Channel,
        value: SampleValue,
        classification: Classification,
        now: DateTime<Utc>,
    ) {
        let record = self.records.entry(channel.clone()).or_default();
        record.last_reading = value;
        if classification.is_out_of_range() {
            record.exceed_count += 1;
            record.last_exceed_time = Some(now);
        }
    }

    pub fn get(&self, channel: &Channel) -> ActivityRecord {
        self.records.get(channel).cloned().unwrap_or_default()
    }

    /// Read-only copy of every record seen so far.
    pub fn snapshot(&self) -> BTreeMap<Channel, ActivityRecord> {
        self.records.clone()
    }

}
