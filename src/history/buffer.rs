//! Ordered store of full reading snapshots.
//!
//! Used for trend series and for counting exceedances retrospectively
//! against a given range. The count is recomputed from the raw snapshots on
//! every call and is independent of [`crate::activity::ActivityLog`].

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::evaluator::classify;
use crate::models::{Channel, ReadingSnapshot, ThresholdRange};

#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    snapshots: VecDeque<ReadingSnapshot>,
    capacity: Option<usize>,
    evicted: u64,
}

impl HistoryBuffer {
    /// Buffer that grows without bound.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Buffer holding at most `capacity` snapshots; older ones are dropped
    /// first. A capacity of zero is treated as one.
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            evicted: 0,
        }
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    pub fn append(&mut self, snapshot: ReadingSnapshot) {
        if let Some(capacity) = self.capacity {
            while self.snapshots.len() >= capacity {
                self.snapshots.pop_front();
                self.evicted += 1;
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Snapshots oldest first.
    pub fn all(&self) -> Vec<ReadingSnapshot> {
        self.snapshots.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&ReadingSnapshot> {
        self.snapshots.back()
    }

    /// How many stored snapshots have `channel` outside `range`.
    pub fn count_out_of_range(&self, channel: &Channel, range: &ThresholdRange) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| classify(snapshot.value(channel), range).is_out_of_range())
            .count()
    }

    /// `(taken_at, value)` pairs for one channel, oldest first. Unknown
    /// samples are kept as `None` so charts can show gaps.
    pub fn series(&self, channel: &Channel) -> Vec<(DateTime<Utc>, Option<f64>)> {
        self.snapshots
            .iter()
            .map(|snapshot| (snapshot.taken_at, snapshot.value(channel).known()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshots dropped to honor the capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SampleValue;

    fn snap(secs: i64, value: f64) -> ReadingSnapshot {
        let at = DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap();
        ReadingSnapshot::new(at).with_value("MPU 1", SampleValue::Known(value))
    }

    #[test]
    fn keeps_insertion_order() {
        let mut history = HistoryBuffer::unbounded();
        for (i, v) in [10.0, 20.0, 30.0].into_iter().enumerate() {
            history.append(snap(i as i64, v));
        }
        let values: Vec<_> = history
            .all()
            .iter()
            .map(|s| s.value(&Channel::from("MPU 1")))
            .collect();
        assert_eq!(values, [10.0, 20.0, 30.0].map(SampleValue::Known).to_vec());
    }

    #[test]
    fn counts_against_the_given_range() {
        let mut history = HistoryBuffer::unbounded();
        for (i, v) in [50.0, 300.0, 150.0, 400.0].into_iter().enumerate() {
            history.append(snap(i as i64, v));
        }
        let channel = Channel::from("MPU 1");
        let count = |min, max| {
            history.count_out_of_range(&channel, &ThresholdRange::new("MPU 1", min, max))
        };
        assert_eq!(count(0.0, 256.0), 2);
        assert_eq!(count(100.0, 350.0), 2);
        assert_eq!(count(0.0, 1024.0), 0);
    }

    #[test]
    fn missing_channel_counts_as_out_of_range() {
        let mut history = HistoryBuffer::unbounded();
        history.append(snap(0, 100.0));
        let other = Channel::from("MPU 2");
        assert_eq!(
            history.count_out_of_range(&other, &ThresholdRange::new("MPU 2", 0.0, 1024.0)),
            1
        );
    }

    #[test]
    fn bounded_buffer_evicts_oldest_first() {
        let mut history = HistoryBuffer::bounded(2);
        history.append(snap(0, 1.0));
        history.append(snap(1, 2.0));
        history.append(snap(2, 3.0));

        let series = history.series(&Channel::from("MPU 1"));
        assert_eq!(series.iter().map(|(_, v)| *v).collect::<Vec<_>>(), [Some(2.0), Some(3.0)]);
        assert_eq!(history.evicted(), 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let mut history = HistoryBuffer::bounded(0);
        history.append(snap(0, 1.0));
        history.append(snap(1, 2.0));
        assert_eq!(history.capacity(), Some(1));
        assert_eq!(
            history.latest().map(|s| s.value(&Channel::from("MPU 1"))),
            Some(SampleValue::Known(2.0))
        );
    }

    #[test]
    fn series_marks_unknown_as_gap() {
        let mut history = HistoryBuffer::unbounded();
        history.append(snap(0, 5.0));
        let at = DateTime::from_timestamp(1_700_000_001, 0).unwrap();
        history.append(ReadingSnapshot::new(at));
        let series = history.series(&Channel::from("MPU 1"));
        assert_eq!(series[1], (at, None));
    }
}
