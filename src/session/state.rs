//! Per-session dashboard state.
//!
//! One [`DashboardSession`] owns everything a single user interaction cycle
//! reads or mutates: thresholds, activity counters, snapshot history, the
//! clinician's suggestion and the current view. Nothing here is shared
//! across sessions.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::ActivityLog;
use crate::evaluator::classify;
use crate::history::HistoryBuffer;
use crate::models::{
    ActivityRecord, Channel, Classification, Profile, ReadingSnapshot, SampleValue, SessionInfo,
    SessionStatus, ThresholdRange,
};
use crate::sensing::{FetchError, ReadingSource};
use crate::suggestion::{SuggestionError, SuggestionSlot};
use crate::thresholds::{parse_threshold_input, ThresholdInputError, ThresholdStore};
use crate::views::View;

use super::Notice;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Classification of one channel in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatus {
    pub channel: Channel,
    pub value: SampleValue,
    pub range: ThresholdRange,
    pub classification: Classification,
}

/// Result of ingesting one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub taken_at: DateTime<Utc>,
    pub channels: Vec<ChannelStatus>,
}

impl Evaluation {
    pub fn out_of_range(&self) -> impl Iterator<Item = &ChannelStatus> {
        self.channels
            .iter()
            .filter(|status| status.classification.is_out_of_range())
    }

    pub fn status(&self, channel: &Channel) -> Option<&ChannelStatus> {
        self.channels.iter().find(|status| &status.channel == channel)
    }
}

pub struct DashboardSession {
    id: String,
    profile: Profile,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    thresholds: ThresholdStore,
    activity: ActivityLog,
    history: HistoryBuffer,
    suggestion: SuggestionSlot,
    view: View,
    latest: Option<Evaluation>,
    notices: Vec<Notice>,
    fetch_timeout: Duration,
}

impl DashboardSession {
    pub fn new(
        id: String,
        profile: Profile,
        history_capacity: Option<usize>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            id,
            profile,
            started_at: Utc::now(),
            ended_at: None,
            thresholds: ThresholdStore::new(profile),
            activity: ActivityLog::new(),
            history: HistoryBuffer::with_capacity(history_capacity),
            suggestion: SuggestionSlot::new(),
            view: View::default(),
            latest: None,
            notices: Vec::new(),
            fetch_timeout,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    // ---- thresholds ----

    /// Store a bound pair without any checks.
    pub fn set_threshold(&mut self, channel: Channel, min: f64, max: f64) {
        if min > max {
            log_debug!("session {}: inverted range {min}..{max} on {channel}", self.id);
        }
        self.thresholds.set(channel, min, max);
    }

    /// Validate raw form input and store it. Rejected input queues a
    /// warning and leaves the store unchanged.
    pub fn submit_threshold(
        &mut self,
        channel: &str,
        min: &str,
        max: &str,
    ) -> Result<ThresholdRange, ThresholdInputError> {
        match parse_threshold_input(self.profile, channel, min, max) {
            Ok((channel, min, max)) => {
                self.set_threshold(channel.clone(), min, max);
                Ok(self.thresholds.get(&channel))
            }
            Err(err) => {
                self.notices.push(Notice::warning(format!("Threshold not saved: {err}")));
                Err(err)
            }
        }
    }

    pub fn threshold(&self, channel: &Channel) -> ThresholdRange {
        self.thresholds.get(channel)
    }

    pub fn thresholds(&self) -> Vec<ThresholdRange> {
        self.thresholds.snapshot()
    }

    // ---- readings ----

    /// Classify every profile channel of `snapshot`, fold the results into
    /// the activity log and append the snapshot to history.
    ///
    /// The activity log is updated once per channel per call, so ingesting
    /// the same snapshot twice counts its exceedances twice.
    pub fn ingest(&mut self, snapshot: ReadingSnapshot) -> Evaluation {
        let now = snapshot.taken_at;
        let channels: Vec<ChannelStatus> = self
            .profile
            .channels()
            .into_iter()
            .map(|channel| {
                let reading = snapshot.reading(&channel);
                let range = self.thresholds.get(&channel);
                let classification = classify(reading.value, &range);
                self.activity
                    .record(&channel, reading.value, classification, reading.timestamp);
                ChannelStatus {
                    channel,
                    value: reading.value,
                    range,
                    classification,
                }
            })
            .collect();

        self.history.append(snapshot);

        let evaluation = Evaluation {
            taken_at: now,
            channels,
        };
        self.latest = Some(evaluation.clone());
        evaluation
    }

    /// Fetch one snapshot from `source` and ingest it.
    ///
    /// A failed or timed-out fetch queues exactly one warning and touches
    /// neither the activity log nor the history.
    pub async fn refresh<S: ReadingSource>(
        &mut self,
        source: &mut S,
    ) -> Result<Evaluation, FetchError> {
        let fetched = match tokio::time::timeout(self.fetch_timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout.as_millis() as u64)),
        };

        match fetched {
            Ok(snapshot) => Ok(self.ingest(snapshot)),
            Err(err) => {
                log_warn!("session {}: refresh from {} failed: {err}", self.id, source.describe());
                self.notices
                    .push(Notice::warning(format!("Could not read sensors: {err}")));
                Err(err)
            }
        }
    }

    pub fn latest(&self) -> Option<&Evaluation> {
        self.latest.as_ref()
    }

    pub fn activity(&self) -> BTreeMap<Channel, ActivityRecord> {
        self.activity.snapshot()
    }

    pub fn activity_record(&self, channel: &Channel) -> ActivityRecord {
        self.activity.get(channel)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Exceedances per channel recomputed from history against the
    /// thresholds as they are now.
    pub fn retrospective_counts(&self) -> Vec<(Channel, usize)> {
        self.thresholds
            .snapshot()
            .into_iter()
            .map(|range| {
                let count = self.history.count_out_of_range(&range.channel, &range);
                (range.channel, count)
            })
            .collect()
    }

    // ---- suggestion ----

    pub fn submit_suggestion(&mut self, text: &str) -> Result<(), SuggestionError> {
        match self.suggestion.write(text) {
            Ok(()) => {
                self.notices.push(Notice::info("Suggestion sent"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::warning(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.read()
    }

    // ---- navigation & notices ----

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Hand queued notices to the front-end and clear the queue.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ---- lifecycle ----

    pub fn end(&mut self, at: DateTime<Utc>) {
        if self.ended_at.is_none() {
            self.ended_at = Some(at);
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            profile: self.profile,
            status: if self.ended_at.is_some() {
                SessionStatus::Ended
            } else {
                SessionStatus::Active
            },
            started_at: self.started_at,
            ended_at: self.ended_at,
            snapshot_count: self.history.len(),
        }
    }
}
