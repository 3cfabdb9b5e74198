//! Page selection and the read-only data each page consumes.
//!
//! The front-end owns rendering; this module decides which page is current
//! and assembles what that page shows from a [`DashboardSession`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ActivityRecord, Channel, ThresholdRange};
use crate::session::{DashboardSession, Evaluation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Doctor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Settings,
    User,
    Doctor,
    UserDashboard,
    DoctorDashboard,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Settings,
        View::User,
        View::Doctor,
        View::UserDashboard,
        View::DoctorDashboard,
    ];

    pub fn role(&self) -> Role {
        match self {
            View::Settings | View::User | View::UserDashboard => Role::User,
            View::Doctor | View::DoctorDashboard => Role::Doctor,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Settings => "Settings",
            View::User => "User",
            View::Doctor => "Doctor",
            View::UserDashboard => "User Dashboard",
            View::DoctorDashboard => "Doctor's Dashboard",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            View::Settings => "settings",
            View::User => "user",
            View::Doctor => "doctor",
            View::UserDashboard => "user-dashboard",
            View::DoctorDashboard => "doctor-dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        let aliases = [("home", View::Doctor)];
        View::ALL
            .into_iter()
            .find(|view| view.slug() == wanted)
            .or_else(|| {
                aliases
                    .into_iter()
                    .find(|(alias, _)| *alias == wanted)
                    .map(|(_, view)| view)
            })
            .ok_or_else(|| format!("unknown view '{value}'"))
    }
}

/// Threshold form contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPage {
    pub adc_max: u32,
    pub ranges: Vec<ThresholdRange>,
}

/// One row of a summary table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel: Channel,
    pub range: ThresholdRange,
    pub activity: ActivityRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub live: Option<Evaluation>,
    pub summary: Vec<ChannelSummary>,
    pub suggestion: Option<String>,
}

/// Doctor row: the incremental count next to the one recomputed from
/// history under the current range. The two may legitimately differ.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRow {
    pub summary: ChannelSummary,
    pub retrospective_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPage {
    pub rows: Vec<DoctorRow>,
    pub snapshot_count: usize,
    pub suggestion: Option<String>,
}

/// Chart data for one channel; `None` marks an unknown sample.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub channel: Channel,
    pub range: ThresholdRange,
    pub points: Vec<(DateTime<Utc>, Option<f64>)>,
}

pub fn settings_page(session: &DashboardSession) -> SettingsPage {
    SettingsPage {
        adc_max: session.profile().adc_max(),
        ranges: session.thresholds(),
    }
}

fn summaries(session: &DashboardSession) -> Vec<ChannelSummary> {
    session
        .thresholds()
        .into_iter()
        .map(|range| ChannelSummary {
            activity: session.activity_record(&range.channel),
            channel: range.channel.clone(),
            range,
        })
        .collect()
}

pub fn user_page(session: &DashboardSession) -> UserPage {
    UserPage {
        live: session.latest().cloned(),
        summary: summaries(session),
        suggestion: session.suggestion().map(str::to_string),
    }
}

pub fn doctor_page(session: &DashboardSession) -> DoctorPage {
    let rows = summaries(session)
        .into_iter()
        .map(|summary| {
            let retrospective_count = session
                .history()
                .count_out_of_range(&summary.channel, &summary.range);
            DoctorRow {
                summary,
                retrospective_count,
            }
        })
        .collect();

    DoctorPage {
        rows,
        snapshot_count: session.history().len(),
        suggestion: session.suggestion().map(str::to_string),
    }
}

pub fn trend(session: &DashboardSession, channel: &Channel) -> TrendSeries {
    TrendSeries {
        channel: channel.clone(),
        range: session.threshold(channel),
        points: session.history().series(channel),
    }
}
