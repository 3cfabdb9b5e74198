//! Plain-text rendering of the view data.

use std::fmt::Write;

use crate::models::Classification;
use crate::session::{DashboardSession, Evaluation, Notice, NoticeLevel};
use crate::views::{self, TrendSeries, View};

pub fn page(session: &DashboardSession) -> String {
    let view = session.view();
    let mut out = format!("== {} ==\n", view.title());
    match view {
        View::Settings => {
            let page = views::settings_page(session);
            let _ = writeln!(out, "bounds accept 0..={}", page.adc_max);
            for range in page.ranges {
                let name = range.channel.as_str();
                let _ = writeln!(out, "  {:<24} {:>6} .. {:<6}", name, range.min, range.max);
            }
        }
        View::User | View::UserDashboard => {
            let page = views::user_page(session);
            if let Some(live) = &page.live {
                out.push_str(&self::live(live));
            }
            if view == View::UserDashboard {
                out.push_str("activity:\n");
                for row in &page.summary {
                    let _ = writeln!(
                        out,
                        "  {:<24} exceeded {:>4}x  last {}  at {}",
                        row.channel.as_str(),
                        row.activity.exceed_count,
                        row.activity.last_reading,
                        row.activity
                            .last_exceed_time
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| "-".into())
                    );
                }
            }
            let _ = writeln!(
                out,
                "doctor's suggestion: {}",
                page.suggestion.as_deref().unwrap_or("(none yet)")
            );
        }
        View::Doctor | View::DoctorDashboard => {
            let page = views::doctor_page(session);
            let _ = writeln!(out, "{} snapshots recorded", page.snapshot_count);
            for row in &page.rows {
                let _ = writeln!(
                    out,
                    "  {:<24} range {}..{}  live count {:>4}  history count {:>4}",
                    row.summary.channel.as_str(),
                    row.summary.range.min,
                    row.summary.range.max,
                    row.summary.activity.exceed_count,
                    row.retrospective_count
                );
            }
            let _ = writeln!(
                out,
                "current suggestion: {}",
                page.suggestion.as_deref().unwrap_or("(none)")
            );
        }
    }
    out
}

pub fn live(evaluation: &Evaluation) -> String {
    let mut out = format!("readings at {}\n", evaluation.taken_at.to_rfc3339());
    for status in &evaluation.channels {
        let marker = match status.classification {
            Classification::InRange => "ok ",
            Classification::OutOfRange => "OUT",
        };
        let _ = writeln!(
            out,
            "  [{marker}] {:<24} {}",
            status.channel.as_str(),
            status.value
        );
    }
    out
}

pub fn trend(series: &TrendSeries) -> String {
    let mut out = format!(
        "{} (range {}..{})\n",
        series.channel, series.range.min, series.range.max
    );
    for (at, value) in &series.points {
        let value = value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".into());
        let _ = writeln!(out, "  {}  {}", at.format("%H:%M:%S"), value);
    }
    out
}

pub fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| match notice.level {
            NoticeLevel::Info => format!("note: {}\n", notice.message),
            NoticeLevel::Warning => format!("warning: {}\n", notice.message),
        })
        .collect()
}
