//! End-to-end behaviour of a dashboard session: classification, the
//! incremental activity counters and the history-based recount.

use std::time::Duration;

use chrono::{DateTime, Utc};

use posturewatch_lib::models::{Channel, Classification, Profile, ReadingSnapshot, SampleValue};
use posturewatch_lib::sensing::{FetchError, ReadingSource};
use posturewatch_lib::session::{DashboardSession, NoticeLevel};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

fn session() -> DashboardSession {
    DashboardSession::new(
        "scenario".into(),
        Profile::Prototype,
        None,
        Duration::from_millis(200),
    )
}

fn flex(secs: i64, value: f64) -> ReadingSnapshot {
    ReadingSnapshot::new(at(secs)).with_value("Flex Sensor 1", SampleValue::Known(value))
}

fn flex_channel() -> Channel {
    Channel::from("Flex Sensor 1")
}

// ---------------------------------------------------------------------------
// Single readings
// ---------------------------------------------------------------------------

#[test]
fn in_range_reading_updates_only_last_reading() {
    let mut session = session();
    let evaluation = session.ingest(flex(0, 150.0));

    let status = evaluation.status(&flex_channel()).unwrap();
    assert_eq!(status.classification, Classification::InRange);

    let record = session.activity_record(&flex_channel());
    assert_eq!(record.exceed_count, 0);
    assert_eq!(record.last_exceed_time, None);
    assert_eq!(record.last_reading, SampleValue::Known(150.0));
}

#[test]
fn out_of_range_reading_counts_once_and_stamps_time() {
    let mut session = session();
    let evaluation = session.ingest(flex(7, 300.0));

    let status = evaluation.status(&flex_channel()).unwrap();
    assert_eq!(status.classification, Classification::OutOfRange);

    let record = session.activity_record(&flex_channel());
    assert_eq!(record.exceed_count, 1);
    assert_eq!(record.last_exceed_time, Some(at(7)));
    assert_eq!(record.last_reading, SampleValue::Known(300.0));
}

#[test]
fn absent_channel_is_out_of_range_whatever_the_bounds() {
    let mut session = session();
    let mpu = Channel::from("MPU 1");
    session.set_threshold(mpu.clone(), 0.0, 1024.0);

    let evaluation = session.ingest(flex(0, 150.0));
    let status = evaluation.status(&mpu).unwrap();
    assert_eq!(status.value, SampleValue::Unknown);
    assert_eq!(status.classification, Classification::OutOfRange);
    assert_eq!(session.activity_record(&mpu).last_reading, SampleValue::Unknown);
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[test]
fn interleaved_sequence_keeps_last_exceedance_time() {
    let mut session = session();
    let values = [300.0, 100.0, 400.0, 120.0, 500.0];
    for (i, value) in values.into_iter().enumerate() {
        session.ingest(flex(i as i64 * 10, value));
    }

    let record = session.activity_record(&flex_channel());
    assert_eq!(record.exceed_count, 3);
    assert_eq!(record.last_exceed_time, Some(at(40)));
    assert_eq!(record.last_reading, SampleValue::Known(500.0));
}

#[test]
fn exceed_count_is_monotonic_across_threshold_changes() {
    let mut session = session();
    let mut previous = 0;
    for i in 0..30 {
        if i % 7 == 0 {
            session.set_threshold(flex_channel(), 0.0, (i * 20) as f64);
        }
        session.ingest(flex(i, (i * 13 % 400) as f64));
        let current = session.activity_record(&flex_channel()).exceed_count;
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn incremental_and_retrospective_counts_diverge_after_threshold_change() {
    let mut session = session();
    let channel = flex_channel();

    // Default 0..=256: 300 and 400 are exceedances at ingest time.
    for (i, value) in [300.0, 150.0, 400.0].into_iter().enumerate() {
        session.ingest(flex(i as i64, value));
    }
    session.set_threshold(channel.clone(), 0.0, 350.0);
    session.ingest(flex(3, 200.0));

    let incremental = session.activity_record(&channel).exceed_count;
    let new_range = session.threshold(&channel);
    let retrospective = session.history().count_out_of_range(&channel, &new_range);

    assert_eq!(incremental, 2);
    assert_eq!(retrospective, 1);

    let counts = session.retrospective_counts();
    let (_, from_session) = counts.iter().find(|(c, _)| c == &channel).unwrap();
    assert_eq!(*from_session, 1);
}

#[test]
fn inverted_range_flags_every_reading() {
    let mut session = session();
    session.set_threshold(flex_channel(), 200.0, 100.0);
    for (i, value) in [50.0, 150.0, 250.0].into_iter().enumerate() {
        session.ingest(flex(i as i64, value));
    }
    assert_eq!(session.activity_record(&flex_channel()).exceed_count, 3);
}

#[test]
fn bounded_history_keeps_newest_but_counters_keep_everything() {
    let mut session = DashboardSession::new(
        "bounded".into(),
        Profile::Prototype,
        Some(2),
        Duration::from_secs(2),
    );
    for i in 0..5 {
        session.ingest(flex(i, 300.0));
    }
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().evicted(), 3);
    assert_eq!(session.activity_record(&flex_channel()).exceed_count, 5);
}

// ---------------------------------------------------------------------------
// Fetch failures
// ---------------------------------------------------------------------------

struct FailingSource;

impl ReadingSource for FailingSource {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError> {
        Err(FetchError::Timeout(2_000))
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

struct StalledSource;

impl ReadingSource for StalledSource {
    async fn fetch(&mut self) -> Result<ReadingSnapshot, FetchError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ReadingSnapshot::new(Utc::now()))
    }

    fn describe(&self) -> String {
        "stalled".into()
    }
}

#[tokio::test]
async fn failed_fetch_leaves_state_and_raises_one_warning() {
    let mut session = session();
    session.ingest(flex(0, 300.0));
    session.take_notices();

    let result = session.refresh(&mut FailingSource).await;

    assert!(matches!(result, Err(FetchError::Timeout(_))));
    assert_eq!(session.history().all().len(), 1);
    assert_eq!(session.activity_record(&flex_channel()).exceed_count, 1);

    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
}

#[tokio::test]
async fn stalled_fetch_is_cut_off_by_session_timeout() {
    let mut session = session();

    let result = session.refresh(&mut StalledSource).await;

    assert!(matches!(result, Err(FetchError::Timeout(200))));
    assert!(session.history().is_empty());
    assert_eq!(session.take_notices().len(), 1);
}
