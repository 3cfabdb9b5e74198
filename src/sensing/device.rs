//! HTTP client for the wearable's embedded web server.
//!
//! `GET /api/data` returns the latest sensor values; `POST /api/data`
//! uploads the current thresholds so the device can drive its own
//! haptic feedback.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use crate::models::{Profile, ReadingSnapshot, ThresholdRange};

use super::payload::{parse_snapshot, thresholds_body, PushAck};
use super::{FetchError, PushError};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

const DATA_PATH: &str = "/api/data";

pub struct DeviceClient {
    client: reqwest::Client,
    base_url: String,
    profile: Profile,
    timeout: Duration,
}

impl DeviceClient {
    /// * `base_url` - device root, e.g. `http://192.168.4.1`.
    pub fn new(base_url: &str, profile: Profile, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Unreachable(format!("HTTP client setup failed: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            profile,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn data_url(&self) -> String {
        format!("{}{}", self.base_url, DATA_PATH)
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    pub async fn fetch_snapshot(&self) -> Result<ReadingSnapshot, FetchError> {
        let response = self
            .client
            .get(self.data_url())
            .send()
            .await
            .map_err(|err| FetchError::from_reqwest(err, self.timeout_ms()))?;

        let body = self.read_json(response).await?;
        let snapshot = parse_snapshot(self.profile, &body, Utc::now())?;
        log_debug!("fetched {} channels from {}", snapshot.len(), self.base_url);
        Ok(snapshot)
    }

    pub async fn push_thresholds(&self, ranges: &[ThresholdRange]) -> Result<(), PushError> {
        let response = self
            .client
            .post(self.data_url())
            .json(&thresholds_body(ranges))
            .send()
            .await
            .map_err(|err| FetchError::from_reqwest(err, self.timeout_ms()))?;

        let body = self.read_json(response).await?;
        let ack: PushAck = serde_json::from_value(body)
            .map_err(|err| FetchError::Malformed(format!("acknowledgement: {err}")))?;

        if ack.is_success() {
            Ok(())
        } else {
            log_warn!("device at {} rejected thresholds: {}", self.base_url, ack.status);
            Err(PushError::Rejected(ack.status))
        }
    }

    /// Check the status code and decode the body as JSON.
    async fn read_json(&self, response: reqwest::Response) -> Result<Value, FetchError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| FetchError::from_reqwest(err, self.timeout_ms()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| FetchError::Malformed(err.to_string()))
    }
}
