use thiserror::Error;

/// Why a snapshot could not be obtained. Every variant is recoverable: the
/// refresh is dropped and session state stays as it was.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("device did not answer within {0} ms")]
    Timeout(u64),

    #[error("device unreachable: {0}")]
    Unreachable(String),

    #[error("device returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("device sent malformed data: {0}")]
    Malformed(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_ms)
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}

/// Failure to hand the current thresholds to the device.
#[derive(Debug, Error)]
pub enum PushError {
    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error("device rejected thresholds (status '{0}')")]
    Rejected(String),
}
