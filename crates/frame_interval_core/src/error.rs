use thiserror::Error;

/// Errors surfaced by [RepeatingFrameTimer](crate::RepeatingFrameTimer) and its hosts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The host can't provide a request/cancel frame pair.
    #[error("frame scheduling is not available in this environment")]
    UnsupportedEnvironment,
    /// The caller passed something the timer can't run with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `start` was called while the timer was running.
    #[error("timer is already running, call stop first")]
    AlreadyRunning,
    /// The host refused a frame request.
    #[error("frame request failed: {0}")]
    FrameRequest(String),
}
