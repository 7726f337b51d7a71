use std::time::Duration;

use thiserror::Error;

use crate::deadline::Interrupted;

/// Failure of an update check.
///
/// Carries messages only so results can be cloned and compared by callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("failed to fetch release index")]
    EmptyResponse,

    #[error("failed to fetch release index: {0}")]
    FetchFailed(String),

    #[error("already up to date")]
    UpToDate,

    #[error("update check timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("update check cancelled")]
    Cancelled,
}

impl UpdateError {
    pub fn fetch_failed(details: impl Into<String>) -> Self {
        Self::FetchFailed(details.into())
    }

    pub fn fetch_failed_from<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::fetch_failed(error.to_string())
    }

    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Self::UpToDate)
    }

    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::EmptyResponse | Self::FetchFailed(_))
    }
}

impl From<Interrupted> for UpdateError {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::TimedOut { timeout, .. } => Self::Timeout { timeout },
            Interrupted::Cancelled { .. } => Self::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::UpdateError;
    use crate::deadline::Interrupted;

    #[test]
    fn fetch_failures_share_a_prefix() {
        assert_eq!(
            UpdateError::EmptyResponse.to_string(),
            "failed to fetch release index"
        );
        assert_eq!(
            UpdateError::fetch_failed("expected value at line 1 column 1").to_string(),
            "failed to fetch release index: expected value at line 1 column 1"
        );
        assert!(UpdateError::EmptyResponse.is_fetch_failure());
        assert!(UpdateError::fetch_failed("x").is_fetch_failure());
        assert!(!UpdateError::UpToDate.is_fetch_failure());
    }

    #[test]
    fn up_to_date_is_distinguishable() {
        assert!(UpdateError::UpToDate.is_up_to_date());
        assert!(!UpdateError::Cancelled.is_up_to_date());
        assert_eq!(UpdateError::UpToDate.to_string(), "already up to date");
    }

    #[test]
    fn interruptions_map_to_timeout_and_cancel() {
        let timed_out = UpdateError::from(Interrupted::TimedOut {
            operation: "update check",
            timeout: Duration::from_secs(10),
        });
        assert_eq!(
            timed_out,
            UpdateError::Timeout {
                timeout: Duration::from_secs(10)
            }
        );
        assert_eq!(timed_out.to_string(), "update check timed out after 10s");

        let short = UpdateError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(short.to_string(), "update check timed out after 250ms");

        let cancelled = UpdateError::from(Interrupted::Cancelled {
            operation: "update check",
        });
        assert_eq!(cancelled, UpdateError::Cancelled);
    }
}
