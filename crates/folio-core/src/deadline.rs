use std::future::Future;
use std::time::Duration;

use log::debug;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a deadline-bound operation stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    #[error("{operation} timed out after {timeout:?}")]
    TimedOut {
        operation: &'static str,
        timeout: Duration,
    },
    #[error("{operation} cancelled")]
    Cancelled { operation: &'static str },
}

/// Drive `future` until it finishes, `timeout` elapses, or `cancel` fires.
///
/// On timeout or cancellation the future is dropped, which aborts whatever it
/// was awaiting, and the interruption is converted into the caller's error.
///
/// # Errors
/// Returns the future's own error, or the converted [`Interrupted`] reason.
pub async fn run_with_deadline<T, E, F>(
    operation: &'static str,
    timeout: Duration,
    cancel: &CancellationToken,
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<Interrupted>,
{
    tokio::select! {
        biased;

        () = cancel.cancelled() => {
            debug!("{operation} cancelled by caller");
            Err(Interrupted::Cancelled { operation }.into())
        }
        outcome = tokio::time::timeout(timeout, future) => match outcome {
            Ok(result) => result,
            Err(_) => {
                debug!("{operation} exceeded its {timeout:?} deadline");
                Err(Interrupted::TimedOut { operation, timeout }.into())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::{Interrupted, run_with_deadline};
    use crate::UpdateError;

    #[tokio::test]
    async fn returns_inner_success_value() {
        let cancel = CancellationToken::new();
        let result = run_with_deadline("fetch", Duration::from_secs(1), &cancel, async {
            Ok::<_, Interrupted>(42)
        })
        .await
        .expect("success result should pass through");

        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn returns_inner_error_unchanged() {
        let cancel = CancellationToken::new();
        let result = run_with_deadline("fetch", Duration::from_secs(1), &cancel, async {
            Err::<(), _>(UpdateError::EmptyResponse)
        })
        .await;

        assert_eq!(result, Err(UpdateError::EmptyResponse));
    }

    #[tokio::test]
    async fn reports_timeout_when_future_is_too_slow() {
        let cancel = CancellationToken::new();
        let result = run_with_deadline("fetch", Duration::from_millis(5), &cancel, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Interrupted>(())
        })
        .await;

        assert_eq!(
            result,
            Err(Interrupted::TimedOut {
                operation: "fetch",
                timeout: Duration::from_millis(5),
            })
        );
    }

    #[test]
    fn timeout_message_keeps_sub_second_precision() {
        let short = Interrupted::TimedOut {
            operation: "fetch",
            timeout: Duration::from_millis(100),
        };
        assert_eq!(short.to_string(), "fetch timed out after 100ms");

        let whole = Interrupted::TimedOut {
            operation: "fetch",
            timeout: Duration::from_secs(10),
        };
        assert_eq!(whole.to_string(), "fetch timed out after 10s");
    }

    #[tokio::test]
    async fn already_cancelled_token_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_with_deadline("fetch", Duration::from_secs(5), &cancel, async {
            Ok::<_, Interrupted>(1)
        })
        .await;

        assert_eq!(result, Err(Interrupted::Cancelled { operation: "fetch" }));
    }

    #[tokio::test]
    async fn cancellation_mid_flight_drops_the_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = run_with_deadline("fetch", Duration::from_secs(5), &cancel, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, UpdateError>(())
        })
        .await;

        assert_eq!(result, Err(UpdateError::Cancelled));
    }
}
