//! Timeout and cancellation around a single network call

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use unblocker_client::ClientError;

use crate::error::PollError;

/// Runs one API call under a deadline, aborting it if `cancel` fires first
///
/// Client errors and deadline expiry are turned into a [`PollError`] by
/// `classify`, which receives the HTTP status (if any) and a message.
pub(crate) async fn guarded_call<T, F>(
    cancel: &CancellationToken,
    timeout: Duration,
    call: F,
    classify: fn(Option<u16>, String) -> PollError,
) -> Result<T, PollError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PollError::Cancelled),
        result = tokio::time::timeout(timeout, call) => match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify(e.status(), e.to_string())),
            Err(_) => Err(classify(
                None,
                format!("{} after {:?}", ClientError::Timeout, timeout),
            )),
        },
    }
}

/// Sleeps for `delay` unless `cancel` fires first
pub(crate) async fn cancellable_sleep(
    cancel: &CancellationToken,
    delay: Duration,
) -> Result<(), PollError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PollError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}
