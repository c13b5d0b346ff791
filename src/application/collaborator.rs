//! Optional deadline around calls to AI collaborators.

use std::future::Future;
use std::time::Duration;

use crate::ports::AIError;

/// Awaits `call`, giving up after `limit` when one is set.
///
/// Running out of time is reported as `AIError::Timeout` so callers can
/// treat it like any other collaborator failure.
pub async fn with_timeout<T, F>(limit: Option<Duration>, call: F) -> Result<T, AIError>
where
    F: Future<Output = Result<T, AIError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(AIError::timeout(limit.as_secs().min(u32::MAX as u64) as u32))),
        None => call.await,
    }
}
