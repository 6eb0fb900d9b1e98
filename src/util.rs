//! Helpers for running blocking work off the logic thread.

use std::time::Duration;

use tokio::task::spawn_blocking;
use tokio::time::timeout;

use crate::{Error, Result};

/// Run a blocking closure on tokio's blocking pool, bounded by `duration`.
///
/// A closure that never returns leaves its blocking thread behind, but the
/// caller gets `Error::Timeout` and moves on.
pub async fn blocking_with_timeout<F, T>(duration: Duration, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match timeout(duration, spawn_blocking(f)).await {
        Ok(Ok(inner)) => inner,
        Ok(Err(join_err)) => Err(Error::TaskJoin(join_err.to_string())),
        Err(_) => Err(Error::Timeout(duration)),
    }
}
