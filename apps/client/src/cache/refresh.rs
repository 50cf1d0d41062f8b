//! Background auto-refresh for the few keys that poll while mounted.
//!
//! `admin-system-stats` refreshes every 60s; `admin-analytics-trends` and
//! the employer `dashboard-stats` every 300s. A consumer holds a
//! [`RefreshHandle`] for as long as its view is mounted; dropping the handle
//! aborts the task, so nothing polls for unmounted views.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{QueryCache, QueryKey};
use crate::errors::ClientError;

pub const SYSTEM_STATS_INTERVAL: Duration = Duration::from_secs(60);
pub const ANALYTICS_INTERVAL: Duration = Duration::from_secs(300);
pub const DASHBOARD_STATS_INTERVAL: Duration = Duration::from_secs(300);

/// Owner of one polling task. Dropping it cancels the timer.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a task that, every `interval`, marks `key` stale and refetches it.
/// Refresh failures are logged and retried on the next tick; they never
/// bubble into the consuming view.
pub fn spawn<F, Fut>(
    cache: Arc<QueryCache>,
    key: QueryKey,
    interval: Duration,
    fetcher: F,
) -> RefreshHandle
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ClientError>> + Send,
{
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately; the mount fetch already
        // covered that observation
        ticker.tick().await;
        loop {
            ticker.tick().await;
            cache.invalidate(std::slice::from_ref(&key));
            if let Err(err) = cache.fetch(&key, &fetcher).await {
                debug!("Auto-refresh of {key} failed: {err}");
            }
        }
    });
    RefreshHandle { task }
}
