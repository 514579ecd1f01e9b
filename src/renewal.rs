//! Scheduled token renewal.
//!
//! Bearer tokens expire, and long-running consumers want them refreshed
//! before that happens. Renewal is an operational concern kept apart from
//! the resolver and dispatch layers: a background task sleeps until a
//! deadline, runs a caller-supplied refresh future, and re-arms itself
//! with whatever deadline the refresh returns. The refresh typically
//! re-logs-in and hands the fresh token to
//! [`TdxClient::set_auth_token`](crate::client::TdxClient::set_auth_token).

use std::future::Future;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle to a scheduled renewal task.
///
/// Dropping the handle cancels the task, so keep it alive for as long as
/// renewal should keep firing.
#[derive(Debug)]
pub struct RenewalTask {
    handle: JoinHandle<()>,
}

impl RenewalTask {
    /// Cancels the renewal task.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns true if the task has stopped, either by returning `None`
    /// from its refresh or by being cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RenewalTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Schedules `refresh` to run at `deadline`.
///
/// After each firing the refresh returns the next deadline to re-arm
/// with, or `None` to stop.
///
/// # Example
///
/// ```ignore
/// let client = tdx.client().clone();
/// let task = schedule_renewal(Instant::now() + TOKEN_LIFETIME, move || {
///     let client = client.clone();
///     async move {
///         match login(&client).await {
///             Ok(token) => {
///                 client.set_auth_token(token).await;
///                 Some(Instant::now() + TOKEN_LIFETIME)
///             }
///             Err(_) => None,
///         }
///     }
/// });
/// ```
pub fn schedule_renewal<F, Fut>(deadline: Instant, mut refresh: F) -> RenewalTask
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Option<Instant>> + Send,
{
    let handle = tokio::spawn(async move {
        let mut next = deadline;
        loop {
            tokio::time::sleep_until(next).await;
            tracing::debug!("token renewal firing");
            match refresh().await {
                Some(deadline) => next = deadline,
                None => break,
            }
        }
    });
    RenewalTask { handle }
}
