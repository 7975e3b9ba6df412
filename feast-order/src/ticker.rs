use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Periodic trigger for simulated order progress.
///
/// Ticks are delivered over a channel so the owner of the progress state
/// applies them itself; the ticker never touches that state.
pub struct ProgressTicker;

impl ProgressTicker {
    /// Start ticking every `period`, first tick one full period from now.
    /// Must be called inside a tokio runtime.
    pub fn spawn(period: Duration) -> (TickerHandle, mpsc::Receiver<u64>) {
        let period = period.max(MIN_PERIOD);
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut seq: u64 = 0;
            loop {
                interval.tick().await;
                seq += 1;
                if tx.send(seq).await.is_err() {
                    debug!(seq, "Tick receiver dropped, ticker exiting");
                    break;
                }
            }
        });

        debug!(?period, "Progress ticker started");
        (TickerHandle { task: Some(task) }, rx)
    }
}

/// Cancellation handle for a running ticker. Dropping it cancels too.
#[derive(Debug)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    pub fn cancel(mut self) {
        self.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    #[cfg(test)]
    pub(crate) fn abort_handle(&self) -> Option<AbortHandle> {
        self.task.as_ref().map(JoinHandle::abort_handle)
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Progress ticker cancelled");
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
