use feast_catalog::DeliveryWindow;
use feast_core::Notifier;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::models::{DriverInfo, OrderSummary};
use crate::progress::{OrderProgress, Stage};
use crate::ticker::{ProgressTicker, TickerHandle};

/// An open order-tracking view.
///
/// Owns the progress simulator together with the ticker that drives it, so
/// the ticker can never outlive the state it feeds. Closing or dropping the
/// session cancels the ticker.
#[derive(Debug)]
pub struct TrackingSession {
    order: OrderSummary,
    driver: DriverInfo,
    progress: OrderProgress,
    ticks: mpsc::Receiver<u64>,
    ticker: TickerHandle,
}

impl TrackingSession {
    /// Must be called inside a tokio runtime
    pub fn open(
        order: OrderSummary,
        driver: DriverInfo,
        period: Duration,
        initial: Stage,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (ticker, ticks) = ProgressTicker::spawn(period);
        info!(reference = %order.reference, step = initial.id(), "Tracking opened");

        Self {
            order,
            driver,
            progress: OrderProgress::starting_at(initial, notifier),
            ticks,
            ticker,
        }
    }

    /// Wait for the next tick and apply it. Returns the step afterwards,
    /// or `None` once the ticker has stopped.
    pub async fn next_tick(&mut self) -> Option<u8> {
        self.ticks.recv().await?;
        self.progress.advance();
        Some(self.progress.current_step())
    }

    pub fn progress(&self) -> &OrderProgress {
        &self.progress
    }

    pub fn order(&self) -> &OrderSummary {
        &self.order
    }

    pub fn estimated_delivery(&self) -> DeliveryWindow {
        self.order.estimated_delivery
    }

    /// Driver details, only once the order is on the way
    pub fn driver(&self) -> Option<&DriverInfo> {
        self.progress.driver_visible().then_some(&self.driver)
    }

    pub fn can_rate(&self) -> bool {
        self.progress.rating_visible()
    }

    pub fn close(self) {
        info!(reference = %self.order.reference, step = self.progress.current_step(), "Tracking closed");
        self.ticker.cancel();
    }

    #[cfg(test)]
    fn ticker_task(&self) -> tokio::task::AbortHandle {
        self.ticker.abort_handle().expect("ticker task is running")
    }
}
