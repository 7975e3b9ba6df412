use feast_core::{Notifier, TracingNotifier};
use feast_shared::Notification;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Delivery lifecycle. Only ever moves forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Confirmed = 1,
    Preparing = 2,
    OnTheWay = 3,
    Delivered = 4,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Confirmed, Stage::Preparing, Stage::OnTheWay, Stage::Delivered];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn next(self) -> Option<Stage> {
        Stage::from_id(self.id() + 1)
    }

    pub fn descriptor(self) -> &'static StageDescriptor {
        &STAGES[usize::from(self.id() - 1)]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().title)
    }
}

/// Static copy shown for each stage of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub stage: Stage,
    pub title: &'static str,
    pub description: &'static str,
}

pub static STAGES: [StageDescriptor; 4] = [
    StageDescriptor {
        stage: Stage::Confirmed,
        title: "Order Confirmed",
        description: "Your order has been received and confirmed",
    },
    StageDescriptor {
        stage: Stage::Preparing,
        title: "Preparing",
        description: "Your food is being prepared by the restaurant",
    },
    StageDescriptor {
        stage: Stage::OnTheWay,
        title: "On the Way",
        description: "Your order is being delivered",
    },
    StageDescriptor {
        stage: Stage::Delivered,
        title: "Delivered",
        description: "Your order has been delivered",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Active,
    Pending,
}

/// Simulated progress of one order.
///
/// Status of every stage, driver disclosure and rating visibility are all
/// derived from `current` on demand.
pub struct OrderProgress {
    current: Stage,
    notifier: Arc<dyn Notifier>,
}

impl OrderProgress {
    /// Starts at `Preparing`: the order is already confirmed when tracking opens
    pub fn new() -> Self {
        Self::starting_at(Stage::Preparing, Arc::new(TracingNotifier))
    }

    pub fn starting_at(stage: Stage, notifier: Arc<dyn Notifier>) -> Self {
        Self { current: stage, notifier }
    }

    pub fn current_step(&self) -> u8 {
        self.current.id()
    }

    pub fn current_stage(&self) -> Stage {
        self.current
    }

    pub fn stages(&self) -> &'static [StageDescriptor] {
        &STAGES
    }

    /// Stages before the current one are `Completed`, the current one is
    /// `Active`. `Delivered` therefore stays `Active` once reached; use
    /// `is_delivered` to detect the terminal state.
    pub fn stage_status(&self, stage: Stage) -> StageStatus {
        match stage.cmp(&self.current) {
            std::cmp::Ordering::Less => StageStatus::Completed,
            std::cmp::Ordering::Equal => StageStatus::Active,
            std::cmp::Ordering::Greater => StageStatus::Pending,
        }
    }

    /// Move one stage forward. Saturates at `Delivered`; returns whether
    /// the stage changed.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.current.next() else {
            return false;
        };

        self.current = next;
        info!(step = next.id(), stage = %next, "Order progressed");
        self.notifier.notify(Notification::stage_reached(next.id(), next.descriptor().title));
        true
    }

    pub fn is_delivered(&self) -> bool {
        self.current == Stage::Delivered
    }

    /// Driver details are disclosed once the order leaves the restaurant
    pub fn driver_visible(&self) -> bool {
        self.current >= Stage::OnTheWay
    }

    pub fn rating_visible(&self) -> bool {
        self.current >= Stage::Delivered
    }
}

impl Default for OrderProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderProgress").field("current", &self.current).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feast_core::BroadcastNotifier;
    use feast_shared::NotificationKind;

    #[test]
    fn test_starts_preparing() {
        let progress = OrderProgress::new();

        assert_eq!(progress.current_step(), 2);
        assert_eq!(progress.stage_status(Stage::Confirmed), StageStatus::Completed);
        assert_eq!(progress.stage_status(Stage::Preparing), StageStatus::Active);
        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Pending);
        assert!(!progress.driver_visible());
        assert!(!progress.rating_visible());
    }

    #[test]
    fn test_advance_saturates_at_delivered() {
        let mut progress = OrderProgress::starting_at(Stage::Confirmed, Arc::new(TracingNotifier));
        let mut last = progress.current_step();

        for _ in 0..10 {
            progress.advance();
            assert!(progress.current_step() >= last);
            assert!(progress.current_step() <= 4);
            last = progress.current_step();
        }

        assert_eq!(progress.current_step(), 4);
        assert!(!progress.advance());
    }

    #[test]
    fn test_on_the_way_status_transitions() {
        let mut progress = OrderProgress::starting_at(Stage::Confirmed, Arc::new(TracingNotifier));

        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Pending);
        progress.advance();
        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Pending);
        progress.advance();
        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Active);
        progress.advance();
        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Completed);
    }

    #[test]
    fn test_two_advances_reach_delivery() {
        let notifier = Arc::new(BroadcastNotifier::new(8));
        let mut rx = notifier.subscribe();
        let mut progress = OrderProgress::starting_at(Stage::Preparing, notifier);

        progress.advance();
        assert!(progress.driver_visible());
        assert!(!progress.rating_visible());

        progress.advance();
        assert_eq!(progress.current_step(), 4);
        assert!(progress.is_delivered());
        assert!(progress.driver_visible());
        assert!(progress.rating_visible());

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::StageReached { step: 3 });
        assert_eq!(first.message, "On the Way");
        assert_eq!(rx.try_recv().unwrap().message, "Delivered");

        // Saturated advance stays quiet
        progress.advance();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stage_catalog() {
        let progress = OrderProgress::new();
        let titles: Vec<_> = progress.stages().iter().map(|s| s.title).collect();

        assert_eq!(titles, vec!["Order Confirmed", "Preparing", "On the Way", "Delivered"]);
        assert_eq!(Stage::from_id(3), Some(Stage::OnTheWay));
        assert_eq!(Stage::from_id(5), None);
        assert_eq!(Stage::Delivered.next(), None);
    }

    #[test]
    fn test_delivered_stays_active_when_reached() {
        let progress = OrderProgress::starting_at(Stage::Delivered, Arc::new(TracingNotifier));

        assert_eq!(progress.stage_status(Stage::OnTheWay), StageStatus::Completed);
        assert_eq!(progress.stage_status(Stage::Delivered), StageStatus::Active);
        assert!(progress.is_delivered());
    }
}
