use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProductId;

/// What changed, for consumers that want more than the message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    ItemAdded { product_id: ProductId, quantity: u32 },
    QuantityUpdated { product_id: ProductId, quantity: u32 },
    ItemRemoved { product_id: ProductId },
    StageReached { step: u8 },
}

/// A transient, human-readable message surfaced by the presentation layer
/// after a state change. Never persisted or parsed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: i64,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn item_added(product_id: ProductId, quantity: u32) -> Self {
        Self::new(NotificationKind::ItemAdded { product_id, quantity }, "Added to cart!")
    }

    pub fn quantity_updated(product_id: ProductId, quantity: u32) -> Self {
        Self::new(
            NotificationKind::QuantityUpdated { product_id, quantity },
            "Quantity updated",
        )
    }

    pub fn item_removed(product_id: ProductId) -> Self {
        Self::new(NotificationKind::ItemRemoved { product_id }, "Item removed from cart")
    }

    pub fn stage_reached(step: u8, title: &str) -> Self {
        Self::new(NotificationKind::StageReached { step }, title)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
