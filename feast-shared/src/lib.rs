pub mod models;
pub mod pii;

pub use models::events::{Notification, NotificationKind};
pub use models::ProductId;
pub use pii::Masked;
