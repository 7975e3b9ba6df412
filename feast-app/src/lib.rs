pub mod error;
pub mod state;

pub use error::AppError;
pub use state::Storefront;

use feast_core::{Config, Notifier};
use std::sync::Arc;

/// Build an empty storefront session from loaded configuration
pub fn app(config: Config, notifier: Arc<dyn Notifier>) -> Storefront {
    Storefront::new(config, notifier)
}
