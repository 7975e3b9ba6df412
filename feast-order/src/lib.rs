pub mod models;
pub mod cart;
pub mod progress;
pub mod ticker;
pub mod tracking;
pub mod checkout;

pub use models::{CartLine, DriverInfo, OrderLine, OrderSummary, PaymentMethod};
pub use cart::CartLedger;
pub use progress::{OrderProgress, Stage, StageDescriptor, StageStatus};
pub use ticker::{ProgressTicker, TickerHandle};
pub use tracking::TrackingSession;
pub use checkout::{checkout, CheckoutError};
