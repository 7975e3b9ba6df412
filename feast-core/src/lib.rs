pub mod app_config;
pub mod notify;
pub mod telemetry;

pub use app_config::Config;
pub use notify::{BroadcastNotifier, Notifier, TracingNotifier};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
