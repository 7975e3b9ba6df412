use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::{CoreError, CoreResult};

const DEFAULT_DELIVERY_FEE: &str = "2.99";
const DEFAULT_TAX: &str = "3.50";
const DEFAULT_ADDRESS: &str = "123 Main Street, Apt 4B, New York, NY 10001";
const DEFAULT_TICK_SECS: i64 = 10;
const DEFAULT_INITIAL_STEP: i64 = 2;
const DEFAULT_FILTER: &str = "feast_app=debug,feast_order=debug,feast_core=info";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storefront: StorefrontConfig,
    pub tracking: TrackingConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontConfig {
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub delivery_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackingConfig {
    /// Seconds between simulated progress updates
    pub tick_interval_secs: u64,
    /// Step a freshly opened tracking view starts on
    pub initial_step: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub filter: String,
}

impl Config {
    /// Load from `config/` relative to the working directory, picking the
    /// environment file from `RUN_MODE`.
    pub fn load() -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    pub fn load_from(dir: &str, run_mode: &str) -> CoreResult<Self> {
        Self::load_layered(dir, run_mode, Some(env_source()))
    }

    /// Built-in defaults, then the files under `dir`, then `env` if given
    pub fn load_layered(
        dir: &str,
        run_mode: &str,
        env: Option<config::Environment>,
    ) -> CoreResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("storefront.delivery_fee", DEFAULT_DELIVERY_FEE)?
            .set_default("storefront.tax", DEFAULT_TAX)?
            .set_default("storefront.delivery_address", DEFAULT_ADDRESS)?
            .set_default("tracking.tick_interval_secs", DEFAULT_TICK_SECS)?
            .set_default("tracking.initial_step", DEFAULT_INITIAL_STEP)?
            .set_default("telemetry.filter", DEFAULT_FILTER)?
            // Shipped defaults; the built-in values above cover a missing file
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false));
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            run_mode,
            tick_interval_secs = config.tracking.tick_interval_secs,
            initial_step = config.tracking.initial_step,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tracking.tick_interval_secs == 0 {
            return Err(CoreError::Validation(
                "tracking.tick_interval_secs must be positive".to_string(),
            ));
        }

        if !(1..=4).contains(&self.tracking.initial_step) {
            return Err(CoreError::Validation(format!(
                "tracking.initial_step must be between 1 and 4, got {}",
                self.tracking.initial_step
            )));
        }

        if self.storefront.delivery_fee.is_sign_negative() || self.storefront.tax.is_sign_negative() {
            return Err(CoreError::Validation("fees must not be negative".to_string()));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tracking.tick_interval_secs)
    }
}

/// Eg. `FEAST__STOREFRONT__TAX=4.00`
fn env_source() -> config::Environment {
    config::Environment::with_prefix("FEAST").separator("__")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storefront: StorefrontConfig {
                delivery_fee: Decimal::new(299, 2),
                tax: Decimal::new(350, 2),
                delivery_address: DEFAULT_ADDRESS.to_string(),
            },
            tracking: TrackingConfig {
                tick_interval_secs: DEFAULT_TICK_SECS as u64,
                initial_step: DEFAULT_INITIAL_STEP as u8,
            },
            telemetry: TelemetryConfig {
                filter: DEFAULT_FILTER.to_string(),
            },
        }
    }
}
