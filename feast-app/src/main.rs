use feast_app::app;
use feast_catalog::{format_amount, MenuQuery, SortOrder};
use feast_core::{telemetry, Config, TracingNotifier};
use feast_order::PaymentMethod;
use feast_shared::ProductId;
use std::sync::Arc;
use tracing::{info, warn};

/// Walks one simulated session: fill a cart, check out, follow the order
/// until it is delivered (or Ctrl-C).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    telemetry::init(&config.telemetry.filter);
    info!(
        delivery_fee = %config.storefront.delivery_fee,
        tax = %config.storefront.tax,
        "Starting Feast storefront"
    );

    let mut store = app(config, Arc::new(TracingNotifier));

    let fastest = store.browse(&MenuQuery::default().sort(SortOrder::FastestDelivery));
    if let Some(item) = fastest.first() {
        info!(name = %item.name, eta = %item.delivery, "Fastest dish on the menu");
    }

    for id in [1, 1, 3, 5] {
        store.add_to_cart(ProductId(id))?;
    }

    let breakdown = store.breakdown();
    info!(
        badge = store.badge_count(),
        subtotal = %format_amount(breakdown.subtotal),
        delivery_fee = %format_amount(breakdown.delivery_fee),
        tax = %format_amount(breakdown.tax),
        total = %format_amount(breakdown.total),
        "Cart ready"
    );

    let order = store.checkout(PaymentMethod::Card)?;
    println!("{}", serde_json::to_string_pretty(&order)?);

    let mut tracking = store.open_tracking(order)?;
    loop {
        tokio::select! {
            step = tracking.next_tick() => {
                let Some(step) = step else { break };
                info!(step, stage = %tracking.progress().current_stage(), "Tracking update");

                if let Some(driver) = tracking.driver() {
                    info!(driver = %driver.name, initials = %driver.initials(), phone = %driver.phone, vehicle = %driver.vehicle, "Driver assigned");
                }
                if tracking.can_rate() {
                    info!("Delivered, rating open");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, closing tracking");
                break;
            }
        }
    }
    tracking.close();

    Ok(())
}
