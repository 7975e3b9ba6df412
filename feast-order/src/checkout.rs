use chrono::{Datelike, Utc};
use feast_catalog::{CatalogError, DeliveryWindow, FeeSchedule, Menu};
use tracing::info;
use uuid::Uuid;

use crate::cart::CartLedger;
use crate::models::{OrderLine, OrderSummary, PaymentMethod};

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Freeze the cart into an order summary. Payment is only recorded.
///
/// The ledger is left untouched; clearing it is up to the session.
pub fn checkout(
    ledger: &CartLedger,
    menu: &Menu,
    fees: &FeeSchedule,
    address: &str,
    payment_method: PaymentMethod,
) -> Result<OrderSummary, CheckoutError> {
    if ledger.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut items = Vec::with_capacity(ledger.len());
    let mut estimate: Option<DeliveryWindow> = None;

    for line in ledger.lines() {
        let product = menu.require(line.product_id)?;
        items.push(OrderLine {
            product_id: line.product_id,
            name: product.name.clone(),
            quantity: line.quantity,
        });
        estimate = Some(match estimate {
            Some(window) => window.span(&product.delivery),
            None => product.delivery,
        });
    }

    let id = Uuid::new_v4();
    let placed_at = Utc::now();
    let summary = OrderSummary {
        id,
        reference: order_reference(&id, placed_at.year()),
        items,
        breakdown: ledger.breakdown(fees),
        address: address.to_string(),
        payment_method,
        // Non-empty ledger, so at least one window was seen
        estimated_delivery: estimate.unwrap_or(DeliveryWindow::new(0, 0)),
        placed_at,
    };

    info!(
        order_id = %summary.id,
        reference = %summary.reference,
        lines = summary.items.len(),
        total = %summary.breakdown.total,
        "Order placed"
    );
    Ok(summary)
}

/// Format: FD-{year}-{first 8 hex of the id, uppercase}
fn order_reference(id: &Uuid, year: i32) -> String {
    let short_id = &id.simple().to_string()[..8];
    format!("FD-{}-{}", year, short_id.to_uppercase())
}
