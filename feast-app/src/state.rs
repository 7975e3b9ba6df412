use feast_catalog::{FeeSchedule, Menu, MenuItem, MenuQuery, PriceBreakdown};
use feast_core::{Config, CoreError, Notifier};
use feast_order::{
    checkout, CartLedger, CartLine, DriverInfo, OrderSummary, PaymentMethod, Stage, TrackingSession,
};
use feast_shared::ProductId;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;

/// What the cart page and header badge render from
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub breakdown: PriceBreakdown,
    pub badge_count: usize,
    pub is_empty: bool,
}

/// One shopper's session: catalog, fees and the cart they own.
///
/// Views receive the cart through this value (or a borrow of it); there is
/// no process-wide cart.
pub struct Storefront {
    config: Config,
    menu: Menu,
    fees: FeeSchedule,
    cart: CartLedger,
    notifier: Arc<dyn Notifier>,
}

impl Storefront {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let fees = FeeSchedule::new(config.storefront.delivery_fee, config.storefront.tax);
        Self {
            config,
            menu: Menu::seeded(),
            fees,
            cart: CartLedger::with_notifier(notifier.clone()),
            notifier,
        }
    }

    /// Start with lines already in the cart
    pub fn with_cart(mut self, lines: impl IntoIterator<Item = CartLine>) -> Self {
        self.cart = CartLedger::seeded(lines, self.notifier.clone());
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn browse(&self, query: &MenuQuery) -> Vec<&MenuItem> {
        self.menu.query(query)
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }

    /// Menu page "+" button. Returns the product's new quantity.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<u32, AppError> {
        let item = self.menu.require(product_id)?;
        self.cart.add_or_increment(product_id, item.price, &item.restaurant, 1);
        Ok(self.cart.quantity_of(product_id))
    }

    /// Menu page "-" button
    pub fn decrement(&mut self, product_id: ProductId) {
        self.cart.decrement(product_id);
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.cart.set_quantity(product_id, quantity);
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
    }

    /// Header cart badge: distinct lines in the cart
    pub fn badge_count(&self) -> usize {
        self.cart.len()
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        self.cart.breakdown(&self.fees)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines().to_vec(),
            breakdown: self.breakdown(),
            badge_count: self.badge_count(),
            is_empty: self.cart.is_empty(),
        }
    }

    /// Place the order and empty the cart
    pub fn checkout(&mut self, payment_method: PaymentMethod) -> Result<OrderSummary, AppError> {
        let order = checkout(
            &self.cart,
            &self.menu,
            &self.fees,
            &self.config.storefront.delivery_address,
            payment_method,
        )?;
        self.cart.clear();
        Ok(order)
    }

    /// Open the tracking view for a placed order; its ticker runs until the
    /// returned session is closed or dropped.
    pub fn open_tracking(&self, order: OrderSummary) -> Result<TrackingSession, AppError> {
        let initial = Stage::from_id(self.config.tracking.initial_step).ok_or_else(|| {
            CoreError::Validation(format!(
                "tracking.initial_step out of range: {}",
                self.config.tracking.initial_step
            ))
        })?;

        info!(reference = %order.reference, interval_secs = self.config.tracking.tick_interval_secs, "Opening tracking");
        Ok(TrackingSession::open(
            order,
            DriverInfo::default(),
            self.config.tick_interval(),
            initial,
            self.notifier.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feast_core::TracingNotifier;

    fn storefront() -> Storefront {
        Storefront::new(Config::default(), Arc::new(TracingNotifier))
    }

    #[test]
    fn test_add_unknown_product() {
        let mut store = storefront();

        let err = store.add_to_cart(ProductId(404)).unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_badge_counts_lines() {
        let mut store = storefront();

        assert_eq!(store.add_to_cart(ProductId(1)).unwrap(), 1);
        assert_eq!(store.add_to_cart(ProductId(1)).unwrap(), 2);
        store.add_to_cart(ProductId(8)).unwrap();

        assert_eq!(store.badge_count(), 2);
        assert_eq!(store.cart().item_count(), 3);
    }

    #[test]
    fn test_snapshot_of_empty_cart() {
        let snapshot = storefront().snapshot();

        assert!(snapshot.is_empty);
        assert_eq!(snapshot.badge_count, 0);
        assert!(snapshot.lines.is_empty());
    }

    #[test]
    fn test_rejects_invalid_initial_step() {
        let mut config = Config::default();
        config.tracking.initial_step = 9;
        let mut store = Storefront::new(config, Arc::new(TracingNotifier));
        store.add_to_cart(ProductId(1)).unwrap();
        let order = store.checkout(PaymentMethod::Card).unwrap();

        let err = store.open_tracking(order).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Validation(_))));
    }
}
