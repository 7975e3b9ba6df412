use feast_catalog::{FeeSchedule, PriceBreakdown};
use feast_core::{Notifier, TracingNotifier};
use feast_shared::{Notification, ProductId};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::models::CartLine;

/// Line items of one shopping session.
///
/// Invariants: at most one line per product, every line has quantity >= 1.
/// Totals are derived from the lines on every call and never stored.
/// Each state change is reported through the notifier.
pub struct CartLedger {
    lines: Vec<CartLine>,
    notifier: Arc<dyn Notifier>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(TracingNotifier))
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            lines: Vec::new(),
            notifier,
        }
    }

    /// Pre-seed without emitting notifications. Duplicate products are
    /// merged and zero-quantity lines dropped.
    pub fn seeded(lines: impl IntoIterator<Item = CartLine>, notifier: Arc<dyn Notifier>) -> Self {
        let mut ledger = Self::with_notifier(notifier);
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match ledger.position(line.product_id) {
                Some(idx) => {
                    let existing = &mut ledger.lines[idx];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => ledger.lines.push(line),
            }
        }
        ledger
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Quantity shown by a product's stepper; 0 when not in the cart
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.get(product_id).map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add `amount` units, creating the line on first add
    pub fn add_or_increment(
        &mut self,
        product_id: ProductId,
        unit_price: Decimal,
        restaurant: &str,
        amount: u32,
    ) {
        if amount == 0 {
            return;
        }

        let quantity = match self.position(product_id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(amount);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(product_id, unit_price, restaurant, amount));
                amount
            }
        };

        debug!(%product_id, quantity, "Cart line added");
        self.notifier.notify(Notification::item_added(product_id, quantity));
    }

    /// Set a line's quantity. Zero removes the line; unknown products are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, new_quantity: u32) {
        if new_quantity == 0 {
            self.remove(product_id);
            return;
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return;
        };
        if line.quantity == new_quantity {
            return;
        }

        line.quantity = new_quantity;
        debug!(%product_id, quantity = new_quantity, "Cart line updated");
        self.notifier.notify(Notification::quantity_updated(product_id, new_quantity));
    }

    /// One unit less; the last unit removes the line
    pub fn decrement(&mut self, product_id: ProductId) {
        let current = self.quantity_of(product_id);
        if current > 0 {
            self.set_quantity(product_id, current - 1);
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        let Some(idx) = self.position(product_id) else {
            return;
        };

        self.lines.remove(idx);
        debug!(%product_id, remaining = self.lines.len(), "Cart line removed");
        self.notifier.notify(Notification::item_removed(product_id));
    }

    /// Drop every line silently, used once an order has been placed
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line_total(&self, product_id: ProductId) -> Option<Decimal> {
        self.get(product_id).map(CartLine::line_total)
    }

    /// Exact sum of `unit_price * quantity`
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn total(&self, delivery_fee: Decimal, tax: Decimal) -> Decimal {
        self.subtotal() + delivery_fee + tax
    }

    pub fn breakdown(&self, fees: &FeeSchedule) -> PriceBreakdown {
        fees.breakdown(self.subtotal())
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartLedger").field("lines", &self.lines).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feast_core::BroadcastNotifier;
    use feast_shared::NotificationKind;
    use std::str::FromStr;
    use tokio::sync::broadcast::Receiver;

    const PIZZA: ProductId = ProductId(1);
    const BURGER: ProductId = ProductId(3);
    const ROLL: ProductId = ProductId(5);

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn seeded_ledger() -> (CartLedger, Receiver<Notification>) {
        let notifier = Arc::new(BroadcastNotifier::new(32));
        let rx = notifier.subscribe();
        let ledger = CartLedger::seeded(
            vec![
                CartLine::new(PIZZA, dec("18.99"), "Pizza Palace", 2),
                CartLine::new(BURGER, dec("12.99"), "Burger House", 1),
                CartLine::new(ROLL, dec("15.99"), "Sushi Master", 1),
            ],
            notifier,
        );
        (ledger, rx)
    }

    fn expected_subtotal(ledger: &CartLedger) -> Decimal {
        ledger
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }

    #[test]
    fn test_seeded_totals() {
        let (ledger, mut rx) = seeded_ledger();

        assert_eq!(ledger.subtotal(), dec("66.96"));
        assert_eq!(ledger.total(dec("2.99"), dec("3.50")), dec("73.45"));
        assert_eq!(ledger.breakdown(&FeeSchedule::default()).total, dec("73.45"));
        // Seeding is silent
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let (mut ledger, mut rx) = seeded_ledger();

        ledger.set_quantity(BURGER, 0);

        assert!(ledger.get(BURGER).is_none());
        assert_eq!(ledger.subtotal(), dec("53.97"));
        let n = rx.try_recv().unwrap();
        assert_eq!(n.kind, NotificationKind::ItemRemoved { product_id: BURGER });
        assert_eq!(n.message, "Item removed from cart");
    }

    #[test]
    fn test_set_zero_equals_remove() {
        let (mut a, _) = seeded_ledger();
        let (mut b, _) = seeded_ledger();

        a.set_quantity(ROLL, 0);
        b.remove(ROLL);

        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut once, _) = seeded_ledger();
        let (mut twice, mut rx) = seeded_ledger();

        once.remove(PIZZA);
        twice.remove(PIZZA);
        twice.remove(PIZZA);

        assert_eq!(once.lines(), twice.lines());
        // Only the effective removal is announced
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_never_duplicates() {
        let mut ledger = CartLedger::new();

        ledger.add_or_increment(PIZZA, dec("18.99"), "Pizza Palace", 1);
        ledger.add_or_increment(PIZZA, dec("18.99"), "Pizza Palace", 1);
        ledger.add_or_increment(PIZZA, dec("18.99"), "Pizza Palace", 3);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.quantity_of(PIZZA), 5);
        assert_eq!(ledger.line_total(PIZZA), Some(dec("94.95")));
    }

    #[test]
    fn test_add_notifies() {
        let notifier = Arc::new(BroadcastNotifier::new(8));
        let mut rx = notifier.subscribe();
        let mut ledger = CartLedger::with_notifier(notifier);

        ledger.add_or_increment(ROLL, dec("15.99"), "Sushi Master", 1);

        let n = rx.try_recv().unwrap();
        assert_eq!(n.message, "Added to cart!");
        assert_eq!(n.kind, NotificationKind::ItemAdded { product_id: ROLL, quantity: 1 });
    }

    #[test]
    fn test_empty_after_last_line_removed() {
        let (mut ledger, _) = seeded_ledger();

        ledger.remove(PIZZA);
        ledger.set_quantity(BURGER, 0);
        assert!(!ledger.is_empty());

        ledger.decrement(ROLL);
        assert!(ledger.is_empty());
        assert_eq!(ledger.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_decrement_steps_down_then_removes() {
        let (mut ledger, _) = seeded_ledger();

        ledger.decrement(PIZZA);
        assert_eq!(ledger.quantity_of(PIZZA), 1);

        ledger.decrement(PIZZA);
        assert!(ledger.get(PIZZA).is_none());

        // Past zero is a no-op
        ledger.decrement(PIZZA);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_set_quantity_on_absent_line_is_noop() {
        let (mut ledger, mut rx) = seeded_ledger();

        ledger.set_quantity(ProductId(9), 4);

        assert_eq!(ledger.len(), 3);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_subtotal_tracks_mixed_updates() {
        let mut ledger = CartLedger::new();
        let prices = [(PIZZA, "18.99"), (BURGER, "12.99"), (ROLL, "15.99"), (ProductId(9), "8.99")];

        for round in 0..25u32 {
            let (id, price) = prices[(round as usize * 7) % prices.len()];
            match round % 5 {
                0 | 1 => ledger.add_or_increment(id, dec(price), "Test Kitchen", round % 3 + 1),
                2 => ledger.set_quantity(id, round % 4),
                3 => ledger.decrement(id),
                _ => ledger.remove(id),
            }

            assert_eq!(ledger.subtotal(), expected_subtotal(&ledger));
            assert!(ledger.lines().iter().all(|l| l.quantity >= 1));

            let mut ids: Vec<_> = ledger.lines().iter().map(|l| l.product_id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), ledger.len());
        }
    }

    #[test]
    fn test_seeded_merges_duplicates() {
        let ledger = CartLedger::seeded(
            vec![
                CartLine::new(PIZZA, dec("18.99"), "Pizza Palace", 1),
                CartLine::new(PIZZA, dec("18.99"), "Pizza Palace", 2),
                CartLine::new(BURGER, dec("12.99"), "Burger House", 0),
            ],
            Arc::new(TracingNotifier),
        );

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.item_count(), 3);
    }
}
