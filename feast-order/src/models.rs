use chrono::{DateTime, Utc};
use feast_catalog::{DeliveryWindow, PriceBreakdown};
use feast_shared::{Masked, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product's entry in the cart. Quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub unit_price: Decimal,
    pub restaurant: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: ProductId, unit_price: Decimal, restaurant: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id,
            unit_price,
            restaurant: restaurant.into(),
            quantity,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Card,
    CashOnDelivery,
}

/// `2x Margherita Pizza` in the order details block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

/// Snapshot of a placed order, shown on the tracking page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: Uuid,
    /// Customer-facing reference, e.g. `FD-2026-1A2B3C4D`
    pub reference: String,
    pub items: Vec<OrderLine>,
    pub breakdown: PriceBreakdown,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub estimated_delivery: DeliveryWindow,
    pub placed_at: DateTime<Utc>,
}

/// Courier details, revealed once the order is on the way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverInfo {
    pub name: String,
    pub phone: Masked<String>,
    pub vehicle: String,
}

impl DriverInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, vehicle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: Masked(phone.into()),
            vehicle: vehicle.into(),
        }
    }

    /// Avatar initials: first letter of each name part
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

impl Default for DriverInfo {
    fn default() -> Self {
        Self::new("John Smith", "+1 (555) 123-4567", "Toyota Camry - ABC123")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine::new(ProductId(1), Decimal::new(1899, 2), "Pizza Palace", 2);
        assert_eq!(line.line_total(), Decimal::new(3798, 2));
    }

    #[test]
    fn test_driver_initials() {
        assert_eq!(DriverInfo::default().initials(), "JS");
        assert_eq!(DriverInfo::new("Ana  Maria Lopez", "1", "Bike").initials(), "AML");
    }

    #[test]
    fn test_driver_phone_not_in_debug() {
        let debug = format!("{:?}", DriverInfo::default());
        assert!(!debug.contains("123-4567"));
        assert!(debug.contains("4567"));
    }
}
