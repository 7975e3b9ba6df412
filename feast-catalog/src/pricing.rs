use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Flat charges added on top of the cart subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub delivery_fee: Decimal,
    pub tax: Decimal,
}

impl FeeSchedule {
    pub fn new(delivery_fee: Decimal, tax: Decimal) -> Self {
        Self { delivery_fee, tax }
    }

    pub fn breakdown(&self, subtotal: Decimal) -> PriceBreakdown {
        PriceBreakdown {
            subtotal,
            delivery_fee: self.delivery_fee,
            tax: self.tax,
            total: subtotal + self.delivery_fee + self.tax,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(299, 2),
            tax: Decimal::new(350, 2),
        }
    }
}

/// Order summary figures. Amounts are exact; round only through `format_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Currency display with two decimals, e.g. `$66.96`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_breakdown_adds_flat_fees() {
        let fees = FeeSchedule::default();
        let breakdown = fees.breakdown(Decimal::from_str("66.96").unwrap());

        assert_eq!(breakdown.total, Decimal::from_str("73.45").unwrap());
        assert_eq!(format_amount(breakdown.total), "$73.45");
    }

    #[test]
    fn test_format_rounds_only_for_display() {
        let amount = Decimal::from_str("10.005").unwrap();
        assert_eq!(format_amount(amount), "$10.01");
        assert_eq!(format_amount(Decimal::new(35, 1)), "$3.50");
        assert_eq!(format_amount(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_empty_cart_still_carries_fees() {
        let breakdown = FeeSchedule::default().breakdown(Decimal::ZERO);
        assert_eq!(breakdown.total, Decimal::from_str("6.49").unwrap());
    }
}
