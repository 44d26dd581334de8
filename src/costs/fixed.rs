//! Campaign fixed costs: recurring monthly items and one-time shipping

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed costs charged to every campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCosts {
    /// Franchise royalties (monthly)
    pub royalties: Decimal,
    /// MEI tax (monthly)
    pub mei: Decimal,
    /// Fuel for distribution (monthly)
    pub fuel: Decimal,
    /// Other overhead (monthly)
    pub other: Decimal,
    /// Freight for the production run, charged once per campaign
    pub shipping: Decimal,
}

impl FixedCosts {
    /// Sum of the items charged every month
    pub fn monthly_recurring(&self) -> Decimal {
        self.royalties + self.mei + self.fuel + self.other
    }

    /// Recurring items over a campaign of `months`
    pub fn recurring_for(&self, months: u32) -> Decimal {
        self.monthly_recurring() * Decimal::from(months)
    }

    /// Item names and amounts, in the order they appear on reports
    pub fn items(&self) -> [(&'static str, Decimal); 5] {
        [
            ("royalties", self.royalties),
            ("mei", self.mei),
            ("fuel", self.fuel),
            ("other", self.other),
            ("shipping", self.shipping),
        ]
    }
}

impl Default for FixedCosts {
    fn default() -> Self {
        Self {
            royalties: Decimal::new(399, 0),
            mei: Decimal::new(81, 0),
            fuel: Decimal::new(500, 0),
            other: Decimal::new(200, 0),
            shipping: Decimal::new(600, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recurring() {
        let fixed = FixedCosts::default();
        assert_eq!(fixed.monthly_recurring(), Decimal::new(1180, 0));
        assert_eq!(fixed.recurring_for(3), Decimal::new(3540, 0));
        // Shipping is not part of the recurring sum
        assert_eq!(fixed.recurring_for(1), fixed.monthly_recurring());
    }
}
