//! Monthly income statement rows and campaign totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of the campaign income statement (DRE)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatementRow {
    /// Campaign month (1-indexed)
    pub month: u32,

    pub revenue: Decimal,

    /// Production run cost, charged in month 1 only
    pub production_cost: Decimal,

    /// Freight, charged in month 1 only
    pub shipping_cost: Decimal,

    /// Royalties + MEI + fuel + other, charged every month
    pub fixed_costs: Decimal,

    /// Sales-rep commission
    pub commission: Decimal,

    pub net_profit: Decimal,
}

impl MonthlyStatementRow {
    /// Create an empty row for `month`
    pub fn new(month: u32) -> Self {
        Self {
            month,
            revenue: Decimal::ZERO,
            production_cost: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            fixed_costs: Decimal::ZERO,
            commission: Decimal::ZERO,
            net_profit: Decimal::ZERO,
        }
    }

    pub fn total_costs(&self) -> Decimal {
        self.production_cost + self.shipping_cost + self.fixed_costs + self.commission
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

/// Campaign totals derived from the statement rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub months: u32,
    pub total_revenue: Decimal,
    pub total_production: Decimal,
    pub total_shipping: Decimal,
    pub total_fixed: Decimal,
    pub total_commission: Decimal,
    pub total_cost: Decimal,
    pub net_profit_total: Decimal,
    /// Net profit over revenue, in percent; 0 when there is no revenue,
    /// saturated at the Decimal bounds when revenue is vanishingly small
    pub margin_percent: Decimal,
}

impl CampaignSummary {
    pub fn is_profitable(&self) -> bool {
        self.net_profit_total >= Decimal::ZERO
    }
}

/// Sum the statement columns into campaign totals
pub fn summarize(rows: &[MonthlyStatementRow]) -> CampaignSummary {
    let total_revenue: Decimal = rows.iter().map(|r| r.revenue).sum();
    let total_production: Decimal = rows.iter().map(|r| r.production_cost).sum();
    let total_shipping: Decimal = rows.iter().map(|r| r.shipping_cost).sum();
    let total_fixed: Decimal = rows.iter().map(|r| r.fixed_costs).sum();
    let total_commission: Decimal = rows.iter().map(|r| r.commission).sum();

    let total_cost = total_production + total_shipping + total_fixed + total_commission;
    let net_profit_total = total_revenue - total_cost;

    let margin_percent = if total_revenue.is_zero() {
        Decimal::ZERO
    } else {
        net_profit_total
            .checked_div(total_revenue)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if net_profit_total.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    };

    CampaignSummary {
        months: rows.len() as u32,
        total_revenue,
        total_production,
        total_shipping,
        total_fixed,
        total_commission,
        total_cost,
        net_profit_total,
        margin_percent,
    }
}

/// Cost details shown next to the statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub months: u32,
    pub production_cost: Decimal,
    pub shipping: Decimal,
    /// Recurring fixed costs for one month
    pub fixed_monthly: Decimal,
    /// Recurring fixed costs over the whole campaign
    pub fixed_total: Decimal,
}

impl CostBreakdown {
    /// Everything except commission, which depends on revenue
    pub fn total_before_commission(&self) -> Decimal {
        self.production_cost + self.shipping + self.fixed_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        month: u32,
        revenue: i64,
        production: i64,
        fixed: i64,
        commission: i64,
    ) -> MonthlyStatementRow {
        let mut r = MonthlyStatementRow::new(month);
        r.revenue = Decimal::from(revenue);
        r.production_cost = Decimal::from(production);
        r.fixed_costs = Decimal::from(fixed);
        r.commission = Decimal::from(commission);
        r.net_profit = r.revenue - r.total_costs();
        r
    }

    #[test]
    fn test_summarize_sums_columns() {
        let rows = vec![row(1, 1000, 400, 100, 100), row(2, 1000, 0, 100, 100)];
        let summary = summarize(&rows);

        assert_eq!(summary.months, 2);
        assert_eq!(summary.total_revenue, Decimal::from(2000));
        assert_eq!(summary.total_cost, Decimal::from(800));
        assert_eq!(summary.net_profit_total, Decimal::from(1200));
        assert_eq!(summary.margin_percent, Decimal::from(60));
        assert!(summary.is_profitable());
    }

    #[test]
    fn test_summarize_zero_revenue_margin() {
        let rows = vec![row(1, 0, 400, 100, 0)];
        let summary = summarize(&rows);

        assert_eq!(summary.margin_percent, Decimal::ZERO);
        assert_eq!(summary.net_profit_total, Decimal::from(-500));
        assert!(!summary.is_profitable());
        assert!(rows[0].is_loss());
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.months, 0);
        assert_eq!(summary.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_margin_saturates_on_tiny_revenue() {
        let mut r = MonthlyStatementRow::new(1);
        r.revenue = Decimal::new(36, 28);
        r.fixed_costs = Decimal::from(1180);
        r.net_profit = r.revenue - r.total_costs();

        let summary = summarize(&[r]);
        assert_eq!(summary.margin_percent, Decimal::MIN);
        assert!(!summary.is_profitable());
    }
}
