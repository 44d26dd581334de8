//! Resolved campaign inputs and the lazy month-by-month statement

use std::iter::FusedIterator;

use rust_decimal::Decimal;

use super::engine::CommissionBasis;
use super::pricing::checked;
use super::statement::{summarize, CampaignSummary, MonthlyStatementRow};
use crate::error::Result;

/// Scenario inputs after cost lookup, plus the month cursor
#[derive(Debug, Clone)]
pub struct CampaignState {
    /// Months already produced (0 before the first row)
    pub month: u32,

    /// Campaign length in months
    pub months: u32,

    pub module_capacity: u32,

    /// One-time production cost for the chosen run
    pub production_cost: Decimal,

    /// One-time shipping cost
    pub shipping: Decimal,

    /// Recurring fixed costs per month
    pub fixed_monthly: Decimal,

    /// Commission in percent
    pub commission_pct: Decimal,

    pub commission_basis: CommissionBasis,

    /// Revenue for every month but the last
    revenue_per_month: Decimal,

    /// Revenue booked in the last month (absorbs cent rounding)
    revenue_last_month: Decimal,
}

impl CampaignState {
    /// State for revenue charged at a fixed amount every month
    #[allow(clippy::too_many_arguments)]
    pub fn monthly(
        months: u32,
        module_capacity: u32,
        monthly_price: Decimal,
        production_cost: Decimal,
        shipping: Decimal,
        fixed_monthly: Decimal,
        commission_pct: Decimal,
        commission_basis: CommissionBasis,
    ) -> Result<Self> {
        let revenue = checked(
            Decimal::from(module_capacity).checked_mul(monthly_price),
            "monthly revenue",
        )?;
        let state = Self {
            month: 0,
            months,
            module_capacity,
            production_cost,
            shipping,
            fixed_monthly,
            commission_pct,
            commission_basis,
            revenue_per_month: revenue,
            revenue_last_month: revenue,
        };
        state.check_range()?;
        Ok(state)
    }

    /// State for a whole-campaign price spread evenly across the months
    /// at cent precision; the last month takes the remainder so the
    /// campaign total is exact.
    #[allow(clippy::too_many_arguments)]
    pub fn total_contract(
        months: u32,
        module_capacity: u32,
        contract_price: Decimal,
        production_cost: Decimal,
        shipping: Decimal,
        fixed_monthly: Decimal,
        commission_pct: Decimal,
        commission_basis: CommissionBasis,
    ) -> Result<Self> {
        let campaign_revenue = checked(
            Decimal::from(module_capacity).checked_mul(contract_price),
            "campaign revenue",
        )?;
        let per_month = (campaign_revenue / Decimal::from(months)).round_dp(2);
        let last = campaign_revenue - per_month * Decimal::from(months - 1);

        let mut state = Self::monthly(
            months,
            module_capacity,
            Decimal::ZERO,
            production_cost,
            shipping,
            fixed_monthly,
            commission_pct,
            commission_basis,
        )?;
        state.revenue_per_month = per_month;
        state.revenue_last_month = last;
        state.check_range()?;
        Ok(state)
    }

    /// Reject inputs whose campaign totals cannot be represented, so rows
    /// and summaries built from this state never overflow
    fn check_range(&self) -> Result<()> {
        let months = Decimal::from(self.months);
        let revenue = self.revenue_per_month.max(self.revenue_last_month);
        let month_costs = revenue
            .checked_mul(self.commission_pct / Decimal::ONE_HUNDRED)
            .and_then(|c| c.checked_add(self.production_cost))
            .and_then(|c| c.checked_add(self.shipping))
            .and_then(|c| c.checked_add(self.fixed_monthly));
        let totals = month_costs
            .and_then(|c| c.checked_mul(months))
            .and_then(|c| c.checked_add(revenue.checked_mul(months)?));
        checked(totals, "campaign totals").map(|_| ())
    }

    pub fn is_finished(&self) -> bool {
        self.month >= self.months
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Whether one-time setup costs land in the current month
    pub fn is_setup_month(&self) -> bool {
        self.month == 1
    }

    pub fn revenue(&self) -> Decimal {
        if self.month == self.months {
            self.revenue_last_month
        } else {
            self.revenue_per_month
        }
    }

    /// Build the statement row for the current month
    pub fn row(&self) -> MonthlyStatementRow {
        let mut row = MonthlyStatementRow::new(self.month);

        row.revenue = self.revenue();

        if self.is_setup_month() {
            row.production_cost = self.production_cost;
            row.shipping_cost = self.shipping;
        }
        row.fixed_costs = self.fixed_monthly;

        let commissionable = match self.commission_basis {
            CommissionBasis::GrossRevenue => row.revenue,
            CommissionBasis::NetOfSetupCosts => {
                (row.revenue - row.production_cost - row.shipping_cost).max(Decimal::ZERO)
            }
        };
        row.commission = commissionable * (self.commission_pct / Decimal::ONE_HUNDRED);

        row.net_profit = row.revenue - row.total_costs();
        row
    }

    fn rewound(&self) -> Self {
        Self {
            month: 0,
            ..self.clone()
        }
    }
}

/// A campaign statement that has not been evaluated yet.
///
/// Rows are produced on demand; every call to [`Statement::iter`] starts
/// again from month 1 and yields the same rows.
#[derive(Debug, Clone)]
pub struct Statement {
    start: CampaignState,
}

impl Statement {
    pub(crate) fn new(state: CampaignState) -> Self {
        Self {
            start: state.rewound(),
        }
    }

    pub fn months(&self) -> u32 {
        self.start.months
    }

    pub fn iter(&self) -> StatementIter {
        StatementIter {
            state: self.start.clone(),
        }
    }

    pub fn rows(&self) -> Vec<MonthlyStatementRow> {
        self.iter().collect()
    }

    pub fn summary(&self) -> CampaignSummary {
        summarize(&self.rows())
    }
}

impl IntoIterator for Statement {
    type Item = MonthlyStatementRow;
    type IntoIter = StatementIter;

    fn into_iter(self) -> StatementIter {
        StatementIter { state: self.start }
    }
}

impl<'a> IntoIterator for &'a Statement {
    type Item = MonthlyStatementRow;
    type IntoIter = StatementIter;

    fn into_iter(self) -> StatementIter {
        self.iter()
    }
}

/// Iterator over statement rows, month ascending
#[derive(Debug, Clone)]
pub struct StatementIter {
    state: CampaignState,
}

impl Iterator for StatementIter {
    type Item = MonthlyStatementRow;

    fn next(&mut self) -> Option<MonthlyStatementRow> {
        if self.state.is_finished() {
            return None;
        }
        self.state.advance_month();
        Some(self.state.row())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.state.months - self.state.month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StatementIter {}

impl FusedIterator for StatementIter {}
