//! Viability indicators derived from a projection
//!
//! These are expected business outcomes, reported alongside the numbers
//! rather than raised as errors.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::pricing::BreakEven;
use super::statement::{CampaignSummary, MonthlyStatementRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// A single month closes with negative net profit
    MonthlyLoss { month: u32, net_profit: Decimal },

    /// The campaign as a whole loses money
    CampaignLoss { net_profit: Decimal },

    /// The campaign as a whole makes money (or breaks exactly even)
    Profitable { net_profit: Decimal, margin_percent: Decimal },

    /// Break-even needs more module sales than the campaign can offer
    BreakEvenAboveCapacity { required: Decimal, available: Decimal },
}

impl Alert {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Alert::Profitable { .. })
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::MonthlyLoss { month, net_profit } => {
                write!(f, "Month {} closes at a loss ({})", month, net_profit.round_dp(2))
            }
            Alert::CampaignLoss { .. } => {
                write!(f, "Warning: this configuration results in a loss!")
            }
            Alert::Profitable { margin_percent, .. } => write!(
                f,
                "Profitable campaign configuration ({}% margin)",
                margin_percent.round_dp(1)
            ),
            Alert::BreakEvenAboveCapacity { required, available } => write!(
                f,
                "Break-even needs {} modules but only {} are available",
                required.round_dp(1),
                available
            ),
        }
    }
}

/// Collect alerts for a projection, month alerts first
pub fn assess(
    rows: &[MonthlyStatementRow],
    summary: &CampaignSummary,
    break_even: Option<&BreakEven>,
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = rows
        .iter()
        .filter(|r| r.is_loss())
        .map(|r| Alert::MonthlyLoss {
            month: r.month,
            net_profit: r.net_profit,
        })
        .collect();

    if let Some(be) = break_even.filter(|be| be.exceeds_capacity()) {
        alerts.push(Alert::BreakEvenAboveCapacity {
            required: be.modules,
            available: be.available_modules,
        });
    }

    alerts.push(if summary.is_profitable() {
        Alert::Profitable {
            net_profit: summary.net_profit_total,
            margin_percent: summary.margin_percent,
        }
    } else {
        Alert::CampaignLoss {
            net_profit: summary.net_profit_total,
        }
    });

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::statement::summarize;
    use crate::projection::BreakEvenPolicy;

    fn row(month: u32, net: i64) -> MonthlyStatementRow {
        let mut r = MonthlyStatementRow::new(month);
        r.revenue = Decimal::from(1000);
        r.fixed_costs = Decimal::from(1000 - net);
        r.net_profit = Decimal::from(net);
        r
    }

    #[test]
    fn test_assess_loss_month_then_profit() {
        let rows = vec![row(1, -500), row(2, 800)];
        let summary = summarize(&rows);
        let alerts = assess(&rows, &summary, None);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0], Alert::MonthlyLoss { month: 1, net_profit: Decimal::from(-500) });
        assert!(matches!(alerts[1], Alert::Profitable { .. }));
        assert!(!alerts[1].is_warning());
    }

    #[test]
    fn test_assess_campaign_loss_and_capacity() {
        let rows = vec![row(1, -500)];
        let summary = summarize(&rows);
        let be = BreakEven {
            policy: BreakEvenPolicy::WholeCampaign,
            revenue: Decimal::from(1500),
            modules: Decimal::from(40),
            available_modules: Decimal::from(36),
        };
        let alerts = assess(&rows, &summary, Some(&be));

        assert_eq!(alerts.len(), 3);
        assert!(matches!(alerts[1], Alert::BreakEvenAboveCapacity { .. }));
        assert!(matches!(alerts[2], Alert::CampaignLoss { .. }));
        assert!(alerts.iter().all(Alert::is_warning));
        assert_eq!(alerts[2].to_string(), "Warning: this configuration results in a loss!");
    }
}
