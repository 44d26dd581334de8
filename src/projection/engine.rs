//! Core projection engine: price suggestion, monthly statement and break-even

use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::alerts::{assess, Alert};
use super::pricing::{self, BreakEven};
use super::state::{CampaignState, Statement};
use super::statement::{CampaignSummary, CostBreakdown, MonthlyStatementRow};
use crate::campaign::{PriceBasis, ScenarioConfig, SellPrice};
use crate::costs::CostBasis;
use crate::error::{Error, Result};

/// Which question the break-even figure answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BreakEvenPolicy {
    /// How much month 1 alone must sell to cover setup, one month of fixed
    /// costs and commission
    SingleMonth,
    /// How many module sales over the whole campaign recoup every cost
    #[default]
    WholeCampaign,
}

/// What the suggested-price markup divisor includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkupPolicy {
    /// `1 - (margin + commission) / 100`
    #[default]
    MarginPlusCommission,
    /// `1 - margin / 100`; commission is left out of the markup
    MarginOnly,
}

/// Revenue the commission percentage is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommissionBasis {
    #[default]
    GrossRevenue,
    /// Revenue minus the month's production and shipping, floored at zero
    NetOfSetupCosts,
}

macro_rules! policy_names {
    ($ty:ty { $($variant:ident => $name:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(Error::InvalidRecord(format!(
                        "unknown {} '{}'",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

policy_names!(BreakEvenPolicy {
    SingleMonth => "single-month" | "single",
    WholeCampaign => "whole-campaign" | "campaign",
});

policy_names!(MarkupPolicy {
    MarginPlusCommission => "margin-plus-commission" | "with-commission",
    MarginOnly => "margin-only",
});

policy_names!(CommissionBasis {
    GrossRevenue => "gross" | "gross-revenue",
    NetOfSetupCosts => "net-of-setup",
});

/// Calculation policies; calculator variants differ only in these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub break_even: BreakEvenPolicy,
    pub markup: MarkupPolicy,
    pub commission_basis: CommissionBasis,
}

/// Everything the presentation layer shows for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct CampaignProjection {
    pub scenario: ScenarioConfig,
    pub engine: EngineConfig,
    pub rows: Vec<MonthlyStatementRow>,
    pub summary: CampaignSummary,
    pub costs: CostBreakdown,
    /// Withheld when the sell price makes it undefined
    pub break_even: Option<BreakEven>,
    /// Present only when a valid target margin was given
    pub suggested_price: Option<Decimal>,
    pub alerts: Vec<Alert>,
    /// Validation messages for metrics that were withheld
    pub notices: Vec<String>,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    costs: CostBasis,
    config: EngineConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given costs and config
    pub fn new(costs: CostBasis, config: EngineConfig) -> Self {
        Self { costs, config }
    }

    pub fn costs(&self) -> &CostBasis {
        &self.costs
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the scenario and look up its costs
    fn resolve(&self, scenario: &ScenarioConfig) -> Result<CampaignState> {
        let (capacity, production_cost) = scenario.validate(&self.costs.table)?;
        let months = scenario.months();
        let fixed = &self.costs.fixed;

        debug!(
            "resolved '{}' run {}: {} modules, production {}, {}",
            scenario.bag_size, scenario.run_size, capacity, production_cost, scenario.duration
        );

        let state = match scenario.sell_price {
            SellPrice::Monthly(price) => CampaignState::monthly(
                months,
                capacity,
                price,
                production_cost,
                fixed.shipping,
                fixed.monthly_recurring(),
                scenario.commission_pct,
                self.config.commission_basis,
            )?,
            SellPrice::TotalContract(price) => CampaignState::total_contract(
                months,
                capacity,
                price,
                production_cost,
                fixed.shipping,
                fixed.monthly_recurring(),
                scenario.commission_pct,
                self.config.commission_basis,
            )?,
        };
        Ok(state)
    }

    /// Per-module price that reaches the scenario's target margin, quoted
    /// in the same basis (monthly or whole campaign) as its sell price
    pub fn suggest_price(&self, scenario: &ScenarioConfig) -> Result<Decimal> {
        let state = self.resolve(scenario)?;
        self.suggest_price_for(scenario, &state)
    }

    fn suggest_price_for(
        &self,
        scenario: &ScenarioConfig,
        state: &CampaignState,
    ) -> Result<Decimal> {
        let margin = scenario.target_margin_pct.ok_or_else(|| {
            Error::invalid("a target margin is required to suggest a price")
        })?;

        let (markup, label) = match self.config.markup {
            MarkupPolicy::MarginPlusCommission => {
                (margin + scenario.commission_pct, "margin plus commission")
            }
            MarkupPolicy::MarginOnly => (margin, "margin"),
        };

        let total_period_cost = state.production_cost
            + state.shipping
            + state.fixed_monthly * Decimal::from(state.months);

        pricing::suggested_price(
            total_period_cost,
            state.module_capacity,
            markup,
            label,
            state.months,
            scenario.sell_price.basis(),
        )
    }

    /// Lazy month-by-month statement for the scenario
    pub fn build_statement(&self, scenario: &ScenarioConfig) -> Result<Statement> {
        let state = self.resolve(scenario)?;
        Ok(Statement::new(state))
    }

    /// One-time and recurring costs of the scenario
    pub fn cost_breakdown(&self, scenario: &ScenarioConfig) -> Result<CostBreakdown> {
        let state = self.resolve(scenario)?;
        Ok(Self::cost_breakdown_for(&state))
    }

    fn cost_breakdown_for(state: &CampaignState) -> CostBreakdown {
        CostBreakdown {
            months: state.months,
            production_cost: state.production_cost,
            shipping: state.shipping,
            fixed_monthly: state.fixed_monthly,
            fixed_total: state.fixed_monthly * Decimal::from(state.months),
        }
    }

    /// Break-even under the configured policy
    pub fn break_even(&self, scenario: &ScenarioConfig) -> Result<BreakEven> {
        let state = self.resolve(scenario)?;
        let total_cost = Statement::new(state.clone()).summary().total_cost;
        self.break_even_for(scenario, &state, total_cost)
    }

    fn break_even_for(
        &self,
        scenario: &ScenarioConfig,
        state: &CampaignState,
        total_cost: Decimal,
    ) -> Result<BreakEven> {
        let months = Decimal::from(state.months);
        let capacity = Decimal::from(state.module_capacity);

        match self.config.break_even {
            BreakEvenPolicy::SingleMonth => {
                let monthly_price = match scenario.sell_price {
                    SellPrice::Monthly(p) => p,
                    SellPrice::TotalContract(p) => p / months,
                };
                pricing::single_month_break_even(
                    state.production_cost + state.shipping,
                    state.fixed_monthly,
                    state.commission_pct,
                    self.config.commission_basis == CommissionBasis::GrossRevenue,
                    monthly_price,
                    state.module_capacity,
                )
            }
            BreakEvenPolicy::WholeCampaign => {
                let available = match scenario.sell_price.basis() {
                    PriceBasis::Monthly => capacity * months,
                    PriceBasis::TotalContract => capacity,
                };
                pricing::whole_campaign_break_even(
                    total_cost,
                    scenario.sell_price.amount(),
                    available,
                )
            }
        }
    }

    /// Run every calculation for a scenario.
    ///
    /// Fails only when the scenario itself is invalid; metrics that are
    /// undefined for otherwise valid inputs are withheld with a notice.
    pub fn project(&self, scenario: &ScenarioConfig) -> Result<CampaignProjection> {
        let state = self.resolve(scenario)?;
        let rows = Statement::new(state.clone()).rows();
        let summary = super::statement::summarize(&rows);
        let costs = Self::cost_breakdown_for(&state);

        for row in &rows {
            trace!(
                "month {}: revenue {} costs {} net {}",
                row.month,
                row.revenue,
                row.total_costs(),
                row.net_profit
            );
        }

        let mut notices = Vec::new();

        let break_even = match self.break_even_for(scenario, &state, summary.total_cost) {
            Ok(be) => Some(be),
            Err(Error::InvalidConfiguration(msg)) => {
                warn!("break-even withheld: {}", msg);
                notices.push(msg);
                None
            }
            Err(e) => return Err(e),
        };

        let suggested_price = match scenario.target_margin_pct {
            None => None,
            Some(_) => match self.suggest_price_for(scenario, &state) {
                Ok(price) => Some(price),
                Err(Error::InvalidConfiguration(msg)) => {
                    warn!("price suggestion withheld: {}", msg);
                    notices.push(msg);
                    None
                }
                Err(e) => return Err(e),
            },
        };

        let alerts = assess(&rows, &summary, break_even.as_ref());

        debug!(
            "projected {} months: revenue {} net {} ({} alerts)",
            summary.months,
            summary.total_revenue,
            summary.net_profit_total,
            alerts.len()
        );

        Ok(CampaignProjection {
            scenario: scenario.clone(),
            engine: self.config,
            rows,
            summary,
            costs,
            break_even,
            suggested_price,
            alerts,
            notices,
        })
    }
}
