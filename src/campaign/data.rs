//! Scenario inputs for a single campaign evaluation

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costs::CostTable;
use crate::error::{Error, Result};

/// Campaign length; only the durations sold to customers are representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignDuration {
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl CampaignDuration {
    pub const ALL: [CampaignDuration; 3] = [
        CampaignDuration::OneMonth,
        CampaignDuration::ThreeMonths,
        CampaignDuration::SixMonths,
    ];

    pub fn months(self) -> u32 {
        match self {
            CampaignDuration::OneMonth => 1,
            CampaignDuration::ThreeMonths => 3,
            CampaignDuration::SixMonths => 6,
        }
    }
}

impl TryFrom<u32> for CampaignDuration {
    type Error = Error;

    fn try_from(months: u32) -> Result<Self> {
        match months {
            1 => Ok(CampaignDuration::OneMonth),
            3 => Ok(CampaignDuration::ThreeMonths),
            6 => Ok(CampaignDuration::SixMonths),
            other => Err(Error::UnsupportedDuration(other)),
        }
    }
}

impl FromStr for CampaignDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let months: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("bad duration '{}'", s)))?;
        CampaignDuration::try_from(months)
    }
}

impl fmt::Display for CampaignDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.months() {
            1 => write!(f, "1 month"),
            n => write!(f, "{} months", n),
        }
    }
}

/// Whether a sell price is quoted per month or for the whole campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBasis {
    Monthly,
    TotalContract,
}

impl FromStr for PriceBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PriceBasis::Monthly),
            "total" | "total-contract" | "total_contract" => Ok(PriceBasis::TotalContract),
            other => Err(Error::InvalidRecord(format!("unknown price basis '{}'", other))),
        }
    }
}

/// Per-module sell price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SellPrice {
    /// Charged for every month the module runs
    Monthly(Decimal),
    /// Charged once for the whole campaign
    TotalContract(Decimal),
}

impl SellPrice {
    pub fn new(basis: PriceBasis, amount: Decimal) -> Self {
        match basis {
            PriceBasis::Monthly => SellPrice::Monthly(amount),
            PriceBasis::TotalContract => SellPrice::TotalContract(amount),
        }
    }

    pub fn amount(&self) -> Decimal {
        match *self {
            SellPrice::Monthly(p) | SellPrice::TotalContract(p) => p,
        }
    }

    pub fn basis(&self) -> PriceBasis {
        match self {
            SellPrice::Monthly(_) => PriceBasis::Monthly,
            SellPrice::TotalContract(_) => PriceBasis::TotalContract,
        }
    }

    /// Per-module price for the whole campaign
    pub fn per_campaign(&self, months: u32) -> Decimal {
        match *self {
            SellPrice::Monthly(p) => p * Decimal::from(months),
            SellPrice::TotalContract(p) => p,
        }
    }
}

/// Immutable description of one campaign to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Key into the cost table
    pub bag_size: String,

    /// Key into the bag's run prices
    pub run_size: u32,

    pub duration: CampaignDuration,

    pub sell_price: SellPrice,

    /// Target margin in percent, needed only for price suggestions
    pub target_margin_pct: Option<Decimal>,

    /// Sales-rep commission in percent of revenue
    pub commission_pct: Decimal,
}

impl ScenarioConfig {
    pub fn new(
        bag_size: impl Into<String>,
        run_size: u32,
        duration: CampaignDuration,
        sell_price: SellPrice,
        commission_pct: Decimal,
    ) -> Self {
        Self {
            bag_size: bag_size.into(),
            run_size,
            duration,
            sell_price,
            target_margin_pct: None,
            commission_pct,
        }
    }

    pub fn with_target_margin(mut self, margin_pct: Decimal) -> Self {
        self.target_margin_pct = Some(margin_pct);
        self
    }

    pub fn months(&self) -> u32 {
        self.duration.months()
    }

    /// Check the scenario against the cost table and percentage bounds.
    ///
    /// Returns the bag's module capacity and the run's production cost.
    pub fn validate(&self, table: &CostTable) -> Result<(u32, Decimal)> {
        let hundred = Decimal::ONE_HUNDRED;

        if self.commission_pct < Decimal::ZERO || self.commission_pct >= hundred {
            return Err(Error::invalid(format!(
                "commission must be in [0, 100), got {}",
                self.commission_pct
            )));
        }
        if let Some(margin) = self.target_margin_pct {
            if margin < Decimal::ZERO || margin >= hundred {
                return Err(Error::invalid(format!(
                    "target margin must be in [0, 100), got {}",
                    margin
                )));
            }
        }
        if self.sell_price.amount() < Decimal::ZERO {
            return Err(Error::invalid(format!(
                "sell price must not be negative, got {}",
                self.sell_price.amount()
            )));
        }

        table.lookup(&self.bag_size, self.run_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ScenarioConfig {
        ScenarioConfig::new(
            "5kg (36 Módulos)",
            10_000,
            CampaignDuration::OneMonth,
            SellPrice::Monthly(Decimal::new(500, 0)),
            Decimal::new(10, 0),
        )
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!("3".parse::<CampaignDuration>().unwrap(), CampaignDuration::ThreeMonths);
        assert_eq!(CampaignDuration::try_from(6).unwrap().months(), 6);
        assert!(matches!(CampaignDuration::try_from(2), Err(Error::UnsupportedDuration(2))));
        assert!(matches!(CampaignDuration::try_from(0), Err(Error::UnsupportedDuration(0))));
    }

    #[test]
    fn test_sell_price_per_campaign() {
        let price = Decimal::new(500, 0);
        assert_eq!(SellPrice::Monthly(price).per_campaign(3), Decimal::new(1500, 0));
        assert_eq!(SellPrice::TotalContract(price).per_campaign(3), price);
    }

    #[test]
    fn test_validate_ok() {
        let table = CostTable::default_catalog();
        let (modules, cost) = scenario().validate(&table).unwrap();
        assert_eq!(modules, 36);
        assert_eq!(cost, Decimal::new(453150, 2));
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentages() {
        let table = CostTable::default_catalog();

        let mut s = scenario();
        s.commission_pct = Decimal::ONE_HUNDRED;
        assert!(matches!(s.validate(&table), Err(Error::InvalidConfiguration(_))));

        let s = scenario().with_target_margin(Decimal::new(-1, 0));
        assert!(matches!(s.validate(&table), Err(Error::InvalidConfiguration(_))));

        let mut s = scenario();
        s.sell_price = SellPrice::Monthly(Decimal::new(-1, 0));
        assert!(s.validate(&table).is_err());
    }

    #[test]
    fn test_validate_unknown_run() {
        let table = CostTable::default_catalog();
        let mut s = scenario();
        s.run_size = 12_345;
        assert!(matches!(s.validate(&table), Err(Error::UnknownRunSize { .. })));
    }
}
