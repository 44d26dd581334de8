//! Load named scenario batches from CSV

use std::path::Path;
use std::str::FromStr;

use csv::Reader;
use rust_decimal::Decimal;

use super::{CampaignDuration, PriceBasis, ScenarioConfig, SellPrice};
use crate::error::{Error, Result};

/// A scenario tagged with the name it was given in the batch file
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NamedScenario {
    pub name: String,
    pub config: ScenarioConfig,
}

/// Raw CSV row; decimal columns stay strings so amounts parse exactly
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    bag_size: String,
    run_size: u32,
    months: u32,
    price: String,
    #[serde(default)]
    price_basis: Option<String>,
    commission_pct: String,
    #[serde(default)]
    target_margin_pct: Option<String>,
}

impl CsvRow {
    fn to_scenario(self) -> Result<NamedScenario> {
        let duration = CampaignDuration::try_from(self.months)?;

        let basis = match self.price_basis.as_deref().map(str::trim) {
            None | Some("") => PriceBasis::Monthly,
            Some(s) => PriceBasis::from_str(s)?,
        };
        let price = Decimal::from_str(self.price.trim())?;
        let commission = Decimal::from_str(self.commission_pct.trim())?;

        let mut config = ScenarioConfig::new(
            self.bag_size,
            self.run_size,
            duration,
            SellPrice::new(basis, price),
            commission,
        );

        if let Some(margin) = self.target_margin_pct.as_deref().map(str::trim) {
            if !margin.is_empty() {
                config = config.with_target_margin(Decimal::from_str(margin)?);
            }
        }

        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord("scenario without a name".to_string()));
        }

        Ok(NamedScenario {
            name: self.name,
            config,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedScenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedScenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
name,bag_size,run_size,months,price,price_basis,commission_pct,target_margin_pct
base,5kg (36 Módulos),10000,1,500.00,monthly,10,
quarter,5kg (36 Módulos),10000,3,500.00,,10,30
contract,4kg (32 Módulos),20000,3,1200,total,5,25
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(BATCH.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);

        let base = &scenarios[0];
        assert_eq!(base.name, "base");
        assert_eq!(base.config.sell_price, SellPrice::Monthly(Decimal::new(500, 0)));
        assert_eq!(base.config.target_margin_pct, None);

        let quarter = &scenarios[1];
        assert_eq!(quarter.config.duration, CampaignDuration::ThreeMonths);
        assert_eq!(quarter.config.target_margin_pct, Some(Decimal::new(30, 0)));

        let contract = &scenarios[2];
        assert_eq!(contract.config.sell_price, SellPrice::TotalContract(Decimal::new(1200, 0)));
        assert_eq!(contract.config.run_size, 20_000);
    }

    #[test]
    fn test_load_scenarios_rejects_bad_duration() {
        let data = "name,bag_size,run_size,months,price,price_basis,commission_pct,target_margin_pct\n\
                    two,5kg (36 Módulos),10000,2,500,monthly,10,\n";
        assert!(matches!(
            load_scenarios_from_reader(data.as_bytes()),
            Err(Error::UnsupportedDuration(2))
        ));
    }
}
