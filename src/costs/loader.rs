//! CSV-based cost loader
//!
//! Loads the production cost table and fixed costs from CSV files in data/costs/

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use super::{BagSpec, CostTable, FixedCosts};
use crate::error::{Error, Result};

/// Default path to the cost data directory
pub const DEFAULT_COSTS_PATH: &str = "data/costs";

/// Load the production cost table from `cost_table.csv`
/// Columns: bag_size, modules, run_size, production_cost
pub fn load_cost_table(path: &Path) -> Result<CostTable> {
    let file = File::open(path.join("cost_table.csv"))?;
    load_cost_table_from_reader(file)
}

/// Load a cost table from any reader; bag order follows first appearance
pub fn load_cost_table_from_reader<R: Read>(reader: R) -> Result<CostTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut bags: Vec<BagSpec> = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 4 {
            return Err(Error::InvalidRecord(format!(
                "cost table row has {} fields, expected 4",
                record.len()
            )));
        }
        let label = record[0].trim();
        let modules: u32 = record[1]
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("bad module count '{}'", &record[1])))?;
        let run_size: u32 = record[2]
            .trim()
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("bad run size '{}'", &record[2])))?;
        let cost = Decimal::from_str(record[3].trim())?;

        match bags.iter_mut().find(|b| b.label == label) {
            Some(bag) => {
                if bag.module_capacity != modules {
                    return Err(Error::InvalidRecord(format!(
                        "bag size '{}' listed with {} and {} modules",
                        label, bag.module_capacity, modules
                    )));
                }
                if bag.run_prices.insert(run_size, cost).is_some() {
                    return Err(Error::InvalidRecord(format!(
                        "bag size '{}' lists run {} twice",
                        label, run_size
                    )));
                }
            }
            None => bags.push(BagSpec::new(label, modules).with_run(run_size, cost)),
        }
    }

    debug!("loaded cost table with {} bag sizes", bags.len());
    CostTable::new(bags)
}

/// Load fixed costs from `fixed_costs.csv`
/// Columns: item, amount. Items not listed keep their default value.
pub fn load_fixed_costs(path: &Path) -> Result<FixedCosts> {
    let file = File::open(path.join("fixed_costs.csv"))?;
    load_fixed_costs_from_reader(file)
}

pub fn load_fixed_costs_from_reader<R: Read>(reader: R) -> Result<FixedCosts> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut fixed = FixedCosts::default();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(Error::InvalidRecord(format!(
                "fixed cost row has {} fields, expected 2",
                record.len()
            )));
        }
        let amount = Decimal::from_str(record[1].trim())?;
        if amount < Decimal::ZERO {
            return Err(Error::InvalidRecord(format!(
                "negative fixed cost for '{}'",
                &record[0]
            )));
        }
        let slot = match record[0].trim().to_ascii_lowercase().as_str() {
            "royalties" => &mut fixed.royalties,
            "mei" => &mut fixed.mei,
            "fuel" => &mut fixed.fuel,
            "other" => &mut fixed.other,
            "shipping" => &mut fixed.shipping,
            other => {
                return Err(Error::InvalidRecord(format!("unknown fixed cost item '{}'", other)))
            }
        };
        *slot = amount;
    }

    Ok(fixed)
}

/// Both cost files loaded from one directory
pub struct LoadedCosts {
    pub table: CostTable,
    pub fixed: FixedCosts,
}

impl LoadedCosts {
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_COSTS_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            table: load_cost_table(path)?,
            fixed: load_fixed_costs(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_costs() {
        let result = LoadedCosts::load_default();
        assert!(result.is_ok(), "Failed to load costs: {:?}", result.err());

        let loaded = result.unwrap();

        // Shipped data matches the embedded catalog
        assert_eq!(loaded.table, CostTable::default_catalog());
        assert_eq!(loaded.fixed, FixedCosts::default());
    }

    #[test]
    fn test_cost_table_from_reader() {
        let data = "bag_size,modules,run_size,production_cost\n\
                    small,10,1000,100.50\n\
                    small,10,2000,180.00\n\
                    large,20,1000,210.25\n";
        let table = load_cost_table_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.bags().len(), 2);
        assert_eq!(table.bags()[0].label, "small");
        assert_eq!(table.lookup("small", 2000).unwrap(), (10, Decimal::new(18000, 2)));
        assert_eq!(table.lookup("large", 1000).unwrap().1, Decimal::new(21025, 2));
    }

    #[test]
    fn test_cost_table_rejects_inconsistent_capacity() {
        let data = "bag_size,modules,run_size,production_cost\n\
                    small,10,1000,100\n\
                    small,12,2000,180\n";
        assert!(matches!(
            load_cost_table_from_reader(data.as_bytes()),
            Err(Error::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_fixed_costs_partial_override() {
        let data = "item,amount\nfuel,650.00\nShipping,720\n";
        let fixed = load_fixed_costs_from_reader(data.as_bytes()).unwrap();

        assert_eq!(fixed.fuel, Decimal::new(65000, 2));
        assert_eq!(fixed.shipping, Decimal::new(720, 0));
        assert_eq!(fixed.royalties, Decimal::new(399, 0));
    }

    #[test]
    fn test_fixed_costs_unknown_item() {
        let data = "item,amount\nrent,100\n";
        assert!(load_fixed_costs_from_reader(data.as_bytes()).is_err());
    }
}
