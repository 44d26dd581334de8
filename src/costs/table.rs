//! Production cost table: bag sizes, module capacity and cost per run size

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One packaging tier and the production cost of each run size it is offered in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagSpec {
    /// Display label, also the lookup key (e.g. "5kg (36 Módulos)")
    pub label: String,

    /// Modules sold per bag run
    pub module_capacity: u32,

    /// Production cost by run size (units printed)
    pub run_prices: BTreeMap<u32, Decimal>,
}

impl BagSpec {
    pub fn new(label: impl Into<String>, module_capacity: u32) -> Self {
        Self {
            label: label.into(),
            module_capacity,
            run_prices: BTreeMap::new(),
        }
    }

    /// Builder-style helper for the embedded table
    pub fn with_run(mut self, run_size: u32, production_cost: Decimal) -> Self {
        self.run_prices.insert(run_size, production_cost);
        self
    }

    /// Run sizes offered for this bag, ascending
    pub fn run_sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.run_prices.keys().copied()
    }

    pub fn production_cost(&self, run_size: u32) -> Option<Decimal> {
        self.run_prices.get(&run_size).copied()
    }
}

/// Static reference table of bag sizes, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    bags: Vec<BagSpec>,
}

impl CostTable {
    /// Build a table, rejecting duplicate labels, empty bags and zero capacity
    pub fn new(bags: Vec<BagSpec>) -> Result<Self> {
        for (i, bag) in bags.iter().enumerate() {
            if bag.module_capacity == 0 {
                return Err(Error::InvalidRecord(format!(
                    "bag size '{}' has zero module capacity",
                    bag.label
                )));
            }
            if bag.run_prices.is_empty() {
                return Err(Error::InvalidRecord(format!(
                    "bag size '{}' has no run sizes",
                    bag.label
                )));
            }
            if let Some((run, cost)) = bag.run_prices.iter().find(|(_, c)| **c < Decimal::ZERO) {
                return Err(Error::InvalidRecord(format!(
                    "bag size '{}' run {} has negative production cost {}",
                    bag.label, run, cost
                )));
            }
            if bags[..i].iter().any(|b| b.label == bag.label) {
                return Err(Error::InvalidRecord(format!(
                    "duplicate bag size '{}'",
                    bag.label
                )));
            }
        }
        Ok(Self { bags })
    }

    /// Production costs quoted by the packaging supplier
    pub fn default_catalog() -> Self {
        Self {
            bags: vec![
                BagSpec::new("5kg (36 Módulos)", 36)
                    .with_run(10_000, Decimal::new(453150, 2))
                    .with_run(15_000, Decimal::new(517710, 2))
                    .with_run(20_000, Decimal::new(631960, 2))
                    .with_run(30_000, Decimal::new(830640, 2))
                    .with_run(40_000, Decimal::new(974440, 2))
                    .with_run(50_000, Decimal::new(1218050, 2))
                    .with_run(100_000, Decimal::new(2066300, 2))
                    .with_run(200_000, Decimal::new(4092800, 2)),
                BagSpec::new("4kg (32 Módulos)", 32)
                    .with_run(20_000, Decimal::new(522500, 2))
                    .with_run(30_000, Decimal::new(712230, 2))
                    .with_run(40_000, Decimal::new(949640, 2))
                    .with_run(50_000, Decimal::new(1006650, 2))
                    .with_run(100_000, Decimal::new(1706900, 2))
                    .with_run(200_000, Decimal::new(3381000, 2)),
            ],
        }
    }

    pub fn bags(&self) -> &[BagSpec] {
        &self.bags
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bags.iter().map(|b| b.label.as_str())
    }

    pub fn bag(&self, label: &str) -> Result<&BagSpec> {
        self.bags
            .iter()
            .find(|b| b.label == label)
            .ok_or_else(|| Error::UnknownBagSize(label.to_string()))
    }

    /// Look up the module capacity and production cost of a bag/run pair
    pub fn lookup(&self, label: &str, run_size: u32) -> Result<(u32, Decimal)> {
        let bag = self.bag(label)?;
        let cost = bag.production_cost(run_size).ok_or_else(|| Error::UnknownRunSize {
            bag_size: label.to_string(),
            run_size,
        })?;
        Ok((bag.module_capacity, cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookup() {
        let table = CostTable::default_catalog();

        let (modules, cost) = table.lookup("5kg (36 Módulos)", 10_000).unwrap();
        assert_eq!(modules, 36);
        assert_eq!(cost, Decimal::new(453150, 2));

        let (modules, cost) = table.lookup("4kg (32 Módulos)", 200_000).unwrap();
        assert_eq!(modules, 32);
        assert_eq!(cost, Decimal::new(3381000, 2));
    }

    #[test]
    fn test_labels_keep_display_order() {
        let table = CostTable::default_catalog();
        let labels: Vec<_> = table.labels().collect();
        assert_eq!(labels, vec!["5kg (36 Módulos)", "4kg (32 Módulos)"]);
    }

    #[test]
    fn test_run_not_offered_for_bag() {
        let table = CostTable::default_catalog();
        // 10k run only exists for the 5kg bag
        match table.lookup("4kg (32 Módulos)", 10_000) {
            Err(Error::UnknownRunSize { run_size, .. }) => assert_eq!(run_size, 10_000),
            other => panic!("expected UnknownRunSize, got {:?}", other),
        }
        assert!(matches!(table.lookup("3kg", 10_000), Err(Error::UnknownBagSize(_))));
    }

    #[test]
    fn test_new_rejects_bad_bags() {
        let zero = BagSpec::new("empty", 0).with_run(1, Decimal::ONE);
        assert!(CostTable::new(vec![zero]).is_err());

        let no_runs = BagSpec::new("no runs", 10);
        assert!(CostTable::new(vec![no_runs]).is_err());

        let a = BagSpec::new("dup", 10).with_run(1, Decimal::ONE);
        assert!(CostTable::new(vec![a.clone(), a]).is_err());
    }
}
