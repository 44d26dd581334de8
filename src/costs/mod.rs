//! Cost reference data: production cost table and campaign fixed costs

mod fixed;
mod table;
pub mod loader;

pub use fixed::FixedCosts;
pub use loader::LoadedCosts;
pub use table::{BagSpec, CostTable};

use std::path::Path;

use crate::error::Result;

/// Container for all cost reference data used by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct CostBasis {
    pub table: CostTable,
    pub fixed: FixedCosts,
}

impl CostBasis {
    /// Embedded cost table and fixed costs
    pub fn default_catalog() -> Self {
        Self {
            table: CostTable::default_catalog(),
            fixed: FixedCosts::default(),
        }
    }

    /// Load costs from CSV files in the default location (data/costs/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_COSTS_PATH))
    }

    /// Load costs from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedCosts::load_from(path)?;

        Ok(Self {
            table: loaded.table,
            fixed: loaded.fixed,
        })
    }
}

impl Default for CostBasis {
    fn default() -> Self {
        Self::default_catalog()
    }
}
