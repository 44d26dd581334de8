//! Campaign Pricing - projection engine for bagged module campaigns
//!
//! This library provides:
//! - Production cost table and fixed cost reference data (embedded or CSV)
//! - Scenario inputs with input-boundary validation
//! - Suggested pricing for a target margin
//! - Month-by-month income statement (DRE) and campaign totals
//! - Break-even under an explicit single-month or whole-campaign policy
//! - Terminal rendering and CSV export of the statement

pub mod campaign;
pub mod costs;
pub mod error;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use campaign::{CampaignDuration, PriceBasis, ScenarioConfig, SellPrice};
pub use costs::{CostBasis, CostTable, FixedCosts};
pub use error::{Error, Result};
pub use projection::{
    CampaignProjection, CampaignSummary, EngineConfig, MonthlyStatementRow, ProjectionEngine,
};
pub use scenario::ScenarioRunner;
