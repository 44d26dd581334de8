//! Campaign scenario inputs and batch loading

mod data;
pub mod loader;

pub use data::{CampaignDuration, PriceBasis, ScenarioConfig, SellPrice};
pub use loader::{load_scenarios, load_scenarios_from_reader, NamedScenario};
