//! Scenario runner for batch evaluations
//!
//! Loads the cost basis once, then evaluates many scenarios or engine
//! configurations without re-reading CSV files.

use log::info;

use crate::campaign::{NamedScenario, ScenarioConfig};
use crate::costs::CostBasis;
use crate::error::Result;
use crate::projection::{CampaignProjection, EngineConfig, ProjectionEngine};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for config in [EngineConfig::default(), single_month] {
///     let projection = runner.run(&scenario, config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    costs: CostBasis,
}

impl ScenarioRunner {
    /// Create runner with the embedded cost catalog
    pub fn new() -> Self {
        Self {
            costs: CostBasis::default_catalog(),
        }
    }

    /// Create runner by loading costs from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            costs: CostBasis::from_csv()?,
        })
    }

    /// Create runner from a specific cost data directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            costs: CostBasis::from_csv_path(path)?,
        })
    }

    pub fn with_costs(costs: CostBasis) -> Self {
        Self { costs }
    }

    /// Engine over the runner's costs
    pub fn engine(&self, config: EngineConfig) -> ProjectionEngine {
        ProjectionEngine::new(self.costs.clone(), config)
    }

    /// Project a single scenario
    pub fn run(
        &self,
        scenario: &ScenarioConfig,
        config: EngineConfig,
    ) -> Result<CampaignProjection> {
        self.engine(config).project(scenario)
    }

    /// Project every named scenario with the same engine config.
    ///
    /// Each scenario succeeds or fails on its own.
    pub fn run_batch(
        &self,
        scenarios: &[NamedScenario],
        config: EngineConfig,
    ) -> Vec<(String, Result<CampaignProjection>)> {
        let engine = self.engine(config);
        let results: Vec<_> = scenarios
            .iter()
            .map(|s| (s.name.clone(), engine.project(&s.config)))
            .collect();

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!("ran {} scenarios ({} failed)", results.len(), failed);
        results
    }

    /// Project one scenario under several engine configurations
    pub fn run_policies(
        &self,
        scenario: &ScenarioConfig,
        configs: &[EngineConfig],
    ) -> Result<Vec<CampaignProjection>> {
        configs
            .iter()
            .map(|config| self.engine(*config).project(scenario))
            .collect()
    }

    pub fn costs(&self) -> &CostBasis {
        &self.costs
    }

    pub fn costs_mut(&mut self) -> &mut CostBasis {
        &mut self.costs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
