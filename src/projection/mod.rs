//! Projection engine for campaign pricing and monthly income statements

mod alerts;
mod engine;
mod pricing;
mod state;
mod statement;

pub use alerts::{assess, Alert};
pub use engine::{
    BreakEvenPolicy, CampaignProjection, CommissionBasis, EngineConfig, MarkupPolicy,
    ProjectionEngine,
};
pub use pricing::{single_month_break_even, suggested_price, whole_campaign_break_even, BreakEven};
pub use state::{CampaignState, Statement, StatementIter};
pub use statement::{summarize, CampaignSummary, CostBreakdown, MonthlyStatementRow};
