//! Suggested price for every bag × run size × duration in the cost table
//!
//! Accepts config via environment variables:
//!   TARGET_MARGIN (percent, default 30), COMMISSION (percent, default 10),
//!   COSTS_DIR (cost CSV directory; embedded catalog when unset),
//!   OUTPUT_PATH (default price_matrix.csv), MARKUP (margin-plus-commission | margin-only)

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use log::warn;
use rayon::prelude::*;
use rust_decimal::Decimal;

use campaign_pricing::projection::MarkupPolicy;
use campaign_pricing::report::{format_currency, format_plain};
use campaign_pricing::{
    CampaignDuration, CostBasis, EngineConfig, ProjectionEngine, ScenarioConfig, SellPrice,
};

/// Suggested price for one cell, or `None` with the reason logged
fn suggest(engine: &ProjectionEngine, scenario: &ScenarioConfig) -> Option<Decimal> {
    match engine.suggest_price(scenario) {
        Ok(price) => Some(price),
        Err(e) => {
            warn!(
                "no price for '{}' run {} ({}): {}",
                scenario.bag_size, scenario.run_size, scenario.duration, e
            );
            None
        }
    }
}

/// One cell of the matrix
#[derive(Debug, Clone)]
struct MatrixRow {
    bag_size: String,
    modules: u32,
    run_size: u32,
    months: u32,
    production_cost: Decimal,
    monthly_price: Option<Decimal>,
    contract_price: Option<Decimal>,
}

fn env_decimal(name: &str, default: Decimal) -> Result<Decimal> {
    match env::var(name) {
        Ok(raw) => Decimal::from_str(raw.trim()).with_context(|| format!("parsing {}", name)),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();

    let margin = env_decimal("TARGET_MARGIN", Decimal::from(30))?;
    let commission = env_decimal("COMMISSION", Decimal::from(10))?;
    let output_path = env::var("OUTPUT_PATH").unwrap_or_else(|_| "price_matrix.csv".to_string());
    let markup = match env::var("MARKUP") {
        Ok(raw) => MarkupPolicy::from_str(&raw)?,
        Err(_) => MarkupPolicy::default(),
    };

    let costs = match env::var("COSTS_DIR") {
        Ok(dir) => CostBasis::from_csv_path(Path::new(&dir))
            .with_context(|| format!("loading costs from {}", dir))?,
        Err(_) => CostBasis::default_catalog(),
    };

    let config = EngineConfig {
        markup,
        ..Default::default()
    };
    let engine = ProjectionEngine::new(costs, config);

    let cells: Vec<(String, u32, CampaignDuration)> = engine
        .costs()
        .table
        .bags()
        .iter()
        .flat_map(|bag| {
            bag.run_sizes().flat_map(move |run| {
                CampaignDuration::ALL
                    .into_iter()
                    .map(move |d| (bag.label.clone(), run, d))
            })
        })
        .collect();

    println!(
        "Pricing {} combinations (margin {}%, commission {}%, {})...",
        cells.len(),
        margin,
        commission,
        markup
    );

    // Each cell is independent; the engine is shared read-only
    let rows: Vec<MatrixRow> = cells
        .par_iter()
        .map(|(bag, run, duration)| -> Result<MatrixRow> {
            let monthly = ScenarioConfig::new(
                bag.clone(),
                *run,
                *duration,
                SellPrice::Monthly(Decimal::ZERO),
                commission,
            )
            .with_target_margin(margin);
            let mut contract = monthly.clone();
            contract.sell_price = SellPrice::TotalContract(Decimal::ZERO);

            let (modules, production_cost) = engine.costs().table.lookup(bag, *run)?;

            Ok(MatrixRow {
                bag_size: bag.clone(),
                modules,
                run_size: *run,
                months: duration.months(),
                production_cost,
                monthly_price: suggest(&engine, &monthly),
                contract_price: suggest(&engine, &contract),
            })
        })
        .collect::<Result<_>>()?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path))?;
    writer.write_record([
        "bag_size",
        "modules",
        "run_size",
        "months",
        "production_cost",
        "monthly_price",
        "contract_price",
    ])?;
    for row in &rows {
        writer.write_record([
            row.bag_size.clone(),
            row.modules.to_string(),
            row.run_size.to_string(),
            row.months.to_string(),
            format_plain(row.production_cost),
            row.monthly_price.map(format_plain).unwrap_or_default(),
            row.contract_price.map(format_plain).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path);

    // Cheapest campaign price per bag at the longest duration
    println!("\nLowest 6-month contract price per bag:");
    for bag in engine.costs().table.bags() {
        let best = rows
            .iter()
            .filter(|r| r.bag_size == bag.label && r.months == 6)
            .filter_map(|r| r.contract_price.map(|p| (r.run_size, p)))
            .min_by(|a, b| a.1.cmp(&b.1));
        match best {
            Some((run, price)) => {
                println!("  {:<20} run {:>7}: {}", bag.label, run, format_currency(price))
            }
            None => println!("  {:<20} no valid price", bag.label),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
