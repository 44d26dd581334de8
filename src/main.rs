//! Campaign Pricing CLI
//!
//! Command-line front end for projecting campaign income statements

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use campaign_pricing::campaign::load_scenarios;
use campaign_pricing::projection::{BreakEvenPolicy, CommissionBasis, MarkupPolicy};
use campaign_pricing::report::{
    format_currency, format_modules, format_percent, render_cost_table, render_projection,
    write_statement_csv_file,
};
use campaign_pricing::{
    CampaignDuration, CostBasis, EngineConfig, PriceBasis, ScenarioConfig, ScenarioRunner,
    SellPrice,
};

#[derive(Parser)]
#[command(name = "campaign_pricing")]
#[command(about = "Pricing and monthly income statement for module campaigns")]
struct Cli {
    /// Load the cost table and fixed costs from this directory instead of
    /// the embedded catalog
    #[arg(long, global = true)]
    costs_dir: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Break-even policy: whole-campaign or single-month
    #[arg(long, global = true, default_value = "whole-campaign")]
    break_even: BreakEvenPolicy,

    /// Markup divisor: margin-plus-commission or margin-only
    #[arg(long, global = true, default_value = "margin-plus-commission")]
    markup: MarkupPolicy,

    /// Commission basis: gross or net-of-setup
    #[arg(long, global = true, default_value = "gross")]
    commission_basis: CommissionBasis,
}

impl EngineArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            break_even: self.break_even,
            markup: self.markup,
            commission_basis: self.commission_basis,
        }
    }
}

#[derive(Args)]
struct ScenarioArgs {
    /// Bag size label, as listed by `costs`
    #[arg(short, long, default_value = "5kg (36 Módulos)")]
    bag: String,

    /// Run size (units)
    #[arg(short, long, default_value_t = 10_000)]
    run: u32,

    /// Campaign duration in months (1, 3 or 6)
    #[arg(short, long, default_value = "1")]
    months: CampaignDuration,

    /// Sell price per module
    #[arg(short, long, default_value = "500.00")]
    price: Decimal,

    /// The price covers the whole campaign instead of one month
    #[arg(long)]
    total_contract: bool,

    /// Sales-rep commission in percent
    #[arg(short, long, default_value = "0")]
    commission: Decimal,

    /// Target margin in percent (enables the price suggestion)
    #[arg(long)]
    margin: Option<Decimal>,
}

impl ScenarioArgs {
    fn scenario(&self) -> ScenarioConfig {
        let basis = if self.total_contract {
            PriceBasis::TotalContract
        } else {
            PriceBasis::Monthly
        };
        let mut scenario = ScenarioConfig::new(
            self.bag.clone(),
            self.run,
            self.months,
            SellPrice::new(basis, self.price),
            self.commission,
        );
        scenario.target_margin_pct = self.margin;
        scenario
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Project the monthly income statement for a scenario
    Project {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Write the statement to campaign_statement.csv in this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Disable coloured net-profit cells
        #[arg(long)]
        no_color: bool,
    },

    /// Suggest a per-module price for a target margin
    Suggest {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// List bag sizes, run sizes and fixed costs
    Costs,

    /// Project every scenario in a CSV file
    Batch {
        /// Scenario file (name,bag_size,run_size,months,price,price_basis,commission_pct,target_margin_pct)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let costs = match &cli.costs_dir {
        Some(dir) => CostBasis::from_csv_path(dir)
            .with_context(|| format!("loading costs from {}", dir.display()))?,
        None => CostBasis::default_catalog(),
    };
    let runner = ScenarioRunner::with_costs(costs);
    let config = cli.engine.config();

    match cli.command {
        Commands::Project { scenario, export, no_color } => {
            let projection = runner.run(&scenario.scenario(), config)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print!("{}", render_projection(&projection, !no_color));
            }

            if let Some(dir) = export {
                let path = write_statement_csv_file(&dir, &projection.rows)
                    .with_context(|| format!("exporting statement to {}", dir.display()))?;
                eprintln!("Statement written to: {}", path.display());
            }
        }
        Commands::Suggest { scenario } => {
            let scenario = scenario.scenario();
            let price = runner.engine(config).suggest_price(&scenario)?;

            if cli.json {
                let out = serde_json::json!({
                    "scenario": scenario,
                    "markup": config.markup,
                    "suggested_price": price.round_dp(2),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let basis = match scenario.sell_price.basis() {
                    PriceBasis::Monthly => "per month",
                    PriceBasis::TotalContract => "for the whole campaign",
                };
                println!(
                    "Suggested price: {} per module {} ({}, {})",
                    format_currency(price),
                    basis,
                    scenario.duration,
                    config.markup
                );
            }
        }
        Commands::Costs => {
            if cli.json {
                let out = serde_json::json!({
                    "bags": runner.costs().table.bags(),
                    "fixed": runner.costs().fixed,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", render_cost_table(runner.costs()));
            }
        }
        Commands::Batch { input } => {
            let scenarios = load_scenarios(&input)
                .with_context(|| format!("reading scenarios from {}", input.display()))?;
            let results = runner.run_batch(&scenarios, config);

            if cli.json {
                let out: Vec<_> = results
                    .iter()
                    .map(|(name, result)| match result {
                        Ok(p) => serde_json::json!({ "name": name, "projection": p }),
                        Err(e) => serde_json::json!({ "name": name, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "{:<20} {:>18} {:>18} {:>8} {:>14}",
                    "Scenario", "Revenue", "Net profit", "Margin", "Break-even"
                );
                println!("{}", "-".repeat(82));
                for (name, result) in &results {
                    match result {
                        Ok(p) => println!(
                            "{:<20} {:>18} {:>18} {:>8} {:>14}",
                            name,
                            format_currency(p.summary.total_revenue),
                            format_currency(p.summary.net_profit_total),
                            format_percent(p.summary.margin_percent),
                            p.break_even
                                .as_ref()
                                .map(|be| format_modules(be.modules))
                                .unwrap_or_else(|| "n/a".to_string()),
                        ),
                        Err(e) => println!("{:<20} error: {}", name, e),
                    }
                }
            }
        }
    }

    Ok(())
}
