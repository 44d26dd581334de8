//! Terminal rendering of statements, metrics and the cost table

use std::fmt::Write;

use rust_decimal::Decimal;

use super::format::{format_amount, format_currency, format_modules, format_percent};
use super::LineItem;
use crate::costs::CostBasis;
use crate::projection::{BreakEvenPolicy, CampaignProjection, MonthlyStatementRow};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Pad `text` to `width` first, then colour it, so ANSI codes never count
/// towards alignment
fn cell(text: &str, width: usize, colour: Option<&str>) -> String {
    let padded = format!("{:>width$}", text, width = width);
    match colour {
        Some(code) => format!("{}{}{}", code, padded, RESET),
        None => padded,
    }
}

fn sign_marker(value: Decimal) -> &'static str {
    if value < Decimal::ZERO {
        "▼"
    } else {
        "▲"
    }
}

/// Statement table with one column per month and a total column.
///
/// Net-profit cells carry a ▲/▼ marker by sign, and are coloured when
/// `colour` is set.
pub fn render_statement(rows: &[MonthlyStatementRow], colour: bool) -> String {
    let mut header = vec!["".to_string()];
    header.extend(rows.iter().map(|r| format!("Month {}", r.month)));
    header.push("Total".to_string());

    let mut lines: Vec<(LineItem, Vec<String>)> = Vec::new();
    for item in LineItem::ALL {
        let mut cells: Vec<String> = rows.iter().map(|r| format_amount(item.value(r))).collect();
        cells.push(format_amount(item.total(rows)));
        if item == LineItem::NetProfit {
            let values = rows
                .iter()
                .map(|r| item.value(r))
                .chain(std::iter::once(item.total(rows)));
            for (c, v) in cells.iter_mut().zip(values) {
                c.push(' ');
                c.push_str(sign_marker(v));
            }
        }
        lines.push((item, cells));
    }

    let label_width = LineItem::ALL.iter().map(|i| i.label().chars().count()).max().unwrap_or(0);
    let col_width = lines
        .iter()
        .flat_map(|(_, cells)| cells.iter())
        .chain(header.iter().skip(1))
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", header[0], label_width = label_width);
    for h in &header[1..] {
        out.push_str(&cell(h, col_width, None));
    }
    out.push('\n');
    out.push_str(&"-".repeat(label_width + col_width * (header.len() - 1)));
    out.push('\n');

    for (item, cells) in &lines {
        let _ = write!(out, "{:<label_width$}", item.label(), label_width = label_width);
        let values = rows.iter().map(|r| item.value(r)).chain(std::iter::once(item.total(rows)));
        for (text, value) in cells.iter().zip(values) {
            let tint = match (*item, colour) {
                (LineItem::NetProfit, true) if value < Decimal::ZERO => Some(RED),
                (LineItem::NetProfit, true) => Some(GREEN),
                _ => None,
            };
            out.push_str(&cell(text, col_width, tint));
        }
        out.push('\n');
    }

    out
}

/// Full dashboard: headline metrics, statement, cost details, alerts
pub fn render_projection(projection: &CampaignProjection, colour: bool) -> String {
    let summary = &projection.summary;
    let scenario = &projection.scenario;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Campaign: {} | run {} | {} | commission {}%",
        scenario.bag_size, scenario.run_size, scenario.duration, scenario.commission_pct
    );
    let _ = writeln!(out, "{}", "=".repeat(60));

    let _ = writeln!(out, "Revenue:      {}", format_currency(summary.total_revenue));
    let _ = writeln!(
        out,
        "Net profit:   {} ({})",
        format_currency(summary.net_profit_total),
        format_percent(summary.margin_percent)
    );
    match &projection.break_even {
        Some(be) => {
            let policy = match be.policy {
                BreakEvenPolicy::SingleMonth => "month 1",
                BreakEvenPolicy::WholeCampaign => "whole campaign",
            };
            let _ = writeln!(
                out,
                "Break-even:   {} / {} ({}, {} available)",
                format_modules(be.modules),
                format_currency(be.revenue),
                policy,
                be.available_modules
            );
        }
        None => {
            let _ = writeln!(out, "Break-even:   n/a");
        }
    }
    if let Some(price) = projection.suggested_price {
        let _ = writeln!(
            out,
            "Suggested:    {} per module ({:?} price, {}% target margin)",
            format_currency(price),
            scenario.sell_price.basis(),
            scenario.target_margin_pct.unwrap_or_default()
        );
    }
    out.push('\n');

    out.push_str(&render_statement(&projection.rows, colour));
    out.push('\n');

    let costs = &projection.costs;
    let _ = writeln!(out, "Cost details:");
    let _ = writeln!(out, "  Production:             {}", format_currency(costs.production_cost));
    let _ = writeln!(out, "  Shipping:               {}", format_currency(costs.shipping));
    let _ = writeln!(
        out,
        "  Fixed costs ({}m):        {}",
        costs.months,
        format_currency(costs.fixed_total)
    );
    let _ = writeln!(
        out,
        "  Fixed costs cover royalties, MEI, fuel and other ({}/month)",
        format_currency(costs.fixed_monthly)
    );
    out.push('\n');

    for notice in &projection.notices {
        let _ = writeln!(out, "! {}", notice);
    }
    for alert in &projection.alerts {
        let marker = if alert.is_warning() { "!" } else { "✓" };
        let _ = writeln!(out, "{} {}", marker, alert);
    }

    out
}

/// Bag sizes with their run sizes and production costs
pub fn render_cost_table(costs: &CostBasis) -> String {
    let mut out = String::new();

    for bag in costs.table.bags() {
        let _ = writeln!(out, "{} ({} modules)", bag.label, bag.module_capacity);
        for (run, cost) in &bag.run_prices {
            let _ = writeln!(out, "  {:>8} units  {:>16}", run, format_currency(*cost));
        }
    }

    let _ = writeln!(out, "Fixed costs:");
    for (name, amount) in costs.fixed.items() {
        let _ = writeln!(out, "  {:<10} {:>16}", name, format_currency(amount));
    }
    let _ = writeln!(
        out,
        "  {:<10} {:>16}",
        "monthly",
        format_currency(costs.fixed.monthly_recurring())
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignDuration, ScenarioConfig, SellPrice};
    use crate::projection::{EngineConfig, ProjectionEngine};

    fn projection(price: i64) -> CampaignProjection {
        let engine = ProjectionEngine::new(CostBasis::default_catalog(), EngineConfig::default());
        let s = ScenarioConfig::new(
            "5kg (36 Módulos)",
            10_000,
            CampaignDuration::ThreeMonths,
            SellPrice::Monthly(Decimal::from(price)),
            Decimal::from(10),
        )
        .with_target_margin(Decimal::from(30));
        engine.project(&s).unwrap()
    }

    #[test]
    fn test_render_statement_columns() {
        let text = render_statement(&projection(500).rows, false);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Month 1"));
        assert!(lines[0].contains("Month 3"));
        assert!(lines[0].ends_with("Total"));
        let net = lines.iter().find(|l| l.starts_with("Net profit")).unwrap();
        assert!(net.contains("9,888.50 ▲"));
        assert!(net.contains("39,928.50 ▲"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_statement_marks_losses() {
        let text = render_statement(&projection(100).rows, true);
        let net = text.lines().find(|l| l.starts_with("Net profit")).unwrap();
        // Month 1 at 3,600 revenue cannot cover setup costs
        assert!(net.contains("▼"));
        assert!(net.contains(RED));
    }

    #[test]
    fn test_render_projection_sections() {
        let text = render_projection(&projection(500), false);
        assert!(text.contains("Revenue:      R$ 54,000.00"));
        assert!(text.contains("Break-even:"));
        assert!(text.contains("Suggested:"));
        assert!(text.contains("Cost details:"));
        assert!(text.contains("Profitable campaign configuration"));
    }

    #[test]
    fn test_render_cost_table() {
        let text = render_cost_table(&CostBasis::default_catalog());
        assert!(text.contains("5kg (36 Módulos) (36 modules)"));
        assert!(text.contains("R$ 4,531.50"));
        assert!(text.contains("R$ 1,180.00"));
    }
}
