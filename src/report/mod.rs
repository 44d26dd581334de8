//! Presentation helpers: currency formatting, terminal statement table and
//! CSV export

mod export;
mod format;
mod table;

pub use export::{write_statement_csv, write_statement_csv_file, EXPORT_FILE_NAME};
pub use format::{
    format_amount, format_currency, format_modules, format_percent, format_plain, CURRENCY_SYMBOL,
};
pub use table::{render_cost_table, render_projection, render_statement};

use rust_decimal::Decimal;

use crate::projection::MonthlyStatementRow;

/// Statement lines, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItem {
    Revenue,
    ProductionCost,
    ShippingCost,
    FixedCosts,
    Commission,
    TotalCosts,
    NetProfit,
}

impl LineItem {
    pub const ALL: [LineItem; 7] = [
        LineItem::Revenue,
        LineItem::ProductionCost,
        LineItem::ShippingCost,
        LineItem::FixedCosts,
        LineItem::Commission,
        LineItem::TotalCosts,
        LineItem::NetProfit,
    ];

    /// Field name used in CSV exports
    pub fn key(self) -> &'static str {
        match self {
            LineItem::Revenue => "revenue",
            LineItem::ProductionCost => "production_cost",
            LineItem::ShippingCost => "shipping_cost",
            LineItem::FixedCosts => "fixed_costs",
            LineItem::Commission => "commission",
            LineItem::TotalCosts => "total_costs",
            LineItem::NetProfit => "net_profit",
        }
    }

    /// Row label on the terminal table
    pub fn label(self) -> &'static str {
        match self {
            LineItem::Revenue => "Revenue",
            LineItem::ProductionCost => "Production",
            LineItem::ShippingCost => "Shipping",
            LineItem::FixedCosts => "Fixed costs",
            LineItem::Commission => "Commission",
            LineItem::TotalCosts => "Total costs",
            LineItem::NetProfit => "Net profit",
        }
    }

    pub fn value(self, row: &MonthlyStatementRow) -> Decimal {
        match self {
            LineItem::Revenue => row.revenue,
            LineItem::ProductionCost => row.production_cost,
            LineItem::ShippingCost => row.shipping_cost,
            LineItem::FixedCosts => row.fixed_costs,
            LineItem::Commission => row.commission,
            LineItem::TotalCosts => row.total_costs(),
            LineItem::NetProfit => row.net_profit,
        }
    }

    /// Sum of this line across all months
    pub fn total(self, rows: &[MonthlyStatementRow]) -> Decimal {
        rows.iter().map(|r| self.value(r)).sum()
    }
}
