//! CSV export of the statement: one row per line item, one column per month

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use super::format::format_plain;
use super::LineItem;
use crate::error::Result;
use crate::projection::MonthlyStatementRow;

/// File name the calculator always exports to
pub const EXPORT_FILE_NAME: &str = "campaign_statement.csv";

/// Write the transposed statement as comma-separated UTF-8 text.
///
/// Header: `item,month_1,...,month_n,total`.
pub fn write_statement_csv<W: Write>(writer: W, rows: &[MonthlyStatementRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["item".to_string()];
    header.extend(rows.iter().map(|r| format!("month_{}", r.month)));
    header.push("total".to_string());
    csv.write_record(&header)?;

    for item in LineItem::ALL {
        let mut record = vec![item.key().to_string()];
        record.extend(rows.iter().map(|r| format_plain(item.value(r))));
        record.push(format_plain(item.total(rows)));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Export into `dir` under the fixed file name, returning the written path
pub fn write_statement_csv_file(
    dir: &Path,
    rows: &[MonthlyStatementRow],
) -> Result<std::path::PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    let file = File::create(&path)?;
    write_statement_csv(file, rows)?;
    info!("statement exported to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignDuration, ScenarioConfig, SellPrice};
    use crate::costs::CostBasis;
    use crate::projection::{EngineConfig, ProjectionEngine};
    use rust_decimal::Decimal;

    fn rows(duration: CampaignDuration) -> Vec<MonthlyStatementRow> {
        let engine = ProjectionEngine::new(CostBasis::default_catalog(), EngineConfig::default());
        let s = ScenarioConfig::new(
            "5kg (36 Módulos)",
            10_000,
            duration,
            SellPrice::Monthly(Decimal::from(500)),
            Decimal::from(10),
        );
        engine.build_statement(&s).unwrap().rows()
    }

    #[test]
    fn test_export_layout() {
        let mut out = Vec::new();
        write_statement_csv(&mut out, &rows(CampaignDuration::ThreeMonths)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + LineItem::ALL.len());
        assert_eq!(lines[0], "item,month_1,month_2,month_3,total");
        assert_eq!(lines[1], "revenue,18000.00,18000.00,18000.00,54000.00");
        assert_eq!(lines[2], "production_cost,4531.50,0.00,0.00,4531.50");
        assert_eq!(lines[7], "net_profit,9888.50,15020.00,15020.00,39928.50");
    }

    #[test]
    fn test_export_file_uses_fixed_name() {
        let dir = std::env::temp_dir().join(format!("campaign_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = write_statement_csv_file(&dir, &rows(CampaignDuration::OneMonth)).unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("item,month_1,total\n"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
