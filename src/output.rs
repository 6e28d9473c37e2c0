use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote csv export");
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    info!(path = %path.display(), "wrote json export");
    Ok(())
}

/// Render up to `max_rows` rows as a markdown table.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CorrelationRow;

    fn rows() -> Vec<CorrelationRow> {
        vec![
            CorrelationRow {
                region_a: "EU".into(),
                region_b: "India".into(),
                shared_years: 10,
                coefficient: "0.982".into(),
            },
            CorrelationRow {
                region_a: "EU".into(),
                region_b: "USA".into(),
                shared_years: 10,
                coefficient: "0.951".into(),
            },
        ]
    }

    #[test]
    fn csv_uses_renamed_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("correlations.csv");
        write_csv(&path, &rows()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("RegionA,RegionB,SharedYears,Pearson"));
        assert_eq!(lines.next(), Some("EU,India,10,0.982"));
    }

    #[test]
    fn json_export_keeps_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_json(&path, &rows()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[1]["RegionB"], "USA");
    }

    #[test]
    fn table_preview_is_truncated() {
        let table = render_table(&rows(), 1);
        assert!(table.contains("India"));
        assert!(!table.contains("USA"));
        assert_eq!(render_table::<CorrelationRow>(&[], 3), "(no rows)");
    }
}
