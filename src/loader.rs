use crate::types::{RawRow, TimeSeries};
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub duplicate_years: usize,
}

/// Read a `Year,Renewable Share (%)` CSV into a validated series.
///
/// Unparseable or out-of-range rows are skipped and counted; the first row
/// seen for a year wins over later duplicates. Rows come back sorted by year.
pub fn load_series(
    path: impl AsRef<Path>,
    region_id: &str,
) -> Result<(TimeSeries, LoadReport), Box<dyn Error>> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let (series, report) = read_series(rdr, region_id)?;
    debug!(
        region = region_id,
        path = %path.display(),
        rows = report.loaded_rows,
        "loaded series"
    );
    Ok((series, report))
}

fn read_series<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    region_id: &str,
) -> Result<(TimeSeries, LoadReport), Box<dyn Error>> {
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut duplicate_years = 0usize;
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(region = region_id, row = idx + 1, error = %e, "unreadable row");
                parse_errors += 1;
                continue;
            }
        };
        let year = match parse_i32_safe(row.year.as_deref()) {
            Some(y) => y,
            None => {
                parse_errors += 1;
                continue;
            }
        };
        let share = match parse_f64_safe(row.share.as_deref()) {
            Some(v) if (0.0..=100.0).contains(&v) => v,
            _ => {
                parse_errors += 1;
                continue;
            }
        };
        if by_year.contains_key(&year) {
            duplicate_years += 1;
            continue;
        }
        by_year.insert(year, share);
    }

    let points: Vec<(i32, f64)> = by_year.into_iter().collect();
    let report = LoadReport {
        total_rows,
        loaded_rows: points.len(),
        parse_errors,
        duplicate_years,
    };
    let series = TimeSeries::new(region_id, points)?;
    Ok((series, report))
}
