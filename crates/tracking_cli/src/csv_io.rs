//! Flat Tracking CSV ↔ TrackingTable
//!
//! One header row of column names (`Time [s]`, `Period`, `Home_11_x`, ...),
//! then one row per frame. Empty cells and `NaN` read as missing; missing
//! values are written back as empty cells.

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracking_core::TrackingTable;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub rows: usize,
    pub columns: usize,
    /// Non-empty cells that were not numbers (read as missing)
    pub invalid_cells: usize,
}

/// Read a tracking CSV file.
pub fn read_tracking_csv(path: &Path) -> Result<(TrackingTable, ParseStats)> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_tracking_csv_from(file)
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Read tracking CSV data from any reader.
pub fn read_tracking_csv_from<R: Read>(reader: R) -> Result<(TrackingTable, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    let mut stats = ParseStats {
        columns: names.len(),
        ..Default::default()
    };

    for (row, record) in reader.records().enumerate() {
        // +2: 1-based lines plus the header
        let record = record.with_context(|| format!("Invalid CSV record at line {}", row + 2))?;
        for (idx, cell) in record.iter().enumerate() {
            let value = match parse_cell(cell) {
                Some(v) => v,
                None => {
                    stats.invalid_cells += 1;
                    log::warn!(
                        "Line {} - Invalid {} value: '{}'",
                        row + 2,
                        names[idx],
                        cell
                    );
                    f64::NAN
                }
            };
            columns[idx].push(value);
        }
        stats.rows += 1;
    }

    let table = TrackingTable::from_columns(names.into_iter().zip(columns))?;
    Ok((table, stats))
}

/// `None` for cells that are present but not numeric.
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

/// Write a table as CSV, creating parent directories as needed.
pub fn write_tracking_csv(table: &TrackingTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    write_tracking_csv_to(table, file)
}

/// Write tracking CSV data to any writer.
pub fn write_tracking_csv_to<W: Write>(table: &TrackingTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.column_names())?;

    let mut record = Vec::with_capacity(table.column_count());
    for row in 0..table.len() {
        record.clear();
        record.extend(table.columns().iter().map(|c| format_cell(c.values[row])));
        writer.write_record(&record)?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
