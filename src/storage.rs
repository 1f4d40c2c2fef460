use crate::aggregate::AggregatedSeries;
use crate::dataset::{Cell, Dataset};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Load a CSV file with a header row; each cell is typed by `Cell::parse`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_csv(file).with_context(|| format!("read CSV {}", path.display()))
}

/// Parse CSV from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut data = Dataset::new(headers.iter())?;
    for rec in rdr.records() {
        let rec = rec?;
        data.push_row(rec.iter().map(Cell::parse).collect())?;
    }
    Ok(data)
}

/// Load a JSON array of records.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse JSON {}", path.display()))?;
    Ok(Dataset::from_json(&value)?)
}

/// Load by extension: `.json` as records, anything else as CSV.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_csv(path),
    }
}

/// Prefix values that spreadsheets would evaluate as formulas.
fn csv_safe(text: &str) -> String {
    if text.starts_with(['=', '+', '@']) {
        format!("'{text}")
    } else {
        text.to_string()
    }
}

/// Write aggregated groups as CSV: a `category` column then one column per value.
pub fn write_series_csv<W: Write>(series: &AggregatedSeries, out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    let mut header = vec!["category".to_string()];
    header.extend(series.value_columns.iter().map(|c| csv_safe(c)));
    wtr.write_record(&header)?;
    for row in &series.rows {
        let mut rec = vec![csv_safe(&row.key)];
        rec.extend(row.values.iter().map(|v| v.to_string()));
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save aggregated groups as a CSV file.
pub fn save_series_csv<P: AsRef<Path>>(series: &AggregatedSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_series_csv(series, f)
}
