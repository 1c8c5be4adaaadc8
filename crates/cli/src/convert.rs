//! `srec convert` — companion CSV→JSON conversion utility.
//!
//! Shares only an input-format convention with the reconciliation pass: it
//! reads an arbitrary delimited export, strips non-ASCII characters from
//! every header and value, coerces the identifier/quantity columns to
//! integers, and writes a JSON array of row objects.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::CliError;

/// Columns coerced to integers. Anything but pure digits becomes 0.
const INTEGER_COLUMNS: [&str; 6] = [
    "OutletId",
    "ProductId",
    "UnitOfMeasureId",
    "OpeningQuantity",
    "DeliveryQuantity",
    "SoldQuantity",
];

fn strip_non_ascii(value: &str) -> String {
    value.chars().filter(char::is_ascii).collect()
}

fn coerce_integer(value: &str) -> Value {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::from(0))
    } else {
        Value::from(0)
    }
}

pub fn cmd_convert(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    if input.extension().and_then(|e| e.to_str()) != Some("csv") {
        return Err(CliError::usage(format!("not a .csv file: {}", input.display()))
            .with_hint("convert expects a delimited export with a .csv extension"));
    }

    let csv_data = std::fs::read_to_string(&input)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", input.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    // The ASCII strip also swallows a leading BOM
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CliError::parse(e.to_string()))?
        .iter()
        .map(strip_non_ascii)
        .collect();

    let mut rows: Vec<Value> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CliError::parse(e.to_string()))?;

        let mut row = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let clean = strip_non_ascii(record.get(i).unwrap_or(""));
            let value = if INTEGER_COLUMNS.contains(&header.as_str()) {
                coerce_integer(&clean)
            } else {
                Value::from(clean)
            };
            row.insert(header.clone(), value);
        }
        rows.push(Value::Object(row));
    }

    let dir = match output_dir {
        Some(dir) => dir,
        None => input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", dir.display())))?;

    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("converted");
    let path = dir.join(format!("{stem}.json"));

    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
    std::fs::write(&path, json)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;

    if !quiet {
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}
