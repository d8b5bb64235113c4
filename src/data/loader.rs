use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::error::LoadError;
use super::model::{CellValue, Column, ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a comma-separated file whose first row is the header.
///
/// The whole file is read and closed before returning. Column types are
/// inferred per column, see [`infer_column_type`].
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let dataset = parse_reader(file, path)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.column_count(),
        path.display()
    );
    log::debug!(
        "Inferred column types: {:?}",
        dataset
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.dtype))
            .collect::<Vec<_>>()
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. `source` only names the data in errors.
pub fn parse_reader<R: Read>(reader: R, source: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e, source))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(LoadError::Empty {
            path: source.to_path_buf(),
        });
    }
    check_headers(&headers, source)?;

    let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
    for result in reader.records() {
        raw_rows.push(result.map_err(|e| csv_error(e, source))?);
    }

    let dtypes: Vec<ColumnType> = (0..headers.len())
        .map(|idx| infer_column_type(raw_rows.iter().map(|r| r.get(idx).unwrap_or(""))))
        .collect();

    let rows = raw_rows
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&dtypes)
                .map(|(cell, dtype)| parse_cell(cell, *dtype))
                .collect()
        })
        .collect();

    let columns = headers
        .into_iter()
        .zip(dtypes)
        .map(|(name, dtype)| Column { name, dtype })
        .collect();

    // The csv reader already rejects ragged records; this guards the invariant.
    Dataset::new(columns, rows).ok_or_else(|| LoadError::Parse {
        source_name: source.display().to_string(),
        line: None,
        message: "rows do not match the header width".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

fn check_headers(headers: &[String], source: &Path) -> Result<(), LoadError> {
    let mut seen = BTreeSet::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(LoadError::Parse {
                source_name: source.display().to_string(),
                line: Some(1),
                message: format!("header column {} has no name", idx + 1),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(LoadError::Parse {
                source_name: source.display().to_string(),
                line: Some(1),
                message: format!("duplicate column name '{name}'"),
            });
        }
    }
    Ok(())
}

fn csv_error(err: csv::Error, source: &Path) -> LoadError {
    let line = err.position().map(|p| p.line());
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("found record with {len} fields, but the header has {expected_len}"),
        _ => err.to_string(),
    };
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io {
            path: source.to_path_buf(),
            source: e,
        },
        _ => LoadError::Parse {
            source_name: source.display().to_string(),
            line,
            message,
        },
    }
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

/// Markers pandas reads as NA by default.
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

/// Integer when every non-empty cell is an `i64`, Float when every
/// non-empty cell is an `f64`, String otherwise (including all-empty).
pub fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut seen_value = false;
    let mut all_int = true;
    let mut all_float = true;

    for cell in cells.filter(|c| !is_missing(c)) {
        seen_value = true;
        let cell = cell.trim();
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if !all_int && cell.parse::<f64>().is_err() {
            all_float = false;
            break;
        }
    }

    match (seen_value, all_int, all_float) {
        (false, _, _) => ColumnType::String,
        (true, true, _) => ColumnType::Integer,
        (true, false, true) => ColumnType::Float,
        _ => ColumnType::String,
    }
}

fn parse_cell(cell: &str, dtype: ColumnType) -> CellValue {
    if is_missing(cell) {
        return CellValue::Null;
    }
    let trimmed = cell.trim();
    match dtype {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::String(cell.to_string())),
        ColumnType::Float => trimmed
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or_else(|_| CellValue::String(cell.to_string())),
        ColumnType::String => CellValue::String(cell.to_string()),
    }
}
