use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, RawTable, SurveyDataset, SurveyRow, columns};

// ---------------------------------------------------------------------------
// Errors and cleaning policy
// ---------------------------------------------------------------------------

/// Why a survey file could not be turned into a dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed {}: {cause:#}", path.display())]
    Malformed { path: PathBuf, cause: anyhow::Error },

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Which fields a row must carry to survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleaningPolicy {
    /// Also require `age` and `hours_per_day` (needed by the range filters).
    pub require_filter_columns: bool,
}

impl CleaningPolicy {
    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut required = vec![columns::FAV_GENRE, columns::ANXIETY, columns::DEPRESSION];
        if self.require_filter_columns {
            required.extend([columns::AGE, columns::HOURS_PER_DAY]);
        }
        required
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a survey file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one respondent per line
/// * `.json`    – `[{ "Fav genre": "Rock", "Anxiety": 5, ... }, ...]`
/// * `.parquet` – flat table as written by Pandas or Polars
pub fn load_file(path: &Path, policy: CleaningPolicy) -> Result<SurveyDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    let reader: fn(File) -> Result<RawTable> = match ext.as_str() {
        "csv" | "txt" => read_csv,
        "json" => read_json,
        "parquet" | "pq" => read_parquet,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::NotFound(path.to_path_buf())
        } else {
            DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let table = reader(file).map_err(|cause| DataLoadError::Malformed {
        path: path.to_path_buf(),
        cause,
    })?;

    let read = table.rows.len();
    let dataset = clean(table, policy)?;
    log::info!(
        "Loaded {}: kept {} of {} rows, {} genres",
        path.display(),
        dataset.len(),
        read,
        dataset.genres().len()
    );
    Ok(dataset)
}

/// Trim, lower-case, and replace spaces with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize headers, coerce numeric columns, and drop incomplete rows.
pub fn clean(table: RawTable, policy: CleaningPolicy) -> Result<SurveyDataset, DataLoadError> {
    let table = RawTable {
        columns: table.columns.iter().map(|c| normalize_column_name(c)).collect(),
        rows: table.rows,
    };

    let missing: Vec<String> = policy
        .required_columns()
        .into_iter()
        .filter(|c| table.column_index(c).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    let require = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| DataLoadError::MissingColumns(vec![name.to_string()]))
    };
    let genre_idx = require(columns::FAV_GENRE)?;
    let anxiety_idx = require(columns::ANXIETY)?;
    let depression_idx = require(columns::DEPRESSION)?;
    let age_idx = table.column_index(columns::AGE);
    let hours_idx = table.column_index(columns::HOURS_PER_DAY);

    let rows: Vec<SurveyRow> = table
        .rows
        .iter()
        .filter_map(|cells| {
            let number = |idx: usize| cells.get(idx).and_then(CellValue::to_number);
            let row = SurveyRow {
                fav_genre: cells.get(genre_idx).and_then(CellValue::to_text)?,
                anxiety: number(anxiety_idx)?,
                depression: number(depression_idx)?,
                age: age_idx.and_then(number),
                hours_per_day: hours_idx.and_then(number),
            };
            if policy.require_filter_columns
                && (row.age.is_none() || row.hours_per_day.is_none())
            {
                return None;
            }
            Some(row)
        })
        .collect();

    let dropped = table.rows.len() - rows.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} rows with missing required fields");
    }

    Ok(SurveyDataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Header row with column names; empty fields become nulls.
fn read_csv(file: File) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::Text(value.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn read_json(file: File) -> Result<RawTable> {
    let root: JsonValue =
        serde_json::from_reader(BufReader::new(file)).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let Some(obj) = rec.as_object() else {
            bail!("Row {i} is not a JSON object");
        };
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Null,
        JsonValue::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
        JsonValue::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Flat Parquet table. Numeric columns are widened to `f64`, everything
/// else is kept as its display text.
fn read_parquet(file: File) -> Result<RawTable> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let cells: Vec<Vec<CellValue>> = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(col, name)| {
                column_cells(col).with_context(|| format!("converting column '{name}'"))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            rows.push(cells.iter().map(|col| col[row].clone()).collect());
        }
    }

    Ok(RawTable { columns, rows })
}

/// Convert one Arrow column into cells.
fn column_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let dtype = col.data_type();
    if dtype.is_numeric() {
        let widened = arrow::compute::cast(col, &DataType::Float64)
            .with_context(|| format!("casting {dtype:?} to Float64"))?;
        let values = widened.as_primitive::<Float64Type>();
        return Ok(values
            .iter()
            .map(|v| v.map(CellValue::Number).unwrap_or(CellValue::Null))
            .collect());
    }

    match dtype {
        DataType::Utf8 => Ok(col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(|s| CellValue::Text(s.to_string())).unwrap_or(CellValue::Null))
            .collect()),
        DataType::LargeUtf8 => Ok(col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(|s| CellValue::Text(s.to_string())).unwrap_or(CellValue::Null))
            .collect()),
        _ => (0..col.len())
            .map(|row| {
                if col.is_null(row) {
                    Ok(CellValue::Null)
                } else {
                    let text = array_value_to_string(col, row)
                        .with_context(|| format!("formatting row {row}"))?;
                    Ok(CellValue::Text(text))
                }
            })
            .collect(),
    }
}
