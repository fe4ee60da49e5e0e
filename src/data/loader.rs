use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, BooleanArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

/// Schema violations found while turning source rows into launch records.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: payload mass {value} is negative or not a number")]
    NegativePayload { row: usize, value: f64 },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: String },
    #[error("column '{column}' has unsupported type {found}")]
    UnexpectedType { column: &'static str, found: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four launch columns, extra columns ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} booster categories)",
        table.len(),
        path.display(),
        table.booster_categories().len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row validation shared by every format
// ---------------------------------------------------------------------------

/// One source row before validation. `class` is kept as `f64` because
/// pandas writes it as `1.0` as often as `1`.
#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawLaunch {
    fn validate(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        if !(self.payload_mass >= 0.0) || !self.payload_mass.is_finite() {
            return Err(SchemaError::NegativePayload {
                row,
                value: self.payload_mass,
            });
        }
        let outcome = outcome_from_class(self.class).ok_or_else(|| SchemaError::InvalidOutcome {
            row,
            value: self.class.to_string(),
        })?;
        Ok(LaunchRecord {
            site: self.site,
            payload_mass: self.payload_mass,
            outcome,
            booster_version_category: self.booster_version_category,
        })
    }
}

fn outcome_from_class(class: f64) -> Option<Outcome> {
    if class.fract() != 0.0 {
        return None;
    }
    Outcome::from_flag(class as i64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Columns are matched by name, so order and extra columns do not matter.
fn load_csv(path: &Path) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn(required).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunch>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.validate(row_no)?);
    }

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawLaunch> = serde_json::from_str(&text).context("parsing JSON launch records")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.validate(i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): numeric columns may be any int or
/// float width.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column(&batch, SITE_COLUMN)?;
        let payload_col = column(&batch, PAYLOAD_COLUMN)?;
        let class_col = column(&batch, CLASS_COLUMN)?;
        let booster_col = column(&batch, BOOSTER_COLUMN)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let raw = RawLaunch {
                site: extract_string(site_col, row, SITE_COLUMN)?,
                payload_mass: extract_f64(payload_col, row, PAYLOAD_COLUMN)?,
                class: extract_f64(class_col, row, CLASS_COLUMN)?,
                booster_version_category: extract_string(booster_col, row, BOOSTER_COLUMN)?,
            };
            records.push(raw.validate(row_no)?);
        }
    }

    Ok(LaunchTable::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &'static str) -> Result<&'b Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| SchemaError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

/// Extract a text cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize, name: &'static str) -> Result<String> {
    if col.is_null(row) {
        bail!("Row {row}: null value in '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(SchemaError::UnexpectedType {
            column: name,
            found: format!("{other:?}"),
        }
        .into()),
    }
}

/// Extract a numeric cell as `f64`. Booleans are accepted for `class`.
fn extract_f64(col: &Arc<dyn Array>, row: usize, name: &'static str) -> Result<f64> {
    if col.is_null(row) {
        bail!("Row {row}: null value in '{name}'");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| if a.value(row) { 1.0 } else { 0.0 }),
        _ => None,
    };
    value.ok_or_else(|| {
        SchemaError::UnexpectedType {
            column: name,
            found: format!("{:?}", col.data_type()),
        }
        .into()
    })
}
