use crate::core::dataset::Dataset;
use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

pub const TABLE_COLUMNS: [&str; 7] = [
    "university",
    "faculty",
    "program",
    "campus",
    "tuition_fee_text",
    "tuition_fee_numeric",
    "more_info_url",
];

/// Row as read back from disk; the fee column may be blank in hand-edited tables.
#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    university: String,
    #[serde(default)]
    faculty: String,
    #[serde(default)]
    program: String,
    #[serde(default)]
    campus: String,
    #[serde(default)]
    tuition_fee_text: String,
    #[serde(default)]
    tuition_fee_numeric: String,
    #[serde(default)]
    more_info_url: String,
}

fn parse_fee_cell(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if let Ok(fee) = cell.parse::<u64>() {
        return Some(fee);
    }
    // 試算表匯出常見 "21000.0"
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v < u64::MAX as f64)
        .map(|v| v as u64)
}

pub fn dataset_to_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if dataset.is_empty() {
        writer.write_record(TABLE_COLUMNS)?;
    }
    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Reads a persisted dataset table. Rows without a numeric fee are dropped.
pub fn dataset_from_csv(data: &[u8]) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(data);
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<TableRow>() {
        let row = row?;
        let Some(fee) = parse_fee_cell(&row.tuition_fee_numeric) else {
            dropped += 1;
            continue;
        };

        records.push(Record {
            university: row.university,
            faculty: row.faculty,
            program: row.program,
            campus: row.campus,
            tuition_fee_text: row.tuition_fee_text,
            tuition_fee_numeric: fee,
            more_info_url: row.more_info_url,
        });
    }

    if dropped > 0 {
        tracing::warn!("⚠️ Dropped {} rows without a numeric tuition fee", dropped);
    }

    Ok(Dataset::new(records))
}
