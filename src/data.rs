//! Dataset I/O
//!
//! CSV loading for the raw IMDB metadata dump and save/load of the
//! processed feature matrix. The raw dump is latin-1 encoded and full of
//! gaps, so raw loading goes through byte records with lossy UTF-8
//! decoding and maps empty cells to `None`. Processed files carry the
//! canonical 58-column header plus the label; any deviation is schema
//! drift and fails loading (the model must never silently mispredict
//! against a shifted column order).

use crate::features::schema::{canonical_columns, FEATURE_COUNT, LABEL_COLUMN};
use crate::features::{ProcessedDataset, RawRecord};
use crate::{Error, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Header positions of the columns the pipeline consumes. The raw dump
/// has many more columns; everything else is ignored.
struct RawColumns {
    budget: usize,
    gross: usize,
    duration: usize,
    num_critic_for_reviews: usize,
    num_user_for_reviews: usize,
    num_voted_users: usize,
    title_year: usize,
    color: usize,
    genres: usize,
    language: usize,
    country: usize,
    content_rating: usize,
    imdb_score: usize,
}

impl RawColumns {
    fn resolve(headers: &csv::ByteRecord) -> Result<Self> {
        let col = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name.as_bytes())
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(Self {
            budget: col("budget")?,
            gross: col("gross")?,
            duration: col("duration")?,
            num_critic_for_reviews: col("num_critic_for_reviews")?,
            num_user_for_reviews: col("num_user_for_reviews")?,
            num_voted_users: col("num_voted_users")?,
            title_year: col("title_year")?,
            color: col("color")?,
            genres: col("genres")?,
            language: col("language")?,
            country: col("country")?,
            content_rating: col("content_rating")?,
            imdb_score: col("imdb_score")?,
        })
    }
}

fn text(row: &csv::ByteRecord, idx: usize) -> Option<String> {
    let bytes = row.get(idx)?;
    if bytes.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(bytes).into_owned())
}

fn number(row: &csv::ByteRecord, idx: usize) -> Option<f32> {
    text(row, idx)?.trim().parse().ok()
}

/// Load the raw metadata CSV. Unparseable or empty cells become `None`
/// and are left for the training path's imputation.
pub fn load_raw(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.byte_headers()?.clone();
    let columns = RawColumns::resolve(&headers)?;

    let mut records = Vec::new();
    for row in reader.byte_records() {
        let row = row?;
        records.push(RawRecord {
            budget: number(&row, columns.budget),
            gross: number(&row, columns.gross),
            duration: number(&row, columns.duration),
            num_critic_for_reviews: number(&row, columns.num_critic_for_reviews),
            num_user_for_reviews: number(&row, columns.num_user_for_reviews),
            num_voted_users: number(&row, columns.num_voted_users),
            title_year: number(&row, columns.title_year),
            color: text(&row, columns.color),
            genres: text(&row, columns.genres),
            language: text(&row, columns.language),
            country: text(&row, columns.country),
            content_rating: text(&row, columns.content_rating),
            imdb_score: number(&row, columns.imdb_score),
        });
    }
    Ok(records)
}

fn processed_header() -> Vec<String> {
    let mut header = canonical_columns().to_vec();
    header.push(LABEL_COLUMN.to_string());
    header
}

/// Write a processed dataset as CSV: canonical 58 columns plus `is_good`
/// last. Parent directories are created as needed.
pub fn save_processed(dataset: &ProcessedDataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(processed_header())?;
    for (i, label) in dataset.labels.iter().enumerate() {
        let mut row: Vec<String> = dataset
            .features
            .row(i)
            .iter()
            .map(|v| v.to_string())
            .collect();
        row.push(if *label { "1" } else { "0" }.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a processed dataset, verifying the header matches the canonical
/// schema exactly — name and position.
pub fn load_processed(path: impl AsRef<Path>) -> Result<ProcessedDataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    verify_header(&headers)?;

    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != FEATURE_COUNT + 1 {
            return Err(Error::ShapeMismatch {
                expected: FEATURE_COUNT + 1,
                got: row.len(),
            });
        }
        for cell in row.iter().take(FEATURE_COUNT) {
            let value: f32 = cell.parse().map_err(|_| {
                Error::Serialization(format!("row {}: invalid number {cell:?}", i + 1))
            })?;
            values.push(value);
        }
        let label_cell = &row[FEATURE_COUNT];
        let label = match label_cell {
            "1" | "true" => true,
            "0" | "false" => false,
            other => {
                return Err(Error::Serialization(format!(
                    "row {}: invalid label {other:?}",
                    i + 1
                )))
            }
        };
        labels.push(label);
    }

    let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), values)
        .map_err(|e| Error::Serialization(format!("feature matrix: {e}")))?;
    Ok(ProcessedDataset { features, labels })
}

fn verify_header(headers: &csv::StringRecord) -> Result<()> {
    let expected = processed_header();
    if headers.len() != expected.len() {
        return Err(Error::SchemaDrift(format!(
            "expected {} columns, found {}",
            expected.len(),
            headers.len()
        )));
    }
    for (i, want) in expected.iter().enumerate() {
        let got = &headers[i];
        if got != want.as_str() {
            return Err(Error::SchemaDrift(format!(
                "column {i} is {got:?}, expected {want:?}"
            )));
        }
    }
    Ok(())
}
