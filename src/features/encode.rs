//! The feature encoder
//!
//! Pure transforms from movie records to the canonical 58-column feature
//! vector. The inference path is [`encode_record`]: category
//! normalization, genre expansion, one-hot expansion, then structural
//! reconciliation against the canonical schema. The training path is
//! [`preprocess_raw`]: batch imputation first, then the same shared
//! encoding — the asymmetry (imputation on the training path only) is
//! intentional and must be preserved.
//!
//! Encoding performs no validation. Callers feeding the inference path
//! guarantee all fields are present (the HTTP layer's schema validation
//! does this for the service).

use super::record::{MovieRecord, RawRecord};
use super::schema;
use crate::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One encoded row, in canonical column order. Always
/// [`schema::FEATURE_COUNT`] values wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// The values, in canonical column order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Look up a value by canonical column name.
    pub fn get(&self, column: &str) -> Option<f32> {
        schema::column_index(column).map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fully encoded dataset: one feature row per record plus labels.
#[derive(Debug, Clone)]
pub struct ProcessedDataset {
    /// `n x 58` feature matrix in canonical column order.
    pub features: Array2<f32>,
    /// One label per row.
    pub labels: Vec<bool>,
}

impl ProcessedDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Steps 2-4 of the pipeline: normalize categories, expand genres, one-hot
/// the single-valued fields. Returns named columns; only columns that are
/// *produced* appear (absent genres produce nothing), and an unrecognized
/// content rating produces a column outside the canonical schema.
pub fn expand_columns(record: &MovieRecord) -> Vec<(String, f32)> {
    let mut columns = Vec::with_capacity(schema::FEATURE_COUNT);

    let numeric = [
        record.budget,
        record.gross,
        record.duration,
        record.num_critic_for_reviews,
        record.num_user_for_reviews,
        record.num_voted_users,
        record.title_year,
    ];
    for (name, value) in schema::NUMERIC_FEATURES.iter().zip(numeric) {
        columns.push(((*name).to_string(), value));
    }

    columns.push(("color".to_string(), if record.color { 1.0 } else { 0.0 }));

    // Exact token match, no trimming; empty tokens match nothing.
    let tokens: HashSet<&str> = record.genres.split('|').collect();
    for genre in schema::GENRES {
        if tokens.contains(genre) {
            columns.push((format!("genre_{genre}"), 1.0));
        }
    }

    columns.push((
        format!("language_{}", schema::normalize_language(&record.language)),
        1.0,
    ));
    columns.push((
        format!("country_{}", schema::normalize_country(&record.country)),
        1.0,
    ));
    columns.push((
        format!(
            "content_rating_{}",
            schema::rating_group(&record.content_rating)
        ),
        1.0,
    ));

    columns
}

/// Step 5: reconcile produced columns against the canonical schema.
/// Canonical columns that were not produced become 0; produced columns
/// outside the schema are dropped; the result is in canonical order.
pub fn reconcile(columns: &[(String, f32)]) -> FeatureVector {
    let mut values = vec![0.0f32; schema::FEATURE_COUNT];
    for (name, value) in columns {
        if let Some(idx) = schema::column_index(name) {
            values[idx] = *value;
        }
    }
    FeatureVector { values }
}

/// Encode one complete record (the inference path). Pure and
/// shape-stable: the output always has exactly the canonical 58 columns,
/// whatever categories the record contains.
pub fn encode_record(record: &MovieRecord) -> FeatureVector {
    reconcile(&expand_columns(record))
}

/// Encode a raw batch (the training path): derive labels, impute missing
/// values from the batch itself, then run every record through the shared
/// encoding.
pub fn preprocess_raw(records: &[RawRecord]) -> Result<ProcessedDataset> {
    if records.is_empty() {
        return Err(Error::InvalidParameter(
            "cannot preprocess an empty dataset".to_string(),
        ));
    }

    let medians = numeric_medians(records)?;
    let modes = categorical_modes(records)?;

    let mut features = Array2::zeros((records.len(), schema::FEATURE_COUNT));
    let mut labels = Vec::with_capacity(records.len());
    for (i, raw) in records.iter().enumerate() {
        let record = impute(raw, &medians, &modes);
        let encoded = encode_record(&record);
        for (j, value) in encoded.values().iter().enumerate() {
            features[[i, j]] = *value;
        }
        labels.push(raw.is_good());
    }

    Ok(ProcessedDataset { features, labels })
}

/// Per-column medians over the present values. Even-count median is the
/// mean of the two middle values.
fn numeric_medians(records: &[RawRecord]) -> Result<[f32; 7]> {
    let getters: [fn(&RawRecord) -> Option<f32>; 7] = [
        |r| r.budget,
        |r| r.gross,
        |r| r.duration,
        |r| r.num_critic_for_reviews,
        |r| r.num_user_for_reviews,
        |r| r.num_voted_users,
        |r| r.title_year,
    ];

    let mut medians = [0.0f32; 7];
    for (i, get) in getters.iter().enumerate() {
        let mut present: Vec<f32> = records.iter().filter_map(|r| get(r)).collect();
        if present.is_empty() {
            return Err(Error::MissingColumn(format!(
                "{} has no values to impute from",
                schema::NUMERIC_FEATURES[i]
            )));
        }
        present.sort_by(f32::total_cmp);
        medians[i] = median_of_sorted(&present);
    }
    Ok(medians)
}

fn median_of_sorted(sorted: &[f32]) -> f32 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Imputation values for the categorical columns.
struct Modes {
    color: String,
    genres: String,
    language: String,
    country: String,
    content_rating: String,
}

fn categorical_modes(records: &[RawRecord]) -> Result<Modes> {
    Ok(Modes {
        color: mode(records.iter().filter_map(|r| r.color.as_deref()), "color")?,
        genres: mode(
            records.iter().filter_map(|r| r.genres.as_deref()),
            "genres",
        )?,
        language: mode(
            records.iter().filter_map(|r| r.language.as_deref()),
            "language",
        )?,
        country: mode(
            records.iter().filter_map(|r| r.country.as_deref()),
            "country",
        )?,
        content_rating: mode(
            records.iter().filter_map(|r| r.content_rating.as_deref()),
            "content_rating",
        )?,
    })
}

/// Most frequent value; ties break to the lexicographically smallest.
fn mode<'a>(values: impl Iterator<Item = &'a str>, column: &str) -> Result<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a, na), (b, nb)| na.cmp(nb).then_with(|| b.cmp(a)))
        .map(|(value, _)| value.to_string())
        .ok_or_else(|| Error::MissingColumn(format!("{column} has no values to impute from")))
}

fn impute(raw: &RawRecord, medians: &[f32; 7], modes: &Modes) -> MovieRecord {
    MovieRecord {
        budget: raw.budget.unwrap_or(medians[0]),
        gross: raw.gross.unwrap_or(medians[1]),
        duration: raw.duration.unwrap_or(medians[2]),
        num_critic_for_reviews: raw.num_critic_for_reviews.unwrap_or(medians[3]),
        num_user_for_reviews: raw.num_user_for_reviews.unwrap_or(medians[4]),
        num_voted_users: raw.num_voted_users.unwrap_or(medians[5]),
        title_year: raw.title_year.unwrap_or(medians[6]),
        color: raw.color.as_deref().unwrap_or(&modes.color) == "Color",
        genres: raw
            .genres
            .clone()
            .unwrap_or_else(|| modes.genres.clone()),
        language: raw
            .language
            .clone()
            .unwrap_or_else(|| modes.language.clone()),
        country: raw
            .country
            .clone()
            .unwrap_or_else(|| modes.country.clone()),
        content_rating: raw
            .content_rating
            .clone()
            .unwrap_or_else(|| modes.content_rating.clone()),
    }
}
