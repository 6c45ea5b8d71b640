//! Movie record types
//!
//! [`RawRecord`] is one row of the raw dataset, where any field may be
//! missing. [`MovieRecord`] is the inference-shaped record: every field
//! present, `color` already boolean. The training path turns raw records
//! into movie records via imputation; the serving path builds them from
//! validated requests.

use serde::{Deserialize, Serialize};

/// One row of the raw metadata CSV. Fields may be missing at training
/// time; `imdb_score` exists only to derive the label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub budget: Option<f32>,
    pub gross: Option<f32>,
    pub duration: Option<f32>,
    pub num_critic_for_reviews: Option<f32>,
    pub num_user_for_reviews: Option<f32>,
    pub num_voted_users: Option<f32>,
    pub title_year: Option<f32>,
    pub color: Option<String>,
    pub genres: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub content_rating: Option<String>,
    pub imdb_score: Option<f32>,
}

impl RawRecord {
    /// Label derivation: IMDB score of at least 7 counts as "good".
    /// A missing score compares false, as in the original pipeline.
    pub fn is_good(&self) -> bool {
        self.imdb_score.is_some_and(|s| s >= 7.0)
    }
}

/// A complete movie record, ready for encoding. Categorical fields hold
/// raw (pre-normalization) values; the encoder applies the alias tables
/// and allow-lists itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub budget: f32,
    pub gross: f32,
    pub duration: f32,
    pub num_critic_for_reviews: f32,
    pub num_user_for_reviews: f32,
    pub num_voted_users: f32,
    pub title_year: f32,
    pub color: bool,
    /// Pipe-delimited genre tokens, e.g. `"Action|Comedy"`.
    pub genres: String,
    pub language: String,
    pub country: String,
    pub content_rating: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_good_threshold() {
        let mut record = RawRecord {
            imdb_score: Some(7.0),
            ..RawRecord::default()
        };
        assert!(record.is_good());

        record.imdb_score = Some(6.9);
        assert!(!record.is_good());

        record.imdb_score = Some(9.3);
        assert!(record.is_good());
    }

    #[test]
    fn test_is_good_missing_score() {
        let record = RawRecord::default();
        assert!(!record.is_good());
    }
}
