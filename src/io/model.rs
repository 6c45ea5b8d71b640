//! The persisted model artifact

use crate::features::schema::{canonical_columns, FEATURE_COUNT};
use crate::forest::RandomForest;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata carried alongside the fitted forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,
    /// Crate version that produced the artifact
    pub version: String,
    /// Fit timestamp
    pub trained_at: DateTime<Utc>,
    /// The canonical feature columns the forest was trained against,
    /// in order. Verified on load.
    pub columns: Vec<String>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: Utc::now(),
            columns: canonical_columns().to_vec(),
        }
    }
}

/// A fitted classifier plus its metadata. Fit once, persist, load many
/// times read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(name: impl Into<String>, forest: RandomForest) -> Self {
        Self {
            metadata: ModelMetadata::new(name),
            forest,
        }
    }

    /// Check the artifact against the crate's canonical schema. Any
    /// mismatch means the artifact was trained against a different
    /// encoding and must not be served.
    pub fn verify_schema(&self) -> Result<()> {
        let expected = canonical_columns();
        if self.metadata.columns.len() != expected.len() {
            return Err(Error::SchemaDrift(format!(
                "artifact has {} columns, expected {}",
                self.metadata.columns.len(),
                expected.len()
            )));
        }
        for (i, (got, want)) in self.metadata.columns.iter().zip(expected).enumerate() {
            if got != want {
                return Err(Error::SchemaDrift(format!(
                    "artifact column {i} is {got:?}, expected {want:?}"
                )));
            }
        }
        if self.forest.n_features() != FEATURE_COUNT {
            return Err(Error::SchemaDrift(format!(
                "artifact forest expects {} features, schema has {}",
                self.forest.n_features(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }
}

/// Small schema-width forest for I/O and server tests.
#[cfg(test)]
pub(crate) fn fixture_forest() -> RandomForest {
    use crate::forest::ForestConfig;
    use ndarray::Array2;

    let mut rows = vec![0.0f32; 8 * FEATURE_COUNT];
    for i in 0..8 {
        // budget separates the classes
        rows[i * FEATURE_COUNT] = if i < 4 { 1.0 } else { 100.0 };
    }
    let x = Array2::from_shape_vec((8, FEATURE_COUNT), rows).unwrap();
    let y = vec![false, false, false, false, true, true, true, true];
    let config = ForestConfig::default().with_trees(5).with_seed(9);
    RandomForest::fit(x.view(), &y, config).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let meta = ModelMetadata::new("movie-quality");
        assert_eq!(meta.name, "movie-quality");
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(meta.columns.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_verify_schema_ok() {
        let artifact = ModelArtifact::new("movie-quality", fixture_forest());
        artifact.verify_schema().unwrap();
    }

    #[test]
    fn test_verify_schema_renamed_column() {
        let mut artifact = ModelArtifact::new("movie-quality", fixture_forest());
        artifact.metadata.columns[0] = "budget_usd".to_string();
        assert!(matches!(
            artifact.verify_schema().unwrap_err(),
            Error::SchemaDrift(_)
        ));
    }

    #[test]
    fn test_verify_schema_truncated_columns() {
        let mut artifact = ModelArtifact::new("movie-quality", fixture_forest());
        artifact.metadata.columns.pop();
        assert!(matches!(
            artifact.verify_schema().unwrap_err(),
            Error::SchemaDrift(_)
        ));
    }
}
