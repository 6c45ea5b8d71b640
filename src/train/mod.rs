//! Training pipeline
//!
//! One-shot, offline: take a processed dataset, fit the forest, report
//! training accuracy, hand back the artifact. No train/validation split,
//! no cross-validation, no hyperparameter search — hardening beyond the
//! classifier defaults is explicitly out of scope.

use crate::features::ProcessedDataset;
use crate::forest::{ForestConfig, MaxFeatures, RandomForest};
use crate::io::ModelArtifact;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Default model name stamped into artifacts.
pub const MODEL_NAME: &str = "movie-quality";

/// Training configuration with the classifier defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of trees in the forest.
    pub trees: usize,
    /// Depth cap; `None` grows until pure.
    pub max_depth: Option<usize>,
    /// Seed for deterministic training.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: None,
            seed: None,
        }
    }
}

impl From<&TrainConfig> for ForestConfig {
    fn from(config: &TrainConfig) -> Self {
        ForestConfig {
            n_trees: config.trees,
            max_depth: config.max_depth,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            seed: config.seed,
        }
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// The fitted model, ready to persist.
    pub artifact: ModelArtifact,
    /// Accuracy on the training set itself (reporting only).
    pub train_accuracy: f64,
}

/// Fit a forest on a processed dataset.
pub fn train_model(dataset: &ProcessedDataset, config: &TrainConfig) -> Result<TrainOutcome> {
    let forest = RandomForest::fit(dataset.features.view(), &dataset.labels, config.into())?;
    let train_accuracy = accuracy(&forest, dataset)?;
    tracing::info!(
        trees = forest.n_trees(),
        rows = dataset.len(),
        train_accuracy,
        "training complete"
    );
    Ok(TrainOutcome {
        artifact: ModelArtifact::new(MODEL_NAME, forest),
        train_accuracy,
    })
}

/// Fraction of rows the forest labels correctly.
pub fn accuracy(forest: &RandomForest, dataset: &ProcessedDataset) -> Result<f64> {
    let mut correct = 0usize;
    for (i, label) in dataset.labels.iter().enumerate() {
        let row = dataset.features.row(i).to_vec();
        let predicted = forest.predict(&row)?;
        if predicted == *label {
            correct += 1;
        }
    }
    Ok(correct as f64 / dataset.labels.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::schema::FEATURE_COUNT;
    use ndarray::Array2;

    fn separable_dataset() -> ProcessedDataset {
        let n = 24;
        let mut rows = vec![0.0f32; n * FEATURE_COUNT];
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let good = i % 2 == 0;
            // budget and votes carry the signal
            rows[i * FEATURE_COUNT] = if good { 1e6 } else { 1e3 } + i as f32;
            rows[i * FEATURE_COUNT + 5] = if good { 5e4 } else { 1e2 };
            labels.push(good);
        }
        ProcessedDataset {
            features: Array2::from_shape_vec((n, FEATURE_COUNT), rows).unwrap(),
            labels,
        }
    }

    #[test]
    fn test_train_config_defaults() {
        let config = TrainConfig::default();
        assert_eq!(config.trees, 100);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_forest_config_conversion() {
        let config = TrainConfig {
            trees: 7,
            max_depth: Some(3),
            seed: Some(11),
        };
        let forest_config = ForestConfig::from(&config);
        assert_eq!(forest_config.n_trees, 7);
        assert_eq!(forest_config.max_depth, Some(3));
        assert_eq!(forest_config.max_features, MaxFeatures::Sqrt);
        assert_eq!(forest_config.seed, Some(11));
    }

    #[test]
    fn test_train_separable() {
        let dataset = separable_dataset();
        let config = TrainConfig {
            trees: 20,
            max_depth: None,
            seed: Some(3),
        };
        let outcome = train_model(&dataset, &config).unwrap();

        assert_eq!(outcome.artifact.forest.n_trees(), 20);
        assert_eq!(outcome.artifact.metadata.name, MODEL_NAME);
        outcome.artifact.verify_schema().unwrap();
        // Fully separable data fits to (near) perfect training accuracy.
        assert!(outcome.train_accuracy > 0.9);
    }

    #[test]
    fn test_train_empty_dataset() {
        let dataset = ProcessedDataset {
            features: Array2::zeros((0, FEATURE_COUNT)),
            labels: vec![],
        };
        assert!(train_model(&dataset, &TrainConfig::default()).is_err());
    }
}
