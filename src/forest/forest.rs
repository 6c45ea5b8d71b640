//! The bagged forest

use super::tree::{DecisionTree, TreeParams};
use crate::{Error, Result};
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How many features each node considers when searching for a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, the usual classification default.
    Sqrt,
    /// Every feature at every node.
    All,
    /// A fixed count, clamped to `[1, n_features]`.
    Fixed(usize),
}

impl MaxFeatures {
    fn resolve(self, n_features: usize) -> usize {
        match self {
            MaxFeatures::Sqrt => ((n_features as f64).sqrt().floor() as usize).max(1),
            MaxFeatures::All => n_features,
            MaxFeatures::Fixed(k) => k.clamp(1, n_features),
        }
    }
}

/// Forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Depth cap; `None` grows until pure.
    pub max_depth: Option<usize>,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Feature subsampling strategy per node.
    pub max_features: MaxFeatures,
    /// Seed for deterministic training; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            seed: None,
        }
    }
}

impl ForestConfig {
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A fitted random forest for binary classification.
///
/// Fit once, then read-only: prediction never mutates the forest, so a
/// shared reference can serve concurrent requests without locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    config: ForestConfig,
}

impl RandomForest {
    /// Fit the forest. Trees are built in parallel, each on its own
    /// bootstrap sample with its own RNG derived from the master seed.
    pub fn fit(x: ArrayView2<'_, f32>, y: &[bool], config: ForestConfig) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(Error::InvalidParameter(
                "cannot fit on an empty dataset".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(Error::InvalidParameter(format!(
                "{} feature rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if config.n_trees == 0 {
            return Err(Error::InvalidParameter(
                "n_trees must be at least 1".to_string(),
            ));
        }

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            feature_subset: config.max_features.resolve(x.ncols()),
        };
        let master_seed: u64 = config.seed.unwrap_or_else(|| rand::rng().random());
        let n = x.nrows();

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng =
                    StdRng::seed_from_u64(master_seed ^ (t as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
                let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                DecisionTree::fit(x, y, &sample, &params, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            n_features: x.ncols(),
            config,
        })
    }

    /// Averaged per-tree class distribution `[p_not_good, p_good]`.
    pub fn class_distribution(&self, features: &[f32]) -> Result<[f64; 2]> {
        if features.len() != self.n_features {
            return Err(Error::ShapeMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }
        let mut acc = [0.0f64; 2];
        for tree in &self.trees {
            let dist = tree.predict_dist(features);
            acc[0] += f64::from(dist[0]);
            acc[1] += f64::from(dist[1]);
        }
        let n = self.trees.len() as f64;
        Ok([acc[0] / n, acc[1] / n])
    }

    /// Probability of the positive ("good") class.
    pub fn predict_proba(&self, features: &[f32]) -> Result<f64> {
        Ok(self.class_distribution(features)?[1])
    }

    /// Direct class prediction: argmax of the averaged distribution.
    /// A tied distribution resolves to the negative class.
    pub fn predict(&self, features: &[f32]) -> Result<bool> {
        let dist = self.class_distribution(features)?;
        Ok(dist[1] > dist[0])
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}
