//! CART decision tree
//!
//! Grows until leaves are pure, the sample is too small to split, or the
//! optional depth cap is hit. Each node considers a random subset of the
//! features; thresholds are midpoints between adjacent distinct sorted
//! values. Splits that do not strictly reduce the weighted Gini impurity
//! become leaves, which also guarantees termination.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        /// Class counts of the training samples that reached this leaf.
        counts: [u32; 2],
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

/// Per-tree growth parameters, shared across the forest.
#[derive(Debug, Clone)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Number of candidate features examined per node.
    pub feature_subset: usize,
}

/// A single fitted classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Fit a tree on the rows of `x` selected by `sample` (a bootstrap
    /// sample, indices may repeat).
    pub(crate) fn fit(
        x: ArrayView2<'_, f32>,
        y: &[bool],
        sample: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = DecisionTree { nodes: Vec::new() };
        let mut indices = sample.to_vec();
        tree.build(x, y, &mut indices, 0, params, rng);
        tree
    }

    fn build(
        &mut self,
        x: ArrayView2<'_, f32>,
        y: &[bool],
        indices: &mut [usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(y, indices);
        let at_depth_cap = params.max_depth.is_some_and(|d| depth >= d);
        if counts[0] == 0 || counts[1] == 0 || indices.len() < params.min_samples_split || at_depth_cap
        {
            return self.push(Node::Leaf { counts });
        }

        let Some((feature, threshold)) = best_split(x, y, indices, params.feature_subset, rng)
        else {
            return self.push(Node::Leaf { counts });
        };

        let mid = partition(x, indices, feature, threshold);
        if mid == 0 || mid == indices.len() {
            return self.push(Node::Leaf { counts });
        }

        let node = self.push(Node::Split {
            feature,
            threshold,
            left: 0,
            right: 0,
        });
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.build(x, y, left_indices, depth + 1, params, rng);
        let right = self.build(x, y, right_indices, depth + 1, params, rng);
        if let Node::Split {
            left: l, right: r, ..
        } = &mut self.nodes[node]
        {
            *l = left;
            *r = right;
        }
        node
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Class distribution at the leaf this feature vector falls into.
    pub fn predict_dist(&self, features: &[f32]) -> [f32; 2] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { counts } => {
                    let total = counts[0] + counts[1];
                    return [
                        counts[0] as f32 / total as f32,
                        counts[1] as f32 / total as f32,
                    ];
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn class_counts(y: &[bool], indices: &[usize]) -> [u32; 2] {
    let mut counts = [0u32; 2];
    for &i in indices {
        counts[usize::from(y[i])] += 1;
    }
    counts
}

fn gini(counts: [f32; 2], n: f32) -> f32 {
    let p0 = counts[0] / n;
    let p1 = counts[1] / n;
    1.0 - p0 * p0 - p1 * p1
}

/// Best (feature, threshold) over a random feature subset, or `None` if
/// no candidate strictly reduces impurity.
fn best_split(
    x: ArrayView2<'_, f32>,
    y: &[bool],
    indices: &[usize],
    feature_subset: usize,
    rng: &mut StdRng,
) -> Option<(usize, f32)> {
    let n_features = x.ncols();
    let k = feature_subset.clamp(1, n_features);

    let counts = class_counts(y, indices);
    let total = [counts[0] as f32, counts[1] as f32];
    let n = indices.len() as f32;
    let parent_impurity = gini(total, n);

    let mut best: Option<(f32, usize, f32)> = None;
    for feature in index::sample(rng, n_features, k) {
        let mut values: Vec<(f32, bool)> = indices
            .iter()
            .map(|&i| (x[[i, feature]], y[i]))
            .collect();
        values.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = [0.0f32; 2];
        for w in 1..values.len() {
            let (prev_value, prev_label) = values[w - 1];
            left[usize::from(prev_label)] += 1.0;
            let value = values[w].0;
            if value == prev_value {
                continue;
            }

            let right = [total[0] - left[0], total[1] - left[1]];
            let n_left = w as f32;
            let n_right = n - n_left;
            let impurity =
                (n_left / n) * gini(left, n_left) + (n_right / n) * gini(right, n_right);
            if impurity < parent_impurity
                && best.map_or(true, |(best_impurity, _, _)| impurity < best_impurity)
            {
                best = Some((impurity, feature, (prev_value + value) / 2.0));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}

/// In-place partition: indices with `x[.., feature] <= threshold` first.
/// Returns the boundary.
fn partition(
    x: ArrayView2<'_, f32>,
    indices: &mut [usize],
    feature: usize,
    threshold: f32,
) -> usize {
    let mut mid = 0;
    for i in 0..indices.len() {
        if x[[indices[i], feature]] <= threshold {
            indices.swap(i, mid);
            mid += 1;
        }
    }
    mid
}
