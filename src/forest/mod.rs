//! Bagged decision-tree classifier
//!
//! A CART random forest for binary classification: Gini splits over a
//! random feature subset per node, bootstrap sampling per tree, parallel
//! tree construction. Probabilities come from averaging per-tree leaf
//! class distributions; the direct prediction is the argmax of that
//! average.

mod forest;
mod tree;

pub use forest::{ForestConfig, MaxFeatures, RandomForest};
pub use tree::DecisionTree;
