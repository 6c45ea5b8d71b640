//! Feature engineering for movie metadata
//!
//! Converts raw or request-shaped movie records into the fixed-width
//! numeric feature vector the classifier expects. The category
//! vocabularies and the canonical column list live in [`schema`] and are
//! shared by the training and inference paths, so the two encodings can
//! never drift.

mod encode;
mod record;
pub mod schema;

pub use encode::{
    encode_record, expand_columns, preprocess_raw, reconcile, FeatureVector, ProcessedDataset,
};
pub use record::{MovieRecord, RawRecord};
