//! # Filmscore: Movie Quality Prediction
//!
//! Filmscore scores whether a movie will be "good" (IMDB score >= 7) from
//! its metadata: budget, cast/crew counts, genres, language, country, and
//! content rating. It is one fixed pipeline for one dataset shape — the
//! heart of the crate is the feature encoder and the guarantee that
//! training-time and inference-time encodings can never drift.
//!
//! ## Architecture
//!
//! - **features**: category vocabularies, the canonical 58-column schema,
//!   and the pure feature encoder
//! - **forest**: bagged CART decision-tree classifier
//! - **data**: dataset CSV loading and saving
//! - **train**: one-shot training pipeline
//! - **io**: model artifact saving and loading (JSON, YAML formats)
//! - **server**: axum prediction service (`POST /predict`, `GET /health`)
//! - **config**: CLI definitions

pub mod config;
pub mod data;
pub mod features;
pub mod forest;
pub mod io;
pub mod server;
pub mod train;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use features::{encode_record, FeatureVector, MovieRecord};
pub use forest::RandomForest;
