//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default location of the raw metadata dump.
pub const DEFAULT_RAW_DATA: &str = "data/raw/movie_metadata.csv";

/// Default location of the processed feature matrix.
pub const DEFAULT_PROCESSED_DATA: &str = "data/processed/movie_metadata_processed.csv";

/// Default location of the persisted model artifact.
pub const DEFAULT_MODEL: &str = "models/model.json";

#[derive(Debug, Parser)]
#[command(name = "filmscore", version, about = "Movie quality prediction pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode the raw metadata dump into the processed feature matrix
    Preprocess(PreprocessArgs),
    /// Fit the classifier on a processed dataset and persist it
    Train(TrainArgs),
    /// Serve predictions over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct PreprocessArgs {
    /// Raw metadata CSV
    #[arg(long, default_value = DEFAULT_RAW_DATA)]
    pub input: PathBuf,

    /// Output path for the processed dataset
    #[arg(long, default_value = DEFAULT_PROCESSED_DATA)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Processed dataset CSV
    #[arg(long, default_value = DEFAULT_PROCESSED_DATA)]
    pub data: PathBuf,

    /// Output path for the model artifact (.json or .yaml)
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub output: PathBuf,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Depth cap; trees grow until pure when omitted
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Seed for deterministic training
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Model artifact to serve
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Disable the CORS layer
    #[arg(long)]
    pub no_cors: bool,
}
