//! Command-line interface configuration

mod cli;

pub use cli::{
    Cli, Command, PreprocessArgs, ServeArgs, TrainArgs, DEFAULT_MODEL, DEFAULT_PROCESSED_DATA,
    DEFAULT_RAW_DATA,
};
