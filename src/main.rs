//! Filmscore CLI
//!
//! Entry points for the three pipeline stages.
//!
//! # Usage
//!
//! ```bash
//! # Encode the raw dump into the processed feature matrix
//! filmscore preprocess
//!
//! # Fit and persist the classifier
//! filmscore train --trees 100
//!
//! # Serve predictions
//! filmscore serve --addr 0.0.0.0:8000
//! ```

use clap::Parser;
use filmscore::config::{Cli, Command, PreprocessArgs, ServeArgs, TrainArgs};
use filmscore::data::{load_processed, load_raw, save_processed};
use filmscore::features::preprocess_raw;
use filmscore::io::{load_model, save_model, ModelFormat, SaveConfig};
use filmscore::server::{PredictServer, ServerConfig};
use filmscore::train::{train_model, TrainConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let result = match cli.command {
        Command::Preprocess(args) => run_preprocess(args, quiet),
        Command::Train(args) => run_train(args, quiet),
        Command::Serve(args) => run_serve(args, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn log(quiet: bool, msg: &str) {
    if !quiet {
        println!("{msg}");
    }
}

fn run_preprocess(args: PreprocessArgs, quiet: bool) -> Result<(), String> {
    log(
        quiet,
        &format!("Loading raw dataset from {}", args.input.display()),
    );
    let records = load_raw(&args.input).map_err(|e| format!("Load error: {e}"))?;

    log(quiet, &format!("Encoding {} records", records.len()));
    let dataset = preprocess_raw(&records).map_err(|e| format!("Preprocess error: {e}"))?;
    let good = dataset.labels.iter().filter(|l| **l).count();

    save_processed(&dataset, &args.output).map_err(|e| format!("Save error: {e}"))?;
    log(
        quiet,
        &format!(
            "Wrote {} rows ({} good) to {}",
            dataset.len(),
            good,
            args.output.display()
        ),
    );
    Ok(())
}

fn run_train(args: TrainArgs, quiet: bool) -> Result<(), String> {
    log(
        quiet,
        &format!("Loading processed dataset from {}", args.data.display()),
    );
    let dataset = load_processed(&args.data).map_err(|e| format!("Load error: {e}"))?;

    let config = TrainConfig {
        trees: args.trees,
        max_depth: args.max_depth,
        seed: args.seed,
    };
    log(
        quiet,
        &format!("Fitting {} trees on {} rows", config.trees, dataset.len()),
    );
    let outcome = train_model(&dataset, &config).map_err(|e| format!("Training error: {e}"))?;
    log(
        quiet,
        &format!("Training accuracy: {:.3}", outcome.train_accuracy),
    );

    let format = args
        .output
        .extension()
        .and_then(|s| s.to_str())
        .and_then(ModelFormat::from_extension)
        .ok_or_else(|| format!("Unsupported model extension: {}", args.output.display()))?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| format!("Save error: {e}"))?;
        }
    }
    save_model(&outcome.artifact, &args.output, &SaveConfig::new(format))
        .map_err(|e| format!("Save error: {e}"))?;

    log(quiet, &format!("Model saved to {}", args.output.display()));
    Ok(())
}

fn run_serve(args: ServeArgs, quiet: bool) -> Result<(), String> {
    init_tracing();

    // A missing or drifted artifact is fatal: never serve without a model.
    let artifact = load_model(&args.model).map_err(|e| format!("Model load error: {e}"))?;
    log(
        quiet,
        &format!(
            "Loaded model {} ({} trees) from {}",
            artifact.metadata.name,
            artifact.forest.n_trees(),
            args.model.display()
        ),
    );

    let mut config = ServerConfig::new(args.addr);
    if args.no_cors {
        config = config.without_cors();
    }
    let server = PredictServer::new(config, artifact);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Runtime error: {e}"))?;
    runtime
        .block_on(server.run())
        .map_err(|e| format!("Server error: {e}"))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
