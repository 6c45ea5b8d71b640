//! Model loading functionality

use super::format::ModelFormat;
use super::model::ModelArtifact;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a fitted model from a file
///
/// The format is detected from the file extension. The artifact's column
/// list is verified against the canonical schema; a mismatch is fatal
/// (the model would silently mispredict against drifted columns).
///
/// # Example
///
/// ```no_run
/// use filmscore::io::load_model;
///
/// let artifact = load_model("models/model.json").unwrap();
/// println!("Loaded model: {}", artifact.metadata.name);
/// ```
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Serialization("File has no extension".to_string()))?;

    let format = ModelFormat::from_extension(ext)
        .ok_or_else(|| Error::Serialization(format!("Unsupported file extension: {ext}")))?;

    let content = fs::read_to_string(path)?;
    let artifact: ModelArtifact = match format {
        ModelFormat::Json => serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?,
        ModelFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}")))?,
    };

    artifact.verify_schema()?;
    Ok(artifact)
}
