//! Model saving functionality

use super::format::{ModelFormat, SaveConfig};
use super::model::ModelArtifact;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a fitted model to a file
///
/// # Arguments
///
/// * `artifact` - The fitted model and its metadata
/// * `path` - Output file path
/// * `config` - Save configuration (format, options)
///
/// # Example
///
/// ```no_run
/// use filmscore::io::{save_model, ModelFormat, SaveConfig};
/// # fn demo(artifact: &filmscore::io::ModelArtifact) {
/// let config = SaveConfig::new(ModelFormat::Json);
/// save_model(artifact, "models/model.json", &config).unwrap();
/// # }
/// ```
pub fn save_model(
    artifact: &ModelArtifact,
    path: impl AsRef<Path>,
    config: &SaveConfig,
) -> Result<()> {
    let path = path.as_ref();

    let data = match config.format {
        ModelFormat::Json => {
            if config.pretty {
                serde_json::to_string_pretty(artifact)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            } else {
                serde_json::to_string(artifact)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            }
        }
        ModelFormat::Yaml => serde_yaml::to_string(artifact)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}")))?,
    };

    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{fixture_forest, ModelArtifact};
    use tempfile::NamedTempFile;

    fn fixture() -> ModelArtifact {
        ModelArtifact::new("movie-quality", fixture_forest())
    }

    #[test]
    fn test_save_model_json() {
        let artifact = fixture();
        let config = SaveConfig::new(ModelFormat::Json);

        let temp_file = NamedTempFile::new().unwrap();
        save_model(&artifact, temp_file.path(), &config).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("movie-quality"));
        assert!(content.contains("genre_Action"));
    }

    #[test]
    fn test_save_model_yaml() {
        let artifact = fixture();
        let config = SaveConfig::new(ModelFormat::Yaml);

        let temp_file = NamedTempFile::new().unwrap();
        save_model(&artifact, temp_file.path(), &config).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("movie-quality"));
        assert!(content.contains("trained_at"));
    }

    #[test]
    fn test_save_model_json_compact_is_single_line() {
        let artifact = fixture();
        let config = SaveConfig::new(ModelFormat::Json).with_pretty(false);

        let temp_file = NamedTempFile::new().unwrap();
        save_model(&artifact, temp_file.path(), &config).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_save_model_invalid_path() {
        let artifact = fixture();
        let config = SaveConfig::default();
        let result = save_model(&artifact, "/nonexistent/directory/model.json", &config);
        assert!(result.is_err());
    }
}
