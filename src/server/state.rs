//! Server application state
//!
//! The model artifact is loaded once before the listener binds and held
//! read-only for the process lifetime; handlers share it by reference.

use crate::io::ModelArtifact;
use crate::server::ServerConfig;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The fitted model, immutable after startup.
    pub model: Arc<ModelArtifact>,
    pub config: ServerConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, artifact: ModelArtifact) -> Self {
        Self {
            model: Arc::new(artifact),
            config,
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::fixture_forest;

    fn test_state() -> AppState {
        let artifact = ModelArtifact::new("movie-quality", fixture_forest());
        AppState::new(ServerConfig::default(), artifact)
    }

    #[test]
    fn test_app_state_new() {
        let state = test_state();
        assert_eq!(state.model.metadata.name, "movie-quality");
        assert!(state.uptime_secs() < 5);
    }

    #[test]
    fn test_clone_shares_model() {
        let state = test_state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.model, &cloned.model));
    }
}
