//! API router and server setup
//!
//! Configures axum routes and runs the HTTP server.

use crate::io::ModelArtifact;
use crate::server::{
    handlers::{health_check, predict},
    state::AppState,
    Result, ServerConfig, ServerError,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Prediction server holding the fitted model
pub struct PredictServer {
    config: ServerConfig,
    state: AppState,
}

impl PredictServer {
    /// Create a new server around an already loaded (and schema-verified)
    /// model artifact
    pub fn new(config: ServerConfig, artifact: ModelArtifact) -> Self {
        let state = AppState::new(config.clone(), artifact);
        Self { config, state }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/predict", post(predict))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the server
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.address;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        tracing::info!(
            %addr,
            model = %self.state.model.metadata.name,
            trees = self.state.model.forest.n_trees(),
            "prediction server listening"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(ServerError::Io)?;

        Ok(())
    }

    /// Get the configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    /// Get the current state (for testing)
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

// =============================================================================
// Tests
// =============================================================================
