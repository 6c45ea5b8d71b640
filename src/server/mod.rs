//! HTTP prediction service
//!
//! A thin axum wrapper around the encoder and the fitted forest: one
//! prediction endpoint plus a health check. The model artifact is loaded
//! once at startup and shared read-only across requests; request handling
//! is pure, so the serving layer needs no locking.

mod api;
mod handlers;
mod state;

pub use api::PredictServer;
pub use state::AppState;

use crate::features::MovieRecord;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub address: SocketAddr,
    /// Whether to add a permissive CORS layer
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }

    /// Disable the CORS layer
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}

/// Server-side errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to bind address: {0}")]
    Bind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prediction error: {0}")]
    Predict(#[from] crate::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Movie language, restricted to the trained vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    French,
    Spanish,
    Hindi,
    Mandarin,
    Other,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Hindi => "Hindi",
            Language::Mandarin => "Mandarin",
            Language::Other => "Other",
        }
    }
}

/// Raw content rating accepted by the API. Every value maps into a
/// canonical rating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentRating {
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    R,
    #[serde(rename = "NC-17")]
    Nc17,
    Unrated,
}

impl ContentRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRating::G => "G",
            ContentRating::Pg => "PG",
            ContentRating::Pg13 => "PG-13",
            ContentRating::R => "R",
            ContentRating::Nc17 => "NC-17",
            ContentRating::Unrated => "Unrated",
        }
    }
}

/// `POST /predict` request body.
///
/// `country` is a free-form string: the encoder folds historical aliases
/// ("Hong Kong", "West Germany", ...) into their canonical equivalents
/// and collapses anything outside the trained vocabulary to "Other".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub budget: f64,
    pub gross: f64,
    pub duration: f64,
    pub num_critic_for_reviews: u32,
    pub num_user_for_reviews: u32,
    pub num_voted_users: u32,
    pub title_year: i32,
    pub color: bool,
    /// Pipe-separated genres, e.g. `"Action|Comedy|Drama"`. Every token
    /// must be a known genre.
    pub genres: String,
    pub language: Language,
    pub country: String,
    pub content_rating: ContentRating,
}

impl From<&PredictRequest> for MovieRecord {
    fn from(request: &PredictRequest) -> Self {
        MovieRecord {
            budget: request.budget as f32,
            gross: request.gross as f32,
            duration: request.duration as f32,
            num_critic_for_reviews: request.num_critic_for_reviews as f32,
            num_user_for_reviews: request.num_user_for_reviews as f32,
            num_voted_users: request.num_voted_users as f32,
            title_year: request.title_year as f32,
            color: request.color,
            genres: request.genres.clone(),
            language: request.language.as_str().to_string(),
            country: request.country.clone(),
            content_rating: request.content_rating.as_str().to_string(),
        }
    }
}

/// `POST /predict` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Probability of the "good" class, in `[0, 1]`.
    pub is_good_probability: f64,
    /// The classifier's direct binary prediction.
    pub is_good: bool,
}

/// `GET /health` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub uptime_secs: u64,
}

/// Error body for client/server failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.address.port(), 8000);
        assert!(config.cors_enabled);
    }

    #[test]
    fn test_server_config_without_cors() {
        let config = ServerConfig::default().without_cors();
        assert!(!config.cors_enabled);
    }

    #[test]
    fn test_language_serde_names() {
        let lang: Language = serde_json::from_str("\"Mandarin\"").unwrap();
        assert_eq!(lang, Language::Mandarin);
        assert!(serde_json::from_str::<Language>("\"Swedish\"").is_err());
    }

    #[test]
    fn test_content_rating_serde_names() {
        let rating: ContentRating = serde_json::from_str("\"PG-13\"").unwrap();
        assert_eq!(rating, ContentRating::Pg13);
        assert_eq!(
            serde_json::to_string(&ContentRating::Nc17).unwrap(),
            "\"NC-17\""
        );
        assert!(serde_json::from_str::<ContentRating>("\"TV-MA\"").is_err());
    }

    #[test]
    fn test_request_to_record() {
        let request = PredictRequest {
            budget: 1_000_000.0,
            gross: 5_000_000.0,
            duration: 120.0,
            num_critic_for_reviews: 50,
            num_user_for_reviews: 100,
            num_voted_users: 20_000,
            title_year: 2015,
            color: true,
            genres: "Action|Comedy".to_string(),
            language: Language::English,
            country: "USA".to_string(),
            content_rating: ContentRating::Pg13,
        };
        let record = MovieRecord::from(&request);
        assert_eq!(record.budget, 1_000_000.0);
        assert_eq!(record.language, "English");
        assert_eq!(record.content_rating, "PG-13");
        assert!(record.color);
    }
}
