//! Request handlers
//!
//! The JSON extractor rejects malformed bodies and unknown enum values
//! before a handler runs; genre tokens are the one field the extractor
//! cannot check, so [`predict`] validates them itself. Nothing here
//! mutates state: each request is a bounded, synchronous encode-then-
//! predict computation.

use crate::features::{encode_record, schema, MovieRecord};
use crate::server::{
    state::AppState, HealthResponse, PredictRequest, PredictResponse, Result, ServerError,
};
use axum::extract::State;
use axum::Json;

/// `POST /predict`
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    validate_genres(&request.genres)?;

    let record = MovieRecord::from(&request);
    let features = encode_record(&record);
    let distribution = state.model.forest.class_distribution(features.values())?;

    let response = PredictResponse {
        is_good_probability: distribution[1],
        is_good: distribution[1] > distribution[0],
    };
    tracing::debug!(
        probability = response.is_good_probability,
        "prediction served"
    );
    Ok(Json(response))
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.metadata.name.clone(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Every pipe-delimited token must be a canonical genre.
fn validate_genres(genres: &str) -> Result<()> {
    for token in genres.split('|') {
        if !schema::GENRES.contains(&token) {
            return Err(ServerError::Validation(format!(
                "genres: unknown genre {token:?}"
            )));
        }
    }
    Ok(())
}
