//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::recommendation::prompt::recommend;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_interest: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: String,
}

/// POST /recommend
///
/// Sends the whole catalog plus the user's interest to the model and returns
/// its answer as-is. A body without `user_interest` is rejected by the `Json`
/// extractor before this runs.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    info!(
        interest_chars = request.user_interest.chars().count(),
        "Recommendation requested"
    );

    let recommendations =
        recommend(state.llm.as_ref(), &state.catalog, &request.user_interest).await?;

    Ok(Json(RecommendResponse { recommendations }))
}
