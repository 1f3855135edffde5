use crate::dtos::{SentimentRequest, SentimentResult};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::validation::require_non_blank;
use validator::Validate;

pub async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<SentimentResult>, AppError> {
    require_non_blank(&request.text, "Text cannot be empty")?;
    request.validate()?;

    Ok(Json(state.sentiment.analyze(&request.text).await))
}
