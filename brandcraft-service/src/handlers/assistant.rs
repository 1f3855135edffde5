use crate::dtos::{AssistantRequest, AssistantResponse};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::validation::require_non_blank;

pub async fn assistant_chat(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, AppError> {
    require_non_blank(&request.message, "Message cannot be empty")?;

    let response = state
        .writer
        .assistant_chat(&request.messages, &request.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Assistant chat failed");
            AppError::ServiceFailure(format!("Assistant error: {}", e))
        })?;

    Ok(Json(AssistantResponse { response }))
}
