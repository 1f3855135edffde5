use crate::dtos::{ContentRequest, ContentResponse};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::validation::require_non_blank;

pub async fn generate_content(
    State(state): State<AppState>,
    Json(request): Json<ContentRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    require_non_blank(&request.brand_name, "Brand name cannot be empty")?;

    let data = state
        .writer
        .generate_brand_content(
            &request.brand_name,
            &request.niche,
            request.content_type,
            &request.tone,
        )
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                content_type = request.content_type.as_str(),
                "Content generation failed"
            );
            AppError::ServiceFailure(format!("Content generation failed: {}", e))
        })?;

    Ok(Json(ContentResponse {
        content_type: request.content_type,
        data,
    }))
}
