use crate::dtos::{NamingRequest, NamingResult};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::validation::require_non_blank;

pub async fn generate_brand_names(
    State(state): State<AppState>,
    Json(request): Json<NamingRequest>,
) -> Result<Json<NamingResult>, AppError> {
    require_non_blank(&request.niche, "Niche cannot be empty")?;

    let result = state
        .writer
        .generate_brand_names(&request.niche, &request.tone, &request.audience)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, niche = %request.niche, "Brand name generation failed");
            AppError::ServiceFailure(format!("Generation failed: {}", e))
        })?;

    Ok(Json(result))
}
