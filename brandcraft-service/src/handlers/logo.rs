use crate::dtos::{LogoRequest, LogoResult};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::validation::require_non_blank;

/// Generation failures come back as `success: false` with a 200.
pub async fn generate_logo(
    State(state): State<AppState>,
    Json(request): Json<LogoRequest>,
) -> Result<Json<LogoResult>, AppError> {
    require_non_blank(&request.brand_name, "Brand name cannot be empty")?;

    let result = state
        .logo
        .generate_logo(
            &request.brand_name,
            &request.style,
            &request.primary_color,
            &request.industry,
        )
        .await;

    Ok(Json(result))
}
