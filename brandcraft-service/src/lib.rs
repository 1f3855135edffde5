pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;

use axum::{
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::BrandcraftConfig;
use crate::services::{BrandWriter, LogoGenerator, SentimentAnalyzer};

#[derive(Clone)]
pub struct AppState {
    pub config: BrandcraftConfig,
    pub writer: BrandWriter,
    pub logo: Arc<LogoGenerator>,
    pub sentiment: SentimentAnalyzer,
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/brand-name", post(handlers::generate_brand_names))
        .route("/content", post(handlers::generate_content))
        .route("/logo", post(handlers::generate_logo))
        .route("/sentiment", post(handlers::analyze_sentiment))
        .route("/assistant", post(handlers::assistant_chat));

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics));

    let app = if state.config.api_prefix.is_empty() {
        app.merge(api_routes)
    } else {
        app.nest(&state.config.api_prefix, api_routes)
    };

    let cors = cors_layer(&state.config.allowed_origins);

    app.with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
