//! Prometheus metrics for brandcraft-service.
//!
//! HTTP request metrics are recorded by the shared middleware through the
//! `metrics` facade; domain counters for upstream AI calls live in a
//! `prometheus` registry. `/metrics` renders both.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;
use std::time::Duration;

pub static HTTP_METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static UPSTREAM_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static LOGO_MODEL_ATTEMPTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static SENTIMENT_FALLBACKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = HTTP_METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install HTTP metrics recorder"),
    }

    let registry = Registry::new();

    let upstream_requests = IntCounterVec::new(
        Opts::new(
            "brandcraft_upstream_requests_total",
            "Calls to hosted AI services by provider and outcome",
        ),
        &["provider", "outcome"],
    )
    .expect("Failed to create brandcraft_upstream_requests_total metric");

    let upstream_latency = HistogramVec::new(
        HistogramOpts::new(
            "brandcraft_upstream_latency_seconds",
            "Hosted AI service latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 90.0]),
        &["provider"],
    )
    .expect("Failed to create brandcraft_upstream_latency_seconds metric");

    let logo_attempts = IntCounterVec::new(
        Opts::new(
            "brandcraft_logo_model_attempts_total",
            "Logo generation attempts by model and outcome",
        ),
        &["model", "outcome"],
    )
    .expect("Failed to create brandcraft_logo_model_attempts_total metric");

    let sentiment_fallbacks = IntCounterVec::new(
        Opts::new(
            "brandcraft_sentiment_fallbacks_total",
            "Sentiment requests answered by the keyword heuristic",
        ),
        &["reason"],
    )
    .expect("Failed to create brandcraft_sentiment_fallbacks_total metric");

    registry
        .register(Box::new(upstream_requests.clone()))
        .expect("Failed to register brandcraft_upstream_requests_total");
    registry
        .register(Box::new(upstream_latency.clone()))
        .expect("Failed to register brandcraft_upstream_latency_seconds");
    registry
        .register(Box::new(logo_attempts.clone()))
        .expect("Failed to register brandcraft_logo_model_attempts_total");
    registry
        .register(Box::new(sentiment_fallbacks.clone()))
        .expect("Failed to register brandcraft_sentiment_fallbacks_total");

    let _ = REGISTRY.set(registry);
    let _ = UPSTREAM_REQUESTS_TOTAL.set(upstream_requests);
    let _ = UPSTREAM_LATENCY_SECONDS.set(upstream_latency);
    let _ = LOGO_MODEL_ATTEMPTS_TOTAL.set(logo_attempts);
    let _ = SENTIMENT_FALLBACKS_TOTAL.set(sentiment_fallbacks);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = HTTP_METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            output.push_str("# Metrics registry not initialized\n");
            return output;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        output.push_str(&format!("# Failed to encode metrics: {}\n", e));
        return output;
    }

    match String::from_utf8(buffer) {
        Ok(s) => output.push_str(&s),
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            output.push_str(&format!("# Failed to convert metrics to UTF-8: {}\n", e));
        }
    }

    output
}

// Helper functions for recording metrics

/// Record one call to a hosted service.
pub fn record_upstream_call(provider: &str, outcome: &str, elapsed: Duration) {
    if let Some(counter) = UPSTREAM_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[provider, outcome]).inc();
    }
    if let Some(histogram) = UPSTREAM_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider])
            .observe(elapsed.as_secs_f64());
    }
}

/// Record the outcome of one logo model attempt.
pub fn record_logo_attempt(model: &str, outcome: &str) {
    if let Some(counter) = LOGO_MODEL_ATTEMPTS_TOTAL.get() {
        counter.with_label_values(&[model, outcome]).inc();
    }
}

/// Record a sentiment request served by the fallback heuristic.
pub fn record_sentiment_fallback(reason: &str) {
    if let Some(counter) = SENTIMENT_FALLBACKS_TOTAL.get() {
        counter.with_label_values(&[reason]).inc();
    }
}
