//! Application startup and lifecycle management.

use crate::config::BrandcraftConfig;
use crate::services::providers::openrouter::OpenRouterChatProvider;
use crate::services::providers::ChatProvider;
use crate::services::{BrandWriter, LogoGenerator, RemoteNlu, SentimentAnalyzer};
use crate::{build_router, AppState};
use service_core::error::AppError;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

/// Wire every client from configuration. No network calls are made here.
pub fn build_state(config: BrandcraftConfig) -> Result<AppState, AppError> {
    let chat: Arc<dyn ChatProvider> = Arc::new(
        OpenRouterChatProvider::new(config.openrouter.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
    );
    if config.openrouter.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY is not set, text endpoints will fail");
    }
    tracing::info!(model = %config.openrouter.model, "Initialized OpenRouter chat provider");

    let logo = LogoGenerator::new(&config.huggingface)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
    tracing::info!(
        models = ?config.huggingface.models,
        "Initialized logo generator"
    );

    let sentiment = SentimentAnalyzer::new(RemoteNlu::from_config(&config.watson));

    Ok(AppState {
        config,
        writer: BrandWriter::new(chat),
        logo: Arc::new(logo),
        sentiment,
    })
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: BrandcraftConfig) -> Result<Self, AppError> {
        let port = config.common.port;
        let state = build_state(config)?;
        Self::with_state(state, port).await
    }

    /// Bind a listener and serve `state`. Port 0 picks a random port.
    pub async fn with_state(state: AppState, port: u16) -> Result<Self, AppError> {
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port,
            server: Box::pin(server),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
