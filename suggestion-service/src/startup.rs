//! Application startup and lifecycle management.
//!
//! Providers are constructed once from configuration and shared by every
//! request; nothing is mutated across requests.

use crate::config::SuggestionConfig;
use crate::handlers::{health_check, suggest_content};
use crate::services::providers::{
    CompletionProvider, HeuristTrendProvider, OpenAiCompletionProvider, TrendProvider,
};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: SuggestionConfig,
    pub trend_provider: Arc<dyn TrendProvider>,
    pub completion_provider: Arc<dyn CompletionProvider>,
}

/// Build the service router for the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chatbot/", post(suggest_content))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: SuggestionConfig) -> Result<Self, AppError> {
        let trend_provider: Arc<dyn TrendProvider> =
            Arc::new(HeuristTrendProvider::new(config.heurist.clone()));
        let completion_provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiCompletionProvider::new(config.openai.clone()));

        tracing::info!(
            trend_api = %config.heurist.api_url,
            model = %config.openai.model,
            "Initialized suggestion providers"
        );

        let state = AppState {
            config: config.clone(),
            trend_provider,
            completion_provider,
        };

        // Port 0 binds a random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Suggestion service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
