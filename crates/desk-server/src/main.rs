//! Desk Server
//!
//! HTTP server for the employee, issue and comment tracker.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use desk_api::AppState;
use desk_core::config::{AppConfig, ServerConfig};
use desk_db::{Database, Stores};

mod health;

use health::{HealthChecker, HealthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize structured logging
    init_tracing();

    // Bad values abort startup rather than falling back to defaults
    let config = AppConfig::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        in_memory = config.uses_in_memory_store(),
        "Starting Desk"
    );

    // Select the store
    let db = match config.database.url.as_deref() {
        Some(url) => {
            let db = Database::connect(url, &config.database).await?;
            db.migrate().await?;
            info!("Connected to database");
            Some(db)
        }
        None => {
            info!("DATABASE_URL not set, using the in-memory store");
            None
        }
    };

    let stores = match db {
        Some(ref db) => Stores::postgres(db.pool().clone()),
        None => Stores::in_memory(),
    };

    let mut health_checker = HealthChecker::new(HealthConfig::default());
    if let Some(ref db) = db {
        health_checker = health_checker.with_database(db.clone());
    }

    // Build router
    let app = build_router(
        AppState::new(stores),
        Arc::new(health_checker),
        &config.server,
    );

    // Start server
    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,desk_server=debug,desk_api=debug,desk_services=debug,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the application router
fn build_router(state: AppState, health: Arc<HealthChecker>, server: &ServerConfig) -> Router {
    // Operational routes live outside /api
    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .merge(desk_api::router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(server.max_body_size_bytes))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds,
                ))),
        )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app(server: &ServerConfig) -> Router {
        let health_checker = Arc::new(HealthChecker::new(HealthConfig::default()));
        build_router(AppState::in_memory(), health_checker, server)
    }

    fn default_app() -> Router {
        test_app(&AppConfig::default().server)
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = default_app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        let response = default_app()
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_mounted() {
        let response = default_app()
            .oneshot(
                Request::builder()
                    .uri("/api/employees")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut server = AppConfig::default().server;
        server.max_body_size_bytes = 16;
        let body = r#"{"name": "Ivan", "lastName": "Ivanov"}"#;

        let response = test_app(&server)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/employees")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
