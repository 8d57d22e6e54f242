//! # Roombook API
//!
//! The API crate provides the web server for the room reservation service. It exposes
//! endpoints to create, read, list, update and delete reservations.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Decode requests, validate them and call the store
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the store through `ReservationRepository`, so the server runs
//! against PostgreSQL in production and against the in-memory engine in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers for the reservation endpoints
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Response envelope
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use roombook_core::repository::ReservationRepository;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Reservation store
    pub repo: Arc<dyn ReservationRepository>,

    /// Deadline for each store operation and each request as a whole
    pub request_timeout: Duration,
}

/// Headroom the outer request timeout leaves after the store deadline. An expired store
/// call must reach the client as `Cancelled`, not as the layer's bare 408.
pub const TIMEOUT_LAYER_GRACE: Duration = Duration::from_secs(1);

/// Builds the application router with all routes, request tracing and the request
/// deadline.
pub fn app(state: Arc<ApiState>) -> Router {
    let request_timeout = state.request_timeout.saturating_add(TIMEOUT_LAYER_GRACE);

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Reservation endpoints
        .merge(routes::reservation::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .allow_origin(origins))
}

/// Starts the API server and serves until `shutdown` resolves.
///
/// Initializes logging, builds the router around `repo` and drains in-flight requests
/// once the shutdown signal fires. Closing the store is left to the caller.
pub async fn start_server<F>(
    config: config::ApiConfig,
    repo: Arc<dyn ReservationRepository>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        repo,
        request_timeout: config.request_timeout,
    });

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped accepting requests");
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
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

    info!("Shutdown signal received");
}
