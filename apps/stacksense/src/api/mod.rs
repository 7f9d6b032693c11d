//! # StackSense HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Welcome message
//! - `POST /recommend` - Score the catalog against project requirements
//! - `GET /health` - Health check
//! - `GET /catalog` - Current catalog snapshot
//! - `GET /options` - Canonical labels for every requirement field
//! - `POST /catalog/reload` - Swap in a fresh catalog (requires `catalog.allow_reload`)
//!
//! CORS origins, the rate limit and the body limit come from [`Settings`].

mod error;
mod handlers;
mod middleware;
mod types;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{
    catalog_handler, health_handler, options_handler, recommend_handler, reload_handler,
    root_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{CatalogOrigin, CatalogResponse, HealthResponse, ReloadResponse, WelcomeResponse};

use crate::config::{CorsSettings, Settings};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use stacksense_core::{Catalog, StackError};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The catalog is an immutable snapshot behind an `Arc`; the lock only guards
/// which snapshot is current.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, settings: Settings) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            settings: Arc::new(settings),
        }
    }

    /// The current catalog snapshot.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    /// Replace the current snapshot, returning the previous one.
    pub async fn swap(&self, catalog: Arc<Catalog>) -> Arc<Catalog> {
        let mut current = self.catalog.write().await;
        std::mem::replace(&mut *current, catalog)
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from settings.
///
/// - `"*"` allows every origin (logged as a warning)
/// - otherwise only the listed origins; invalid entries are skipped
/// - an empty or fully invalid list falls back to the localhost defaults
fn build_cors_layer(cors: &CorsSettings) -> CorsLayer {
    if cors.allows_any() {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed_origins = parse_origins(&cors.origins);
    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        return origin_cors(parse_origins(&CorsSettings::default().origins));
    }

    origin_cors(allowed_origins)
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|s| {
            let trimmed = s.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(hv) => {
                    tracing::debug!("CORS: Allowing origin: {}", trimmed);
                    Some(hv)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

fn origin_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// PANIC HANDLING
// =============================================================================

/// Turn a handler panic into the standard 500 error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal("Internal server error").into_response()
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. Panic catcher - 500 JSON instead of a dropped connection
/// 3. CORS - handles preflight requests
/// 4. Body limit
/// 5. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let settings = Arc::clone(&state.settings);

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/recommend", post(handlers::recommend_handler))
        .route("/health", get(handlers::health_handler))
        .route("/catalog", get(handlers::catalog_handler))
        .route("/catalog/reload", post(handlers::reload_handler))
        .route("/options", get(handlers::options_handler));

    let rps = settings.rate_limit.requests_per_second;
    if rps > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rps);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rps),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    if settings.catalog.allow_reload {
        tracing::info!("Catalog reload endpoint enabled");
    }

    router
        .layer(DefaultBodyLimit::max(settings.server.body_limit_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(build_cors_layer(&settings.cors)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind `addr` and serve until the process exits.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), StackError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StackError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("StackSense HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| StackError::Io(format!("Server error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_fall_back_to_defaults() {
        let parsed = parse_origins(&["bad\norigin".to_string()]);
        assert!(parsed.is_empty());

        let defaults = parse_origins(&CorsSettings::default().origins);
        assert_eq!(defaults.len(), 4);
    }

    #[test]
    fn panic_becomes_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn swap_returns_previous_snapshot() {
        let state = AppState::new(Catalog::empty(), Settings::default());
        let previous = state.swap(Arc::new(Catalog::empty())).await;
        assert!(previous.is_empty());
        assert!(state.snapshot().await.is_empty());
    }
}
