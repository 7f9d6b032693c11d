//! # API Endpoint Handlers
//!
//! Every handler takes a catalog snapshot under a short read lock and does
//! its work outside the lock.

use super::{
    AppState,
    error::{ApiError, ApiResult},
    types::{CatalogResponse, HealthResponse, ReloadResponse, WelcomeResponse},
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use stacksense_core::{
    Catalog, ProjectRequirements, RecommendationResponse, Recommender, RequirementOptions,
};
use std::sync::Arc;

// =============================================================================
// ROOT & HEALTH
// =============================================================================

pub async fn root_handler() -> impl IntoResponse {
    Json(WelcomeResponse::default())
}

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.snapshot().await;
    Json(HealthResponse::for_catalog(&catalog))
}

// =============================================================================
// RECOMMEND HANDLER
// =============================================================================

/// Score the catalog against the submitted requirements.
///
/// Malformed JSON is a 400, a schema mismatch a 422, an oversized label a
/// 422 naming the field.
pub async fn recommend_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectRequirements>, JsonRejection>,
) -> ApiResult<Json<RecommendationResponse>> {
    let Json(requirements) = payload.map_err(|rejection| {
        tracing::debug!("Rejected recommendation request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    requirements.validate()?;

    let catalog = state.snapshot().await;
    if catalog.is_empty() {
        tracing::warn!("Recommendation requested against an empty catalog");
    }

    let response = Recommender::new(catalog).recommend(&requirements);

    tracing::info!(
        project = %response.project_name,
        categories = response.results.len(),
        strategy = response
            .deployment_strategy
            .as_ref()
            .map(|s| s.title.as_str())
            .unwrap_or("none"),
        "Recommendation served"
    );

    Ok(Json(response))
}

// =============================================================================
// CATALOG HANDLERS
// =============================================================================

/// List the current catalog snapshot.
pub async fn catalog_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.snapshot().await;
    Json(CatalogResponse::from_catalog(&catalog))
}

/// Canonical labels for every requirement field.
pub async fn options_handler() -> impl IntoResponse {
    Json(RequirementOptions::canonical())
}

/// Rebuild the catalog from the configured path and swap it in.
///
/// The current snapshot stays in place when the file is malformed.
pub async fn reload_handler(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    if !state.settings.catalog.allow_reload {
        return Err(ApiError::Forbidden(
            "Catalog reload is disabled; set catalog.allow_reload = true".to_string(),
        ));
    }

    let path = state.settings.catalog.path.clone();
    let loaded = tokio::task::spawn_blocking(move || Catalog::load(path))
        .await
        .map_err(|e| ApiError::internal(format!("Catalog reload task failed: {}", e)))?;

    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Catalog reload failed, keeping current snapshot: {}", e);
            return Err(e.into());
        }
    };

    if catalog.source().is_missing() {
        tracing::warn!(
            path = %state.settings.catalog.path.display(),
            "Catalog file not found on reload; serving an empty catalog"
        );
    }

    let technologies = catalog.len();
    let fingerprint = catalog.fingerprint().map(str::to_string);
    let previous = state.swap(Arc::new(catalog)).await;

    tracing::info!(
        technologies,
        fingerprint = fingerprint.as_deref().unwrap_or("-"),
        "Catalog reloaded"
    );

    Ok(Json(ReloadResponse {
        reloaded: true,
        technologies,
        fingerprint,
        previous_fingerprint: previous.fingerprint().map(str::to_string),
    }))
}
