//! # API Request/Response Types
//!
//! JSON structures specific to the HTTP API. Recommendation requests and
//! responses are the core types themselves (`ProjectRequirements`,
//! `RecommendationResponse`).

use serde::{Deserialize, Serialize};
use stacksense_core::{Catalog, CatalogSource, Category, Technology};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// ROOT
// =============================================================================

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: "Welcome to StackSense API".to_string(),
        }
    }
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of technologies in the current catalog snapshot.
    pub technologies: usize,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            technologies: 0,
        }
    }
}

impl HealthResponse {
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            technologies: catalog.len(),
            ..Self::default()
        }
    }
}

// =============================================================================
// CATALOG RESPONSES
// =============================================================================

/// Where the catalog snapshot came from, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOrigin {
    /// `file`, `missing` or `inline`
    pub kind: String,
    pub path: Option<String>,
}

impl From<&CatalogSource> for CatalogOrigin {
    fn from(source: &CatalogSource) -> Self {
        let kind = match source {
            CatalogSource::File(_) => "file",
            CatalogSource::Missing(_) => "missing",
            CatalogSource::Inline => "inline",
        };
        Self {
            kind: kind.to_string(),
            path: source.path().map(|p| p.display().to_string()),
        }
    }
}

/// Body of `GET /catalog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub count: usize,
    pub source: CatalogOrigin,
    pub fingerprint: Option<String>,
    pub categories: BTreeMap<Category, usize>,
    pub technologies: Vec<Arc<Technology>>,
}

impl CatalogResponse {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            count: catalog.len(),
            source: CatalogOrigin::from(catalog.source()),
            fingerprint: catalog.fingerprint().map(str::to_string),
            categories: catalog.count_by_category(),
            technologies: catalog.technologies().to_vec(),
        }
    }
}

/// Body of a successful `POST /catalog/reload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub reloaded: bool,
    pub technologies: usize,
    pub fingerprint: Option<String>,
    pub previous_fingerprint: Option<String>,
}
