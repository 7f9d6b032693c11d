//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::config::Settings;
use stacksense_core::{
    Catalog, CATEGORY_ORDER, Explanation, ProjectRequirements, RecommendationResponse,
    Recommender, RequirementOptions, ScoredTechnology, StackError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// FILE HANDLING
// =============================================================================

/// Maximum size of a requirements file (1 MB).
const MAX_REQUEST_FILE_SIZE: u64 = 1024 * 1024;

/// Canonicalize `path` and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, StackError> {
    let canonical = path.canonicalize().map_err(|e| {
        StackError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(StackError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and validate a requirements file.
fn read_requirements(path: &Path) -> Result<ProjectRequirements, StackError> {
    let path = validate_file_path(path)?;

    let metadata = std::fs::metadata(&path)
        .map_err(|e| StackError::Io(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_REQUEST_FILE_SIZE {
        return Err(StackError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_REQUEST_FILE_SIZE
        )));
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| StackError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    let requirements: ProjectRequirements =
        serde_json::from_str(&content).map_err(|e| StackError::InvalidRequirements {
            field: "request",
            reason: e.to_string(),
        })?;
    requirements.validate()?;

    Ok(requirements)
}

/// Load the configured catalog, warning when the file is absent.
fn load_catalog(settings: &Settings) -> Result<Catalog, StackError> {
    let catalog = Catalog::load(&settings.catalog.path)?;
    if catalog.source().is_missing() {
        tracing::warn!(
            path = %settings.catalog.path.display(),
            "Catalog file not found; recommendations will be empty"
        );
    } else {
        tracing::debug!(technologies = catalog.len(), "Catalog loaded");
    }
    Ok(catalog)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: Settings) -> Result<(), StackError> {
    let catalog = load_catalog(&settings)?;

    println!("StackSense Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:      {}", settings.server.host);
    println!("  Port:      {}", settings.server.port);
    println!("  Catalog:   {} ({} technologies)", settings.catalog.path.display(), catalog.len());
    println!("  Reload:    {}", if settings.catalog.allow_reload { "enabled" } else { "disabled" });
    println!("  Rate:      {} req/s", settings.rate_limit.requests_per_second);
    println!();
    println!("Endpoints:");
    println!("  POST /recommend      - Recommend a stack");
    println!("  GET  /catalog        - List the catalog");
    println!("  GET  /options        - Requirement labels");
    println!("  POST /catalog/reload - Reload the catalog");
    println!("  GET  /health         - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    api::run_server(&addr, AppState::new(catalog, settings)).await
}

// =============================================================================
// RECOMMEND COMMAND
// =============================================================================

/// Recommend a stack for the requirements in `file`.
pub fn cmd_recommend(
    settings: &Settings,
    json_mode: bool,
    file: &Path,
    explain: bool,
) -> Result<(), StackError> {
    let requirements = read_requirements(file)?;
    let recommender = Recommender::new(Arc::new(load_catalog(settings)?));
    let response = recommender.recommend(&requirements);
    let explanations = if explain {
        recommender.explain(&requirements)
    } else {
        Vec::new()
    };

    if json_mode {
        let output = if explain {
            serde_json::json!({
                "recommendation": response,
                "explanation": explanations,
            })
        } else {
            serde_json::to_value(&response).unwrap_or_default()
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    print_recommendation(&response);
    if explain {
        println!();
        print_explanations(&explanations);
    }

    Ok(())
}

fn print_recommendation(response: &RecommendationResponse) {
    println!("Recommended Stack: {}", response.project_name);
    println!("==================");

    if response.results.is_empty() {
        println!("No recommendations (catalog is empty).");
    }

    for result in &response.results {
        println!();
        println!("{}", result.category);
        if let Some(top) = &result.top_pick {
            print_candidate("*", top);
            for reason in &top.reasons {
                println!("      - {}", reason);
            }
        }
        for alternative in &result.alternatives {
            print_candidate(" ", alternative);
        }
    }

    if let Some(strategy) = &response.deployment_strategy {
        println!();
        println!("Deployment: {}", strategy.title);
        println!("  {}", strategy.description);
        println!("  Platforms: {}", strategy.recommended_platforms.join(", "));
    }
}

fn print_candidate(marker: &str, candidate: &ScoredTechnology) {
    println!(
        "  {} {:<22} {:>4}",
        marker,
        candidate.technology.name,
        candidate.score.value()
    );
}

fn print_explanations(explanations: &[Explanation]) {
    println!("Score Breakdown");
    println!("===============");
    for explanation in explanations {
        println!();
        println!("{} ({})", explanation.technology_id, explanation.category);
        for contribution in &explanation.contributions {
            if contribution.excluded {
                println!("  {:<20} excluded", contribution.rule);
                continue;
            }
            if contribution.delta.is_zero() && contribution.reasons.is_empty() {
                continue;
            }
            println!("  {:<20} {:>+4}", contribution.rule, contribution.delta.value());
        }
    }
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Summarize the catalog. With `validate`, a missing file is an error.
pub fn cmd_catalog(settings: &Settings, json_mode: bool, validate: bool) -> Result<(), StackError> {
    let catalog = load_catalog(settings)?;

    if validate && catalog.source().is_missing() {
        return Err(StackError::Io(format!(
            "Catalog file '{}' not found",
            settings.catalog.path.display()
        )));
    }

    let counts = catalog.count_by_category();

    if json_mode {
        let output = serde_json::json!({
            "path": settings.catalog.path.to_string_lossy(),
            "missing": catalog.source().is_missing(),
            "count": catalog.len(),
            "fingerprint": catalog.fingerprint(),
            "categories": counts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("StackSense Catalog");
    println!("==================");
    println!("Path:        {}", settings.catalog.path.display());
    if catalog.source().is_missing() {
        println!("Status:      missing (serving an empty catalog)");
    }
    println!("Technologies: {}", catalog.len());
    if let Some(fingerprint) = catalog.fingerprint() {
        println!("Fingerprint: {}", fingerprint);
    }
    println!();
    for category in CATEGORY_ORDER {
        println!(
            "  {:<10} {}",
            category.name(),
            counts.get(&category).copied().unwrap_or(0)
        );
    }

    if validate {
        println!();
        println!("Catalog is valid.");
    }

    Ok(())
}

// =============================================================================
// OPTIONS COMMAND
// =============================================================================

/// Print the canonical label for every requirement field.
pub fn cmd_options(json_mode: bool) -> Result<(), StackError> {
    let options = RequirementOptions::canonical();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&options).unwrap_or_default()
        );
        return Ok(());
    }

    let sections: [(&str, &[String]); 6] = [
        ("Project Types", &options.project_types),
        ("Domains", &options.domains),
        ("Scales", &options.scales),
        ("Team Sizes", &options.team_sizes),
        ("Budgets", &options.budgets),
        ("Priorities", &options.priorities),
    ];
    for (title, labels) in sections {
        println!("{}:", title);
        for label in labels {
            println!("  - {}", label);
        }
        println!();
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_file_round_trips_through_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("req.json");
        std::fs::write(
            &path,
            r#"{"project_type": "Web App", "domain": "E-commerce",
                "expected_scale": "Medium", "team_size": "Solo", "budget": "Moderate"}"#,
        )
        .expect("write");

        let reqs = read_requirements(&path).expect("read");
        assert_eq!(reqs.project_name(), "E-commerce Web App");
    }

    #[test]
    fn malformed_requirements_name_the_request() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("req.json");
        std::fs::write(&path, r#"{"project_type": "Web App"}"#).expect("write");

        let err = read_requirements(&path).expect_err("missing fields");
        assert!(matches!(
            err,
            StackError::InvalidRequirements { field: "request", .. }
        ));
    }

    #[test]
    fn directories_are_not_requirement_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            validate_file_path(dir.path()),
            Err(StackError::Io(_))
        ));
    }

    #[test]
    fn validate_rejects_missing_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut settings = Settings::default();
        settings.catalog.path = dir.path().join("absent.json");

        assert!(cmd_catalog(&settings, true, false).is_ok());
        assert!(matches!(
            cmd_catalog(&settings, true, true),
            Err(StackError::Io(_))
        ));
    }
}
