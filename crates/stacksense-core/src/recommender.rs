//! # Recommendation Orchestrator
//!
//! Turns one set of requirements into a ranked answer per category.
//!
//! The recommender holds an immutable catalog snapshot. It never mutates it,
//! so a single instance can serve any number of concurrent callers.

use crate::catalog::Catalog;
use crate::deployment::select_strategy;
use crate::primitives::CATEGORY_ORDER;
use crate::requirements::{Profile, ProjectRequirements};
use crate::scoring::{RuleContribution, RuleSet};
use crate::types::{Category, CategoryResult, RecommendationResponse, ScoredTechnology};
use serde::Serialize;
use std::sync::Arc;

/// Scores a catalog snapshot against requirements.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
}

/// Per-rule breakdown for one technology.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub technology_id: String,
    pub category: Category,
    pub contributions: Vec<RuleContribution>,
}

impl Recommender {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Produce the full recommendation.
    ///
    /// Categories follow [`CATEGORY_ORDER`]. Hardware is evaluated only when
    /// hardware integration was requested; categories without catalog entries
    /// are omitted.
    #[must_use]
    pub fn recommend(&self, reqs: &ProjectRequirements) -> RecommendationResponse {
        let profile = reqs.profile();

        let results = CATEGORY_ORDER
            .iter()
            .filter(|category| **category != Category::Hardware || profile.hardware_requested())
            .filter_map(|category| self.rank_category(*category, &profile))
            .collect();

        RecommendationResponse {
            project_name: reqs.project_name(),
            results,
            deployment_strategy: Some(select_strategy(&profile)),
        }
    }

    /// Score and rank every technology of `category`.
    ///
    /// Returns `None` when the catalog has no entries for it. The sort is
    /// stable, so equal scores keep catalog order.
    fn rank_category(&self, category: Category, profile: &Profile) -> Option<CategoryResult> {
        let rules = RuleSet::shared();

        let mut scored: Vec<ScoredTechnology> = self
            .catalog
            .in_category(category)
            .map(|tech| {
                let card = rules.score(tech, profile);
                ScoredTechnology {
                    technology: Arc::clone(tech),
                    score: card.score,
                    reasons: card.reasons,
                }
            })
            .collect();

        if scored.is_empty() {
            return None;
        }

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let mut ranked = scored.into_iter();
        let top_pick = ranked.next();
        Some(CategoryResult {
            category,
            top_pick,
            alternatives: ranked.collect(),
        })
    }

    /// Rule-by-rule breakdown for every technology that `recommend` would score.
    #[must_use]
    pub fn explain(&self, reqs: &ProjectRequirements) -> Vec<Explanation> {
        let profile = reqs.profile();
        let rules = RuleSet::shared();

        CATEGORY_ORDER
            .iter()
            .filter(|category| **category != Category::Hardware || profile.hardware_requested())
            .flat_map(|category| self.catalog.in_category(*category))
            .map(|tech| Explanation {
                technology_id: tech.id.clone(),
                category: tech.category,
                contributions: rules.breakdown(tech, &profile),
            })
            .collect()
    }
}
