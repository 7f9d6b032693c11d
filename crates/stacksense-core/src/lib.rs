//! # stacksense-core
//!
//! The deterministic recommendation engine for StackSense - THE LOGIC.
//!
//! Given a project description (type, domain, scale, team size, budget and
//! priorities), this crate scores every technology of a static catalog with
//! an ordered set of rules, ranks the candidates per category and picks a
//! deployment strategy.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is pure: scoring is a function of `(Technology, Profile)` only
//! - Treats the catalog as an immutable snapshot, injected by the caller
//! - Uses whole-point integer scores; no floating point arithmetic
//! - Has NO async, NO network dependencies, NO logging

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod deployment;
pub mod primitives;
pub mod recommender;
pub mod requirements;
pub mod scoring;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AttributeValue, Attributes, Category, CategoryResult, CostTier, DeploymentStrategy,
    RecommendationResponse, Scale, Score, ScoredTechnology, StackError, Technology,
};

// =============================================================================
// RE-EXPORTS: Requirements & Catalog
// =============================================================================

pub use catalog::{Catalog, CatalogSource};
pub use requirements::{
    Budget, Domain, Priority, Profile, ProjectRequirements, ProjectType, RequirementOptions,
    TeamSize,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use deployment::{StrategyKind, select_kind, select_strategy};
pub use recommender::{Explanation, Recommender};
pub use scoring::{Adjustment, Rule, RuleContribution, RuleSet, ScoreCard, Verdict, score};

pub use primitives::{CATEGORY_ORDER, DEFAULT_CATALOG_PATH};
