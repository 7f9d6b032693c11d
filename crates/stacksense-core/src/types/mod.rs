//! # Core Type Definitions
//!
//! This module contains the catalog and result types of the StackSense engine:
//! - Catalog vocabulary (`Category`, `Scale`, `CostTier`, `Attributes`)
//! - The immutable catalog record (`Technology`)
//! - Score points (`Score`)
//! - Output structures (`ScoredTechnology`, `CategoryResult`,
//!   `DeploymentStrategy`, `RecommendationResponse`)
//! - Error types (`StackError`)
//!
//! ## Determinism Guarantees
//!
//! - Tags and attributes use `BTreeSet`/`BTreeMap` so iteration order is fixed
//! - Scores are whole points with saturating integer arithmetic; they are
//!   only converted to a JSON number at the serialization boundary

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// Technology category. Closed set; the catalog may not invent new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Frontend,
    Backend,
    Database,
    DevOps,
    Hardware,
}

impl Category {
    /// Display name, identical to the serialized form.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Category::Frontend => "Frontend",
            Category::Backend => "Backend",
            Category::Database => "Database",
            Category::DevOps => "DevOps",
            Category::Hardware => "Hardware",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// SCALE
// =============================================================================

/// Project scale tier.
///
/// Used both for a technology's minimum sensible scale and for the scale a
/// requirement expects. `Prototype` and `Academic` share ordinal 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Scale {
    Prototype,
    Academic,
    #[default]
    Small,
    Medium,
    Large,
    Enterprise,
}

impl Scale {
    /// All tiers in ascending order.
    pub const ALL: [Scale; 6] = [
        Scale::Prototype,
        Scale::Academic,
        Scale::Small,
        Scale::Medium,
        Scale::Large,
        Scale::Enterprise,
    ];

    /// Ordinal position used for fit comparisons (0..=4).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Scale::Prototype | Scale::Academic => 0,
            Scale::Small => 1,
            Scale::Medium => 2,
            Scale::Large => 3,
            Scale::Enterprise => 4,
        }
    }

    /// Keyword that identifies this tier inside a free-form label.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Scale::Prototype => "Prototype",
            Scale::Academic => "Academic",
            Scale::Small => "Small",
            Scale::Medium => "Medium",
            Scale::Large => "Large",
            Scale::Enterprise => "Enterprise",
        }
    }

    /// Text used inside scale-fit reasons.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Scale::Prototype | Scale::Academic => "Prototype/Research",
            Scale::Small => "Small",
            Scale::Medium => "Medium",
            Scale::Large => "Large",
            Scale::Enterprise => "Enterprise",
        }
    }
}

// =============================================================================
// COST TIER
// =============================================================================

/// Licensing / hosting cost of a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CostTier {
    #[default]
    Free,
    #[serde(rename = "Open Source")]
    OpenSource,
    Moderate,
    Paid,
    Expensive,
}

impl CostTier {
    /// Free or open source.
    #[must_use]
    pub const fn is_budget_friendly(self) -> bool {
        matches!(self, CostTier::Free | CostTier::OpenSource)
    }
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// A single capability attribute: either a flag or a level such as `"High"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Level(String),
}

impl AttributeValue {
    /// Truthiness: a set flag, or any non-empty level.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            AttributeValue::Flag(b) => *b,
            AttributeValue::Level(s) => !s.is_empty(),
        }
    }
}

/// Capability attributes keyed by name (`high_performance`, `performance`, ...).
///
/// Keys are arbitrary; a missing key reads as "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Attributes(pub BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Whether the attribute is present and truthy.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(AttributeValue::is_set)
    }

    /// The level string of an attribute, if it carries one.
    #[must_use]
    pub fn level(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(AttributeValue::Level(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// TECHNOLOGY
// =============================================================================

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    /// Unique key, also used by the id override table.
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    /// Lowercase keywords.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub min_scale: Scale,
    #[serde(default)]
    pub cost_tier: CostTier,
    #[serde(default)]
    pub key_benefits: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Technology {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn flag(&self, attribute: &str) -> bool {
        self.attributes.flag(attribute)
    }

    #[must_use]
    pub fn level(&self, attribute: &str) -> Option<&str> {
        self.attributes.level(attribute)
    }

    #[must_use]
    pub fn is(&self, category: Category) -> bool {
        self.category == category
    }
}

// =============================================================================
// SCORE
// =============================================================================

/// Suitability score in whole points.
///
/// Every rule adjusts the score by an integral number of points, so the engine
/// never touches floating point. On the wire the score is a JSON number
/// (`7.0`), matching what browser clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(i32);

impl Score {
    /// The neutral score every candidate starts from.
    pub const ZERO: Score = Score(0);

    #[must_use]
    pub const fn points(points: i32) -> Self {
        Self(points)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Add using saturating arithmetic.
    #[must_use]
    pub const fn saturating_add(self, other: Score) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = self.saturating_add(rhs);
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Self {
        iter.fold(Score::ZERO, Score::saturating_add)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(f64::from(self.0))
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(Score(raw.round() as i32))
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// A candidate technology together with its score and reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTechnology {
    pub technology: Arc<Technology>,
    pub score: Score,
    /// Reasons in the order the rules fired.
    #[serde(rename = "reason")]
    pub reasons: Vec<String>,
}

/// Ranked candidates for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub top_pick: Option<ScoredTechnology>,
    /// Remaining candidates, descending by score.
    pub alternatives: Vec<ScoredTechnology>,
}

/// Where and how to ship the project. Literal data chosen per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStrategy {
    pub title: String,
    pub description: String,
    pub recommended_platforms: Vec<String>,
}

/// The full answer to one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub project_name: String,
    pub results: Vec<CategoryResult>,
    pub deployment_strategy: Option<DeploymentStrategy>,
}

impl RecommendationResponse {
    /// Result block for a category, if it was evaluated.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryResult> {
        self.results.iter().find(|r| r.category == category)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the StackSense engine and its binary.
///
/// A missing catalog is deliberately absent: it degrades to an empty catalog.
#[derive(Debug, Error)]
pub enum StackError {
    /// The catalog file is not a JSON array of records.
    #[error("Catalog is not valid JSON: {0}")]
    CatalogSyntax(String),

    /// A catalog record failed schema validation or a catalog invariant.
    #[error("Catalog record #{index} is malformed: {reason}")]
    CatalogMalformed { index: usize, reason: String },

    /// A requirement field failed validation.
    #[error("Invalid requirement field `{field}`: {reason}")]
    InvalidRequirements { field: &'static str, reason: String },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_ordinals_are_ordered() {
        assert_eq!(Scale::Prototype.ordinal(), Scale::Academic.ordinal());
        let ordinals: Vec<u8> = Scale::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn scale_defaults_to_small() {
        assert_eq!(Scale::default(), Scale::Small);
        assert_eq!(CostTier::default(), CostTier::Free);
    }

    #[test]
    fn cost_tier_open_source_label() {
        let tier: CostTier = serde_json::from_str("\"Open Source\"").expect("parse");
        assert_eq!(tier, CostTier::OpenSource);
        assert!(tier.is_budget_friendly());
        assert!(!CostTier::Expensive.is_budget_friendly());
    }

    #[test]
    fn attributes_flag_and_level() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"high_performance": true, "seo_friendly": false, "performance": "High", "empty": ""}"#,
        )
        .expect("parse");

        assert!(attrs.flag("high_performance"));
        assert!(!attrs.flag("seo_friendly"));
        assert!(attrs.flag("performance"));
        assert!(!attrs.flag("empty"));
        assert!(!attrs.flag("missing"));
        assert_eq!(attrs.level("performance"), Some("High"));
        assert_eq!(attrs.level("high_performance"), None);
    }

    #[test]
    fn technology_defaults_apply() {
        let tech: Technology = serde_json::from_str(
            r#"{"id": "htmx", "name": "htmx", "category": "Frontend", "description": "Hypermedia"}"#,
        )
        .expect("parse");

        assert_eq!(tech.min_scale, Scale::Small);
        assert_eq!(tech.cost_tier, CostTier::Free);
        assert!(tech.tags.is_empty());
        assert!(tech.key_benefits.is_empty());
        assert!(!tech.flag("anything"));
    }

    #[test]
    fn technology_rejects_unknown_category() {
        let result: Result<Technology, _> = serde_json::from_str(
            r#"{"id": "x", "name": "X", "category": "Middleware", "description": ""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn score_saturates() {
        let high = Score::points(i32::MAX);
        assert_eq!(high.saturating_add(Score::points(1)).value(), i32::MAX);

        let mut score = Score::ZERO;
        score += Score::points(3);
        score += Score::points(-5);
        assert_eq!(score.value(), -2);
    }

    #[test]
    fn score_serializes_as_json_number() {
        let json = serde_json::to_string(&Score::points(7)).expect("serialize");
        assert_eq!(json, "7.0");

        let back: Score = serde_json::from_str("7.0").expect("deserialize");
        assert_eq!(back, Score::points(7));
        let from_int: Score = serde_json::from_str("-5").expect("deserialize");
        assert_eq!(from_int, Score::points(-5));
    }

    #[test]
    fn score_display_is_signed() {
        assert_eq!(Score::points(4).to_string(), "+4");
        assert_eq!(Score::points(-3).to_string(), "-3");
    }

    #[test]
    fn scored_technology_uses_reason_key() {
        let tech: Technology = serde_json::from_str(
            r#"{"id": "x", "name": "X", "category": "Backend", "description": ""}"#,
        )
        .expect("parse");
        let scored = ScoredTechnology {
            technology: Arc::new(tech),
            score: Score::points(1),
            reasons: vec!["ok".to_string()],
        };
        let json = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(json["reason"][0], "ok");
        assert_eq!(json["technology"]["id"], "x");
    }
}
