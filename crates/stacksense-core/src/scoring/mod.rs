//! # Scoring Module
//!
//! Rule-based suitability scoring of one technology against one profile.
//!
//! A score starts at zero. Each [`Rule`] is a pure function of
//! `(Technology, Profile)` returning a [`Verdict`]: a list of adjustments
//! (delta + optional reason), or `Exclude`. Rules run in the order they were
//! declared in the [`RuleSet`]; adjustments are summed and their reasons kept
//! in firing order.
//!
//! `Exclude` is absolute: the card is reset to zero with no reasons and no
//! later rule runs. The standard rule set uses it for Hardware technologies
//! when the project does not need hardware.

mod overrides;
mod rules;

pub use overrides::{ID_BOOSTS, IdBoost, Trigger};
pub use rules::{
    BudgetFit, DomainFit, HardwareGate, OfflineAndHardware, Performance, PriorityMatch,
    ProjectFit, ScaleFit, Security, SeoFit, TeamFit,
};

use crate::requirements::Profile;
use crate::types::{Score, Technology};
use serde::Serialize;
use std::sync::LazyLock;

// =============================================================================
// RULE CONTRACT
// =============================================================================

/// One score change, with the reason shown to the user.
///
/// Some adjustments are silent tie-breakers and carry no reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub delta: Score,
    pub reason: Option<String>,
}

impl Adjustment {
    #[must_use]
    pub fn new(points: i32, reason: impl Into<String>) -> Self {
        Self {
            delta: Score::points(points),
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn silent(points: i32) -> Self {
        Self {
            delta: Score::points(points),
            reason: None,
        }
    }
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Apply these adjustments (possibly none).
    Adjust(Vec<Adjustment>),
    /// Discard the whole card: score zero, no reasons, stop evaluating.
    Exclude,
}

impl Verdict {
    /// No change.
    #[must_use]
    pub fn pass() -> Self {
        Verdict::Adjust(Vec::new())
    }
}

/// A self-contained scoring rule.
///
/// Implementations must be deterministic and side-effect free.
pub trait Rule: Send + Sync {
    /// Stable name, used in score breakdowns.
    fn name(&self) -> &'static str;

    fn evaluate(&self, tech: &Technology, profile: &Profile) -> Verdict;
}

// =============================================================================
// SCORE CARD
// =============================================================================

/// Accumulated score and reasons for one technology.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreCard {
    pub score: Score,
    pub reasons: Vec<String>,
}

impl ScoreCard {
    fn apply(&mut self, adjustment: Adjustment) {
        self.score += adjustment.delta;
        if let Some(reason) = adjustment.reason {
            self.reasons.push(reason);
        }
    }

    /// Whether the card is the empty result of an exclusion (or of no rule firing).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.score.is_zero() && self.reasons.is_empty()
    }
}

/// What a single rule contributed, for explaining a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: &'static str,
    pub delta: Score,
    pub reasons: Vec<String>,
    /// The rule excluded the technology; nothing after it ran.
    pub excluded: bool,
}

// =============================================================================
// RULE SET
// =============================================================================

/// An ordered list of rules.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

static STANDARD: LazyLock<RuleSet> = LazyLock::new(RuleSet::standard);

impl RuleSet {
    /// A rule set evaluating `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The production rule set.
    ///
    /// Order: scale, performance, budget, project type, domain, security,
    /// priorities, hardware gate, team size, offline/hardware, SEO.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ScaleFit),
            Box::new(Performance),
            Box::new(BudgetFit),
            Box::new(ProjectFit),
            Box::new(DomainFit),
            Box::new(Security),
            Box::new(PriorityMatch),
            Box::new(HardwareGate),
            Box::new(TeamFit),
            Box::new(OfflineAndHardware),
            Box::new(SeoFit),
        ])
    }

    /// Shared instance of [`RuleSet::standard`].
    #[must_use]
    pub fn shared() -> &'static RuleSet {
        &STANDARD
    }

    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Score `tech` against `profile`.
    #[must_use]
    pub fn score(&self, tech: &Technology, profile: &Profile) -> ScoreCard {
        let mut card = ScoreCard::default();

        for rule in &self.rules {
            match rule.evaluate(tech, profile) {
                Verdict::Adjust(adjustments) => {
                    for adjustment in adjustments {
                        card.apply(adjustment);
                    }
                }
                Verdict::Exclude => return ScoreCard::default(),
            }
        }

        card
    }

    /// Per-rule contributions, stopping at the first exclusion.
    ///
    /// The deltas of a non-excluded breakdown sum to `score(tech, profile).score`.
    #[must_use]
    pub fn breakdown(&self, tech: &Technology, profile: &Profile) -> Vec<RuleContribution> {
        let mut contributions = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            match rule.evaluate(tech, profile) {
                Verdict::Adjust(adjustments) => {
                    let delta = adjustments.iter().map(|a| a.delta).sum();
                    let reasons = adjustments.into_iter().filter_map(|a| a.reason).collect();
                    contributions.push(RuleContribution {
                        rule: rule.name(),
                        delta,
                        reasons,
                        excluded: false,
                    });
                }
                Verdict::Exclude => {
                    contributions.push(RuleContribution {
                        rule: rule.name(),
                        delta: Score::ZERO,
                        reasons: Vec::new(),
                        excluded: true,
                    });
                    break;
                }
            }
        }

        contributions
    }
}

/// Score `tech` against `profile` with the standard rule set.
#[must_use]
pub fn score(tech: &Technology, profile: &Profile) -> ScoreCard {
    RuleSet::shared().score(tech, profile)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::ProjectRequirements;
    use crate::types::Category;

    struct Fixed(i32, &'static str);

    impl Rule for Fixed {
        fn name(&self) -> &'static str {
            self.1
        }

        fn evaluate(&self, _tech: &Technology, _profile: &Profile) -> Verdict {
            Verdict::Adjust(vec![Adjustment::new(self.0, self.1), Adjustment::silent(1)])
        }
    }

    struct Veto;

    impl Rule for Veto {
        fn name(&self) -> &'static str {
            "veto"
        }

        fn evaluate(&self, _tech: &Technology, _profile: &Profile) -> Verdict {
            Verdict::Exclude
        }
    }

    fn tech() -> Technology {
        serde_json::from_str(
            r#"{"id": "rpi", "name": "Raspberry Pi", "category": "Hardware", "description": ""}"#,
        )
        .expect("parse")
    }

    fn profile() -> Profile {
        ProjectRequirements::new("Web App", "Education", "Small", "Solo", "Moderate").profile()
    }

    #[test]
    fn adjustments_sum_and_keep_reason_order() {
        let set = RuleSet::new(vec![Box::new(Fixed(3, "first")), Box::new(Fixed(-5, "second"))]);
        let card = set.score(&tech(), &profile());

        // 3 + 1 - 5 + 1
        assert_eq!(card.score, Score::points(0));
        assert_eq!(card.reasons, vec!["first", "second"]);
        assert!(!card.is_blank());
    }

    #[test]
    fn exclusion_discards_prior_score() {
        let set = RuleSet::new(vec![
            Box::new(Fixed(10, "before")),
            Box::new(Veto),
            Box::new(Fixed(10, "after")),
        ]);
        let card = set.score(&tech(), &profile());

        assert!(card.is_blank());
    }

    #[test]
    fn breakdown_stops_at_exclusion() {
        let set = RuleSet::new(vec![
            Box::new(Fixed(2, "before")),
            Box::new(Veto),
            Box::new(Fixed(10, "after")),
        ]);
        let parts = set.breakdown(&tech(), &profile());

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].delta, Score::points(3));
        assert!(parts[1].excluded);
    }

    #[test]
    fn breakdown_sums_to_score() {
        let mut reqs = ProjectRequirements::new("Web App", "E-commerce", "Medium", "Solo", "Tight");
        reqs.performance_critical = true;
        let profile = reqs.profile();
        let tech: Technology = serde_json::from_str(
            r#"{"id": "nextjs", "name": "Next.js", "category": "Frontend", "description": "",
                "tags": ["web", "popular"],
                "attributes": {"seo_friendly": true, "high_performance": true, "rapid_development": true}}"#,
        )
        .expect("parse");

        let set = RuleSet::standard();
        let total: Score = set.breakdown(&tech, &profile).iter().map(|c| c.delta).sum();
        assert_eq!(total, set.score(&tech, &profile).score);
    }

    #[test]
    fn standard_order_is_declared() {
        let names = RuleSet::standard().rule_names();
        assert_eq!(names.first(), Some(&"scale_fit"));
        assert_eq!(names.last(), Some(&"seo_fit"));
        let gate = names.iter().position(|n| *n == "hardware_gate");
        let team = names.iter().position(|n| *n == "team_fit");
        assert!(gate < team);
    }

    #[test]
    fn shared_matches_standard() {
        let t = tech();
        let p = profile();
        assert_eq!(score(&t, &p), RuleSet::standard().score(&t, &p));
        assert!(t.is(Category::Hardware));
    }
}
