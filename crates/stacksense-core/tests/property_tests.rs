//! # Property-Based Tests
//!
//! Determinism, ranking and filtering invariants of the recommendation engine,
//! checked over arbitrary requirement combinations against the bundled catalog.

use proptest::collection::vec;
use proptest::prelude::*;
use stacksense_core::{
    CATEGORY_ORDER, Catalog, Category, ProjectRequirements, Recommender, RuleSet, Scale, Score,
    ScoreCard, StrategyKind, select_kind,
};
use std::sync::Arc;

const KNOWLEDGE_BASE: &str = include_str!("../../../data/knowledge_base.json");

const PROJECT_TYPES: &[&str] = &[
    "Web App",
    "SaaS Platform",
    "Progressive Web App (PWA)",
    "CMS / Blog Platform",
    "Static Website / Portfolio",
    "Browser Extension",
    "Microservices Architecture",
    "Data Science / ML Pipeline",
    "Mobile App",
    "IoT System",
    "Robotics System",
    "Embedded System Software",
    "Device Driver",
    "Quantum Toaster",
];

const DOMAINS: &[&str] = &["E-commerce", "Fintech", "Social Media", "Education", "Healthcare"];

const SCALES: &[&str] = &[
    "Prototype / MVP",
    "Academic / Research Project",
    "Small (Hundreds of users)",
    "Medium (Thousands of users)",
    "Large (Millions of users)",
    "Enterprise (Global scale)",
    "Galactic",
];

const TEAM_SIZES: &[&str] = &["Solo Developer", "Small Team (2-10)", "Large Organization (50+)"];

const BUDGETS: &[&str] = &[
    "Zero ($0) - Open Source only",
    "Tight / Bootstrapped",
    "Moderate",
    "High / Well-funded",
];

const PRIORITIES: &[&str] = &[
    "Performance & Efficiency",
    "Security & Privacy",
    "Scalability",
    "Development Speed",
    "Time-to-Market",
    "Maintainability",
    "Cost Efficiency",
    "Power & Resource Efficiency",
    "Hardware Integration",
    "Offline Capability",
    "Serverless",
];

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(KNOWLEDGE_BASE).expect("bundled catalog"))
}

prop_compose! {
    fn arb_requirements()(
        project_type in prop::sample::select(PROJECT_TYPES),
        domain in prop::sample::select(DOMAINS),
        scale in prop::sample::select(SCALES),
        team in prop::sample::select(TEAM_SIZES),
        budget in prop::sample::select(BUDGETS),
        priorities in vec(prop::sample::select(PRIORITIES), 0..4),
        flags in any::<[bool; 4]>(),
    ) -> ProjectRequirements {
        let mut reqs = ProjectRequirements::new(project_type, domain, scale, team, budget);
        reqs.priorities = priorities.into_iter().map(str::to_string).collect();
        reqs.performance_critical = flags[0];
        reqs.security_critical = flags[1];
        reqs.offline_capability = flags[2];
        reqs.hardware_integration = flags[3];
        reqs
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Scoring the same inputs twice yields identical cards.
    #[test]
    fn scoring_is_deterministic(reqs in arb_requirements()) {
        let catalog = catalog();
        let profile = reqs.profile();
        let rules = RuleSet::standard();

        for tech in catalog.technologies() {
            prop_assert_eq!(rules.score(tech, &profile), rules.score(tech, &profile));
        }
    }

    /// Whole recommendations are reproducible.
    #[test]
    fn recommendation_is_deterministic(reqs in arb_requirements()) {
        let recommender = Recommender::new(catalog());
        prop_assert_eq!(recommender.recommend(&reqs), recommender.recommend(&reqs));
    }

    /// Hardware technologies score zero with no reasons unless hardware is needed.
    #[test]
    fn hardware_is_excluded_unless_needed(reqs in arb_requirements()) {
        let profile = reqs.profile();
        prop_assume!(!profile.hardware_needed());

        let catalog = catalog();
        for tech in catalog.in_category(Category::Hardware) {
            prop_assert_eq!(RuleSet::standard().score(tech, &profile), ScoreCard::default());
        }
    }

    /// Top pick outranks every alternative; alternatives are descending.
    #[test]
    fn ranking_is_descending(reqs in arb_requirements()) {
        let response = Recommender::new(catalog()).recommend(&reqs);

        for result in &response.results {
            let top = result.top_pick.as_ref().expect("non-empty category has a top pick");
            for alt in &result.alternatives {
                prop_assert!(top.score >= alt.score);
            }
            for pair in result.alternatives.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    /// Results follow the category order; Hardware only when requested.
    #[test]
    fn categories_are_ordered_and_complete(reqs in arb_requirements()) {
        let profile = reqs.profile();
        let response = Recommender::new(catalog()).recommend(&reqs);
        let categories: Vec<Category> = response.results.iter().map(|r| r.category).collect();

        let expected: Vec<Category> = CATEGORY_ORDER
            .into_iter()
            .filter(|c| *c != Category::Hardware || profile.hardware_requested())
            .collect();
        prop_assert_eq!(categories, expected);
    }

    /// Hardware never appears in results without a hardware request.
    #[test]
    fn no_hardware_without_request(reqs in arb_requirements()) {
        prop_assume!(!reqs.profile().hardware_requested());
        let response = Recommender::new(catalog()).recommend(&reqs);
        prop_assert!(response.category(Category::Hardware).is_none());
    }

    /// Every profile gets exactly one deployment strategy.
    #[test]
    fn deployment_selection_is_total(reqs in arb_requirements()) {
        let kind = select_kind(&reqs.profile());
        prop_assert!(StrategyKind::ALL.contains(&kind));

        let response = Recommender::new(catalog()).recommend(&reqs);
        let strategy = response.deployment_strategy.expect("strategy attached");
        prop_assert_eq!(strategy.title, kind.title());
    }

    /// Once the expected scale clears a technology's minimum, the scale-fit
    /// contribution never drops below +1.
    #[test]
    fn scale_fit_is_monotonic(reqs in arb_requirements(), tier in 0usize..6) {
        let mut reqs = reqs;
        let scale = Scale::ALL[tier];
        reqs.expected_scale = scale.label().to_string();
        let profile = reqs.profile();
        let catalog = catalog();

        for tech in catalog.technologies() {
            if tech.min_scale.ordinal() > scale.ordinal() {
                continue;
            }
            let scale_fit = RuleSet::standard()
                .breakdown(tech, &profile)
                .into_iter()
                .find(|c| c.rule == "scale_fit")
                .expect("scale_fit always runs first");
            prop_assert!(scale_fit.delta >= Score::points(1));
        }
    }
}
