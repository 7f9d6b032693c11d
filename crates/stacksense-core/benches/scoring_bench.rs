//! # Scoring Benchmarks
//!
//! Performance benchmarks for stacksense-core scoring and ranking.
//!
//! Run with: `cargo bench -p stacksense-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stacksense_core::{Catalog, ProjectRequirements, Recommender, RuleSet};
use std::hint::black_box;
use std::sync::Arc;

const KNOWLEDGE_BASE: &str = include_str!("../../../data/knowledge_base.json");

fn requirements() -> ProjectRequirements {
    let mut reqs = ProjectRequirements::new(
        "Web App",
        "E-commerce",
        "Medium (Thousands of users)",
        "Small Team (2-10)",
        "Moderate",
    );
    reqs.priorities = vec![
        "Performance & Efficiency".to_string(),
        "Security & Privacy".to_string(),
        "Scalability".to_string(),
    ];
    reqs
}

/// Bundled catalog repeated `copies` times with unique ids.
fn scaled_catalog(copies: usize) -> Catalog {
    let base = Catalog::from_json_str(KNOWLEDGE_BASE).expect("bundled catalog");
    let technologies = (0..copies)
        .flat_map(|copy| {
            base.technologies().iter().map(move |tech| {
                let mut tech = (**tech).clone();
                tech.id = format!("{}_{copy}", tech.id);
                tech
            })
        })
        .collect();
    Catalog::from_technologies(technologies).expect("scaled catalog")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_score_single(c: &mut Criterion) {
    let catalog = Catalog::from_json_str(KNOWLEDGE_BASE).expect("bundled catalog");
    let profile = requirements().profile();
    let rules = RuleSet::standard();

    c.bench_function("score_full_catalog", |b| {
        b.iter(|| {
            for tech in catalog.technologies() {
                black_box(rules.score(tech, &profile));
            }
        });
    });
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let reqs = requirements();

    for copies in [1, 10, 100].iter() {
        let recommender = Recommender::new(Arc::new(scaled_catalog(*copies)));
        group.bench_with_input(BenchmarkId::from_parameter(copies), copies, |b, _| {
            b.iter(|| black_box(recommender.recommend(&reqs)));
        });
    }

    group.finish();
}

fn bench_profile_parsing(c: &mut Criterion) {
    let reqs = requirements();
    c.bench_function("profile_parsing", |b| b.iter(|| black_box(reqs.profile())));
}

criterion_group!(benches, bench_score_single, bench_recommend, bench_profile_parsing);
criterion_main!(benches);
