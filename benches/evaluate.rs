//! Evaluation benchmark: feature table → split, fit, predict, accuracy.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matchform::config::{BoostingConfig, MockSeasonConfig, SplitConfig};
use matchform::events::{MockSeason, FIELD_OUTCOME};
use matchform::features::{build_features, FeatureSpec};
use matchform::harness::evaluate_with;
use matchform::model::{GradientBoostingClassifier, MajorityClassifier};

fn bench_evaluate(c: &mut Criterion) {
    let events = MockSeason::new(MockSeasonConfig {
        entities: (0..30).map(|i| format!("T{:02}", i)).collect(),
        games_per_entity: 82,
        ..MockSeasonConfig::default()
    })
    .generate()
    .unwrap();
    let specs = FeatureSpec::defaults();
    let table = build_features(&events, 5, &specs).unwrap();
    let columns: Vec<&str> = specs.iter().map(|s| s.target.as_str()).collect();
    let split = SplitConfig::default();

    c.bench_function("evaluate_majority", |b| {
        b.iter(|| {
            let model = MajorityClassifier::new();
            black_box(evaluate_with(&table, &columns, FIELD_OUTCOME, &split, model)).unwrap()
        })
    });

    let boosting = BoostingConfig {
        n_estimators: 20,
        ..BoostingConfig::default()
    };
    c.bench_function("evaluate_boosting_20_trees", |b| {
        b.iter(|| {
            let model = GradientBoostingClassifier::new(boosting.clone());
            black_box(evaluate_with(&table, &columns, FIELD_OUTCOME, &split, model)).unwrap()
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
