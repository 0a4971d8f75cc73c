//! Benchmarks for the hand engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poker_coach::advisors::{discuss, AdvisorPanel};
use poker_coach::random::seeded;
use poker_coach::sim::{HandStrengthEstimator, PlayerAction, ScenarioKind, Situation, StreetProgression};
use poker_coach::Card;

fn estimate_benchmark(c: &mut Criterion) {
    let estimator = HandStrengthEstimator::new();
    let hole: Vec<Card> = vec!["Ah".parse().unwrap(), "Kh".parse().unwrap()];
    let board: Vec<Card> = ["Qh", "Jd", "2h", "9c", "3s"]
        .iter()
        .map(|c| c.parse().unwrap())
        .collect();

    c.bench_function("estimate_preflop", |b| {
        b.iter(|| estimator.estimate(black_box(&hole), &[]))
    });
    c.bench_function("estimate_river", |b| {
        b.iter(|| estimator.estimate(black_box(&hole), black_box(&board)))
    });
}

fn advance_benchmark(c: &mut Criterion) {
    let progression = StreetProgression::new();
    let situation = Situation::from_scenario(ScenarioKind::DrawingHand, 100.0);
    let mut rng = seeded(Some(42));

    c.bench_function("advance_full_hand", |b| {
        b.iter(|| progression.advance(black_box(&situation), PlayerAction::Call, &mut rng))
    });
}

fn consult_benchmark(c: &mut Criterion) {
    let panel = AdvisorPanel::default();
    let situation = Situation::from_scenario(ScenarioKind::ToughDecision, 100.0);

    c.bench_function("consult_and_discuss", |b| {
        b.iter(|| {
            let recs = panel.consult(black_box(&situation));
            discuss("What should I do?", &situation, &recs)
        })
    });
}

criterion_group!(benches, estimate_benchmark, advance_benchmark, consult_benchmark);
criterion_main!(benches);
