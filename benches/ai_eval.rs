use criterion::{criterion_group, criterion_main, Criterion};
use qwixx_engine::ai::{evaluate, PlayerView};
use qwixx_engine::core::{Difficulty, LockSet, PlayerSetup};
use qwixx_engine::{Color, EvalWeights, GameConfig, GameSession, Move, Scoresheet};
use std::hint::black_box;

/// Mid-game sheets: a few marks on every row.
fn sheets() -> (Scoresheet, Scoresheet) {
    let mut own = Scoresheet::new();
    let mut other = Scoresheet::new();
    for n in [2, 4, 5] {
        own.mark(Color::Red, n);
        other.mark(Color::Yellow, n);
    }
    for n in [12, 10] {
        own.mark(Color::Green, n);
        other.mark(Color::Blue, n);
    }
    (own, other)
}

fn bench_evaluate(c: &mut Criterion) {
    let (own, other) = sheets();
    let view = PlayerView {
        sheet: &own,
        opponents: [&other].into_iter().collect(),
        locked: LockSet::new(),
        is_rolling: true,
    };
    let weights = EvalWeights::default();
    let moves: Vec<Move> = Color::ALL
        .into_iter()
        .flat_map(|color| (2..=12).map(move |n| Move::new(color, n)))
        .collect();

    for (name, advanced) in [("eval/basic", false), ("eval/advanced", true)] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut acc = 0f64;
                for &mv in &moves {
                    acc += evaluate(&view, mv, &weights, advanced).total();
                }
                black_box(acc)
            })
        });
    }
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("game/automated_3p", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let config = GameConfig::new(vec![
                PlayerSetup::automated("Easy", Difficulty::Easy),
                PlayerSetup::automated("Medium", Difficulty::Medium),
                PlayerSetup::automated("Hard", Difficulty::Hard),
            ])
            .with_seed(seed);
            let mut game = GameSession::new(config).expect("valid config");
            black_box(game.play_to_end(2_000).ok())
        })
    });
}

criterion_group!(ai_eval, bench_evaluate, bench_full_game);
criterion_main!(ai_eval);
