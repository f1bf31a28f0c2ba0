//! Input generators shared by the affect benchmarks.
//!
//! Seeded so every run measures the same workload.

use affect_core::catalog::Emotion;
use affect_core::types::Direction;
use affect_game::GameEvent;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// A plausible stream of `n` player events.
#[must_use]
pub fn event_stream(seed: u64, n: usize) -> Vec<GameEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| match rng.gen_range(0..10) {
            0..=4 => GameEvent::Step {
                interval_ms: rng.gen_range(40.0..400.0),
                direction: DIRECTIONS.choose(&mut rng).copied().unwrap_or(Direction::Up),
                tile: None,
            },
            5 => GameEvent::HazardNear { tile: "spikes".to_string() },
            6 => GameEvent::HazardEntered { tile: "lava".to_string() },
            7 => GameEvent::PeaceCollected,
            8 => GameEvent::Explored { tile: "grass".to_string() },
            _ => GameEvent::HealthChanged {
                hp: rng.gen_range(0.0..100.0),
                max_hp: None,
            },
        })
        .collect()
}

/// Random `(emotion, amount)` adjustments in `[-2, 2]`.
#[must_use]
pub fn adjustments(seed: u64, n: usize) -> Vec<(Emotion, f32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let emotion = Emotion::ALL[rng.gen_range(0..Emotion::COUNT)];
            (emotion, rng.gen_range(-2.0..2.0))
        })
        .collect()
}
