//! Behavior Inference — player actions nudging the emotional field.
//!
//! Every observed action is recorded in a bounded sliding window and then
//! runs through two layers of heuristics:
//!
//! 1. **Direct mapping** — each [`BehaviorKind`] carries fixed emotion deltas
//!    (entering a hazard stokes fear and anger, collecting a peace token feeds
//!    joy and hope).
//! 2. **Derived heuristics** — independent of the kind that triggered them:
//!    - *Speed burst*: many moves in the last 1.5s raise fear and anger
//!    - *Calm*: a full-ish window with almost no recent movement raises hope
//!    - *Health*: low HP feeds despair and fear, near-full HP feeds hope
//!    - *Combo*: long streaks feed joy and hope
//!
//! All deltas go through [`EmotionalField::add`], so they clamp the same way
//! as any other adjustment.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::Emotion;
use crate::clock::Clock;
use crate::field::EmotionalField;
use crate::metrics::AffectCounters;
use crate::types::Direction;

/// Classification of an observed player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    /// Ordinary step.
    Move,
    /// Step taken in quick succession after the previous one.
    RapidMove,
    /// No input for a while.
    Idle,
    /// Moved next to a hazard.
    HazardApproach,
    /// Stepped onto a hazard.
    HazardEnter,
    /// Stepped away from an adjacent hazard.
    HazardAvoid,
    /// Picked up a peace token.
    PeaceCollect,
    /// Doubled back on the previous step.
    Reverse,
    /// Reached a tile never visited before.
    Exploration,
    /// Walked a tight loop.
    Circling,
}

impl BehaviorKind {
    /// All kinds.
    pub const ALL: [Self; 10] = [
        Self::Move,
        Self::RapidMove,
        Self::Idle,
        Self::HazardApproach,
        Self::HazardEnter,
        Self::HazardAvoid,
        Self::PeaceCollect,
        Self::Reverse,
        Self::Exploration,
        Self::Circling,
    ];

    /// Wire name (`"rapid_move"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::RapidMove => "rapid_move",
            Self::Idle => "idle",
            Self::HazardApproach => "hazard_approach",
            Self::HazardEnter => "hazard_enter",
            Self::HazardAvoid => "hazard_avoid",
            Self::PeaceCollect => "peace_collect",
            Self::Reverse => "reverse",
            Self::Exploration => "exploration",
            Self::Circling => "circling",
        }
    }

    /// Look up a kind by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether this kind counts toward the speed-burst and calm heuristics.
    #[must_use]
    pub const fn is_movement(self) -> bool {
        matches!(self, Self::Move | Self::RapidMove)
    }

    /// Emotion deltas applied directly when this kind is observed.
    #[must_use]
    pub const fn deltas(self) -> &'static [(Emotion, f32)] {
        match self {
            Self::Move => &[(Emotion::Curiosity, 0.02)],
            Self::RapidMove => &[(Emotion::Anger, 0.05), (Emotion::Fear, 0.03)],
            Self::Idle => &[(Emotion::Despair, 0.03), (Emotion::Grief, 0.02)],
            Self::HazardApproach => &[(Emotion::Fear, 0.10), (Emotion::Curiosity, 0.05)],
            Self::HazardEnter => &[(Emotion::Fear, 0.25), (Emotion::Anger, 0.10)],
            Self::HazardAvoid => &[(Emotion::Hope, 0.10), (Emotion::Fear, -0.05)],
            Self::PeaceCollect => &[(Emotion::Joy, 0.20), (Emotion::Hope, 0.10)],
            Self::Reverse => &[(Emotion::Shame, 0.08), (Emotion::Fear, 0.03)],
            Self::Exploration => &[(Emotion::Curiosity, 0.15), (Emotion::Awe, 0.10)],
            Self::Circling => &[(Emotion::Grief, 0.05), (Emotion::Despair, 0.05)],
        }
    }
}

// Derived-heuristic deltas.
const BURST_DELTAS: &[(Emotion, f32)] = &[(Emotion::Fear, 0.05), (Emotion::Anger, 0.05)];
const CALM_DELTAS: &[(Emotion, f32)] = &[(Emotion::Hope, 0.03)];
const LOW_HP_DELTAS: &[(Emotion, f32)] = &[(Emotion::Despair, 0.10), (Emotion::Fear, 0.10)];
const HIGH_HP_DELTAS: &[(Emotion, f32)] = &[(Emotion::Hope, 0.02)];
const COMBO_DELTAS: &[(Emotion, f32)] = &[(Emotion::Joy, 0.10), (Emotion::Hope, 0.05)];

/// Optional details reported alongside a behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorContext {
    /// Time since the previous step (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<f32>,
    /// Tile the action happened on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_type: Option<String>,
    /// Direction of travel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Current combo streak.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo: Option<u32>,
    /// Current health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<f32>,
    /// Maximum health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<f32>,
}

impl BehaviorContext {
    /// Context for a step.
    #[must_use]
    pub fn step(interval_ms: f32, direction: Direction) -> Self {
        Self {
            interval_ms: Some(interval_ms),
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// Attach the tile the action happened on.
    #[must_use]
    pub fn with_tile(mut self, tile: impl Into<String>) -> Self {
        self.tile_type = Some(tile.into());
        self
    }

    /// Attach current and (optionally) maximum health.
    #[must_use]
    pub fn with_health(mut self, hp: f32, max_hp: Option<f32>) -> Self {
        self.hp = Some(hp);
        self.max_hp = max_hp;
        self
    }

    /// Attach the current combo streak.
    #[must_use]
    pub fn with_combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);
        self
    }
}

/// A timestamped, immutable record of one observed behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorSample {
    /// What the player did.
    pub kind: BehaviorKind,
    /// Clock reading when it was observed (ms).
    pub observed_at_ms: u64,
    /// Details reported with it.
    pub context: BehaviorContext,
}

// ---------------------------------------------------------------------------
// Field integration
// ---------------------------------------------------------------------------

impl<C: Clock> EmotionalField<C> {
    /// Record a behavior and push the field accordingly.
    ///
    /// The sample enters the window first (evicting the oldest at capacity),
    /// then the direct deltas for `kind` apply, then the derived heuristics
    /// run against the updated window and `context`.
    pub fn observe_behavior(&mut self, kind: BehaviorKind, context: BehaviorContext) {
        let now = self.clock.now_ms();
        trace!(kind = kind.as_str(), now_ms = now, "Behavior observed");

        let hp = context.hp;
        let max_hp = context.max_hp;
        let combo = context.combo;
        self.record_sample(BehaviorSample {
            kind,
            observed_at_ms: now,
            context,
        });

        self.apply_deltas(kind.deltas());
        self.apply_window_heuristics(now);
        if let Some(hp) = hp {
            self.apply_health_heuristic(hp, max_hp);
        }
        if combo.is_some_and(|c| c >= self.inference.combo_threshold) {
            self.apply_deltas(COMBO_DELTAS);
        }
    }

    /// Movement samples observed strictly within the burst window before `now`.
    #[must_use]
    pub fn recent_moves(&self, now_ms: u64) -> usize {
        let window = self.inference.burst_window_ms;
        self.behavior_window
            .iter()
            .filter(|s| s.kind.is_movement() && now_ms.saturating_sub(s.observed_at_ms) < window)
            .count()
    }

    fn record_sample(&mut self, sample: BehaviorSample) {
        while self.behavior_window.len() >= self.window_capacity {
            self.behavior_window.pop_front();
        }
        self.behavior_window.push_back(sample);
        AffectCounters::bump(&self.counters.behavior_samples);
    }

    fn apply_deltas(&mut self, deltas: &[(Emotion, f32)]) {
        for (emotion, delta) in deltas {
            self.add(*emotion, *delta);
        }
    }

    fn apply_window_heuristics(&mut self, now_ms: u64) {
        let moves = self.recent_moves(now_ms);
        if moves >= self.inference.burst_min_moves {
            trace!(moves, "Speed burst detected");
            self.apply_deltas(BURST_DELTAS);
        }
        if moves <= self.inference.calm_max_moves
            && self.behavior_window.len() >= self.inference.calm_min_samples
        {
            trace!(moves, "Calm detected");
            self.apply_deltas(CALM_DELTAS);
        }
    }

    fn apply_health_heuristic(&mut self, hp: f32, max_hp: Option<f32>) {
        let max = max_hp.unwrap_or(self.inference.default_max_hp);
        if !hp.is_finite() || !max.is_finite() || max <= 0.0 {
            return;
        }
        let ratio = hp / max;
        if ratio < self.inference.low_hp_ratio {
            self.apply_deltas(LOW_HP_DELTAS);
        } else if ratio > self.inference.high_hp_ratio {
            self.apply_deltas(HIGH_HP_DELTAS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn field() -> (EmotionalField<ManualClock>, ManualClock) {
        let clock = ManualClock::new(10_000);
        (EmotionalField::new(clock.clone()), clock)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn hazard_enter_raises_fear_and_anger() {
        let (mut f, _) = field();
        f.observe_behavior(BehaviorKind::HazardEnter, BehaviorContext::default());
        assert!(approx(f.intensity(Emotion::Fear), 0.25));
        assert!(approx(f.intensity(Emotion::Anger), 0.10));
    }

    #[test]
    fn peace_collect_raises_joy_and_hope() {
        let (mut f, _) = field();
        f.observe_behavior(BehaviorKind::PeaceCollect, BehaviorContext::default());
        assert!(approx(f.intensity(Emotion::Joy), 0.20));
        assert!(approx(f.intensity(Emotion::Hope), 0.10));
    }

    #[test]
    fn every_kind_has_deltas() {
        for kind in BehaviorKind::ALL {
            assert!(!kind.deltas().is_empty(), "{kind:?}");
            assert_eq!(BehaviorKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn window_is_bounded_fifo() {
        let (mut f, clock) = field();
        for _ in 0..25 {
            clock.advance(5_000);
            f.observe_behavior(BehaviorKind::Idle, BehaviorContext::default());
        }
        assert_eq!(f.behavior_window().len(), 20);
        let stamps: Vec<u64> = f.behavior_window().iter().map(|s| s.observed_at_ms).collect();
        assert_eq!(stamps.first(), Some(&(10_000 + 6 * 5_000)));
        assert_eq!(stamps.last(), Some(&(10_000 + 25 * 5_000)));
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn speed_burst_after_five_quick_moves() {
        let (mut f, clock) = field();
        for _ in 0..4 {
            f.observe_behavior(BehaviorKind::Move, BehaviorContext::default());
            clock.advance(100);
        }
        assert_eq!(f.intensity(Emotion::Fear), 0.0, "no burst yet");

        f.observe_behavior(BehaviorKind::Move, BehaviorContext::default());
        assert_eq!(f.recent_moves(clock.now_ms()), 5);
        assert!(approx(f.intensity(Emotion::Fear), 0.05));
        assert!(approx(f.intensity(Emotion::Anger), 0.05));
    }

    #[test]
    fn moves_older_than_window_do_not_count() {
        let (mut f, clock) = field();
        for _ in 0..4 {
            f.observe_behavior(BehaviorKind::RapidMove, BehaviorContext::default());
        }
        clock.advance(1_500);
        f.observe_behavior(BehaviorKind::Move, BehaviorContext::default());
        assert_eq!(f.recent_moves(clock.now_ms()), 1);
    }

    #[test]
    fn calm_after_quiet_window() {
        let (mut f, clock) = field();
        for _ in 0..4 {
            f.observe_behavior(BehaviorKind::HazardAvoid, BehaviorContext::default());
            clock.advance(2_000);
        }
        let before = f.intensity(Emotion::Hope);
        f.observe_behavior(BehaviorKind::Idle, BehaviorContext::default());
        // Idle itself does not touch hope; the increase is the calm heuristic.
        assert!(approx(f.intensity(Emotion::Hope) - before, 0.03));
    }

    #[test]
    fn calm_needs_five_samples() {
        let (mut f, clock) = field();
        for _ in 0..4 {
            f.observe_behavior(BehaviorKind::Idle, BehaviorContext::default());
            clock.advance(2_000);
        }
        assert_eq!(f.intensity(Emotion::Hope), 0.0);
    }

    #[test]
    fn low_health_feeds_despair_and_fear() {
        let (mut f, _) = field();
        f.observe_behavior(
            BehaviorKind::HazardAvoid,
            BehaviorContext::default().with_health(20.0, None),
        );
        // hazard_avoid: fear −0.05 clamps at 0, then low HP adds 0.10.
        assert!(approx(f.intensity(Emotion::Fear), 0.10));
        assert!(approx(f.intensity(Emotion::Despair), 0.10));
    }

    #[test]
    fn health_uses_reported_max() {
        let (mut f, _) = field();
        f.observe_behavior(
            BehaviorKind::Exploration,
            BehaviorContext::default().with_health(45.0, Some(50.0)),
        );
        assert!(approx(f.intensity(Emotion::Hope), 0.02));
        assert_eq!(f.intensity(Emotion::Despair), 0.0);
    }

    #[test]
    fn mid_health_and_bad_max_do_nothing() {
        let (mut f, _) = field();
        f.observe_behavior(
            BehaviorKind::Exploration,
            BehaviorContext::default().with_health(50.0, None),
        );
        f.observe_behavior(
            BehaviorKind::Exploration,
            BehaviorContext::default().with_health(1.0, Some(0.0)),
        );
        assert_eq!(f.intensity(Emotion::Hope), 0.0);
        assert_eq!(f.intensity(Emotion::Despair), 0.0);
    }

    #[test]
    fn long_combo_feeds_joy_and_hope() {
        let (mut f, _) = field();
        f.observe_behavior(BehaviorKind::Exploration, BehaviorContext::default().with_combo(4));
        assert_eq!(f.intensity(Emotion::Joy), 0.0);
        f.observe_behavior(BehaviorKind::Exploration, BehaviorContext::default().with_combo(5));
        assert!(approx(f.intensity(Emotion::Joy), 0.10));
        assert!(approx(f.intensity(Emotion::Hope), 0.05));
    }

    #[test]
    fn sample_keeps_context() {
        let (mut f, _) = field();
        let ctx = BehaviorContext::step(120.0, Direction::Left).with_tile("lava");
        f.observe_behavior(BehaviorKind::RapidMove, ctx.clone());
        let sample = f.behavior_window().back().expect("sample");
        assert_eq!(sample.kind, BehaviorKind::RapidMove);
        assert_eq!(sample.observed_at_ms, 10_000);
        assert_eq!(sample.context, ctx);
    }
}
