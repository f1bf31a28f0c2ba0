//! Modifier Projector — aggregates → gameplay and visual multipliers.
//!
//! Pure and read-only: safe to call any number of times per frame. Nothing is
//! cached, so a read always reflects the field as it is right now.
//!
//! | modifier | formula | range |
//! |---|---|---|
//! | `movement_speed` | 1 − 0.3·d | [0.7, 1.0] |
//! | `hazard_damage` | 1 + 0.5·d | [1.0, 1.5] |
//! | `accuracy` | 0.8 + 0.4·c | [0.8, 1.2] |
//! | `insight` | 0.5 + c | [0.5, 1.5] |
//! | `score_multiplier` | 1 + 0.25·max(v, 0) | [1.0, 1.25] |
//! | `particle_intensity` | d | [0, 1] |
//! | `hud_stability` | 1 − 0.8·d | [0.2, 1.0] |
//! | `color_warmth` | v | [−1, 1] |
//! | `screen_shake` | d² | [0, 1] |
//!
//! with d = distortion, c = coherence, v = valence.

use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::clock::Clock;
use crate::field::EmotionalField;

/// Named multipliers derived from the current emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameplayModifierSet {
    /// Player movement speed multiplier.
    pub movement_speed: f32,
    /// Multiplier on damage taken from hazards.
    pub hazard_damage: f32,
    /// Aim / hit-chance multiplier.
    pub accuracy: f32,
    /// Multiplier on secret-reveal and hint radius.
    pub insight: f32,
    /// Multiplier on score gains.
    pub score_multiplier: f32,
    /// Ambient particle density, 0 to 1.
    pub particle_intensity: f32,
    /// HUD steadiness, 1 = rock solid.
    pub hud_stability: f32,
    /// Palette tint, −1 cold to +1 warm.
    pub color_warmth: f32,
    /// Camera shake amplitude, 0 to 1.
    pub screen_shake: f32,
}

impl GameplayModifierSet {
    /// Project a set of aggregate readings.
    #[must_use]
    pub fn from_aggregate(aggregate: &Aggregate) -> Self {
        let d = aggregate.distortion.clamp(0.0, 1.0);
        let c = aggregate.coherence.clamp(0.0, 1.0);
        let v = aggregate.valence.clamp(-1.0, 1.0);
        Self {
            movement_speed: 1.0 - 0.3 * d,
            hazard_damage: 1.0 + 0.5 * d,
            accuracy: 0.8 + 0.4 * c,
            insight: 0.5 + c,
            score_multiplier: 1.0 + 0.25 * v.max(0.0),
            particle_intensity: d,
            hud_stability: 1.0 - 0.8 * d,
            color_warmth: v,
            screen_shake: d * d,
        }
    }
}

impl Default for GameplayModifierSet {
    fn default() -> Self {
        Self::from_aggregate(&Aggregate::default())
    }
}

/// Current modifiers for `field`.
#[must_use]
pub fn get_emotional_modifiers<C: Clock>(field: &EmotionalField<C>) -> GameplayModifierSet {
    GameplayModifierSet::from_aggregate(&field.aggregate())
}
