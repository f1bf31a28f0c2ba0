//! Synergy Engine — threshold rules over the emotional field.
//!
//! A synergy is a named emotional combination ("anger held with high
//! coherence") that unlocks a one-shot gameplay effect. Rules are plain data:
//! each [`SynergySpec`] lists the [`Condition`]s that must all hold, and one
//! evaluator walks [`SYNERGIES`] in table order. The first match wins, so the
//! order of the table is part of the contract.
//!
//! ## Activation
//!
//! The field keeps a single activation slot:
//!
//! ```text
//! INACTIVE ──match X──▶ ACTIVE(X, 3000ms) ──cooldown ≤ 0──▶ INACTIVE
//!                           │
//!                           └──match Y ≠ X──▶ ACTIVE(Y, 3000ms)
//! ```
//!
//! [`EmotionalField::update_synergy`] returns a spec only on the transition
//! into a new id. A rule that keeps matching tick after tick fires once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate;
use crate::catalog::Emotion;
use crate::clock::Clock;
use crate::error::AffectError;
use crate::field::EmotionalField;
use crate::metrics::AffectCounters;
use crate::types::Intensities;

/// Identifier of one of the seven synergies, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyId {
    /// Anger with high coherence.
    FocusedForce,
    /// Anger with low coherence.
    ChaosBurst,
    /// Grief with curiosity.
    DeepInsight,
    /// Shame with awe.
    CollapseEvent,
    /// Tenderness with fear.
    Protective,
    /// Joy with hope.
    Resonance,
    /// Overwhelming despair.
    Dissolution,
}

impl SynergyId {
    /// Wire id (`"focused_force"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FocusedForce => "focused_force",
            Self::ChaosBurst => "chaos_burst",
            Self::DeepInsight => "deep_insight",
            Self::CollapseEvent => "collapse_event",
            Self::Protective => "protective",
            Self::Resonance => "resonance",
            Self::Dissolution => "dissolution",
        }
    }

    /// Look up a synergy by wire id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        SYNERGIES.iter().map(|s| s.id).find(|s| s.as_str() == id)
    }

    /// Static definition of this synergy.
    #[must_use]
    pub fn spec(self) -> &'static SynergySpec {
        &SYNERGIES[self as usize]
    }
}

impl fmt::Display for SynergyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SynergyId {
    type Err = AffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| AffectError::UnknownSynergy(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Rule data
// ---------------------------------------------------------------------------

/// Snapshot a rule is evaluated against: intensities plus derived coherence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionVector {
    /// Intensities at the moment of the snapshot.
    pub intensities: Intensities,
    /// Aggregate coherence at the moment of the snapshot.
    pub coherence: f32,
}

impl EmotionVector {
    /// Capture the vector for `intensities`.
    #[must_use]
    pub fn of(intensities: &Intensities) -> Self {
        Self {
            intensities: *intensities,
            coherence: aggregate::coherence(intensities),
        }
    }
}

/// One clause of a synergy rule. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// `intensity(emotion) > threshold`.
    EmotionAbove {
        /// Emotion to test.
        emotion: Emotion,
        /// Exclusive lower bound.
        threshold: f32,
    },
    /// `coherence > threshold`.
    CoherenceAbove {
        /// Exclusive lower bound.
        threshold: f32,
    },
    /// `coherence < threshold`.
    CoherenceBelow {
        /// Exclusive upper bound.
        threshold: f32,
    },
}

impl Condition {
    /// Whether this clause holds for `vector`.
    #[must_use]
    pub fn holds(&self, vector: &EmotionVector) -> bool {
        match *self {
            Self::EmotionAbove { emotion, threshold } => vector.intensities[emotion] > threshold,
            Self::CoherenceAbove { threshold } => vector.coherence > threshold,
            Self::CoherenceBelow { threshold } => vector.coherence < threshold,
        }
    }
}

/// Value of a single synergy effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EffectValue {
    /// Numeric parameter (multiplier, radius, duration...).
    Number(f32),
    /// On/off switch.
    Flag(bool),
}

/// Static definition of a synergy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SynergySpec {
    /// Identifier.
    pub id: SynergyId,
    /// Clauses that must all hold.
    pub conditions: &'static [Condition],
    /// One-shot effect payload handed to the game on activation.
    pub effects: &'static [(&'static str, EffectValue)],
    /// Line shown to the player on activation.
    pub message: &'static str,
    /// Hex color used for the activation banner.
    pub display_color: &'static str,
}

impl SynergySpec {
    /// Whether every condition holds for `vector`.
    #[must_use]
    pub fn matches(&self, vector: &EmotionVector) -> bool {
        self.conditions.iter().all(|c| c.holds(vector))
    }

    /// Look up a single effect by name.
    #[must_use]
    pub fn effect(&self, name: &str) -> Option<EffectValue> {
        self.effects
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

const fn above(emotion: Emotion, threshold: f32) -> Condition {
    Condition::EmotionAbove { emotion, threshold }
}

/// The synergy table, in evaluation order.
pub static SYNERGIES: [SynergySpec; 7] = [
    SynergySpec {
        id: SynergyId::FocusedForce,
        conditions: &[
            above(Emotion::Anger, 3.0),
            Condition::CoherenceAbove { threshold: 0.7 },
        ],
        effects: &[
            ("damage_mult", EffectValue::Number(2.0)),
            ("pierce", EffectValue::Flag(true)),
        ],
        message: "Focused Force: rage channeled into precision",
        display_color: "#ff8c00",
    },
    SynergySpec {
        id: SynergyId::ChaosBurst,
        conditions: &[
            above(Emotion::Anger, 3.0),
            Condition::CoherenceBelow { threshold: 0.4 },
        ],
        effects: &[
            ("aoe_radius", EffectValue::Number(3.0)),
            ("self_damage", EffectValue::Number(1.0)),
        ],
        message: "Chaos Burst: fury erupts in every direction",
        display_color: "#ff0000",
    },
    SynergySpec {
        id: SynergyId::DeepInsight,
        conditions: &[above(Emotion::Grief, 3.0), above(Emotion::Curiosity, 2.0)],
        effects: &[
            ("reveal_secrets", EffectValue::Flag(true)),
            ("insight_mult", EffectValue::Number(1.5)),
        ],
        message: "Deep Insight: sorrow opens hidden paths",
        display_color: "#4169e1",
    },
    SynergySpec {
        id: SynergyId::CollapseEvent,
        conditions: &[above(Emotion::Shame, 3.0), above(Emotion::Awe, 2.0)],
        effects: &[
            ("time_slow", EffectValue::Number(0.5)),
            ("reality_shift", EffectValue::Flag(true)),
        ],
        message: "Collapse: the world folds inward",
        display_color: "#800080",
    },
    SynergySpec {
        id: SynergyId::Protective,
        conditions: &[above(Emotion::Tender, 3.0), above(Emotion::Fear, 2.0)],
        effects: &[
            ("shield", EffectValue::Number(3.0)),
            ("heal", EffectValue::Number(1.0)),
        ],
        message: "Protective Instinct: you guard what you love",
        display_color: "#ff69b4",
    },
    SynergySpec {
        id: SynergyId::Resonance,
        conditions: &[above(Emotion::Joy, 5.0), above(Emotion::Hope, 3.0)],
        effects: &[
            ("score_mult", EffectValue::Number(2.0)),
            ("hazard_immune", EffectValue::Flag(true)),
        ],
        message: "Resonance: joy and hope sing together",
        display_color: "#ffd700",
    },
    SynergySpec {
        id: SynergyId::Dissolution,
        conditions: &[above(Emotion::Despair, 5.0)],
        effects: &[
            ("phase_walls", EffectValue::Flag(true)),
            ("visibility", EffectValue::Number(0.3)),
        ],
        message: "Dissolution: you fade at the edges",
        display_color: "#1a1a1a",
    },
];

/// What one pass over the activation slot changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynergyOutcome {
    /// Synergy that became active.
    pub activated: Option<&'static SynergySpec>,
    /// Synergy whose cooldown ran out.
    pub expired: Option<SynergyId>,
}

/// First synergy in table order whose rule matches `vector`.
#[must_use]
pub fn first_match(vector: &EmotionVector) -> Option<&'static SynergySpec> {
    SYNERGIES.iter().find(|s| s.matches(vector))
}

// ---------------------------------------------------------------------------
// Field integration
// ---------------------------------------------------------------------------

impl<C: Clock> EmotionalField<C> {
    /// Probe which synergy the current state satisfies. No side effects.
    #[must_use]
    pub fn check_synergy(&self) -> Option<&'static SynergySpec> {
        first_match(&EmotionVector::of(&self.intensities))
    }

    /// Advance the activation slot by `dt_ms` and report a new activation.
    ///
    /// Returns the synergy only on the tick it becomes active; a match that
    /// equals the already-active id, or no match, returns `None`.
    pub fn update_synergy(&mut self, dt_ms: f32) -> Option<&'static SynergySpec> {
        self.advance_synergy(dt_ms).activated
    }

    /// [`update_synergy`](Self::update_synergy), also reporting a release.
    ///
    /// `expired` is the id this field's cooldown released during the call,
    /// even if the same rule re-activated right after.
    pub fn advance_synergy(&mut self, dt_ms: f32) -> SynergyOutcome {
        let mut expired = None;
        if self.synergy_cooldown_ms > 0.0 {
            let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
            self.synergy_cooldown_ms -= dt;
            if self.synergy_cooldown_ms <= 0.0 {
                self.synergy_cooldown_ms = 0.0;
                expired = self.active_synergy.take();
                if let Some(id) = expired {
                    debug!(synergy = %id, "Synergy cooldown expired");
                    AffectCounters::bump(&self.counters.synergy_expiries);
                }
            }
        }

        let activated = self.activate_match();
        SynergyOutcome { activated, expired }
    }

    fn activate_match(&mut self) -> Option<&'static SynergySpec> {
        let matched = self.check_synergy()?;
        if self.active_synergy == Some(matched.id) {
            return None;
        }

        let previous = self.active_synergy.replace(matched.id);
        self.synergy_cooldown_ms = self.synergy_cooldown_duration_ms;
        AffectCounters::bump(&self.counters.synergy_activations);
        info!(
            synergy = %matched.id,
            previous = ?previous,
            cooldown_ms = self.synergy_cooldown_ms,
            "Synergy activated"
        );
        Some(matched)
    }
}
