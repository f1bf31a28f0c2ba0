//! Emotional Field — the per-session affect state.
//!
//! One field lives for one run of the game. Gameplay pushes intensities up
//! with [`EmotionalField::add`] and [`EmotionalField::observe_behavior`], a
//! throttled tick pulls them down with [`EmotionalField::decay`], and readers
//! pull derived values whenever they need them. None of these calls can fail:
//! bad input is dropped, never propagated into the game loop.
//!
//! Synergy bookkeeping lives in [`crate::synergy`] and behavior inference in
//! [`crate::behavior`]; both extend this type with further `impl` blocks.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::aggregate::{self, Aggregate};
use crate::behavior::BehaviorSample;
use crate::catalog::Emotion;
use crate::clock::{Clock, SystemClock};
use crate::config::{AffectConfig, InferenceConfig};
use crate::metrics::AffectCounters;
use crate::snapshot::FieldSnapshot;
use crate::synergy::SynergyId;
use crate::types::Intensities;

/// Live emotional state for one game session.
pub struct EmotionalField<C: Clock = SystemClock> {
    pub(crate) intensities: Intensities,
    pub(crate) active_synergy: Option<SynergyId>,
    pub(crate) synergy_cooldown_ms: f32,
    pub(crate) behavior_window: VecDeque<BehaviorSample>,
    pub(crate) window_capacity: usize,
    pub(crate) synergy_cooldown_duration_ms: f32,
    pub(crate) inference: InferenceConfig,
    pub(crate) clock: C,
    pub(crate) counters: Arc<AffectCounters>,
}

impl<C: Clock> fmt::Debug for EmotionalField<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmotionalField")
            .field("intensities", &self.intensities)
            .field("active_synergy", &self.active_synergy)
            .field("synergy_cooldown_ms", &self.synergy_cooldown_ms)
            .field("window_len", &self.behavior_window.len())
            .finish_non_exhaustive()
    }
}

impl Default for EmotionalField<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock> EmotionalField<C> {
    /// Create a zeroed field with the stock tuning.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, &AffectConfig::default())
    }

    /// Create a zeroed field tuned by `config`.
    #[must_use]
    pub fn with_config(clock: C, config: &AffectConfig) -> Self {
        let window_capacity = config.field.window_capacity.max(1);
        Self {
            intensities: Intensities::ZERO,
            active_synergy: None,
            synergy_cooldown_ms: 0.0,
            behavior_window: VecDeque::with_capacity(window_capacity),
            window_capacity,
            synergy_cooldown_duration_ms: config.field.synergy_cooldown_ms.max(0.0),
            inference: config.inference.clone(),
            clock,
            counters: Arc::new(AffectCounters::new()),
        }
    }

    /// Report into a shared set of counters instead of a private one.
    #[must_use]
    pub fn with_counters(mut self, counters: Arc<AffectCounters>) -> Self {
        self.counters = counters;
        self
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Shift one emotion by `amount`, clamped into `[0, 10]`.
    ///
    /// Negative amounts subtract. Non-finite amounts are dropped.
    pub fn add(&mut self, emotion: Emotion, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        let current = self.intensities.get(emotion);
        self.intensities.set(emotion, current + amount);
        AffectCounters::bump(&self.counters.adds_applied);
    }

    /// [`add`](Self::add) by wire name. Unknown names are a silent no-op.
    pub fn add_named(&mut self, name: &str, amount: f32) {
        if let Some(emotion) = Emotion::from_name(name) {
            self.add(emotion, amount);
        } else {
            debug!(name, amount, "Ignoring adjustment for unknown emotion");
            AffectCounters::bump(&self.counters.unknown_names_ignored);
        }
    }

    /// Lower every emotion by `rate`, flooring at zero.
    ///
    /// The caller owns the cadence and passes an already time-scaled rate.
    /// Zero, negative and non-finite rates do nothing.
    pub fn decay(&mut self, rate: f32) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        for emotion in Emotion::ALL {
            let current = self.intensities.get(emotion);
            self.intensities.set(emotion, (current - rate).max(0.0));
        }
        AffectCounters::bump(&self.counters.decay_passes);
        trace!(rate, "Decay pass applied");
    }

    /// Zero every emotion, drop the active synergy and empty the window.
    pub fn reset(&mut self) {
        self.intensities = Intensities::ZERO;
        self.active_synergy = None;
        self.synergy_cooldown_ms = 0.0;
        self.behavior_window.clear();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Persistable state: every intensity plus the active synergy.
    #[must_use]
    pub fn export(&self) -> FieldSnapshot {
        FieldSnapshot {
            intensities: self
                .intensities
                .iter()
                .map(|(e, v)| (e.name().to_string(), v))
                .collect(),
            active_synergy_id: self.active_synergy.map(|id| id.as_str().to_string()),
        }
    }

    /// Restore from a snapshot.
    ///
    /// Starts from the reset state, so emotions missing from the snapshot read
    /// zero, and the window and cooldown are always empty afterwards. Unknown
    /// emotion keys and synergy ids are skipped.
    pub fn import(&mut self, snapshot: &FieldSnapshot) {
        self.reset();
        for (name, value) in &snapshot.intensities {
            match Emotion::from_name(name) {
                Some(emotion) => self.intensities.set(emotion, *value),
                None => debug!(name = %name, "Ignoring unknown emotion in snapshot"),
            }
        }
        self.active_synergy = snapshot.active_synergy_id.as_deref().and_then(|id| {
            let parsed = SynergyId::from_id(id);
            if parsed.is_none() {
                debug!(id, "Ignoring unknown synergy in snapshot");
            }
            parsed
        });
        AffectCounters::bump(&self.counters.snapshots_imported);
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Current intensity of one emotion.
    #[must_use]
    pub fn intensity(&self, emotion: Emotion) -> f32 {
        self.intensities.get(emotion)
    }

    /// All current intensities.
    #[must_use]
    pub fn intensities(&self) -> &Intensities {
        &self.intensities
    }

    /// Emotional chaos in `[0, 1]`.
    #[must_use]
    pub fn distortion(&self) -> f32 {
        aggregate::distortion(&self.intensities)
    }

    /// Overall psychological integration in `[0, 1]` (0.5 when empty).
    #[must_use]
    pub fn coherence(&self) -> f32 {
        aggregate::coherence(&self.intensities)
    }

    /// Overall affect in `[-1, 1]` (0 when empty).
    #[must_use]
    pub fn valence(&self) -> f32 {
        aggregate::valence(&self.intensities)
    }

    /// Strongest emotion, if any is present.
    #[must_use]
    pub fn dominant(&self) -> Option<Emotion> {
        aggregate::dominant(&self.intensities)
    }

    /// Every derived reading at once.
    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        Aggregate::of(&self.intensities)
    }

    /// Synergy currently latched, if any.
    #[must_use]
    pub fn active_synergy(&self) -> Option<SynergyId> {
        self.active_synergy
    }

    /// Milliseconds left before the active synergy releases.
    #[must_use]
    pub fn synergy_cooldown_ms(&self) -> f32 {
        self.synergy_cooldown_ms
    }

    /// Recorded behavior samples, oldest first.
    #[must_use]
    pub fn behavior_window(&self) -> &VecDeque<BehaviorSample> {
        &self.behavior_window
    }

    /// Maximum number of samples the window keeps.
    #[must_use]
    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }

    /// The injected time source.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Counters this field reports into.
    #[must_use]
    pub fn counters(&self) -> &Arc<AffectCounters> {
        &self.counters
    }
}
