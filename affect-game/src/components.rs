//! Session component: one player's affect state plus its tick machinery.
//!
//! An [`AffectSession`] is what a game attaches to the player entity. It owns
//! the emotional field, the decay scheduler and the event translator, and runs
//! the per-frame systems in the right order.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use affect_core::behavior::BehaviorKind;
use affect_core::clock::{Clock, SystemClock};
use affect_core::config::AffectConfig;
use affect_core::error::Result;
use affect_core::field::EmotionalField;
use affect_core::metrics::AffectCounters;
use affect_core::modifiers::{GameplayModifierSet, get_emotional_modifiers};
use affect_core::snapshot::SaveEnvelope;
use affect_core::synergy::{SynergyId, SynergySpec};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::events::{EventTranslator, GameEvent};
use crate::systems::{self, DecayScheduler};

/// Unique identifier for one play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything that changed during one [`AffectSession::tick`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TickReport {
    /// Decay rate applied this tick, if a pass was due.
    pub decayed_by: Option<f32>,
    /// Synergy that activated this tick.
    pub activated: Option<&'static SynergySpec>,
    /// Synergy whose cooldown ran out this tick.
    pub expired: Option<SynergyId>,
    /// Modifiers after decay and the synergy poll.
    pub modifiers: GameplayModifierSet,
}

/// The affect state of one player for one run.
pub struct AffectSession<C: Clock + Clone = SystemClock> {
    id: SessionId,
    config: AffectConfig,
    field: EmotionalField<C>,
    scheduler: DecayScheduler,
    translator: EventTranslator,
    counters: Arc<AffectCounters>,
}

impl<C: Clock + Clone> fmt::Debug for AffectSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffectSession")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Default for AffectSession<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock + Clone> AffectSession<C> {
    /// Start a session with the stock tuning.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, AffectConfig::default())
    }

    /// Start a session tuned by `config`.
    #[must_use]
    pub fn with_config(clock: C, config: AffectConfig) -> Self {
        let counters = Arc::new(AffectCounters::new());
        let field = EmotionalField::with_config(clock, &config).with_counters(Arc::clone(&counters));
        let id = SessionId::new();
        info!(session = %id, enabled = config.general.enabled, "Affect session started");
        Self {
            id,
            scheduler: DecayScheduler::from_config(&config.decay),
            translator: EventTranslator::new(),
            config,
            field,
            counters,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The emotional field.
    #[must_use]
    pub fn field(&self) -> &EmotionalField<C> {
        &self.field
    }

    /// Mutable access for direct adjustments (scripted story beats and the like).
    pub fn field_mut(&mut self) -> &mut EmotionalField<C> {
        &mut self.field
    }

    /// Counters shared by this session's field, across resets.
    #[must_use]
    pub fn counters(&self) -> &Arc<AffectCounters> {
        &self.counters
    }

    /// Whether the engine is switched on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.general.enabled
    }

    /// Feed one game event into behavior inference.
    ///
    /// Returns the behavior recorded. Disabled sessions record nothing.
    pub fn handle_event(&mut self, event: &GameEvent) -> Option<BehaviorKind> {
        if !self.is_enabled() {
            return None;
        }
        systems::observe_event(&mut self.field, &mut self.translator, event)
    }

    /// Run one frame: throttled decay, then the synergy poll.
    pub fn tick(&mut self, dt_ms: f32) -> TickReport {
        if !self.is_enabled() {
            return TickReport {
                decayed_by: None,
                activated: None,
                expired: None,
                modifiers: GameplayModifierSet::default(),
            };
        }
        let decayed_by = systems::run_decay(&mut self.field, &mut self.scheduler);
        let step = systems::run_synergy(&mut self.field, dt_ms);
        TickReport {
            decayed_by,
            activated: step.activated,
            expired: step.expired,
            modifiers: get_emotional_modifiers(&self.field),
        }
    }

    /// Current modifiers without advancing anything.
    #[must_use]
    pub fn modifiers(&self) -> GameplayModifierSet {
        get_emotional_modifiers(&self.field)
    }

    /// Start over with a brand-new field. The session id and counters stay.
    pub fn reset(&mut self) {
        let clock = self.field.clock().clone();
        self.field = EmotionalField::with_config(clock, &self.config)
            .with_counters(Arc::clone(&self.counters));
        self.scheduler.reset();
        self.translator = EventTranslator::new();
        info!(session = %self.id, "Affect session reset");
    }

    /// Write the field to `path`.
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        SaveEnvelope::new(self.field.export()).save_to_path(path)
    }

    /// Restore the field from `path`. Returns `false` if there is no save.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&mut self, path: &Path) -> Result<bool> {
        let Some(envelope) = SaveEnvelope::load_from_path(path)? else {
            return Ok(false);
        };
        self.field.import(&envelope.snapshot);
        self.scheduler.reset();
        self.translator = EventTranslator::new();
        info!(session = %self.id, saved_at = %envelope.saved_at, "Affect session restored");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_core::catalog::Emotion;
    use affect_core::clock::ManualClock;

    fn session() -> (AffectSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        (AffectSession::new(clock.clone()), clock)
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let (a, _) = session();
        let (b, _) = session();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn tick_decays_before_synergy() {
        let (mut s, clock) = session();
        s.field_mut().add(Emotion::Despair, 5.02);

        // Arms the scheduler; despair 5.02 still matches.
        assert!(s.tick(16.0).activated.is_some());

        s.reset();
        s.tick(0.0);
        s.field_mut().add(Emotion::Despair, 5.02);
        clock.advance(100);
        let report = s.tick(100.0);
        // 0.5/s × 100ms = 0.05 puts despair under 5 before the poll.
        assert!((report.decayed_by.expect("decayed") - 0.05).abs() < 1e-6);
        assert!(report.activated.is_none());
    }

    #[test]
    fn reset_keeps_id_and_counters() {
        let (mut s, _) = session();
        let id = s.id();
        s.handle_event(&GameEvent::PeaceCollected);
        s.reset();
        assert_eq!(s.id(), id);
        assert!(s.field().intensities().is_zero());
        assert_eq!(s.counters().snapshot().behavior_samples, 1);
        s.handle_event(&GameEvent::Idle);
        assert_eq!(s.counters().snapshot().behavior_samples, 2);
    }

    #[test]
    fn disabled_session_is_inert() {
        let mut config = AffectConfig::default();
        config.general.enabled = false;
        let mut s = AffectSession::with_config(ManualClock::new(0), config);
        assert_eq!(s.handle_event(&GameEvent::HazardEntered { tile: "lava".into() }), None);
        let report = s.tick(16.0);
        assert!(report.decayed_by.is_none() && report.activated.is_none());
        assert!(s.field().behavior_window().is_empty());
    }

    #[test]
    fn load_missing_file_is_false() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut s, _) = session();
        assert!(!s.load(&dir.path().join("none.json")).expect("load"));
    }
}
