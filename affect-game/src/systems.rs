//! Per-frame systems for the affect engine.
//!
//! Standalone functions over an [`EmotionalField`], called by the session in a
//! fixed order each frame. Decay always runs before the synergy poll, so a
//! rule sees the post-decay state of the same tick.
//!
//! ## System Budget (per frame):
//!
//! | System          | Budget  | Frequency           |
//! |-----------------|---------|---------------------|
//! | Observation     | 2μs     | Per player event    |
//! | Decay           | 1μs     | Every `interval_ms` |
//! | Synergy         | 2μs     | Every frame         |
//! | Modifiers       | 1μs     | Every frame         |

use affect_core::behavior::BehaviorKind;
use affect_core::clock::Clock;
use affect_core::config::DecayConfig;
use affect_core::field::EmotionalField;
use affect_core::synergy::SynergyOutcome;
use tracing::trace;

use crate::events::{EventTranslator, GameEvent};

/// Throttles decay to a fixed cadence and scales the rate by elapsed time.
#[derive(Debug, Clone)]
pub struct DecayScheduler {
    interval_ms: u64,
    rate_per_second: f32,
    last_decay_ms: Option<u64>,
}

impl DecayScheduler {
    /// Decay at most every `interval_ms`, removing `rate_per_second` per second.
    #[must_use]
    pub fn new(interval_ms: u64, rate_per_second: f32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            rate_per_second,
            last_decay_ms: None,
        }
    }

    /// Scheduler tuned by the `[decay]` config section.
    #[must_use]
    pub fn from_config(config: &DecayConfig) -> Self {
        Self::new(config.interval_ms, config.rate_per_second)
    }

    /// Rate to decay by at `now_ms`, or `None` if it is too soon.
    ///
    /// The first poll only arms the timer.
    #[allow(clippy::cast_precision_loss)]
    pub fn poll(&mut self, now_ms: u64) -> Option<f32> {
        let Some(last) = self.last_decay_ms else {
            self.last_decay_ms = Some(now_ms);
            return None;
        };
        let elapsed = now_ms.saturating_sub(last);
        if elapsed < self.interval_ms {
            return None;
        }
        self.last_decay_ms = Some(now_ms);
        Some(self.rate_per_second * elapsed as f32 / 1000.0)
    }

    /// Disarm; the next poll starts a fresh interval.
    pub fn reset(&mut self) {
        self.last_decay_ms = None;
    }

    /// Clock reading of the last decay (or arming).
    #[must_use]
    pub fn last_decay_ms(&self) -> Option<u64> {
        self.last_decay_ms
    }
}

impl Default for DecayScheduler {
    fn default() -> Self {
        Self::from_config(&DecayConfig::default())
    }
}

/// Translate a game event and feed it to the field.
///
/// Returns the behavior recorded, or `None` for status-only events.
pub fn observe_event<C: Clock>(
    field: &mut EmotionalField<C>,
    translator: &mut EventTranslator,
    event: &GameEvent,
) -> Option<BehaviorKind> {
    let (kind, context) = translator.translate(event)?;
    field.observe_behavior(kind, context);
    Some(kind)
}

/// Apply a decay pass if the scheduler says one is due.
pub fn run_decay<C: Clock>(
    field: &mut EmotionalField<C>,
    scheduler: &mut DecayScheduler,
) -> Option<f32> {
    let rate = scheduler.poll(field.clock().now_ms())?;
    field.decay(rate);
    Some(rate)
}

/// Advance the synergy slot by `dt_ms`, reporting activation and expiry.
pub fn run_synergy<C: Clock>(field: &mut EmotionalField<C>, dt_ms: f32) -> SynergyOutcome {
    let outcome = field.advance_synergy(dt_ms);
    if let Some(id) = outcome.expired {
        trace!(synergy = %id, "Synergy released this tick");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use affect_core::catalog::Emotion;
    use affect_core::clock::ManualClock;
    use affect_core::synergy::SynergyId;

    #[test]
    fn first_poll_only_arms() {
        let mut s = DecayScheduler::new(100, 0.5);
        assert_eq!(s.poll(5_000), None);
        assert_eq!(s.last_decay_ms(), Some(5_000));
    }

    #[test]
    fn poll_waits_for_interval() {
        let mut s = DecayScheduler::new(100, 0.5);
        s.poll(0);
        assert_eq!(s.poll(99), None);
        let rate = s.poll(100).expect("due");
        assert!((rate - 0.05).abs() < 1e-6);
        assert_eq!(s.poll(150), None);
    }

    #[test]
    fn rate_scales_with_elapsed_time() {
        let mut s = DecayScheduler::new(100, 0.5);
        s.poll(0);
        let rate = s.poll(1_000).expect("due");
        assert!((rate - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reset_rearms() {
        let mut s = DecayScheduler::new(100, 0.5);
        s.poll(0);
        s.reset();
        assert_eq!(s.poll(10_000), None);
        assert!(s.poll(10_100).is_some());
    }

    #[test]
    fn run_decay_follows_scheduler() {
        let clock = ManualClock::new(0);
        let mut field = EmotionalField::new(clock.clone());
        let mut s = DecayScheduler::new(100, 1.0);
        field.add(Emotion::Fear, 1.0);

        assert_eq!(run_decay(&mut field, &mut s), None);
        clock.advance(200);
        let rate = run_decay(&mut field, &mut s).expect("decayed");
        assert!((rate - 0.2).abs() < 1e-6);
        assert!((field.intensity(Emotion::Fear) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn run_synergy_reports_expiry() {
        let mut field = EmotionalField::new(ManualClock::new(0));
        field.add(Emotion::Joy, 6.0);
        field.add(Emotion::Hope, 4.0);

        let first = run_synergy(&mut field, 16.0);
        assert_eq!(first.activated.map(|s| s.id), Some(SynergyId::Resonance));
        assert_eq!(first.expired, None);

        field.reset();
        field.add(Emotion::Joy, 6.0);
        field.add(Emotion::Hope, 4.0);
        run_synergy(&mut field, 16.0);
        field.add(Emotion::Joy, -10.0);
        let quiet = run_synergy(&mut field, 1_000.0);
        assert!(quiet.activated.is_none() && quiet.expired.is_none());
        let released = run_synergy(&mut field, 2_500.0);
        assert_eq!(released.expired, Some(SynergyId::Resonance));
        assert!(released.activated.is_none());
        assert_eq!(field.active_synergy(), None);
    }

    #[test]
    fn expiry_is_per_field_with_shared_counters() {
        use std::sync::Arc;

        use affect_core::metrics::AffectCounters;

        let counters = Arc::new(AffectCounters::new());
        let mut a = EmotionalField::new(ManualClock::new(0)).with_counters(Arc::clone(&counters));
        let mut b = EmotionalField::new(ManualClock::new(0)).with_counters(Arc::clone(&counters));
        a.add(Emotion::Despair, 8.0);
        b.add(Emotion::Grief, 4.0);
        b.add(Emotion::Curiosity, 3.0);
        run_synergy(&mut a, 0.0);
        run_synergy(&mut b, 0.0);
        a.add(Emotion::Despair, -8.0);

        assert_eq!(run_synergy(&mut a, 3_000.0).expired, Some(SynergyId::Dissolution));
        let other = run_synergy(&mut b, 16.0);
        assert!(other.expired.is_none() && other.activated.is_none());
        assert_eq!(b.active_synergy(), Some(SynergyId::DeepInsight));
    }

    #[test]
    fn observe_event_skips_status_updates() {
        let mut field = EmotionalField::new(ManualClock::new(0));
        let mut tr = EventTranslator::new();
        assert_eq!(
            observe_event(&mut field, &mut tr, &GameEvent::ComboChanged { combo: 3 }),
            None
        );
        assert!(field.behavior_window().is_empty());
        assert_eq!(
            observe_event(&mut field, &mut tr, &GameEvent::PeaceCollected),
            Some(BehaviorKind::PeaceCollect)
        );
        assert_eq!(field.behavior_window().len(), 1);
    }
}
