//! Integration Tests — end-to-end affect flows.
//!
//! These tests drive the field the way a game loop does: behavior in, decay on
//! a cadence, synergy polled per tick, aggregates and modifiers read back out,
//! and the whole state saved and restored.

use affect_core::behavior::{BehaviorContext, BehaviorKind};
use affect_core::catalog::Emotion;
use affect_core::clock::{Clock, ManualClock};
use affect_core::config::AffectConfig;
use affect_core::field::EmotionalField;
use affect_core::modifiers::get_emotional_modifiers;
use affect_core::snapshot::{self, SaveEnvelope};
use affect_core::synergy::SynergyId;
use affect_core::types::Direction;

fn field() -> (EmotionalField<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    (EmotionalField::new(clock.clone()), clock)
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn anger_alone_is_mid_coherence_and_matches_nothing() {
    let (mut f, _) = field();
    f.reset();
    f.add_named("anger", 4.0);
    f.add_named("awe", 0.0);

    assert!((f.coherence() - 0.5).abs() < 1e-6);
    assert!(f.check_synergy().is_none());
}

#[test]
fn joy_and_hope_produce_resonance() {
    let (mut f, _) = field();
    f.add_named("joy", 6.0);
    f.add_named("hope", 4.0);
    assert_eq!(f.check_synergy().map(|s| s.id), Some(SynergyId::Resonance));
}

#[test]
fn focused_force_outranks_dissolution() {
    // Enough high-coherence mass to lift coherence above 0.7 while anger and
    // despair both clear their thresholds.
    let (mut f, _) = field();
    f.add(Emotion::Anger, 4.0);
    f.add(Emotion::Despair, 5.5);
    f.add(Emotion::Joy, 10.0);
    f.add(Emotion::Tender, 10.0);
    f.add(Emotion::Hope, 10.0);

    assert!(f.coherence() > 0.7, "coherence {}", f.coherence());
    assert!(SynergyId::Dissolution
        .spec()
        .matches(&affect_core::synergy::EmotionVector::of(f.intensities())));
    assert_eq!(f.check_synergy().map(|s| s.id), Some(SynergyId::FocusedForce));
}

// ---------------------------------------------------------------------------
// Game-loop flow
// ---------------------------------------------------------------------------

#[test]
fn hazard_run_escalates_to_chaos_burst() {
    let (mut f, clock) = field();
    let mut activations = Vec::new();

    for step in 0..40 {
        clock.advance(80);
        let kind = if step % 2 == 0 {
            BehaviorKind::HazardEnter
        } else {
            BehaviorKind::RapidMove
        };
        f.observe_behavior(kind, BehaviorContext::step(80.0, Direction::Right));
        if let Some(spec) = f.update_synergy(80.0) {
            activations.push(spec.id);
        }
    }

    // Fear dominates, anger climbs past 3 with coherence dragged under 0.4.
    assert_eq!(f.dominant(), Some(Emotion::Fear));
    assert!(f.intensity(Emotion::Anger) > 3.0);
    assert!(f.coherence() < 0.4);
    assert_eq!(activations, vec![SynergyId::ChaosBurst]);

    let m = get_emotional_modifiers(&f);
    assert!(m.movement_speed < 1.0);
    assert!(m.hazard_damage > 1.0);
}

#[test]
fn decay_before_synergy_prevents_activation() {
    let (mut f, _) = field();
    f.add(Emotion::Despair, 5.05);

    // Post-decay state is what the synergy poll sees this tick.
    f.decay(0.1);
    assert!(f.update_synergy(100.0).is_none());
    assert_eq!(f.active_synergy(), None);
}

#[test]
fn decay_eventually_empties_field() {
    let (mut f, _) = field();
    for e in Emotion::ALL {
        f.add(e, 10.0);
    }
    for _ in 0..250 {
        f.decay(0.05);
    }
    assert!(f.intensities().is_zero());
    assert_eq!(f.dominant(), None);
    assert_eq!(f.distortion(), 0.0);
    assert!((f.coherence() - 0.5).abs() < f32::EPSILON);
    assert_eq!(f.valence(), 0.0);
}

#[test]
fn edge_trigger_over_many_ticks() {
    let (mut f, _) = field();
    f.add(Emotion::Grief, 4.0);
    f.add(Emotion::Curiosity, 3.0);

    let fired: Vec<bool> = (0..100).map(|_| f.update_synergy(16.0).is_some()).collect();
    assert!(fired[0]);
    assert!(fired[1..].iter().all(|x| !x));
    assert_eq!(f.active_synergy(), Some(SynergyId::DeepInsight));
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn export_import_round_trip_preserves_readings() {
    let (mut f, clock) = field();
    f.add(Emotion::Tender, 4.0);
    f.add(Emotion::Fear, 2.5);
    f.add(Emotion::Awe, 1.25);
    assert!(f.update_synergy(16.0).is_some());
    for _ in 0..3 {
        clock.advance(50);
        f.observe_behavior(BehaviorKind::Move, BehaviorContext::default());
    }

    let json = snapshot::to_json(&f.export()).expect("encode");
    let restored_snapshot = snapshot::from_json(&json).expect("decode");

    let mut g = EmotionalField::new(ManualClock::new(0));
    g.import(&restored_snapshot);

    assert_eq!(g.aggregate(), f.aggregate());
    assert_eq!(g.active_synergy(), Some(SynergyId::Protective));
    assert_eq!(g.active_synergy(), f.active_synergy());
    assert!(g.behavior_window().is_empty());
    assert_eq!(g.synergy_cooldown_ms(), 0.0);
}

#[test]
fn imported_active_synergy_does_not_refire() {
    let (mut f, _) = field();
    f.add(Emotion::Joy, 7.0);
    f.add(Emotion::Hope, 5.0);
    assert!(f.update_synergy(16.0).is_some());

    let mut g = EmotionalField::new(ManualClock::new(0));
    g.import(&f.export());
    assert!(g.update_synergy(16.0).is_none());
}

#[test]
fn oversized_saved_intensity_loads_at_max() {
    let snap = snapshot::from_json(r#"{"intensities": {"despair": 1e39, "fear": -1e39}}"#)
        .expect("decode");
    let (mut f, _) = field();
    f.import(&snap);
    assert_eq!(f.intensity(Emotion::Despair), 10.0);
    assert_eq!(f.intensity(Emotion::Fear), 0.0);
    assert_eq!(f.dominant(), Some(Emotion::Despair));
}

#[test]
fn save_envelope_to_disk_and_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run.json");

    let (mut f, _) = field();
    f.add(Emotion::Shame, 3.5);
    f.add(Emotion::Awe, 2.5);
    assert_eq!(
        f.update_synergy(16.0).map(|s| s.id),
        Some(SynergyId::CollapseEvent)
    );
    SaveEnvelope::new(f.export()).save_to_path(&path).expect("save");

    let envelope = SaveEnvelope::load_from_path(&path)
        .expect("load")
        .expect("present");
    let mut g = EmotionalField::new(ManualClock::new(0));
    g.import(&envelope.snapshot);
    assert_eq!(g.aggregate(), f.aggregate());
    assert_eq!(g.active_synergy(), Some(SynergyId::CollapseEvent));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_tunes_window_and_cooldown() {
    let config = AffectConfig::from_toml(
        r#"
        [field]
        window_capacity = 3
        synergy_cooldown_ms = 500.0
        "#,
    )
    .expect("config");
    let clock = ManualClock::new(0);
    let mut f = EmotionalField::with_config(clock.clone(), &config);

    for _ in 0..10 {
        clock.advance(10);
        f.observe_behavior(BehaviorKind::Idle, BehaviorContext::default());
    }
    assert_eq!(f.behavior_window().len(), 3);
    assert_eq!(f.behavior_window()[0].observed_at_ms, 80);
    assert_eq!(clock.now_ms(), 100);

    f.add(Emotion::Despair, 9.0);
    assert!(f.update_synergy(0.0).is_some());
    assert!((f.synergy_cooldown_ms() - 500.0).abs() < f32::EPSILON);
}
