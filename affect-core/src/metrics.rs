//! Runtime counters for the affect engine.
//!
//! The field bumps these on the hot path; hosts read them rarely, for a debug
//! overlay or a server dashboard. All counters are lock-free `AtomicU64`s so a
//! shared handle can be read from another thread without touching the field.

use std::sync::atomic::{AtomicU64, Ordering};

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters for high-frequency affect events.
#[derive(Debug)]
pub struct AffectCounters {
    /// Intensity adjustments applied.
    pub adds_applied: AtomicU64,
    /// Adjustments dropped because the emotion name was unknown.
    pub unknown_names_ignored: AtomicU64,
    /// Decay passes applied.
    pub decay_passes: AtomicU64,
    /// Behavior samples recorded.
    pub behavior_samples: AtomicU64,
    /// Synergy activations (edge-triggered events returned to the host).
    pub synergy_activations: AtomicU64,
    /// Synergies released by cooldown expiry.
    pub synergy_expiries: AtomicU64,
    /// Snapshots imported.
    pub snapshots_imported: AtomicU64,
}

impl AffectCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            adds_applied: AtomicU64::new(0),
            unknown_names_ignored: AtomicU64::new(0),
            decay_passes: AtomicU64::new(0),
            behavior_samples: AtomicU64::new(0),
            synergy_activations: AtomicU64::new(0),
            synergy_expiries: AtomicU64::new(0),
            snapshots_imported: AtomicU64::new(0),
        }
    }

    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot all counters for export.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            adds_applied: self.adds_applied.load(Ordering::Relaxed),
            unknown_names_ignored: self.unknown_names_ignored.load(Ordering::Relaxed),
            decay_passes: self.decay_passes.load(Ordering::Relaxed),
            behavior_samples: self.behavior_samples.load(Ordering::Relaxed),
            synergy_activations: self.synergy_activations.load(Ordering::Relaxed),
            synergy_expiries: self.synergy_expiries.load(Ordering::Relaxed),
            snapshots_imported: self.snapshots_imported.load(Ordering::Relaxed),
        }
    }
}

impl Default for AffectCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Intensity adjustments applied.
    pub adds_applied: u64,
    /// Unknown-name adjustments dropped.
    pub unknown_names_ignored: u64,
    /// Decay passes applied.
    pub decay_passes: u64,
    /// Behavior samples recorded.
    pub behavior_samples: u64,
    /// Synergy activations.
    pub synergy_activations: u64,
    /// Synergy cooldown expiries.
    pub synergy_expiries: u64,
    /// Snapshots imported.
    pub snapshots_imported: u64,
}

impl CounterSnapshot {
    /// Format as Prometheus-compatible text.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP affect_adds_applied_total Intensity adjustments applied\n\
             # TYPE affect_adds_applied_total counter\n\
             affect_adds_applied_total {}\n\
             # HELP affect_unknown_names_ignored_total Adjustments for unknown emotions\n\
             # TYPE affect_unknown_names_ignored_total counter\n\
             affect_unknown_names_ignored_total {}\n\
             # HELP affect_decay_passes_total Decay passes applied\n\
             # TYPE affect_decay_passes_total counter\n\
             affect_decay_passes_total {}\n\
             # HELP affect_behavior_samples_total Behavior samples recorded\n\
             # TYPE affect_behavior_samples_total counter\n\
             affect_behavior_samples_total {}\n\
             # HELP affect_synergy_activations_total Synergy activations\n\
             # TYPE affect_synergy_activations_total counter\n\
             affect_synergy_activations_total {}\n\
             # HELP affect_synergy_expiries_total Synergy cooldown expiries\n\
             # TYPE affect_synergy_expiries_total counter\n\
             affect_synergy_expiries_total {}\n\
             # HELP affect_snapshots_imported_total Snapshots imported\n\
             # TYPE affect_snapshots_imported_total counter\n\
             affect_snapshots_imported_total {}\n",
            self.adds_applied,
            self.unknown_names_ignored,
            self.decay_passes,
            self.behavior_samples,
            self.synergy_activations,
            self.synergy_expiries,
            self.snapshots_imported,
        )
    }
}
