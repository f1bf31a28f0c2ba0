//! Game events that feed behavior inference.
//!
//! The host reports what the player did in its own vocabulary. An
//! [`EventTranslator`] turns each event into the `(BehaviorKind,
//! BehaviorContext)` pair the field understands, carrying the latest health
//! and combo along with every sample.

use affect_core::behavior::{BehaviorContext, BehaviorKind};
use affect_core::types::Direction;
use serde::{Deserialize, Serialize};

/// Steps closer together than this count as rapid movement (ms).
pub const RAPID_STEP_MS: f32 = 150.0;

/// A player action or status change reported by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The player moved one tile.
    Step {
        interval_ms: f32,
        direction: Direction,
        tile: Option<String>,
    },

    /// No input for the host's idle threshold.
    Idle,

    /// The player moved next to a hazard.
    HazardNear { tile: String },

    /// The player stepped onto a hazard.
    HazardEntered { tile: String },

    /// The player stepped away from an adjacent hazard.
    HazardAvoided { tile: String },

    /// A peace token was picked up.
    PeaceCollected,

    /// The player reached a tile never visited before.
    Explored { tile: String },

    /// The player walked a tight loop.
    Circled,

    /// The combo streak changed.
    ComboChanged { combo: u32 },

    /// Current or maximum health changed.
    HealthChanged { hp: f32, max_hp: Option<f32> },
}

impl GameEvent {
    /// Whether this event only updates player status and records no sample.
    #[must_use]
    pub fn is_status_update(&self) -> bool {
        matches!(self, Self::ComboChanged { .. } | Self::HealthChanged { .. })
    }

    /// Tile the event happened on, if it names one.
    #[must_use]
    pub fn tile(&self) -> Option<&str> {
        match self {
            Self::Step { tile, .. } => tile.as_deref(),
            Self::HazardNear { tile }
            | Self::HazardEntered { tile }
            | Self::HazardAvoided { tile }
            | Self::Explored { tile } => Some(tile),
            _ => None,
        }
    }
}

/// Classifies steps by comparing each one with the step before it.
#[derive(Debug, Clone)]
pub struct MovementTracker {
    last_direction: Option<Direction>,
    rapid_threshold_ms: f32,
}

impl MovementTracker {
    /// Tracker using [`RAPID_STEP_MS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(RAPID_STEP_MS)
    }

    /// Tracker with a custom rapid-step threshold.
    #[must_use]
    pub fn with_threshold(rapid_threshold_ms: f32) -> Self {
        Self {
            last_direction: None,
            rapid_threshold_ms,
        }
    }

    /// Classify a step and remember its direction.
    ///
    /// Doubling back wins over speed: a quick step the opposite way is a
    /// reverse, not a rapid move.
    pub fn classify(&mut self, interval_ms: f32, direction: Direction) -> BehaviorKind {
        let previous = self.last_direction.replace(direction);
        if previous == Some(direction.opposite()) {
            BehaviorKind::Reverse
        } else if interval_ms < self.rapid_threshold_ms {
            BehaviorKind::RapidMove
        } else {
            BehaviorKind::Move
        }
    }

    /// Direction of the last classified step.
    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Forget the previous step.
    pub fn clear(&mut self) {
        self.last_direction = None;
    }
}

impl Default for MovementTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful [`GameEvent`] → behavior translation.
#[derive(Debug, Clone, Default)]
pub struct EventTranslator {
    movement: MovementTracker,
    hp: Option<f32>,
    max_hp: Option<f32>,
    combo: Option<u32>,
}

impl EventTranslator {
    /// Fresh translator with no movement history or status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one event.
    ///
    /// Status updates (`ComboChanged`, `HealthChanged`) return `None` and are
    /// attached to every later sample instead.
    pub fn translate(&mut self, event: &GameEvent) -> Option<(BehaviorKind, BehaviorContext)> {
        let (kind, mut context) = match event {
            GameEvent::Step {
                interval_ms,
                direction,
                ..
            } => (
                self.movement.classify(*interval_ms, *direction),
                BehaviorContext::step(*interval_ms, *direction),
            ),
            GameEvent::Idle => (BehaviorKind::Idle, BehaviorContext::default()),
            GameEvent::HazardNear { .. } => (BehaviorKind::HazardApproach, BehaviorContext::default()),
            GameEvent::HazardEntered { .. } => (BehaviorKind::HazardEnter, BehaviorContext::default()),
            GameEvent::HazardAvoided { .. } => (BehaviorKind::HazardAvoid, BehaviorContext::default()),
            GameEvent::PeaceCollected => (BehaviorKind::PeaceCollect, BehaviorContext::default()),
            GameEvent::Explored { .. } => (BehaviorKind::Exploration, BehaviorContext::default()),
            GameEvent::Circled => (BehaviorKind::Circling, BehaviorContext::default()),
            GameEvent::ComboChanged { combo } => {
                self.combo = Some(*combo);
                return None;
            }
            GameEvent::HealthChanged { hp, max_hp } => {
                self.hp = Some(*hp);
                if max_hp.is_some() {
                    self.max_hp = *max_hp;
                }
                return None;
            }
        };

        context.tile_type = event.tile().map(str::to_string);
        context.hp = self.hp;
        context.max_hp = self.max_hp;
        context.combo = self.combo;
        Some((kind, context))
    }

    /// The movement tracker.
    #[must_use]
    pub fn movement(&self) -> &MovementTracker {
        &self.movement
    }
}
