//! # Affect Core Library
//!
//! Engine-agnostic affect model for a single player session.
//!
//! The player carries one [`EmotionalField`]: ten tracked emotions, each with
//! an intensity in `[0, 10]`, that gameplay pushes around and a periodic tick
//! decays back toward zero. Everything else is derived from it:
//!
//! - **Catalog** — static valence / arousal / coherence per emotion
//! - **Aggregate** — distortion, coherence, valence and dominant emotion
//! - **Synergy** — seven threshold rules with an edge-triggered activation slot
//! - **Behavior** — movement, hazard, health and combo samples nudging the field
//! - **Modifiers** — gameplay and visual multipliers projected from aggregates
//!
//! ## Performance Contract
//!
//! All operations are O(number of emotions) or O(window size) and allocate
//! nothing on the hot path except the bounded behavior window:
//! - `observe_behavior`: < 2μs
//! - aggregate read: < 1μs
//! - `update_synergy`: < 2μs

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod behavior;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod metrics;
pub mod modifiers;
pub mod snapshot;
pub mod synergy;
pub mod types;

pub use aggregate::Aggregate;
pub use behavior::{BehaviorContext, BehaviorKind, BehaviorSample};
pub use catalog::{Emotion, EmotionSpec, CATALOG};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AffectConfig;
pub use error::AffectError;
pub use field::EmotionalField;
pub use modifiers::{get_emotional_modifiers, GameplayModifierSet};
pub use snapshot::FieldSnapshot;
pub use synergy::{SynergyId, SynergyOutcome, SynergySpec, SYNERGIES};
pub use types::*;
