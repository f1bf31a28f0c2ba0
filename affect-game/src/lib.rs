//! # affect-game — Game-Loop Integration for the Affect Engine
//!
//! This crate sits between a game's update loop and the engine-agnostic
//! `affect-core` library.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Game loop                  │
//! │  ┌───────────────────────────────────┐  │
//! │  │       affect-game                 │  │
//! │  │  ┌─────────────┐ ┌─────────────┐  │  │
//! │  │  │   Events    │ │   Systems   │  │  │
//! │  │  └──────┬──────┘ └──────┬──────┘  │  │
//! │  │         │               │         │  │
//! │  │         ▼               ▼         │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │  Components (session)   │    │  │
//! │  │    └────────────┬────────────┘    │  │
//! │  │                 ▼                 │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │      affect-core        │    │  │
//! │  │    └─────────────────────────┘    │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `components` — `AffectSession`, `SessionId`, `TickReport`
//! - `systems` — decay scheduling, event observation, synergy polling
//! - `events` — game events and their translation into behaviors

pub mod components;
pub mod events;
pub mod systems;

pub use components::{AffectSession, SessionId, TickReport};
pub use events::{EventTranslator, GameEvent, MovementTracker};
pub use systems::DecayScheduler;
