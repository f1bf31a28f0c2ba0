//! Core type definitions shared across the affect modules.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::catalog::Emotion;

// ---------------------------------------------------------------------------
// Intensity range
// ---------------------------------------------------------------------------

/// Lowest intensity an emotion can hold.
pub const INTENSITY_MIN: f32 = 0.0;

/// Highest intensity an emotion can hold.
pub const INTENSITY_MAX: f32 = 10.0;

/// Clamp a raw value into the intensity range.
///
/// Infinities saturate to the nearest end; NaN maps to 0.
#[must_use]
pub fn clamp_intensity(value: f32) -> f32 {
    if value.is_nan() {
        INTENSITY_MIN
    } else {
        value.clamp(INTENSITY_MIN, INTENSITY_MAX)
    }
}

// ---------------------------------------------------------------------------
// Intensities
// ---------------------------------------------------------------------------

/// Current intensity per emotion, indexed by [`Emotion`].
///
/// Every value is kept inside `[INTENSITY_MIN, INTENSITY_MAX]`; the only
/// writer is [`Intensities::set`], which clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intensities([f32; Emotion::COUNT]);

impl Intensities {
    /// All emotions at zero.
    pub const ZERO: Self = Self([0.0; Emotion::COUNT]);

    /// Intensity of a single emotion.
    #[must_use]
    pub fn get(&self, emotion: Emotion) -> f32 {
        self.0[emotion.index()]
    }

    /// Set an emotion's intensity, clamped into range.
    pub fn set(&mut self, emotion: Emotion, value: f32) {
        self.0[emotion.index()] = clamp_intensity(value);
    }

    /// Iterate `(emotion, intensity)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// Sum of all intensities.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Whether every emotion sits at zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v <= 0.0)
    }

    /// Raw values in catalog order.
    #[must_use]
    pub fn as_array(&self) -> &[f32; Emotion::COUNT] {
        &self.0
    }
}

impl Index<Emotion> for Intensities {
    type Output = f32;

    fn index(&self, emotion: Emotion) -> &f32 {
        &self.0[emotion.index()]
    }
}

// ---------------------------------------------------------------------------
// Movement direction
// ---------------------------------------------------------------------------

/// Grid movement direction reported with movement samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the top of the grid.
    Up,
    /// Toward the bottom of the grid.
    Down,
    /// Toward the left of the grid.
    Left,
    /// Toward the right of the grid.
    Right,
}

impl Direction {
    /// The direction pointing the other way.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
