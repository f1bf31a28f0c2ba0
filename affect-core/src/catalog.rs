//! Emotion Catalog — the fixed table of tracked emotions.
//!
//! Every emotion carries three static coordinates:
//! - **Valence**: unpleasant (-1) → pleasant (+1)
//! - **Arousal**: calm (0) → activated (1)
//! - **Coherence**: fragmented (0) → integrated (1)
//!
//! The table order is part of the contract: dominant-emotion ties resolve to
//! the emotion listed first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AffectError;

/// One of the ten tracked emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Delight, lightness.
    Joy,
    /// Expectation that things will improve.
    Hope,
    /// Pull toward the unknown.
    Curiosity,
    /// Being dwarfed by something vast.
    Awe,
    /// Gentle care for something fragile.
    Tender,
    /// Anticipation of harm.
    Fear,
    /// Hot, outward-facing resistance.
    Anger,
    /// Weight of loss.
    Grief,
    /// Turning against oneself.
    Shame,
    /// Absence of any way forward.
    Despair,
}

impl Emotion {
    /// Number of tracked emotions.
    pub const COUNT: usize = 10;

    /// All emotions in catalog order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Joy,
        Self::Hope,
        Self::Curiosity,
        Self::Awe,
        Self::Tender,
        Self::Fear,
        Self::Anger,
        Self::Grief,
        Self::Shame,
        Self::Despair,
    ];

    /// Position of this emotion in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase wire name (`"joy"`, `"despair"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Hope => "hope",
            Self::Curiosity => "curiosity",
            Self::Awe => "awe",
            Self::Tender => "tender",
            Self::Fear => "fear",
            Self::Anger => "anger",
            Self::Grief => "grief",
            Self::Shame => "shame",
            Self::Despair => "despair",
        }
    }

    /// Look up an emotion by wire name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Static definition of this emotion.
    #[must_use]
    pub fn spec(self) -> &'static EmotionSpec {
        &CATALOG[self.index()]
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = AffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AffectError::UnknownEmotion(s.to_string()))
    }
}

/// Static, read-only definition of a single emotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionSpec {
    /// Which emotion this row describes.
    pub emotion: Emotion,
    /// Polarity, -1.0 to +1.0.
    pub valence: f32,
    /// Activation, 0.0 to 1.0.
    pub arousal: f32,
    /// Integration, 0.0 to 1.0.
    pub coherence: f32,
    /// Hex color used by renderers.
    pub display_color: &'static str,
    /// Short flavor text.
    pub description: &'static str,
}

/// The emotion catalog, indexed by [`Emotion::index`].
pub static CATALOG: [EmotionSpec; Emotion::COUNT] = [
    EmotionSpec {
        emotion: Emotion::Joy,
        valence: 0.8,
        arousal: 0.6,
        coherence: 0.9,
        display_color: "#ffd700",
        description: "Bright, expansive lightness",
    },
    EmotionSpec {
        emotion: Emotion::Hope,
        valence: 0.6,
        arousal: 0.4,
        coherence: 0.8,
        display_color: "#87ceeb",
        description: "A thread pulling toward tomorrow",
    },
    EmotionSpec {
        emotion: Emotion::Curiosity,
        valence: 0.4,
        arousal: 0.6,
        coherence: 0.6,
        display_color: "#00ff88",
        description: "The itch to look around the corner",
    },
    EmotionSpec {
        emotion: Emotion::Awe,
        valence: 0.5,
        arousal: 0.7,
        coherence: 0.6,
        display_color: "#9370db",
        description: "Smallness before something vast",
    },
    EmotionSpec {
        emotion: Emotion::Tender,
        valence: 0.7,
        arousal: 0.3,
        coherence: 0.9,
        display_color: "#ffb6c1",
        description: "Soft care for what could break",
    },
    EmotionSpec {
        emotion: Emotion::Fear,
        valence: -0.7,
        arousal: 0.8,
        coherence: 0.3,
        display_color: "#8b0000",
        description: "The body bracing for harm",
    },
    EmotionSpec {
        emotion: Emotion::Anger,
        valence: -0.6,
        arousal: 0.9,
        coherence: 0.5,
        display_color: "#ff4500",
        description: "Heat that wants to push back",
    },
    EmotionSpec {
        emotion: Emotion::Grief,
        valence: -0.8,
        arousal: 0.3,
        coherence: 0.4,
        display_color: "#4b0082",
        description: "The weight of what is gone",
    },
    EmotionSpec {
        emotion: Emotion::Shame,
        valence: -0.7,
        arousal: 0.5,
        coherence: 0.3,
        display_color: "#556b2f",
        description: "Wanting to disappear",
    },
    EmotionSpec {
        emotion: Emotion::Despair,
        valence: -0.9,
        arousal: 0.2,
        coherence: 0.2,
        display_color: "#2f2f2f",
        description: "No way forward left",
    },
];
