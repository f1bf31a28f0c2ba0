//! Metric Aggregator — derived readings over the current intensities.
//!
//! Weighted means only count emotions that are actually present (intensity
//! above zero); with nothing present they fall back to fixed neutral values
//! instead of dividing by zero:
//!
//! ```text
//! distortion = clamp( Σ iₑ · arousalₑ · (1 − coherenceₑ) / 10 , 0, 1 )
//! coherence  = Σ iₑ · coherenceₑ / Σ iₑ        (0.5 when Σ iₑ = 0)
//! valence    = Σ iₑ · valenceₑ   / Σ iₑ        (0.0 when Σ iₑ = 0)
//! ```

use serde::Serialize;

use crate::catalog::Emotion;
use crate::types::Intensities;

/// Coherence reported when no emotion is present.
pub const DEFAULT_COHERENCE: f32 = 0.5;

/// Valence reported when no emotion is present.
pub const DEFAULT_VALENCE: f32 = 0.0;

const DISTORTION_SCALE: f32 = 10.0;

/// Emotional chaos in `[0, 1]`: high-arousal, low-coherence intensity.
#[must_use]
pub fn distortion(intensities: &Intensities) -> f32 {
    let raw: f32 = intensities
        .iter()
        .map(|(e, i)| {
            let spec = e.spec();
            i * spec.arousal * (1.0 - spec.coherence)
        })
        .sum();
    (raw / DISTORTION_SCALE).clamp(0.0, 1.0)
}

/// Intensity-weighted mean of per-emotion coherence.
#[must_use]
pub fn coherence(intensities: &Intensities) -> f32 {
    weighted_mean(intensities, |e| e.spec().coherence).unwrap_or(DEFAULT_COHERENCE)
}

/// Intensity-weighted mean of per-emotion valence.
#[must_use]
pub fn valence(intensities: &Intensities) -> f32 {
    weighted_mean(intensities, |e| e.spec().valence).unwrap_or(DEFAULT_VALENCE)
}

/// Emotion with the strictly highest intensity; ties go to catalog order.
/// `None` when every intensity is zero.
#[must_use]
pub fn dominant(intensities: &Intensities) -> Option<Emotion> {
    let mut best: Option<(Emotion, f32)> = None;
    for (emotion, value) in intensities.iter() {
        if value <= 0.0 {
            continue;
        }
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((emotion, value)),
        }
    }
    best.map(|(e, _)| e)
}

fn weighted_mean(intensities: &Intensities, field: impl Fn(Emotion) -> f32) -> Option<f32> {
    let (sum, weight) = intensities
        .iter()
        .filter(|(_, i)| *i > 0.0)
        .fold((0.0_f32, 0.0_f32), |(sum, weight), (e, i)| {
            (sum + i * field(e), weight + i)
        });
    if weight > 0.0 {
        Some(sum / weight)
    } else {
        None
    }
}

/// All four derived readings taken from one set of intensities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    /// See [`distortion`].
    pub distortion: f32,
    /// See [`coherence`].
    pub coherence: f32,
    /// See [`valence`].
    pub valence: f32,
    /// See [`dominant`].
    pub dominant: Option<Emotion>,
}

impl Aggregate {
    /// Compute every reading from `intensities`.
    #[must_use]
    pub fn of(intensities: &Intensities) -> Self {
        Self {
            distortion: distortion(intensities),
            coherence: coherence(intensities),
            valence: valence(intensities),
            dominant: dominant(intensities),
        }
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::of(&Intensities::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(values: &[(Emotion, f32)]) -> Intensities {
        let mut i = Intensities::default();
        for (e, v) in values {
            i.set(*e, *v);
        }
        i
    }

    #[test]
    fn empty_field_uses_fallbacks() {
        let agg = Aggregate::of(&Intensities::ZERO);
        assert_eq!(agg.distortion, 0.0);
        assert_eq!(agg.coherence, DEFAULT_COHERENCE);
        assert_eq!(agg.valence, DEFAULT_VALENCE);
        assert_eq!(agg.dominant, None);
        assert!(!agg.coherence.is_nan());
    }

    #[test]
    fn single_emotion_takes_its_own_coordinates() {
        let i = with(&[(Emotion::Anger, 4.0)]);
        assert!((coherence(&i) - 0.5).abs() < 1e-6);
        assert!((valence(&i) - -0.6).abs() < 1e-6);
        assert_eq!(dominant(&i), Some(Emotion::Anger));
    }

    #[test]
    fn distortion_formula() {
        // fear: 5 × 0.8 × (1 − 0.3) = 2.8 → 0.28
        let i = with(&[(Emotion::Fear, 5.0)]);
        assert!((distortion(&i) - 0.28).abs() < 1e-5);
    }

    #[test]
    fn distortion_saturates_at_one() {
        let mut i = Intensities::default();
        for e in Emotion::ALL {
            i.set(e, 10.0);
        }
        assert_eq!(distortion(&i), 1.0);
    }

    #[test]
    fn weighted_means_blend_by_intensity() {
        // joy 3 (coh 0.9), despair 1 (coh 0.2) → (2.7 + 0.2) / 4 = 0.725
        let i = with(&[(Emotion::Joy, 3.0), (Emotion::Despair, 1.0)]);
        assert!((coherence(&i) - 0.725).abs() < 1e-5);
        // (3 × 0.8 + 1 × −0.9) / 4 = 0.375
        assert!((valence(&i) - 0.375).abs() < 1e-5);
    }

    #[test]
    fn dominant_ties_resolve_to_catalog_order() {
        let i = with(&[(Emotion::Despair, 4.0), (Emotion::Hope, 4.0)]);
        assert_eq!(dominant(&i), Some(Emotion::Hope));

        let i = with(&[(Emotion::Despair, 4.5), (Emotion::Hope, 4.0)]);
        assert_eq!(dominant(&i), Some(Emotion::Despair));
    }
}
