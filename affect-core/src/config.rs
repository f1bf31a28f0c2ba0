//! Configuration for the affect engine.
//!
//! Maps directly to `affect.toml`. Every field has a default, so an empty file
//! (or no file at all) reproduces the stock tuning.

use serde::{Deserialize, Serialize};

/// Top-level affect configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Emotional field capacity and synergy timing.
    #[serde(default)]
    pub field: FieldConfig,
    /// Behavior inference thresholds.
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Decay cadence used by the host's tick loop.
    #[serde(default)]
    pub decay: DecayConfig,
}

impl AffectConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AffectError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::AffectError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether the affect engine runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Emotional field configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Behavior samples kept in the sliding window.
    #[serde(default = "default_20_usize")]
    pub window_capacity: usize,
    /// How long a newly activated synergy stays latched (ms).
    #[serde(default = "default_3000")]
    pub synergy_cooldown_ms: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            window_capacity: 20,
            synergy_cooldown_ms: 3000.0,
        }
    }
}

/// Thresholds for the derived behavior heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Look-back for counting recent moves (ms).
    #[serde(default = "default_1500")]
    pub burst_window_ms: u64,
    /// Recent moves needed to count as a speed burst.
    #[serde(default = "default_5_usize")]
    pub burst_min_moves: usize,
    /// At most this many recent moves counts as calm.
    #[serde(default = "default_1_usize")]
    pub calm_max_moves: usize,
    /// Window must hold at least this many samples before calm can register.
    #[serde(default = "default_5_usize")]
    pub calm_min_samples: usize,
    /// Health fraction below which despair and fear rise.
    #[serde(default = "default_0_25")]
    pub low_hp_ratio: f32,
    /// Health fraction above which hope rises.
    #[serde(default = "default_0_85")]
    pub high_hp_ratio: f32,
    /// Combo length at which joy and hope rise.
    #[serde(default = "default_5_u32")]
    pub combo_threshold: u32,
    /// Max HP assumed when a health sample omits it.
    #[serde(default = "default_100")]
    pub default_max_hp: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            burst_window_ms: 1500,
            burst_min_moves: 5,
            calm_max_moves: 1,
            calm_min_samples: 5,
            low_hp_ratio: 0.25,
            high_hp_ratio: 0.85,
            combo_threshold: 5,
            default_max_hp: 100.0,
        }
    }
}

/// Decay cadence. The field itself only applies a rate; the host decides when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Minimum wall time between two decay passes (ms).
    #[serde(default = "default_100_u64")]
    pub interval_ms: u64,
    /// Intensity removed from every emotion per second of elapsed time.
    #[serde(default = "default_0_5")]
    pub rate_per_second: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            rate_per_second: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_0_25() -> f32 { 0.25 }
fn default_0_5() -> f32 { 0.5 }
fn default_0_85() -> f32 { 0.85 }
fn default_100() -> f32 { 100.0 }
fn default_3000() -> f32 { 3000.0 }
fn default_1_usize() -> usize { 1 }
fn default_5_usize() -> usize { 5 }
fn default_20_usize() -> usize { 20 }
fn default_5_u32() -> u32 { 5 }
fn default_100_u64() -> u64 { 100 }
fn default_1500() -> u64 { 1500 }
