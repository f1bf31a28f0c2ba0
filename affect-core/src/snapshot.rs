//! Persistable form of an emotional field.
//!
//! Only intensities and the active synergy survive a save. The behavior
//! window and the synergy cooldown are session-scoped and come back empty.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "intensities": { "anger": 4.0, "awe": 0.0, "curiosity": 0.0, ... },
//!   "activeSynergyId": "resonance"
//! }
//! ```
//!
//! Reading is lenient: unknown keys, non-numeric intensities and a missing or
//! non-string synergy id are dropped rather than rejected. Only input that is
//! not a JSON object at all is an error.
//!
//! [`SaveEnvelope`] wraps a snapshot with a format version and timestamp for
//! writing to disk.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AffectError, Result};

/// Plain `{intensities, activeSynergyId}` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    /// Intensity per emotion name.
    #[serde(default)]
    pub intensities: BTreeMap<String, f32>,
    /// Wire id of the active synergy.
    #[serde(default)]
    pub active_synergy_id: Option<String>,
}

impl FieldSnapshot {
    /// Build a snapshot from loosely-typed JSON.
    ///
    /// # Errors
    /// Returns `AffectError::Serialization` if `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AffectError::Serialization("snapshot must be a JSON object".to_string())
        })?;

        let mut snapshot = Self::default();
        if let Some(map) = obj.get("intensities").and_then(Value::as_object) {
            for (name, raw) in map {
                match raw.as_f64() {
                    #[allow(clippy::cast_possible_truncation)]
                    Some(v) => {
                        snapshot.intensities.insert(name.clone(), v as f32);
                    }
                    None => debug!(name = %name, "Skipping non-numeric intensity"),
                }
            }
        }
        snapshot.active_synergy_id = obj
            .get("activeSynergyId")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(snapshot)
    }
}

/// Serialize a snapshot to JSON.
///
/// # Errors
/// Returns `AffectError::Serialization` on encoder failure.
pub fn to_json(snapshot: &FieldSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parse a snapshot from JSON text, leniently.
///
/// # Errors
/// Returns `AffectError::Serialization` if the text is not JSON or not an object.
pub fn from_json(json: &str) -> Result<FieldSnapshot> {
    let value: Value = serde_json::from_str(json)?;
    FieldSnapshot::from_value(&value)
}

// ---------------------------------------------------------------------------
// On-disk envelope
// ---------------------------------------------------------------------------

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

/// A snapshot plus save metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    /// Envelope format version.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The field state.
    pub snapshot: FieldSnapshot,
}

impl SaveEnvelope {
    /// Wrap `snapshot`, stamped now.
    #[must_use]
    pub fn new(snapshot: FieldSnapshot) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            saved_at: Utc::now(),
            snapshot,
        }
    }

    /// Write the envelope as pretty JSON to `path`.
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(
            path = %path.display(),
            active_synergy = ?self.snapshot.active_synergy_id,
            "Affect snapshot saved"
        );
        Ok(())
    }

    /// Read an envelope from `path`. A missing file is `Ok(None)`.
    ///
    /// The inner snapshot is read with the same leniency as [`from_json`];
    /// a missing `savedAt` or `version` falls back to now / the current version.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&text)?;
        let obj = value.as_object().ok_or_else(|| {
            AffectError::Serialization("save envelope must be a JSON object".to_string())
        })?;

        let snapshot = match obj.get("snapshot") {
            Some(inner) => FieldSnapshot::from_value(inner)?,
            None => FieldSnapshot::default(),
        };
        let version = obj
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(ENVELOPE_VERSION);
        let saved_at = obj
            .get("savedAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map_or_else(Utc::now, |t| t.with_timezone(&Utc));

        info!(path = %path.display(), version, "Affect snapshot loaded");
        Ok(Some(Self {
            version,
            saved_at,
            snapshot,
        }))
    }
}
