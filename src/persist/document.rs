use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;

use crate::{
    animation::state::{
        AnimationState, DEFAULT_DURATION_MS, DEFAULT_IN_POINT, DEFAULT_OUT_POINT,
    },
    foundation::error::{MindsEyeError, MindsEyeResult},
    scene::entity::EntitySnapshot,
};

/// One keyframe as stored on disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeDoc {
    /// Seconds from timeline start.
    pub time: f64,
    /// Snapshots, index-aligned with the idea list.
    #[serde(default)]
    pub positions: Vec<EntitySnapshot>,
}

/// Saved animation: the JSON-facing form of [`AnimationState`].
///
/// There is no version field. Loading only checks that at least two keyframes exist;
/// keyframe order is normalized when the document is applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDocument {
    /// In point, seconds.
    #[serde(default = "default_in_point")]
    pub in_point: f64,
    /// Out point, seconds.
    #[serde(default = "default_out_point")]
    pub out_point: f64,
    /// Stored keyframes; `None` when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes: Option<Vec<KeyframeDoc>>,
    /// Timeline length, milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Save time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

fn default_in_point() -> f64 {
    DEFAULT_IN_POINT
}

fn default_out_point() -> f64 {
    DEFAULT_OUT_POINT
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_MS
}

/// Current wall-clock time in epoch milliseconds (0 if the clock predates the epoch).
pub fn epoch_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl AnimationDocument {
    /// Snapshot `state` under a timestamp-derived name.
    pub fn capture(state: &AnimationState) -> MindsEyeResult<Self> {
        let timestamp = epoch_ms_now();
        Self::capture_named(state, format!("animation-{timestamp}"), timestamp)
    }

    /// Snapshot `state` with an explicit name and timestamp.
    pub fn capture_named(
        state: &AnimationState,
        name: impl Into<String>,
        timestamp: u64,
    ) -> MindsEyeResult<Self> {
        if !state.is_playable() {
            return Err(MindsEyeError::validation(format!(
                "need at least 2 keyframes to save, have {}",
                state.keyframes().len()
            )));
        }

        let keyframes = state
            .keyframes()
            .iter()
            .map(|k| KeyframeDoc {
                time: k.time(),
                positions: k.positions().to_vec(),
            })
            .collect();

        Ok(Self {
            in_point: state.in_point,
            out_point: state.out_point,
            keyframes: Some(keyframes),
            duration: state.duration_ms,
            timestamp,
            name: name.into(),
        })
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json_str(s: &str) -> MindsEyeResult<Self> {
        let doc: Self = serde_json::from_str(s)
            .map_err(|e| MindsEyeError::serde(format!("parse animation JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MindsEyeResult<Self> {
        let doc: Self = serde_json::from_reader(r)
            .map_err(|e| MindsEyeError::serde(format!("parse animation JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Parse and validate a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MindsEyeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open animation JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// At least two keyframes must be present.
    pub fn validate(&self) -> MindsEyeResult<()> {
        match &self.keyframes {
            None => Err(MindsEyeError::validation(
                "animation document has no keyframes",
            )),
            Some(k) if k.len() < 2 => Err(MindsEyeError::validation(format!(
                "animation document needs at least 2 keyframes, has {}",
                k.len()
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Pretty-printed JSON text.
    pub fn to_json_string(&self) -> MindsEyeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MindsEyeError::serde(format!("serialize animation JSON: {e}")))
    }

    /// Write the document to `path`, creating parent directories.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> MindsEyeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create animation JSON '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)
            .map_err(|e| MindsEyeError::serde(format!("serialize animation JSON: {e}")))?;
        w.flush()
            .with_context(|| format!("write animation JSON '{}'", path.display()))?;
        Ok(())
    }

    /// Replace `state` with this document's contents.
    ///
    /// Keyframes are sorted by time and get fresh handles; the last one becomes the out
    /// keyframe. Recording and playing flags are cleared.
    pub fn apply_to(&self, state: &mut AnimationState) -> MindsEyeResult<()> {
        self.validate()?;
        let keyframes = self.keyframes.as_deref().unwrap_or_default();

        state.reset();
        state.in_point = self.in_point;
        state.out_point = self.out_point;
        state.duration_ms = self.duration;
        state.replace_keyframes(
            keyframes
                .iter()
                .map(|k| (k.time, k.positions.clone())),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/document.rs"]
mod tests;
