use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::animation::state::DEFAULT_DURATION_MS;
use crate::foundation::error::{MindsEyeError, MindsEyeResult};

/// Studio configuration. Every field has a default, so partial JSON files are fine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StudioOpts {
    /// Initial duration selector value, milliseconds.
    pub duration_ms: f64,
    /// Frame rate used when stepping playback offline.
    pub fps: f64,
}

impl Default for StudioOpts {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            fps: 60.0,
        }
    }
}

impl StudioOpts {
    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> MindsEyeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open studio config '{}'", path.display()))?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| MindsEyeError::serde(format!("parse studio config: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> MindsEyeResult<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(MindsEyeError::validation("duration_ms must be > 0"));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(MindsEyeError::validation("fps must be > 0"));
        }
        Ok(())
    }

    /// Milliseconds between offline playback frames.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
