use crate::animation::markers::TimelineMarker;
use crate::animation::state::DEFAULT_DURATION_MS;

/// UI controls the studio reads from and writes to.
///
/// A browser host maps these onto its range input, duration `<select>`, time label and
/// marker strip.
pub trait TimelineControls {
    /// Scrubber position, `0..=1`.
    fn progress(&self) -> f64;
    /// Move the scrubber.
    fn set_progress(&mut self, progress: f64);
    /// Duration selector, milliseconds.
    fn duration_ms(&self) -> f64;
    /// Update the time label with `mm:ss` strings.
    fn show_time(&mut self, current: &str, total: &str);
    /// Redraw the marker strip.
    fn show_markers(&mut self, markers: &[TimelineMarker]);
}

/// In-memory controls for headless use and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessControls {
    /// Scrubber position.
    pub progress: f64,
    /// Duration selector, milliseconds.
    pub duration_ms: f64,
    /// Last time label, `"current / total"`.
    pub time_label: String,
    /// Last marker strip.
    pub markers: Vec<TimelineMarker>,
}

impl HeadlessControls {
    /// Scrubber at 0 with the given duration selected.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            progress: 0.0,
            duration_ms,
            time_label: String::new(),
            markers: Vec::new(),
        }
    }
}

impl Default for HeadlessControls {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl TimelineControls for HeadlessControls {
    fn progress(&self) -> f64 {
        self.progress
    }

    fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    fn show_time(&mut self, current: &str, total: &str) {
        self.time_label = format!("{current} / {total}");
    }

    fn show_markers(&mut self, markers: &[TimelineMarker]) {
        self.markers = markers.to_vec();
    }
}
