use crate::animation::state::AnimationState;

/// What a timeline marker stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Recording start.
    In,
    /// Recording end.
    Out,
    /// A stored keyframe.
    Keyframe,
}

/// Presentation-only marker on the scrubber strip. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimelineMarker {
    /// What the marker stands for.
    pub kind: MarkerKind,
    /// Seconds.
    pub time: f64,
    /// Percent along the timeline.
    pub position: f64,
}

impl TimelineMarker {
    /// Marker at `time`, positioned as a percentage of `duration_secs` (0 for an empty timeline).
    pub fn new(kind: MarkerKind, time: f64, duration_secs: f64) -> Self {
        let position = if duration_secs > 0.0 {
            time / duration_secs * 100.0
        } else {
            0.0
        };
        Self {
            kind,
            time,
            position,
        }
    }
}

/// Markers for the current state: in, out, then one per keyframe in time order.
///
/// In/out markers are only emitted once something has been recorded.
pub fn build_markers(state: &AnimationState) -> Vec<TimelineMarker> {
    let keys = state.keyframes();
    if keys.is_empty() && !state.is_recording {
        return Vec::new();
    }

    let d = state.duration_secs();
    let mut out = Vec::with_capacity(keys.len() + 2);
    out.push(TimelineMarker::new(MarkerKind::In, state.in_point, d));
    out.push(TimelineMarker::new(MarkerKind::Out, state.out_point, d));
    out.extend(
        keys.iter()
            .map(|k| TimelineMarker::new(MarkerKind::Keyframe, k.time(), d)),
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/animation/markers.rs"]
mod tests;
