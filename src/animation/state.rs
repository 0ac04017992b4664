use crate::foundation::core::ms_to_secs;
use crate::scene::entity::EntitySnapshot;

/// Default in point (seconds) for fresh states and documents that omit it.
pub const DEFAULT_IN_POINT: f64 = 0.0;
/// Default out point (seconds) for fresh states and documents that omit it.
pub const DEFAULT_OUT_POINT: f64 = 10.0;
/// Default timeline length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 10_000.0;

/// Tolerance used when comparing the two timeline time bases.
const TIME_BASE_EPSILON_SECS: f64 = 1e-6;

/// Stable in-memory handle to one keyframe.
///
/// Handles are assigned by [`AnimationState`] and survive re-sorting. They are not part
/// of the saved document; loading assigns fresh ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyframeId(u64);

/// A timestamped snapshot of every idea.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    id: KeyframeId,
    time: f64,
    positions: Vec<EntitySnapshot>,
}

impl Keyframe {
    /// Handle of this keyframe.
    pub fn id(&self) -> KeyframeId {
        self.id
    }

    /// Seconds from timeline start.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Captured snapshots, index-aligned with the idea list at capture time.
    pub fn positions(&self) -> &[EntitySnapshot] {
        &self.positions
    }
}

/// Recording and playback state of the idea animation.
///
/// `keyframes` is always sorted by ascending time; equal times keep insertion order.
///
/// Two time bases coexist on purpose: playback pacing uses `out_point - in_point`, while
/// interpolation maps progress through `duration_ms`. They are kept as separate fields
/// and [`AnimationState::time_bases_diverge`] reports when they disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    /// Start of the recorded segment, seconds.
    pub in_point: f64,
    /// End of the recorded segment, seconds.
    pub out_point: f64,
    /// Timeline length, milliseconds.
    pub duration_ms: f64,
    /// A recording has been started and not yet ended.
    pub is_recording: bool,
    /// The player is running.
    pub is_playing: bool,
    keyframes: Vec<Keyframe>,
    out_key: Option<KeyframeId>,
    next_id: u64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            in_point: DEFAULT_IN_POINT,
            out_point: DEFAULT_OUT_POINT,
            duration_ms: DEFAULT_DURATION_MS,
            is_recording: false,
            is_playing: false,
            keyframes: Vec::new(),
            out_key: None,
            next_id: 0,
        }
    }
}

impl AnimationState {
    /// Fresh state with no keyframes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every keyframe and clear both flags. In/out points and duration are kept.
    pub fn reset(&mut self) {
        self.keyframes.clear();
        self.out_key = None;
        self.is_recording = false;
        self.is_playing = false;
    }

    /// Keyframes in ascending time order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Look up a keyframe by handle.
    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == id)
    }

    /// Handle of the keyframe sitting at the recording's out point, if known.
    pub fn out_key(&self) -> Option<KeyframeId> {
        self.out_key
    }

    pub(crate) fn set_out_key(&mut self, id: Option<KeyframeId>) {
        self.out_key = id;
    }

    /// Whether there are enough keyframes to play, scrub or save.
    pub fn is_playable(&self) -> bool {
        self.keyframes.len() >= 2
    }

    /// Timeline length in seconds (the interpolation time base).
    pub fn duration_secs(&self) -> f64 {
        ms_to_secs(self.duration_ms)
    }

    /// Length of the recorded segment in seconds (the playback time base).
    pub fn span_secs(&self) -> f64 {
        self.out_point - self.in_point
    }

    /// True when `duration_ms / 1000` and `out_point - in_point` disagree, so playback
    /// pacing and interpolation run on different clocks.
    pub fn time_bases_diverge(&self) -> bool {
        (self.duration_secs() - self.span_secs()).abs() > TIME_BASE_EPSILON_SECS
    }

    /// Insert a keyframe at its sorted position and return its handle.
    pub fn insert_keyframe(&mut self, time: f64, positions: Vec<EntitySnapshot>) -> KeyframeId {
        let id = self.alloc_id();
        self.insert_sorted(Keyframe {
            id,
            time,
            positions,
        });
        id
    }

    /// Move and/or re-capture an existing keyframe. Returns `false` for unknown handles.
    pub fn update_keyframe(
        &mut self,
        id: KeyframeId,
        time: f64,
        positions: Vec<EntitySnapshot>,
    ) -> bool {
        let Some(idx) = self.keyframes.iter().position(|k| k.id == id) else {
            return false;
        };
        self.keyframes.remove(idx);
        self.insert_sorted(Keyframe {
            id,
            time,
            positions,
        });
        true
    }

    /// Remove a keyframe by handle. Clears the out handle if it pointed there.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        let idx = self.keyframes.iter().position(|k| k.id == id)?;
        if self.out_key == Some(id) {
            self.out_key = None;
        }
        Some(self.keyframes.remove(idx))
    }

    /// Drop every keyframe at or after `time`, except `keep`. Returns how many were dropped.
    pub(crate) fn drop_keyframes_from(&mut self, time: f64, keep: Option<KeyframeId>) -> usize {
        let before = self.keyframes.len();
        self.keyframes.retain(|k| k.time < time || Some(k.id) == keep);
        if self.out_key.is_some_and(|id| !self.keyframes.iter().any(|k| k.id == id)) {
            self.out_key = None;
        }
        before - self.keyframes.len()
    }

    /// Replace all keyframes, sorting them by time and assigning fresh handles.
    ///
    /// The last keyframe (if any) becomes the out handle.
    pub fn replace_keyframes(
        &mut self,
        keyframes: impl IntoIterator<Item = (f64, Vec<EntitySnapshot>)>,
    ) {
        self.keyframes.clear();
        let mut fresh = Vec::new();
        for (time, positions) in keyframes {
            let id = self.alloc_id();
            fresh.push(Keyframe {
                id,
                time,
                positions,
            });
        }
        fresh.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.out_key = fresh.last().map(|k| k.id);
        self.keyframes = fresh;
    }

    fn insert_sorted(&mut self, keyframe: Keyframe) {
        let idx = self.keyframes.partition_point(|k| k.time <= keyframe.time);
        self.keyframes.insert(idx, keyframe);
    }

    fn alloc_id(&mut self) -> KeyframeId {
        let id = KeyframeId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
