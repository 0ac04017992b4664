//! Minds Eye records and replays keyframe animations of on-screen "idea bubbles".
//!
//! An operator records poses of a live idea list at points on a timeline; the player
//! linearly interpolates between them over wall-clock time and writes the result back
//! into the list for a separate renderer to draw.
//!
//! # Pieces
//!
//! - [`AnimationState`]: in/out points, time-sorted [`Keyframe`]s, duration and flags.
//! - Recorder ([`record`], [`begin`], [`end`], [`add_keyframe`]): operator transitions.
//! - [`Player`]: `idle -> playing -> idle`, one [`Tick`] per display frame.
//! - [`interpolate`]: bracket lookup plus linear blend, used by playback and scrubbing.
//! - [`AnimationDocument`]: JSON save/load.
//! - [`Studio`]: composes all of the above with host [`TimelineControls`] and a [`Clock`].
//!
//! Playback pacing uses `out_point - in_point` while interpolation maps progress through
//! `duration_ms`. Both are kept; [`AnimationState::time_bases_diverge`] reports when
//! they disagree.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod persist;
mod scene;
mod session;

pub use animation::capture::capture;
pub use animation::interp::{Lerp, Segment, interpolate, locate};
pub use animation::markers::{MarkerKind, TimelineMarker, build_markers};
pub use animation::player::{PlayedFrame, Player, Tick};
pub use animation::recorder::{
    RecordAction, RecordInput, add_keyframe, begin, end, record, remove_keyframe,
};
pub use animation::state::{
    AnimationState, DEFAULT_DURATION_MS, DEFAULT_IN_POINT, DEFAULT_OUT_POINT, Keyframe,
    KeyframeId,
};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{Point, clamp_progress, format_clock, ms_to_secs, secs_to_ms};
pub use foundation::error::{MindsEyeError, MindsEyeResult};
pub use persist::document::{AnimationDocument, KeyframeDoc, epoch_ms_now};
pub use scene::entity::{EntitySnapshot, Idea};
pub use session::controls::{HeadlessControls, TimelineControls};
pub use session::opts::StudioOpts;
pub use session::studio::Studio;
