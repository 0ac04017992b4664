use crate::{
    animation::capture::capture,
    animation::state::{AnimationState, KeyframeId},
    foundation::core::{clamp_progress, ms_to_secs},
    foundation::error::{MindsEyeError, MindsEyeResult},
    scene::entity::Idea,
};

/// Operator intents understood by the recorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    /// Start a fresh recording.
    Start,
    /// Close the running recording at the scrubber position.
    End,
    /// Capture an interior keyframe at the scrubber position.
    Keyframe,
}

/// What the recorder reads from the UI for one transition.
#[derive(Clone, Copy, Debug)]
pub struct RecordInput<'a> {
    /// Scrubber progress, `0..=1`.
    pub progress: f64,
    /// Duration selector, milliseconds.
    pub duration_ms: f64,
    /// Live ideas to capture.
    pub ideas: &'a [Idea],
}

/// Dispatch one recorder transition. Returns the keyframe it created or updated.
pub fn record(
    state: &mut AnimationState,
    action: RecordAction,
    input: RecordInput<'_>,
) -> MindsEyeResult<KeyframeId> {
    match action {
        RecordAction::Start => begin(state, input.duration_ms, input.ideas),
        RecordAction::End => end(state, input.progress, input.ideas),
        RecordAction::Keyframe => {
            add_keyframe(state, input.progress, input.duration_ms, input.ideas)
        }
    }
}

/// Reset and begin a recording spanning the whole timeline.
///
/// Both keyframes hold the same pose, so the result is a static hold until the
/// recording is ended. Returns the out keyframe's handle.
pub fn begin(
    state: &mut AnimationState,
    duration_ms: f64,
    ideas: &[Idea],
) -> MindsEyeResult<KeyframeId> {
    validate_duration(duration_ms)?;

    state.reset();
    state.duration_ms = duration_ms;
    state.in_point = 0.0;
    state.out_point = ms_to_secs(duration_ms);

    let pose = capture(ideas);
    state.insert_keyframe(0.0, pose.clone());
    let out = state.insert_keyframe(state.out_point, pose);
    state.set_out_key(Some(out));
    state.is_recording = true;

    tracing::debug!(out_point = state.out_point, ideas = ideas.len(), "recording started");
    Ok(out)
}

/// End the running recording at `progress` along the timeline.
///
/// The out keyframe is re-captured and moved to the new out point. If its handle has gone
/// stale (the keyframe was removed), a new out keyframe is inserted instead. Keyframes at
/// or after the new out point are dropped, so the out keyframe is always the last one.
pub fn end(
    state: &mut AnimationState,
    progress: f64,
    ideas: &[Idea],
) -> MindsEyeResult<KeyframeId> {
    if !state.is_recording {
        return Err(MindsEyeError::recording("no recording in progress"));
    }

    let time = clamp_progress(progress) * state.duration_secs();
    if time <= state.in_point {
        return Err(MindsEyeError::recording(format!(
            "out point {time:.3}s must be after in point {:.3}s",
            state.in_point
        )));
    }

    state.out_point = time;
    state.is_recording = false;

    let out = state.out_key().filter(|&id| state.keyframe(id).is_some());
    let dropped = state.drop_keyframes_from(time, out);
    if dropped > 0 {
        tracing::debug!(dropped, out_point = time, "dropped keyframes past the new out point");
    }

    let pose = capture(ideas);
    let id = match out {
        Some(id) => {
            state.update_keyframe(id, time, pose);
            id
        }
        None => {
            let id = state.insert_keyframe(time, pose);
            state.set_out_key(Some(id));
            id
        }
    };

    tracing::debug!(out_point = time, "recording ended");
    Ok(id)
}

/// Capture an interior keyframe at `progress`.
///
/// Stops playback if it is running. With nothing recorded yet, implicitly begins an
/// empty recording over the full timeline first. The keyframe time must lie strictly
/// between the in and out points.
pub fn add_keyframe(
    state: &mut AnimationState,
    progress: f64,
    duration_ms: f64,
    ideas: &[Idea],
) -> MindsEyeResult<KeyframeId> {
    let implicit = state.keyframes().is_empty() && !state.is_recording;
    let (in_point, out_point, base_ms) = if implicit {
        validate_duration(duration_ms)?;
        (0.0, ms_to_secs(duration_ms), duration_ms)
    } else {
        (state.in_point, state.out_point, state.duration_ms)
    };

    let time = clamp_progress(progress) * ms_to_secs(base_ms);
    if time <= in_point || time >= out_point {
        return Err(MindsEyeError::recording(format!(
            "keyframe at {time:.3}s must lie strictly between {in_point:.3}s and {out_point:.3}s"
        )));
    }

    if state.is_playing {
        tracing::debug!("stopping playback to add keyframe");
        state.is_playing = false;
    }

    if implicit {
        state.reset();
        state.duration_ms = duration_ms;
        state.in_point = in_point;
        state.out_point = out_point;
        state.is_recording = true;
    }

    let id = state.insert_keyframe(time, capture(ideas));
    tracing::debug!(time, implicit, "keyframe added");
    Ok(id)
}

/// Delete one keyframe by handle.
pub fn remove_keyframe(state: &mut AnimationState, id: KeyframeId) -> MindsEyeResult<()> {
    state
        .remove_keyframe(id)
        .map(|_| ())
        .ok_or_else(|| MindsEyeError::recording(format!("unknown keyframe {id:?}")))
}

fn validate_duration(duration_ms: f64) -> MindsEyeResult<()> {
    if !(duration_ms.is_finite() && duration_ms > 0.0) {
        return Err(MindsEyeError::validation(format!(
            "timeline duration must be > 0 ms, got {duration_ms}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/recorder.rs"]
mod tests;
