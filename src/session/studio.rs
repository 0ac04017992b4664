use std::path::Path;

use crate::{
    animation::interp::{Segment, interpolate},
    animation::markers::build_markers,
    animation::player::{Player, Tick},
    animation::recorder::{self, RecordAction, RecordInput},
    animation::state::{AnimationState, KeyframeId},
    foundation::clock::Clock,
    foundation::core::{clamp_progress, format_clock},
    foundation::error::MindsEyeResult,
    persist::document::AnimationDocument,
    scene::entity::Idea,
    session::controls::TimelineControls,
    session::opts::StudioOpts,
};

/// Composes the animation state, recorder and player with the host's UI controls.
///
/// Recorder operations and scrubbing run synchronously. Playback advances through
/// [`Studio::frame`], which the host calls once per display frame until it returns
/// `false`.
pub struct Studio<C, K> {
    state: AnimationState,
    player: Player,
    controls: C,
    clock: K,
    opts: StudioOpts,
}

impl<C, K> Studio<C, K>
where
    C: TimelineControls,
    K: Clock,
{
    /// Empty studio on the configured timeline length.
    pub fn new(controls: C, clock: K, opts: StudioOpts) -> Self {
        let mut studio = Self {
            state: AnimationState::new(),
            player: Player::new(),
            controls,
            clock,
            opts,
        };
        studio.state.duration_ms = studio.opts.duration_ms;
        studio.refresh();
        studio
    }

    /// Current animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Playback run bookkeeping.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Host controls.
    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// Host controls, for moving the scrubber or duration selector.
    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    /// Options the studio was built with.
    pub fn opts(&self) -> &StudioOpts {
        &self.opts
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Apply a recorder transition using the current scrubber and duration selector.
    #[tracing::instrument(skip(self, ideas), fields(idea_count = ideas.len()))]
    pub fn record(&mut self, action: RecordAction, ideas: &[Idea]) -> MindsEyeResult<KeyframeId> {
        let input = RecordInput {
            progress: self.controls.progress(),
            duration_ms: self.controls.duration_ms(),
            ideas,
        };
        let id = recorder::record(&mut self.state, action, input).inspect_err(|e| {
            tracing::warn!(error = %e, "recorder transition rejected");
        })?;
        self.refresh();
        Ok(id)
    }

    /// Delete one keyframe.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> MindsEyeResult<()> {
        recorder::remove_keyframe(&mut self.state, id)?;
        self.refresh();
        Ok(())
    }

    /// Drop the whole recording.
    pub fn clear(&mut self) {
        self.player.stop(&mut self.state);
        self.state.reset();
        self.refresh();
    }

    /// Start playback, or stop it when already playing. Returns whether it is playing.
    #[tracing::instrument(skip(self))]
    pub fn toggle_play(&mut self) -> MindsEyeResult<bool> {
        let now = self.clock.now_ms();
        self.player
            .toggle(&mut self.state, now)
            .inspect_err(|e| tracing::warn!(error = %e, "playback rejected"))
    }

    /// Request a stop; the running playback ends at its next frame.
    pub fn stop(&mut self) {
        self.player.stop(&mut self.state);
    }

    /// Advance playback to the clock's current time and write the pose into `ideas`.
    ///
    /// Returns whether the host should call again next frame.
    pub fn frame(&mut self, ideas: &mut [Idea]) -> bool {
        let now = self.clock.now_ms();
        let tick = self.player.tick(&mut self.state, now, ideas);
        if let Tick::Continue(f) | Tick::Finished(f) = tick {
            self.controls.set_progress(f.progress);
            self.show_time(f.time_secs);
        }
        tick.reschedule()
    }

    /// Preview the pose at `progress` without starting playback.
    ///
    /// Ignored while playing.
    pub fn scrub(&mut self, progress: f64, ideas: &mut [Idea]) -> Option<Segment> {
        if self.state.is_playing {
            return None;
        }
        let progress = clamp_progress(progress);
        self.controls.set_progress(progress);
        self.show_time(progress * self.state.duration_secs());
        interpolate(&self.state, progress, ideas)
    }

    /// Snapshot the state for saving. Needs at least two keyframes.
    pub fn save(&self) -> MindsEyeResult<AnimationDocument> {
        AnimationDocument::capture(&self.state)
            .inspect_err(|e| tracing::warn!(error = %e, "save rejected"))
    }

    /// Save to a JSON file.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> MindsEyeResult<AnimationDocument> {
        let doc = self.save()?;
        doc.save_to_path(path)?;
        Ok(doc)
    }

    /// Replace the state with a loaded document. Stops playback first.
    #[tracing::instrument(skip(self, doc), fields(name = %doc.name))]
    pub fn load(&mut self, doc: &AnimationDocument) -> MindsEyeResult<()> {
        doc.validate()
            .inspect_err(|e| tracing::warn!(error = %e, "load rejected"))?;
        self.player.stop(&mut self.state);
        doc.apply_to(&mut self.state)?;
        self.refresh();
        tracing::debug!(keyframes = self.state.keyframes().len(), "animation loaded");
        Ok(())
    }

    /// Parse JSON text and load it.
    pub fn load_json_str(&mut self, json: &str) -> MindsEyeResult<()> {
        let doc = AnimationDocument::from_json_str(json)
            .inspect_err(|e| tracing::warn!(error = %e, "load rejected"))?;
        self.load(&doc)
    }

    /// Read a JSON file and load it.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> MindsEyeResult<()> {
        let doc = AnimationDocument::from_path(path)?;
        self.load(&doc)
    }

    fn refresh(&mut self) {
        let markers = build_markers(&self.state);
        self.controls.show_markers(&markers);
        let progress = clamp_progress(self.controls.progress());
        self.show_time(progress * self.state.duration_secs());
    }

    // The total is always the timeline length, whichever clock `current` comes from.
    fn show_time(&mut self, current_secs: f64) {
        let total = format_clock(self.state.duration_secs());
        self.controls.show_time(&format_clock(current_secs), &total);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/studio.rs"]
mod tests;
