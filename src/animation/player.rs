use crate::{
    animation::interp::{Segment, interpolate},
    animation::state::AnimationState,
    foundation::core::secs_to_ms,
    foundation::error::{MindsEyeError, MindsEyeResult},
    scene::entity::Idea,
};

/// One played frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayedFrame {
    /// Playback progress, `0..=1`.
    pub progress: f64,
    /// Playback clock in seconds, `in_point + progress * span`.
    pub time_secs: f64,
    /// Segment the interpolation used, if any.
    pub segment: Option<Segment>,
}

/// Result of one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Frame written; schedule another tick.
    Continue(PlayedFrame),
    /// Final frame written at progress 1; playback is now idle.
    Finished(PlayedFrame),
    /// Playback was stopped before this tick; nothing was written.
    Stopped,
}

impl Tick {
    /// Whether the host should schedule another tick.
    pub fn reschedule(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

#[derive(Clone, Copy, Debug)]
struct Run {
    started_at_ms: f64,
    playback_ms: f64,
}

/// Wall-clock driven player: `idle -> playing -> idle`.
///
/// The `is_playing` flag on [`AnimationState`] is the cancellation signal. Clearing it
/// stops playback at the next tick.
#[derive(Clone, Debug, Default)]
pub struct Player {
    run: Option<Run>,
    last_progress: f64,
}

impl Player {
    /// Idle player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress of the most recent tick. Not reset by [`Player::stop`].
    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    /// Playback length in milliseconds of the current run.
    pub fn playback_ms(&self) -> Option<f64> {
        self.run.map(|r| r.playback_ms)
    }

    /// Start playback at `now_ms`, or stop it if already playing.
    ///
    /// Returns whether the player is playing afterwards.
    pub fn toggle(&mut self, state: &mut AnimationState, now_ms: f64) -> MindsEyeResult<bool> {
        if state.is_playing {
            self.stop(state);
            return Ok(false);
        }
        self.start(state, now_ms)?;
        Ok(true)
    }

    /// Begin playback at `now_ms`. Needs at least two keyframes.
    pub fn start(&mut self, state: &mut AnimationState, now_ms: f64) -> MindsEyeResult<()> {
        if !state.is_playable() {
            return Err(MindsEyeError::playback(format!(
                "need at least 2 keyframes to play, have {}",
                state.keyframes().len()
            )));
        }

        let playback_ms = secs_to_ms(state.span_secs());
        if state.time_bases_diverge() {
            tracing::warn!(
                duration_ms = state.duration_ms,
                playback_ms,
                "timeline duration and in/out span differ; interpolation follows the duration"
            );
        }

        self.run = Some(Run {
            started_at_ms: now_ms,
            playback_ms,
        });
        self.last_progress = 0.0;
        state.is_playing = true;
        tracing::debug!(playback_ms, keyframes = state.keyframes().len(), "playback started");
        Ok(())
    }

    /// Request a stop. Takes effect at the next tick.
    pub fn stop(&mut self, state: &mut AnimationState) {
        state.is_playing = false;
    }

    /// Advance to `now_ms` and write the interpolated pose into `ideas`.
    pub fn tick(&mut self, state: &mut AnimationState, now_ms: f64, ideas: &mut [Idea]) -> Tick {
        let run = match self.run {
            Some(run) if state.is_playing => run,
            _ => {
                self.run = None;
                state.is_playing = false;
                return Tick::Stopped;
            }
        };

        let elapsed = (now_ms - run.started_at_ms).max(0.0);
        let progress = if run.playback_ms > 0.0 {
            (elapsed / run.playback_ms).min(1.0)
        } else {
            1.0
        };
        self.last_progress = progress;

        let frame = PlayedFrame {
            progress,
            time_secs: state.in_point + progress * state.span_secs(),
            segment: interpolate(state, progress, ideas),
        };

        if progress >= 1.0 {
            self.run = None;
            state.is_playing = false;
            tracing::debug!("playback finished");
            return Tick::Finished(frame);
        }
        Tick::Continue(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
