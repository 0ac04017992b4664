use crate::{
    animation::state::{AnimationState, Keyframe},
    foundation::core::{Point, clamp_progress},
    scene::entity::{EntitySnapshot, Idea},
};

/// Linear blend between two values of the same kind.
pub trait Lerp: Sized {
    /// Blend `a` toward `b` by `t` (0 yields `a`, 1 yields `b`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    // Two-sided form so t == 0 and t == 1 reproduce the endpoints bit for bit.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

fn lerp_opt(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    Some(<f64 as Lerp>::lerp(&a?, &b?, t))
}

/// The keyframe pair bracketing a sample time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Index of the earlier keyframe.
    pub from: usize,
    /// Index of the later keyframe.
    pub to: usize,
    /// Position inside the segment. Leaves `0..=1` only on the first/last fallback pair.
    pub fraction: f64,
}

/// Find the first adjacent pair with `from.time <= time <= to.time`.
///
/// Falls back to the first and last keyframe when no pair contains `time`. The fraction
/// is not clamped there, so times outside the keyed range extrapolate along that pair.
/// Zero-length segments yield 0. Returns `None` with fewer than two keyframes.
pub fn locate(keyframes: &[Keyframe], time: f64) -> Option<Segment> {
    if keyframes.len() < 2 {
        return None;
    }

    let (from, to) = keyframes
        .windows(2)
        .position(|w| w[0].time() <= time && time <= w[1].time())
        .map(|i| (i, i + 1))
        .unwrap_or((0, keyframes.len() - 1));

    let t0 = keyframes[from].time();
    let t1 = keyframes[to].time();
    let span = t1 - t0;
    let fraction = if span > 0.0 {
        (time - t0) / span
    } else {
        0.0
    };

    Some(Segment { from, to, fraction })
}

/// Write the interpolated pose for `progress` into the live idea list.
///
/// `progress` is mapped to seconds through `state.duration_ms`, not through the
/// in/out span. Ideas without a counterpart in both snapshots are left untouched.
pub fn interpolate(state: &AnimationState, progress: f64, ideas: &mut [Idea]) -> Option<Segment> {
    let current = clamp_progress(progress) * state.duration_secs();
    let keyframes = state.keyframes();
    let seg = locate(keyframes, current)?;

    let a = keyframes[seg.from].positions();
    let b = keyframes[seg.to].positions();
    for ((idea, sa), sb) in ideas.iter_mut().zip(a).zip(b) {
        apply(idea, sa, sb, seg.fraction);
    }

    Some(seg)
}

fn apply(idea: &mut Idea, a: &EntitySnapshot, b: &EntitySnapshot, t: f64) {
    let p = <Point as Lerp>::lerp(&a.position(), &b.position(), t);
    idea.x = p.x;
    idea.y = p.y;

    if let Some(vx) = lerp_opt(a.vx, b.vx, t) {
        idea.vx = Some(vx);
    }
    if let Some(vy) = lerp_opt(a.vy, b.vy, t) {
        idea.vy = Some(vy);
    }
    if let Some(r) = lerp_opt(a.radius, b.radius, t) {
        idea.radius = Some(r);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
