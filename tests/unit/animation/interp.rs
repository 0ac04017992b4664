use super::*;

fn snap(x: f64, y: f64) -> EntitySnapshot {
    EntitySnapshot {
        x,
        y,
        ..EntitySnapshot::default()
    }
}

/// State whose duration base equals its last keyframe time.
fn two_key_state(t1: f64, a: Vec<EntitySnapshot>, b: Vec<EntitySnapshot>) -> AnimationState {
    let mut s = AnimationState::new();
    s.in_point = 0.0;
    s.out_point = t1;
    s.duration_ms = t1 * 1000.0;
    s.insert_keyframe(0.0, a);
    s.insert_keyframe(t1, b);
    s
}

#[test]
fn endpoints_are_exact_and_midpoint_is_mean() {
    let s = two_key_state(4.0, vec![snap(0.1, -7.3)], vec![snap(0.3, 12.9)]);
    let mut ideas = vec![Idea::at(0.0, 0.0)];

    interpolate(&s, 0.0, &mut ideas).unwrap();
    assert_eq!((ideas[0].x, ideas[0].y), (0.1, -7.3));

    interpolate(&s, 1.0, &mut ideas).unwrap();
    assert_eq!((ideas[0].x, ideas[0].y), (0.3, 12.9));

    interpolate(&s, 0.5, &mut ideas).unwrap();
    assert!((ideas[0].x - 0.2).abs() < 1e-12);
    assert!((ideas[0].y - 2.8).abs() < 1e-12);
}

#[test]
fn locate_picks_first_containing_pair() {
    let mut s = AnimationState::new();
    s.insert_keyframe(0.0, vec![]);
    s.insert_keyframe(2.0, vec![]);
    s.insert_keyframe(6.0, vec![]);
    s.insert_keyframe(10.0, vec![]);

    let seg = locate(s.keyframes(), 4.0).unwrap();
    assert_eq!((seg.from, seg.to), (1, 2));
    assert_eq!(seg.fraction, 0.5);

    // Exactly on a shared key: the earlier pair wins.
    let seg = locate(s.keyframes(), 2.0).unwrap();
    assert_eq!((seg.from, seg.to), (0, 1));
    assert_eq!(seg.fraction, 1.0);
}

#[test]
fn locate_falls_back_to_first_and_last_unclamped() {
    let mut s = AnimationState::new();
    s.insert_keyframe(2.0, vec![]);
    s.insert_keyframe(5.0, vec![]);
    s.insert_keyframe(8.0, vec![]);

    let before = locate(s.keyframes(), 1.0).unwrap();
    assert_eq!((before.from, before.to), (0, 2));
    assert_eq!(before.fraction, -1.0 / 6.0);

    let after = locate(s.keyframes(), 9.0).unwrap();
    assert_eq!((after.from, after.to), (0, 2));
    assert_eq!(after.fraction, 7.0 / 6.0);
}

#[test]
fn timeline_past_the_out_point_extrapolates() {
    use crate::animation::recorder::{begin, end};

    // Recording ends at 5 s on a 10 s timeline; progress 1.0 samples t = 10 s.
    let mut s = AnimationState::new();
    begin(&mut s, 10_000.0, &[Idea::at(10.0, 20.0)]).unwrap();
    end(&mut s, 0.5, &[Idea::at(50.0, 20.0)]).unwrap();

    let mut ideas = vec![Idea::at(0.0, 0.0)];
    let seg = interpolate(&s, 1.0, &mut ideas).unwrap();
    assert_eq!((seg.from, seg.to, seg.fraction), (0, 1, 2.0));
    assert_eq!((ideas[0].x, ideas[0].y), (90.0, 20.0));
}

#[test]
fn zero_length_segment_holds_first_pose() {
    let mut s = AnimationState::new();
    s.insert_keyframe(3.0, vec![snap(1.0, 1.0)]);
    s.insert_keyframe(3.0, vec![snap(9.0, 9.0)]);
    let seg = locate(s.keyframes(), 3.0).unwrap();
    assert_eq!(seg.fraction, 0.0);
}

#[test]
fn fewer_than_two_keyframes_is_a_no_op() {
    let mut s = AnimationState::new();
    s.insert_keyframe(0.0, vec![snap(5.0, 5.0)]);
    let mut ideas = vec![Idea::at(1.0, 2.0)];
    assert!(interpolate(&s, 0.5, &mut ideas).is_none());
    assert_eq!(ideas[0], Idea::at(1.0, 2.0));
}

#[test]
fn optional_attributes_need_both_sides() {
    let mut a = snap(0.0, 0.0);
    a.vx = Some(0.0);
    a.vy = Some(2.0);
    a.radius = Some(10.0);
    let mut b = snap(10.0, 0.0);
    b.vx = Some(4.0);
    b.radius = None;
    b.vy = Some(6.0);

    let s = two_key_state(10.0, vec![a], vec![b]);
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    ideas[0].radius = Some(77.0);

    interpolate(&s, 0.5, &mut ideas).unwrap();
    assert_eq!(ideas[0].x, 5.0);
    assert_eq!(ideas[0].vx, Some(2.0));
    assert_eq!(ideas[0].vy, Some(4.0));
    assert_eq!(ideas[0].radius, Some(77.0));
}

#[test]
fn ideas_beyond_snapshot_length_are_untouched() {
    let s = two_key_state(1.0, vec![snap(0.0, 0.0)], vec![snap(2.0, 2.0)]);
    let mut ideas = vec![Idea::at(9.0, 9.0), Idea::at(-3.0, -3.0)];
    interpolate(&s, 1.0, &mut ideas).unwrap();
    assert_eq!(ideas[0].position(), Point::new(2.0, 2.0));
    assert_eq!(ideas[1], Idea::at(-3.0, -3.0));
}

#[test]
fn display_fields_are_not_touched() {
    let a = EntitySnapshot::from(&Idea::at(0.0, 0.0).with_title("old"));
    let b = EntitySnapshot::from(&Idea::at(1.0, 0.0).with_title("new"));
    let s = two_key_state(1.0, vec![a], vec![b]);
    let mut ideas = vec![Idea::at(0.0, 0.0).with_title("live")];
    interpolate(&s, 1.0, &mut ideas).unwrap();
    assert_eq!(ideas[0].extra["title"], "live");
}

#[test]
fn progress_maps_through_duration_not_span() {
    // Keys span 0..10 s but the timeline is 20 s long: progress 0.5 lands on t = 10.
    let mut s = two_key_state(10.0, vec![snap(0.0, 0.0)], vec![snap(100.0, 0.0)]);
    s.duration_ms = 20_000.0;
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    interpolate(&s, 0.5, &mut ideas).unwrap();
    assert_eq!(ideas[0].x, 100.0);
}
