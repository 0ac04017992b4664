use super::*;
use crate::animation::recorder::{begin, end};

fn recorded() -> AnimationState {
    let mut s = AnimationState::new();
    begin(&mut s, 10_000.0, &[Idea::at(10.0, 20.0)]).unwrap();
    end(&mut s, 1.0, &[Idea::at(50.0, 20.0)]).unwrap();
    s
}

#[test]
fn start_needs_two_keyframes() {
    for n in 0..2u32 {
        let mut s = AnimationState::new();
        for i in 0..n {
            s.insert_keyframe(f64::from(i), vec![]);
        }
        let before = s.clone();
        let mut p = Player::new();
        let err = p.start(&mut s, 0.0).unwrap_err();
        assert!(matches!(err, MindsEyeError::Playback(_)));
        assert_eq!(s, before);
        assert_eq!(p.playback_ms(), None);
    }
}

#[test]
fn playback_duration_follows_in_out_span() {
    let mut s = recorded();
    s.duration_ms = 20_000.0;
    let mut p = Player::new();
    p.start(&mut s, 100.0).unwrap();
    assert_eq!(p.playback_ms(), Some(10_000.0));
}

#[test]
fn ticks_interpolate_and_terminate() {
    let mut s = recorded();
    let mut p = Player::new();
    let mut ideas = vec![Idea::at(0.0, 0.0)];

    p.start(&mut s, 1_000.0).unwrap();
    assert!(s.is_playing);

    let Tick::Continue(frame) = p.tick(&mut s, 6_000.0, &mut ideas) else {
        panic!("expected playback to continue");
    };
    assert_eq!(frame.progress, 0.5);
    assert_eq!(frame.time_secs, 5.0);
    assert_eq!((ideas[0].x, ideas[0].y), (30.0, 20.0));

    let last = p.tick(&mut s, 11_000.0, &mut ideas);
    assert!(matches!(last, Tick::Finished(f) if f.progress == 1.0));
    assert!(!last.reschedule());
    assert!(!s.is_playing);
    assert_eq!(ideas[0].x, 50.0);

    assert_eq!(p.tick(&mut s, 12_000.0, &mut ideas), Tick::Stopped);
}

#[test]
fn overshooting_clamps_progress_to_one() {
    let mut s = recorded();
    let mut p = Player::new();
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    p.start(&mut s, 0.0).unwrap();
    let tick = p.tick(&mut s, 1e9, &mut ideas);
    assert!(matches!(tick, Tick::Finished(f) if f.progress == 1.0));
}

#[test]
fn stop_is_cooperative_and_keeps_progress() {
    let mut s = recorded();
    let mut p = Player::new();
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    p.start(&mut s, 0.0).unwrap();
    assert!(p.tick(&mut s, 2_500.0, &mut ideas).reschedule());

    p.stop(&mut s);
    assert!(!s.is_playing);
    assert_eq!(p.last_progress(), 0.25);

    let x_before = ideas[0].x;
    assert_eq!(p.tick(&mut s, 5_000.0, &mut ideas), Tick::Stopped);
    assert_eq!(ideas[0].x, x_before);
    assert_eq!(p.last_progress(), 0.25);
}

#[test]
fn toggle_starts_then_stops() {
    let mut s = recorded();
    let mut p = Player::new();
    assert!(p.toggle(&mut s, 0.0).unwrap());
    assert!(s.is_playing);
    assert!(!p.toggle(&mut s, 10.0).unwrap());
    assert!(!s.is_playing);
}

#[test]
fn zero_span_finishes_on_first_tick() {
    let mut s = AnimationState::new();
    s.in_point = 2.0;
    s.out_point = 2.0;
    s.insert_keyframe(0.0, vec![]);
    s.insert_keyframe(1.0, vec![]);
    let mut p = Player::new();
    p.start(&mut s, 0.0).unwrap();
    assert!(matches!(p.tick(&mut s, 0.0, &mut []), Tick::Finished(_)));
}
