use super::*;
use crate::animation::markers::MarkerKind;
use crate::foundation::clock::ManualClock;
use crate::foundation::error::MindsEyeError;
use crate::session::controls::HeadlessControls;

fn studio(clock: &ManualClock) -> Studio<HeadlessControls, &ManualClock> {
    Studio::new(
        HeadlessControls::new(10_000.0),
        clock,
        StudioOpts::default(),
    )
}

#[test]
fn example_scenario_records_and_plays_back() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let mut ideas = vec![Idea::at(10.0, 20.0)];

    s.record(RecordAction::Start, &ideas).unwrap();
    let times: Vec<_> = s.state().keyframes().iter().map(|k| k.time()).collect();
    assert_eq!(times, vec![0.0, 10.0]);

    ideas[0].x = 50.0;
    s.controls_mut().progress = 1.0;
    s.record(RecordAction::End, &ideas).unwrap();
    assert_eq!(s.state().out_point, 10.0);
    assert_eq!(s.state().keyframes()[1].positions()[0].x, 50.0);

    assert!(s.toggle_play().unwrap());
    clock.advance(5_000.0);
    assert!(s.frame(&mut ideas));
    assert_eq!((ideas[0].x, ideas[0].y), (30.0, 20.0));
    assert_eq!(s.controls().progress, 0.5);
    assert_eq!(s.controls().time_label, "00:05 / 00:10");

    clock.advance(5_000.0);
    assert!(!s.frame(&mut ideas));
    assert!(!s.is_playing());
    assert_eq!(ideas[0].x, 50.0);
    assert!(!s.frame(&mut ideas));
}

#[test]
fn time_label_total_is_the_timeline_length_on_every_path() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    s.record(RecordAction::Start, &ideas).unwrap();
    s.controls_mut().progress = 0.5;
    s.record(RecordAction::End, &ideas).unwrap();
    assert_eq!(s.controls().time_label, "00:05 / 00:10");

    // Playback runs over the 5 s span; the total stays the 10 s timeline.
    s.toggle_play().unwrap();
    clock.advance(2_500.0);
    assert!(s.frame(&mut ideas));
    assert_eq!(s.controls().time_label, "00:02 / 00:10");

    clock.advance(2_500.0);
    assert!(!s.frame(&mut ideas));
    assert_eq!(s.controls().time_label, "00:05 / 00:10");

    s.scrub(0.25, &mut ideas).unwrap();
    assert_eq!(s.controls().time_label, "00:02 / 00:10");
}

#[test]
fn recorder_operations_refresh_markers() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let ideas = vec![Idea::at(0.0, 0.0)];
    assert!(s.controls().markers.is_empty());

    s.record(RecordAction::Start, &ideas).unwrap();
    s.controls_mut().progress = 0.5;
    s.record(RecordAction::Keyframe, &ideas).unwrap();

    let markers = &s.controls().markers;
    assert_eq!(markers.len(), 5);
    assert_eq!(markers[0].kind, MarkerKind::In);
    assert_eq!(markers[1].kind, MarkerKind::Out);
    assert_eq!(markers[3].position, 50.0);
    assert_eq!(s.controls().time_label, "00:05 / 00:10");
}

#[test]
fn rejected_transition_keeps_state() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let before = s.state().clone();
    let err = s.record(RecordAction::End, &[]).unwrap_err();
    assert!(matches!(err, MindsEyeError::Recording(_)));
    assert_eq!(*s.state(), before);
}

#[test]
fn play_and_save_need_two_keyframes() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    assert!(s.toggle_play().is_err());
    assert!(!s.is_playing());
    assert!(s.save().is_err());

    s.controls_mut().progress = 0.5;
    s.record(RecordAction::Keyframe, &[Idea::at(1.0, 1.0)]).unwrap();
    assert_eq!(s.state().keyframes().len(), 1);
    let before = s.state().clone();
    assert!(s.toggle_play().is_err());
    assert!(s.save().is_err());
    assert_eq!(*s.state(), before);
}

#[test]
fn keyframe_during_playback_stops_it() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    s.record(RecordAction::Start, &ideas).unwrap();
    s.toggle_play().unwrap();
    clock.advance(2_500.0);
    assert!(s.frame(&mut ideas));

    s.record(RecordAction::Keyframe, &ideas).unwrap();
    assert!(!s.is_playing());
    assert!(!s.frame(&mut ideas));
    assert_eq!(s.state().keyframes().len(), 3);
}

#[test]
fn scrub_previews_without_playing() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    let mut ideas = vec![Idea::at(0.0, 0.0)];
    s.record(RecordAction::Start, &ideas).unwrap();
    ideas[0].x = 100.0;
    s.controls_mut().progress = 1.0;
    s.record(RecordAction::End, &ideas).unwrap();

    let seg = s.scrub(0.25, &mut ideas).unwrap();
    assert_eq!(seg.fraction, 0.25);
    assert_eq!(ideas[0].x, 25.0);
    assert!(!s.is_playing());
    assert_eq!(s.controls().progress, 0.25);

    s.toggle_play().unwrap();
    assert!(s.scrub(0.75, &mut ideas).is_none());
    assert_eq!(ideas[0].x, 25.0);
}

#[test]
fn save_then_load_into_fresh_studio() {
    let clock = ManualClock::new(0.0);
    let mut a = studio(&clock);
    let mut ideas = vec![Idea::at(10.0, 20.0).with_title("idea")];
    a.record(RecordAction::Start, &ideas).unwrap();
    ideas[0].y = 80.0;
    a.controls_mut().progress = 0.5;
    a.record(RecordAction::End, &ideas).unwrap();
    let json = a.save().unwrap().to_json_string().unwrap();

    let mut b = studio(&clock);
    b.load_json_str(&json).unwrap();
    assert_eq!(b.state().out_point, 5.0);
    assert_eq!(b.state().keyframes().len(), 2);
    assert_eq!(b.controls().markers.len(), 4);
    assert!(b.load_json_str("{ \"keyframes\": [] }").is_err());
    assert_eq!(b.state().keyframes().len(), 2);
}

#[test]
fn clear_drops_everything() {
    let clock = ManualClock::new(0.0);
    let mut s = studio(&clock);
    s.record(RecordAction::Start, &[Idea::at(0.0, 0.0)]).unwrap();
    s.toggle_play().unwrap();
    s.clear();
    assert!(s.state().keyframes().is_empty());
    assert!(!s.is_playing());
    assert!(s.controls().markers.is_empty());
}
