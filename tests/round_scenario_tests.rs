//! Round scenarios - pointer gestures and timer driving a full round

use tui_apples::core::{Round, RoundEvent, ScriptedValues};
use tui_apples::types::{Cue, EndReason, GameConfig, Point, PointerEvent};

/// 8 rows x 15 cols. Row 0 starts 4 6, row 1 starts 3 3 3, row 2 starts
/// 1 2 3 4; everything else is 9.
fn scenario_round() -> Round {
    let mut values = vec![9u8; 120];
    values[0..2].copy_from_slice(&[4, 6]);
    values[15..18].copy_from_slice(&[3, 3, 3]);
    values[30..34].copy_from_slice(&[1, 2, 3, 4]);
    Round::new(GameConfig::default(), &mut ScriptedValues::new(values)).unwrap()
}

fn drag(round: &mut Round, from: (f32, f32), to: (f32, f32)) -> Vec<RoundEvent> {
    let mut out = Vec::new();
    out.extend(round.handle(PointerEvent::Down(Point::new(from.0, from.1))));
    out.extend(round.handle(PointerEvent::Move(Point::new(to.0, to.1))));
    out.extend(round.handle(PointerEvent::Up(Point::new(to.0, to.1))));
    out
}

#[test]
fn test_scripted_match_miss_match() {
    let mut round = scenario_round();

    // [4, 6]: match worth 2.
    let events = drag(&mut round, (10.0, 10.0), (70.0, 30.0));
    assert_eq!(
        events,
        vec![
            RoundEvent::Cue(Cue::Click),
            RoundEvent::Matched {
                points: 2,
                score: 2
            },
            RoundEvent::Cue(Cue::Match),
        ]
    );
    assert!(round.grid().token_at(0, 0).unwrap().removed());
    assert!(round.grid().token_at(0, 1).unwrap().removed());
    assert!(!round.grid().token_at(0, 2).unwrap().removed());

    // [3, 3, 3]: sum 9, nothing removed.
    let events = drag(&mut round, (10.0, 50.0), (110.0, 70.0));
    assert!(events.contains(&RoundEvent::Missed { sum: 9 }));
    assert_eq!(round.score(), 2);
    assert_eq!(round.grid().live_count(), 118);
    assert!(round.selection().is_empty());
    assert!(round.grid().tokens().iter().all(|t| !t.selected()));

    // [1, 2, 3, 4]: match worth 4.
    let events = drag(&mut round, (10.0, 90.0), (150.0, 110.0));
    assert!(events.contains(&RoundEvent::Matched {
        points: 4,
        score: 6
    }));
    assert_eq!(round.score(), 6);
    assert_eq!(round.grid().live_count(), 114);
}

#[test]
fn test_sixty_ticks_end_round_and_sixty_first_is_noop() {
    let mut round = scenario_round();

    for i in 1..60 {
        assert!(round.tick().is_empty(), "tick {i} ended early");
    }
    let events = round.tick();
    assert_eq!(events.len(), 1);
    match events[0] {
        RoundEvent::Ended(r) => {
            assert_eq!(r.reason, EndReason::TimeUp);
            assert_eq!(r.score, 0);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!round.is_active());
    assert_eq!(round.time_remaining(), 0);

    assert!(round.tick().is_empty());
    assert_eq!(round.time_remaining(), 0);
}

#[test]
fn test_input_ignored_after_end() {
    let mut round = scenario_round();
    round.advance(60_000);
    assert!(!round.is_active());

    let events = drag(&mut round, (10.0, 10.0), (70.0, 30.0));
    assert!(events.is_empty());
    assert_eq!(round.score(), 0);
    assert_eq!(round.grid().live_count(), 120);
}

#[test]
fn test_end_mid_drag_cancels_gesture() {
    let mut round = scenario_round();
    round.pointer_down(Point::new(10.0, 10.0));
    round.pointer_move(Point::new(70.0, 30.0));
    assert_eq!(round.selected_sum(), 10);

    round.advance(60_000);
    assert!(!round.is_dragging());
    assert!(round.selection().is_empty());
    assert!(round.pointer_up(Point::new(70.0, 30.0)).is_empty());
    assert_eq!(round.grid().live_count(), 120);
}

#[test]
fn test_release_validates_last_move_not_release_point() {
    let mut round = scenario_round();
    round.pointer_down(Point::new(10.0, 10.0));
    round.pointer_move(Point::new(70.0, 30.0));

    // Release far away: selection is still the [4, 6] from the move.
    let events = round.pointer_up(Point::new(600.0, 300.0));
    assert!(events.contains(&RoundEvent::Matched {
        points: 2,
        score: 2
    }));
}

#[test]
fn test_press_clears_previous_selection() {
    let mut round = scenario_round();
    round.pointer_down(Point::new(10.0, 10.0));
    round.pointer_move(Point::new(70.0, 30.0));
    assert_eq!(round.selection().len(), 2);

    // New press between centers starts an empty selection.
    let events = round.pointer_down(Point::new(30.0, 30.0));
    assert!(round.selection().is_empty());
    assert_eq!(events.as_slice(), &[RoundEvent::Cue(Cue::Click)]);
}

#[test]
fn test_press_outside_board_has_no_click() {
    let mut round = scenario_round();
    assert!(round.pointer_down(Point::new(-5.0, 10.0)).is_empty());
    assert!(round.pointer_down(Point::new(900.0, 10.0)).is_empty());
}

#[test]
fn test_empty_drag_is_not_a_miss() {
    let mut round = scenario_round();
    let events = drag(&mut round, (25.0, 25.0), (35.0, 35.0));
    assert!(events
        .iter()
        .all(|e| !matches!(e, RoundEvent::Missed { .. } | RoundEvent::Matched { .. })));
}

#[test]
fn test_abort_is_unrankable_and_final() {
    let mut round = scenario_round();
    drag(&mut round, (10.0, 10.0), (70.0, 30.0));

    let r = round.abort().unwrap();
    assert_eq!(r.reason, EndReason::Aborted);
    assert_eq!(r.score, 2);
    assert!(!r.is_rankable());
    assert!(round.advance(120_000).is_empty());
    assert!(round.abort().is_none());
}

#[test]
fn test_snapshot_tracks_drag_and_selection() {
    let mut round = scenario_round();
    round.pointer_down(Point::new(10.0, 10.0));
    round.pointer_move(Point::new(70.0, 30.0));

    let snap = round.snapshot();
    assert_eq!((snap.rows, snap.cols), (8, 15));
    assert_eq!(snap.cells.len(), 120);
    assert_eq!(snap.selected_count, 2);
    assert_eq!(snap.selected_sum, 10);
    assert_eq!(snap.match_target, 10);
    assert!(snap.cell(0, 0).unwrap().selected);
    let rect = snap.drag.unwrap();
    assert_eq!((rect.min.x, rect.max.x), (10.0, 70.0));

    let before = snap.fingerprint();
    round.pointer_move(Point::new(30.0, 30.0));
    assert_ne!(round.snapshot().fingerprint(), before);
}

#[test]
fn test_invalid_config_rejected_before_generation() {
    let config = GameConfig {
        round_duration_secs: 0,
        ..GameConfig::default()
    };
    assert!(Round::new(config, &mut ScriptedValues::new(vec![5])).is_err());
}
