use stitchkit_designer::{CanvasSettings, DesignerState, Direction, Point, Segment};

#[test]
fn test_designer_state_new() {
    let state = DesignerState::new();
    assert_eq!(state.active_pattern(), "Pattern1");
    assert!(state.cursor().is_none());
    assert!(state.snapshot().get("Pattern1").unwrap().is_empty());
}

#[test]
fn test_first_move_starts_at_center() {
    let mut state = DesignerState::new();
    let p = state.move_cursor(Direction::Right, false);
    assert_eq!(p, Point::new(401.0, 400.0));

    let p = state.move_cursor(Direction::Up, true);
    assert_eq!(p, Point::new(401.0, 395.0));
}

#[test]
fn test_cursor_is_clamped_to_canvas() {
    let canvas = CanvasSettings {
        width: 10.0,
        height: 10.0,
        cursor_step: 4.0,
        fast_step_multiplier: 5.0,
    };
    let mut state = DesignerState::with_settings(Default::default(), canvas);
    let p = state.move_cursor(Direction::Left, true);
    assert_eq!(p, Point::new(0.0, 5.0));
    let p = state.place_cursor(Point::new(50.0, -3.0));
    assert_eq!(p, Point::new(10.0, 0.0));
}

#[test]
fn test_commit_chains_segments() {
    let mut state = DesignerState::new();

    // Commit without a cursor does nothing
    assert_eq!(state.commit().unwrap(), None);

    state.place_cursor(Point::new(0.0, 0.0));
    assert_eq!(state.commit().unwrap(), None);
    assert_eq!(state.pending_start(), Some(Point::new(0.0, 0.0)));

    state.place_cursor(Point::new(100.0, 0.0));
    let first = state.commit().unwrap();
    assert_eq!(
        first,
        Some(Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)))
    );

    state.place_cursor(Point::new(100.0, 50.0));
    let second = state.finish_line().unwrap();
    assert_eq!(
        second,
        Some(Segment::new(Point::new(100.0, 0.0), Point::new(100.0, 50.0)))
    );
    assert_eq!(state.pending_start(), None);

    let pattern = state.active_snapshot();
    assert_eq!(pattern.segments.len(), 2);
    assert!(state.is_modified);
}

#[test]
fn test_finish_without_movement_adds_nothing() {
    let mut state = DesignerState::new();
    state.place_cursor(Point::new(10.0, 10.0));
    state.commit().unwrap();
    assert_eq!(state.finish_line().unwrap(), None);
    assert!(state.active_snapshot().is_empty());
}

#[test]
fn test_select_pattern_resets_it() {
    let mut state = DesignerState::new();
    state.select_pattern("Pattern2").unwrap();
    state.place_cursor(Point::new(0.0, 0.0));
    state.commit().unwrap();
    state.place_cursor(Point::new(60.0, 0.0));
    state.finish_line().unwrap();

    state.select_pattern("Pattern1").unwrap();
    assert!(state.cursor().is_none());
    assert_eq!(state.snapshot().get("Pattern2").unwrap().segments.len(), 1);

    state.select_pattern("Pattern2").unwrap();
    assert!(state.active_snapshot().is_empty());

    let names: Vec<String> = state.snapshot().names().map(String::from).collect();
    assert_eq!(names, vec!["Pattern1", "Pattern2"]);
}

#[test]
fn test_select_invalid_name() {
    let mut state = DesignerState::new();
    assert!(state.select_pattern("").unwrap_err().is_invalid_pattern());
    assert_eq!(state.active_pattern(), "Pattern1");
}

#[test]
fn test_reset_active_pattern() {
    let mut state = DesignerState::new();
    state.place_cursor(Point::new(0.0, 0.0));
    state.commit().unwrap();
    state.place_cursor(Point::new(30.0, 40.0));
    state.commit().unwrap();

    state.reset().unwrap();
    assert!(state.active_snapshot().is_empty());
    assert!(state.cursor().is_none());
    assert!(state.pending_start().is_none());
}

#[test]
fn test_stitch_points_preview() {
    let mut state = DesignerState::new();
    state.place_cursor(Point::new(0.0, 0.0));
    state.commit().unwrap();
    state.place_cursor(Point::new(100.0, 0.0));
    state.finish_line().unwrap();

    let points = state.stitch_points();
    assert_eq!(points.len(), 8);
    assert!(points[7].approx_eq(&Point::new(100.0, 0.0), 1e-9));
}

#[test]
fn test_snapshot_survives_further_edits() {
    let mut state = DesignerState::new();
    let shared = state.shared_store();
    let before = shared.read().snapshot();

    state.place_cursor(Point::new(0.0, 0.0));
    state.commit().unwrap();
    state.place_cursor(Point::new(10.0, 0.0));
    state.commit().unwrap();

    assert!(before.get("Pattern1").unwrap().is_empty());
    assert_eq!(shared.read().get("Pattern1").unwrap().segments.len(), 1);
}
