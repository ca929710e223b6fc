use stitchkit_core::ScaleConfig;
use stitchkit_designer::file_io::{load_pattern_file, save_pattern_file};
use stitchkit_designer::{DesignerState, Pattern, PatternSet, Point};
use tempfile::TempDir;

fn draw_line(state: &mut DesignerState, from: Point, to: Point) {
    state.place_cursor(from);
    state.commit().unwrap();
    state.place_cursor(to);
    state.finish_line().unwrap();
}

#[test]
fn test_empty_pattern_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Pattern3.gcode");
    let scale = ScaleConfig::default();

    let set = PatternSet::from_patterns([Pattern::new("Pattern3")]).unwrap();
    save_pattern_file(&path, &set, &scale).unwrap();

    let loaded = load_pattern_file(&path, &scale).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.get("Pattern3").unwrap().is_empty());
}

#[test]
fn test_save_active_writes_named_file() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    state.select_pattern("Pattern2").unwrap();
    draw_line(&mut state, Point::new(0.0, 0.0), Point::new(100.0, 0.0));

    let path = state.save_active(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Pattern2.gcode"));
    assert!(!state.is_modified);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "; Pattern2\nG1 X0.00 Y0.00\nG1 X20.00 Y0.00\nM30\n");
}

#[test]
fn test_save_all_and_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("all.gcode");

    let mut state = DesignerState::new();
    draw_line(&mut state, Point::new(0.0, 0.0), Point::new(50.0, 0.0));
    state.select_pattern("Pattern2").unwrap();
    draw_line(&mut state, Point::new(10.0, 10.0), Point::new(10.0, 60.0));
    state.save_all(&path).unwrap();

    let mut other = DesignerState::new();
    other.open(&path).unwrap();
    assert!(other.snapshot().approx_eq(&state.snapshot(), 0.05));
    assert_eq!(other.current_file_path.as_deref(), Some(path.as_path()));
}

#[test]
fn test_open_keeps_active_pattern_selected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.gcode");
    std::fs::write(&path, "; Sleeve\nG1 X0.00 Y0.00\nG1 X5.00 Y0.00\nM30\n").unwrap();

    let mut state = DesignerState::new();
    state.open(&path).unwrap();

    let names: Vec<String> = state.snapshot().names().map(String::from).collect();
    assert_eq!(names, vec!["Sleeve", "Pattern1"]);

    // Drawing still goes to the active pattern
    draw_line(&mut state, Point::new(0.0, 0.0), Point::new(25.0, 0.0));
    assert_eq!(state.active_snapshot().segments.len(), 1);
}

#[test]
fn test_open_malformed_file_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.gcode");
    std::fs::write(&path, "; Pattern1\nG1 X0.00 Y0.00\nM30\n").unwrap();

    let mut state = DesignerState::new();
    draw_line(&mut state, Point::new(0.0, 0.0), Point::new(50.0, 0.0));

    let err = state.open(&path).unwrap_err();
    assert!(err.is_malformed_document());
    assert_eq!(state.active_snapshot().segments.len(), 1);
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut state = DesignerState::new();
    let err = state.open(dir.path().join("missing.gcode")).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_failed_save_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("no_such_dir").join("Pattern1.gcode");
    let set = PatternSet::from_patterns([Pattern::new("Pattern1")]).unwrap();

    let err = save_pattern_file(&target, &set, &ScaleConfig::default()).unwrap_err();
    assert!(err.is_io_error());
    assert!(!target.exists());
}

#[test]
fn test_overwrite_replaces_previous_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Pattern1.gcode");
    let scale = ScaleConfig::default();

    std::fs::write(&path, "old content that is much longer than the new one\n").unwrap();
    let set = PatternSet::from_patterns([Pattern::new("Pattern1")]).unwrap();
    save_pattern_file(&path, &set, &scale).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "; Pattern1\nM30\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
