use stitchkit_core::ScaleConfig;
use stitchkit_designer::{Pattern, PatternSet, PatternStore, Point, Segment};

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

#[test]
fn test_segments_keep_append_order() {
    let mut store = PatternStore::new();
    store.select("Pattern1").unwrap();
    for i in 0..5 {
        let x = i as f64 * 10.0;
        store.append_segment("Pattern1", seg(x, 0.0, x + 10.0, 0.0)).unwrap();
    }

    let pattern = store.get("Pattern1").unwrap();
    let starts: Vec<f64> = pattern.segments.iter().map(|s| s.start.x).collect();
    assert_eq!(starts, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
}

#[test]
fn test_reset_only_touches_named_pattern() {
    let mut store = PatternStore::new();
    store.select("Pattern1").unwrap();
    store.select("Pattern2").unwrap();
    store.append_segment("Pattern1", seg(0.0, 0.0, 50.0, 0.0)).unwrap();
    store.append_segment("Pattern2", seg(0.0, 0.0, 0.0, 50.0)).unwrap();

    store.reset("Pattern1").unwrap();

    assert!(store.get("Pattern1").unwrap().is_empty());
    assert_eq!(store.get("Pattern2").unwrap().segments.len(), 1);
}

#[test]
fn test_reset_unknown_pattern() {
    let mut store = PatternStore::new();
    assert!(store.reset("Nope").unwrap_err().is_invalid_pattern());
}

#[test]
fn test_replace_with_built_set() {
    let set = PatternSet::from_patterns(vec![Pattern::new("B"), Pattern::new("A")]).unwrap();
    let mut store = PatternStore::new();
    store.select("Pattern1").unwrap();
    store.replace(set);

    let names: Vec<&str> = store.all().names().collect();
    assert_eq!(names, vec!["B", "A"]);
    assert!(store.get("Pattern1").is_none());
}

#[test]
fn test_stitch_points_of_pattern() {
    let mut pattern = Pattern::new("Pattern1");
    pattern.segments.push(seg(0.0, 0.0, 100.0, 0.0));
    pattern.segments.push(seg(100.0, 0.0, 100.0, 0.0));
    pattern.segments.push(seg(100.0, 0.0, 100.0, 25.0));

    let points = pattern.stitch_points(&ScaleConfig::default());
    assert_eq!(points.len(), 10);
    assert!(points[7].approx_eq(&Point::new(100.0, 0.0), 1e-9));
    assert!(points[9].approx_eq(&Point::new(100.0, 25.0), 1e-9));
}

#[test]
fn test_approx_eq_detects_order() {
    let a = PatternSet::from_patterns(vec![Pattern::new("A"), Pattern::new("B")]).unwrap();
    let b = PatternSet::from_patterns(vec![Pattern::new("B"), Pattern::new("A")]).unwrap();
    assert!(a.approx_eq(&a.clone(), 0.0));
    assert!(!a.approx_eq(&b, 0.0));
}
