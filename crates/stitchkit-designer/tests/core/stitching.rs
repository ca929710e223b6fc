use proptest::prelude::*;
use stitchkit_core::ScaleConfig;
use stitchkit_designer::stitching::{stitch, stitch_scaled};
use stitchkit_designer::{Point, Segment};

#[test]
fn test_documented_scenario() {
    // 2.5 mm pitch at 5 px/mm, 100 px = 20 mm line
    let scale = ScaleConfig::new(2.5, 5.0);
    let segment = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));

    let points: Vec<Point> = stitch_scaled(&segment, &scale).collect();
    assert_eq!(points.len(), 8);

    for (i, p) in points.iter().enumerate() {
        let expected_mm = 2.5 * (i + 1) as f64;
        assert!((scale.to_mm(p.x) - expected_mm).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    let last = points.last().unwrap();
    assert!(last.approx_eq(&Point::new(100.0, 0.0), 1e-9));
    assert!((scale.to_mm(last.x) - 20.0).abs() < 1e-9);
}

#[test]
fn test_diagonal_spacing() {
    let segment = Segment::new(Point::new(10.0, 10.0), Point::new(40.0, 50.0));
    let points: Vec<Point> = stitch(&segment, 5.0).collect();
    assert_eq!(points.len(), 10);

    let mut previous = segment.start;
    for p in &points {
        assert!((previous.distance_to(p) - 5.0).abs() < 1e-9);
        let detour = segment.start.distance_to(p) + p.distance_to(&segment.end) - segment.length();
        assert!(detour.abs() < 1e-6);
        previous = *p;
    }
}

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

proptest! {
    #[test]
    fn prop_shorter_than_pitch_gives_nothing(
        x in coord(), y in coord(), angle in 0.0f64..std::f64::consts::TAU,
        pitch in 0.5f64..50.0, fraction in 0.0f64..0.999,
    ) {
        let len = pitch * fraction;
        let segment = Segment::new(
            Point::new(x, y),
            Point::new(x + len * angle.cos(), y + len * angle.sin()),
        );
        prop_assert_eq!(stitch(&segment, pitch).count(), 0);
    }

    #[test]
    fn prop_exact_multiple_ends_on_endpoint(
        x in coord(), y in coord(), angle in 0.0f64..std::f64::consts::TAU,
        pitch in 0.5f64..50.0, k in 1usize..40,
    ) {
        let len = pitch * k as f64;
        let end = Point::new(x + len * angle.cos(), y + len * angle.sin());
        let segment = Segment::new(Point::new(x, y), end);

        let points: Vec<Point> = stitch(&segment, pitch).collect();
        prop_assert_eq!(points.len(), k);
        prop_assert!(points[k - 1].approx_eq(&end, 1e-6));
    }

    #[test]
    fn prop_zero_length_gives_nothing(x in coord(), y in coord(), pitch in 0.1f64..50.0) {
        let p = Point::new(x, y);
        prop_assert_eq!(stitch(&Segment::new(p, p), pitch).count(), 0);
    }

    #[test]
    fn prop_count_is_floor_of_ratio(
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(), pitch in 0.5f64..50.0,
    ) {
        let segment = Segment::new(Point::new(x1, y1), Point::new(x2, y2));
        let count = stitch(&segment, pitch).count();
        let ratio = segment.length() / pitch;
        prop_assert!(count as f64 <= ratio + 1e-6);
        prop_assert!(count as f64 > ratio - 1.0);
    }
}
