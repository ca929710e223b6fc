use proptest::prelude::*;
use stitchkit_core::{Error, GcodeError, ScaleConfig};
use stitchkit_designer::gcode::{decode, encode};
use stitchkit_designer::{Pattern, PatternSet, Point, Segment};

fn pattern(name: &str, segments: &[((f64, f64), (f64, f64))]) -> Pattern {
    let mut p = Pattern::new(name);
    p.segments = segments.iter().map(|s| Segment::from(*s)).collect();
    p
}

#[test]
fn test_round_trip_documented_example() {
    let scale = ScaleConfig::default();
    let set = PatternSet::from_patterns(vec![
        pattern("Pattern1", &[((0.0, 0.0), (50.0, 0.0))]),
        pattern("Pattern2", &[]),
    ])
    .unwrap();

    let text = encode(&set, &scale);
    assert_eq!(text, "; Pattern1\nG1 X0.00 Y0.00\nG1 X10.00 Y0.00\n; Pattern2\nM30\n");

    let decoded = decode(&text, &scale).unwrap();
    // 0.01 mm in canvas units
    assert!(decoded.approx_eq(&set, scale.to_px(0.01)));
    assert!(decoded.get("Pattern2").unwrap().is_empty());
}

#[test]
fn test_round_trip_loses_only_sub_hundredth_precision() {
    let scale = ScaleConfig::default();
    let set = PatternSet::from_patterns([pattern(
        "Pattern1",
        &[((1.2345, 2.0), (333.333, 17.777))],
    )])
    .unwrap();

    let decoded = decode(&encode(&set, &scale), &scale).unwrap();
    let segment = decoded.get("Pattern1").unwrap().segments[0];

    // 1.2345 px = 0.2469 mm, written as 0.25 mm, read back as 1.25 px
    assert_eq!(segment.start, Point::new(1.25, 2.0));
    assert!(decoded.approx_eq(&set, scale.to_px(0.005) + 1e-9));
}

#[test]
fn test_unwritable_names_never_reach_the_encoder() {
    let scale = ScaleConfig::default();
    for name in ["Pattern 1 ", "", "Pattern1\nG1 X1.00 Y1.00"] {
        let err = PatternSet::from_patterns([pattern(name, &[((0.0, 0.0), (50.0, 0.0))])])
            .unwrap_err();
        assert!(err.is_invalid_pattern(), "name {:?}", name);
    }

    let mut set = PatternSet::new();
    set.insert(pattern("My Pattern", &[((0.0, 0.0), (50.0, 0.0))]))
        .unwrap();
    let decoded = decode(&encode(&set, &scale), &scale).unwrap();
    assert_eq!(decoded.names().collect::<Vec<_>>(), vec!["My Pattern"]);
}

#[test]
fn test_decode_rejects_orphan_move() {
    let err = decode("G1 X0.00 Y0.00\n; Pattern1\nM30\n", &ScaleConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Gcode(GcodeError::MalformedDocument { line_number: 1, .. })
    ));
}

#[test]
fn test_decode_rejects_odd_move_count() {
    let text = "; Pattern1\nG1 X0.00 Y0.00\nG1 X1.00 Y0.00\nG1 X2.00 Y0.00\nM30\n";
    let err = decode(text, &ScaleConfig::default()).unwrap_err();
    assert!(err.is_malformed_document());
    assert!(err.to_string().contains("no matching end point"));
}

#[test]
fn test_codec_uses_the_given_scale() {
    let scale = ScaleConfig::new(2.5, 10.0);
    let set =
        PatternSet::from_patterns([pattern("Pattern1", &[((0.0, 0.0), (100.0, 50.0))])]).unwrap();

    let text = encode(&set, &scale);
    assert!(text.contains("G1 X10.00 Y5.00"));
    assert_eq!(decode(&text, &scale).unwrap(), set);
}

fn canvas_coord() -> impl Strategy<Value = f64> {
    // Whole hundredths of a millimetre at 5 px/mm survive exactly
    (-40_000i32..40_000).prop_map(|v| v as f64 * 0.05)
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    (canvas_coord(), canvas_coord(), canvas_coord(), canvas_coord())
        .prop_map(|(a, b, c, d)| Segment::new(Point::new(a, b), Point::new(c, d)))
}

fn set_strategy() -> impl Strategy<Value = PatternSet> {
    prop::collection::vec(prop::collection::vec(segment_strategy(), 0..6), 0..5).prop_map(
        |patterns| {
            let patterns = patterns
                .into_iter()
                .enumerate()
                .map(|(i, segments)| Pattern {
                    name: format!("Pattern{}", i + 1),
                    segments,
                });
            PatternSet::from_patterns(patterns).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn prop_round_trip_within_precision(set in set_strategy()) {
        let scale = ScaleConfig::default();
        let decoded = decode(&encode(&set, &scale), &scale).unwrap();
        prop_assert!(decoded.approx_eq(&set, 1e-6));
    }
}
