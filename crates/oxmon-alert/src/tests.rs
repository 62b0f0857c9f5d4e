use crate::threshold::{evaluate, Bounds, ThresholdRange};
use crate::RangeError;

fn range(spec: &str) -> ThresholdRange {
    spec.parse()
        .unwrap_or_else(|e| panic!("{spec} should parse: {e}"))
}

#[test]
fn legacy_upper_bound_has_implicit_zero_floor() {
    assert_eq!(evaluate(123.456, "100"), Ok(true));
    assert_eq!(evaluate(50.0, "100"), Ok(false));
    assert_eq!(evaluate(-0.5, "100"), Ok(true));
    assert_eq!(evaluate(0.0, "100"), Ok(false));
}

#[test]
fn closed_range_breaches_outside() {
    assert_eq!(evaluate(123.456, "0:100"), Ok(true));
    assert_eq!(evaluate(10.0, "20:100"), Ok(true));
    assert_eq!(evaluate(20.0, "20:100"), Ok(false));
    assert_eq!(evaluate(100.0, "20:100"), Ok(false));
}

#[test]
fn open_upper_bound_breaches_below_minimum() {
    assert_eq!(evaluate(123.456, "200:"), Ok(true));
    assert_eq!(evaluate(200.0, "200:"), Ok(false));
    assert_eq!(evaluate(1e9, "200:"), Ok(false));
}

#[test]
fn open_lower_bound_uses_strict_comparison() {
    assert_eq!(evaluate(123.456, "~:123"), Ok(true));
    assert_eq!(evaluate(123.0, "~:123"), Ok(false));
    assert_eq!(evaluate(-1e9, "~:123"), Ok(false));
}

#[test]
fn inversion_flips_the_decision() {
    // 123.456 lies inside [0, 200], so only the inverted spec alerts.
    assert_eq!(evaluate(123.456, "200"), Ok(false));
    assert_eq!(evaluate(123.456, "@200"), Ok(true));
    // Outside [0, 123]: the plain spec alerts, the inverted one does not.
    assert_eq!(evaluate(123.456, "123"), Ok(true));
    assert_eq!(evaluate(123.456, "@123"), Ok(false));
    assert_eq!(evaluate(15.0, "@10:20"), Ok(true));
    assert_eq!(evaluate(25.0, "@10:20"), Ok(false));
}

#[test]
fn empty_spec_is_not_evaluated() {
    assert_eq!(evaluate(-1.0, ""), Ok(false));
    assert_eq!("".parse::<ThresholdRange>(), Err(RangeError::Empty));
}

#[test]
fn reversed_bounds_are_a_format_error() {
    assert_eq!(
        evaluate(123.456, "2000:100"),
        Err(RangeError::ReversedBounds {
            low: 2000.0,
            high: 100.0
        })
    );
}

#[test]
fn too_many_separators_are_a_format_error() {
    assert_eq!(
        evaluate(123.456, "20:100:200"),
        Err(RangeError::TooManyParts("20:100:200".into()))
    );
}

#[test]
fn non_numeric_bounds_are_rejected() {
    for (spec, token) in [
        ("c", "c"),
        ("f:", "f"),
        ("100:g", "g"),
        ("b:100", "b"),
        ("~:d", "d"),
        ("~:", ""),
        (":5", ""),
        ("@", ""),
        ("1e400", "1e400"),
        ("~:-1e400", "-1e400"),
    ] {
        assert_eq!(
            evaluate(1.0, spec),
            Err(RangeError::InvalidBound(token.into())),
            "spec {spec}"
        );
    }
}

#[test]
fn parsed_forms() {
    assert_eq!(range("100").bounds(), Bounds::Upper(100.0));
    assert_eq!(range("10:").bounds(), Bounds::AtLeast(10.0));
    assert_eq!(range("~:10").bounds(), Bounds::AtMost(10.0));
    assert_eq!(range("-5:5").bounds(), Bounds::Between(-5.0, 5.0));
    assert!(range("@1:2").inverted());
    assert!(!range("1:2").inverted());
    assert_eq!(range("1.5:1.5").bounds(), Bounds::Between(1.5, 1.5));
}

#[test]
fn display_normalizes_specs() {
    assert_eq!(range("100").to_string(), "100");
    assert_eq!(range("@10.50:20").to_string(), "@10.5:20");
    assert_eq!(range("~:7").to_string(), "~:7");
    assert_eq!(range("3:").to_string(), "3:");
    let rebuilt = ThresholdRange::new(Bounds::AtMost(1.0), true);
    assert_eq!(rebuilt.to_string(), "@~:1");
}

#[test]
fn spelled_out_infinity_is_a_bound() {
    assert_eq!(range("~:inf").bounds(), Bounds::AtMost(f64::INFINITY));
    assert_eq!(evaluate(1e300, "-Inf:"), Ok(false));
}
