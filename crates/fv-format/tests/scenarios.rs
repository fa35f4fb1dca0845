//! End-to-end rounding and rendering of measured values.

use fv_format::{Decimal, MeasuredValue, RoundingPolicy, Template, ValidationError};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn f(x: f64) -> Decimal {
    Decimal::try_from(x).unwrap()
}

fn strings(triple: &fv_format::RoundedTriple) -> (String, String, i64) {
    (triple.value.to_string(), triple.error.to_string(), triple.exponent)
}

#[test]
fn tenth_error_stays_plain() {
    let mv = MeasuredValue::new(d("10.0"), d("0.1")).unwrap();
    let triple = mv.rounded_triple(None);
    assert_eq!(strings(&triple), ("10.0".to_string(), "0.1".to_string(), 0));
    assert_eq!(mv.to_string(), "10.0 ± 0.1");
}

#[test]
fn tens_error_moves_to_exponent_one() {
    let mv = MeasuredValue::new(d("100"), d("10")).unwrap();
    let triple = mv.rounded_triple(None);
    assert_eq!(strings(&triple), ("10".to_string(), "1".to_string(), 1));
    assert_eq!(mv.to_string(), "(10 ± 1) x 10");
}

#[test]
fn leading_zeros_past_threshold_go_scientific() {
    let mv = MeasuredValue::builder(d("0.00010"))
        .error(d("0.00001"))
        .leading_zero_threshold(3)
        .build()
        .unwrap();
    assert_eq!(mv.render(&Template::bare(), None, ""), "(1.0 ± 0.1) x 10^-4");
    assert_eq!(mv.to_string(), "(1.0 ± 0.1) x 10^-4");
}

#[test]
fn leading_zeros_at_threshold_stay_plain() {
    let mv = MeasuredValue::builder(d("0.00010"))
        .error(d("0.00001"))
        .leading_zero_threshold(4)
        .build()
        .unwrap();
    assert_eq!(
        mv.render(&Template::bare(), None, ""),
        "(0.00010 ± 0.00001) x 10^0"
    );
    assert_eq!(mv.to_string(), "0.00010 ± 0.00001");
}

#[test]
fn siunitx_with_multiplier_and_units() {
    let mv = MeasuredValue::new(d("10"), d("0.1")).unwrap();
    let hundredth = d("0.01");
    assert_eq!(
        mv.render(&Template::siunitx(), Some(&hundredth), r"\meter"),
        r"\SI{0.100 \pm 0.001 e0}{\meter}"
    );
}

#[test]
fn float_multiplier_matches_decimal_multiplier() {
    let mv = MeasuredValue::from_f64(10.0, 0.1).unwrap();
    let multiplier = f(1.0 / 100.0);
    assert_eq!(
        mv.render(&Template::siunitx(), Some(&multiplier), r"\meter"),
        r"\SI{0.100 \pm 0.001 e0}{\meter}"
    );
}

#[test]
fn custom_pattern_without_exponent() {
    let mv = MeasuredValue::from_f64(10.0, 0.1).unwrap();
    let template = Template::pattern(r"\SI{{{0} \pm {1}}}{{{3}}}").unwrap();
    assert_eq!(
        mv.render(&template, None, r"\centi\meter"),
        r"\SI{10.0 \pm 0.1}{\centi\meter}"
    );
}

#[test]
fn rounded_pairs_follow_significant_figures() {
    let cases = [
        (1, "10.0", "0.1"),
        (2, "10.00", "0.10"),
        (3, "10.000", "0.100"),
    ];
    for (sig, value, error) in cases {
        let mv = MeasuredValue::builder(f(10.0))
            .error(f(0.1))
            .error_significant_figures(sig)
            .build()
            .unwrap();
        let (v, e) = mv.rounded_pair(None);
        assert_eq!((v.to_string(), e.to_string()), (value.to_string(), error.to_string()));
    }
}

#[test]
fn rounded_pair_with_multiplier() {
    let mv = MeasuredValue::from_f64(0.001, 0.0001).unwrap();
    let (v, e) = mv.rounded_pair(Some(&Decimal::from(1000)));
    assert_eq!(v.to_string(), "1.0");
    assert_eq!(e.to_string(), "0.1");
}

#[test]
fn rounded_pair_before_display_shift() {
    let mv = MeasuredValue::new(d("100"), d("10")).unwrap();
    let (v, e) = mv.rounded_pair(None);
    assert_eq!(v, d("100"));
    assert_eq!(e, d("10"));
    assert_eq!(v.exponent(), e.exponent());
}

#[test]
fn large_error_uses_positive_exponent() {
    let mv = MeasuredValue::new(d("12345"), d("1234")).unwrap();
    assert_eq!(mv.to_string(), "(12 ± 1) x 10^3");
}

#[test]
fn carry_keeps_one_figure() {
    let mv = MeasuredValue::new(d("123.456"), d("0.0996")).unwrap();
    assert_eq!(mv.to_string(), "123.5 ± 0.1");
}

#[test]
fn negative_values_keep_their_sign() {
    let mut mv = MeasuredValue::new(d("-0.00123"), d("0.00002")).unwrap();
    assert_eq!(mv.to_string(), "-0.00123 ± 0.00002");
    mv.set_leading_zero_threshold(2).unwrap();
    assert_eq!(mv.to_string(), "(-1.23 ± 0.02) x 10^-3");
}

#[test]
fn units_follow_natural_layout() {
    let mv = MeasuredValue::new(d("9.81"), d("0.02")).unwrap();
    assert_eq!(mv.render(&Template::natural(), None, "m/s^2"), "9.81 ± 0.02 m/s^2");
}

#[test]
fn zero_multiplier_is_not_absent_multiplier() {
    let mv = MeasuredValue::new(d("10"), d("0.1")).unwrap();
    let zero = Decimal::zero();
    assert_eq!(mv.render(&Template::natural(), Some(&zero), ""), "0 ± 0");
    assert_eq!(mv.render(&Template::natural(), None, ""), "10.0 ± 0.1");
}

#[test]
fn negative_multiplier_keeps_error_non_negative() {
    let mv = MeasuredValue::new(d("10"), d("0.1")).unwrap();
    let minus_one = d("-1");
    let error = mv.rounded_error(Some(&minus_one));
    assert!(error >= Decimal::zero());
    assert_eq!(error.to_string(), "0.1");
    assert_eq!(mv.render(&Template::natural(), Some(&minus_one), ""), "-10.0 ± 0.1");

    let milli = d("-0.001");
    assert_eq!(
        mv.render(&Template::natural(), Some(&milli), "m"),
        "-0.0100 ± 0.0001 m"
    );
}

#[test]
fn policy_changes_boundary_rounding() {
    let mut mv = MeasuredValue::new(d("2.25"), d("0.25")).unwrap();
    assert_eq!(mv.to_string(), "2.2 ± 0.2");
    mv.set_rounding(RoundingPolicy::HalfUp);
    assert_eq!(mv.to_string(), "2.3 ± 0.3");
    mv.set_rounding(RoundingPolicy::Floor);
    assert_eq!(mv.to_string(), "2.2 ± 0.2");
}

#[test]
fn custom_renderer_lays_out_freely() {
    let mv = MeasuredValue::new(d("0.00010"), d("0.00001")).unwrap();
    let template =
        Template::renderer(|a| format!("{}({}) e{} {}", a.value, a.error, a.exponent, a.units));
    assert_eq!(mv.render(&template, None, "s"), "1.0(0.1) e-4 s");
}

#[test]
fn negative_errors_rejected_for_every_input_kind() {
    assert!(MeasuredValue::new(d("10"), Decimal::from(-1)).is_err());
    assert!(MeasuredValue::from_f64(10.0, -1.0).is_err());
    assert!(MeasuredValue::new(d("10"), d("-1.0")).is_err());
    assert!(MeasuredValue::new(d("10"), f(-5e10)).is_err());

    assert!(MeasuredValue::new(d("10"), Decimal::zero()).is_ok());
    assert!(MeasuredValue::new(d("10"), f(1.0)).is_ok());
    assert!(MeasuredValue::new(d("10"), d("1")).is_ok());
    assert!(MeasuredValue::new(d("10"), f(5e10)).is_ok());
}

#[test]
fn every_policy_is_accepted_and_unknown_names_are_not() {
    for policy in RoundingPolicy::ALL {
        let mv = MeasuredValue::builder(d("10"))
            .error(d("1"))
            .rounding(policy)
            .build()
            .unwrap();
        assert_eq!(mv.rounding(), policy);
    }

    let mut mv = MeasuredValue::new(d("10"), d("1")).unwrap();
    assert_eq!(
        mv.set_rounding_name("Invalid Rounding"),
        Err(ValidationError::UnknownRoundingPolicy {
            name: "Invalid Rounding".to_string()
        })
    );
}

#[test]
fn raw_pair_is_exactly_what_was_supplied() {
    let mv = MeasuredValue::new(d("1.000"), d("0.12345")).unwrap();
    let (value, error) = mv.raw_pair();
    assert_eq!(value.to_string(), "1.000");
    assert_eq!(error.to_string(), "0.12345");
}
