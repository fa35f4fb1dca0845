//! Loading formatting options from disk and applying them.

use std::io::Write;

use fv_format::{
    Decimal, FormatError, FormatOptions, MeasuredValue, RoundingPolicy, ValidationError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_yaml_file() {
    init_tracing();
    let file = write_temp(
        ".yaml",
        "error_significant_figures: 2\nleading_zero_threshold: 1\nrounding: half-up\n",
    );
    let options = FormatOptions::load(file.path()).unwrap();
    assert_eq!(options.error_significant_figures(), 2);
    assert_eq!(options.leading_zero_threshold(), 1);
    assert_eq!(options.rounding(), RoundingPolicy::HalfUp);

    let value: Decimal = "0.012345".parse().unwrap();
    let error: Decimal = "0.00125".parse().unwrap();
    let mv = MeasuredValue::with_options(value, error, options).unwrap();
    assert_eq!(mv.to_string(), "(1.23 ± 0.13) x 10^-2");
}

#[test]
fn load_json_file() {
    init_tracing();
    let file = write_temp(".json", r#"{ "rounding": "ROUND_05UP" }"#);
    let options = FormatOptions::load(file.path()).unwrap();
    assert_eq!(options.rounding(), RoundingPolicy::ZeroFiveUp);
    assert_eq!(options.error_significant_figures(), 1);
    assert_eq!(options.leading_zero_threshold(), 3);
}

#[test]
fn invalid_file_contents_surface_validation_errors() {
    init_tracing();
    let file = write_temp(".yml", "error_significant_figures: 0\n");
    let err = FormatOptions::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        FormatError::Validation(ValidationError::SignificantFiguresNotPositive { value: 0 })
    ));

    let file = write_temp(".yml", "leading_zero_threshold: 1.5\n");
    let err = FormatOptions::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        FormatError::Validation(ValidationError::ThresholdNotInteger { .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FormatOptions::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
}

#[test]
fn builder_accepts_loaded_options() {
    init_tracing();
    let options = FormatOptions::from_yaml_str("error_significant_figures: 3").unwrap();
    let mv = MeasuredValue::builder("10".parse().unwrap())
        .error("0.1".parse().unwrap())
        .options(options)
        .build()
        .unwrap();
    assert_eq!(mv.to_string(), "10.000 ± 0.100");

    let mut mv = mv;
    mv.apply_options(FormatOptions::default());
    assert_eq!(mv.to_string(), "10.0 ± 0.1");
}
