use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = SessionConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.term_cap, 501);
    assert_eq!(cfg.resample.min_points, 500);
    assert_eq!(cfg.normalize.padding, 50.0);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = SessionConfig::from_json_str(
        r#"{
  "normalize": { "viewport": { "width": 800, "height": 600 }, "chrome_height": 150 },
  "term_cap": 200,
  "phase_mode": "legacy_atan"
}"#,
    )
    .unwrap();
    assert_eq!(cfg.normalize.viewport.width, 800.0);
    assert_eq!(cfg.normalize.chrome_height, 150.0);
    assert_eq!(cfg.normalize.padding, 50.0);
    assert_eq!(cfg.term_cap, 200);
    assert_eq!(cfg.phase_mode, PhaseMode::LegacyAtan);
    assert_eq!(cfg.resample, ResampleOptions::default());
}

#[test]
fn invalid_values_are_rejected() {
    assert!(SessionConfig::from_json_str(r#"{ "term_cap": 1 }"#).is_err());
    assert!(SessionConfig::from_json_str(r#"{ "threads": 0 }"#).is_err());
    assert!(SessionConfig::from_json_str(r#"{ "resample": { "initial_spacing": 0 } }"#).is_err());
    assert!(SessionConfig::from_json_str(r#"{ "resample": { "max_points": 100 } }"#).is_err());
    assert!(
        SessionConfig::from_json_str(
            r#"{ "normalize": { "viewport": { "width": 30, "height": 600 } } }"#
        )
        .is_err()
    );
    assert!(matches!(
        SessionConfig::from_json_str("{"),
        Err(EpicycleError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = SessionConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.json"));
}
