use super::*;

#[test]
fn defaults_reproduce_reference_constants() {
    let cfg = DotGridConfig::default();
    assert_eq!(cfg.grid.spacing, 24.0);
    assert_eq!(cfg.grid.dot_radius, 0.8);
    assert_eq!(cfg.field.noise_scale, 0.008);
    assert_eq!(cfg.field.time_speed, 0.0004);
    assert_eq!(cfg.field.vertical_drift, 0.7);
    assert_eq!(cfg.palette.threshold, 0.70);
    assert_eq!(cfg.palette.base_alpha, 0.45);
    assert_eq!(cfg.palette.peak_alpha, 0.7);
    assert_eq!(cfg.fractal.octaves, 3);
    assert!(!cfg.palette.clamp_blend);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = DotGridConfig::from_json_str(r#"{ "grid": { "spacing": 16 }, "seed": 5 }"#)
        .unwrap();
    assert_eq!(cfg.grid.spacing, 16.0);
    assert_eq!(cfg.grid.dot_radius, 0.8);
    assert_eq!(cfg.seed, Some(5));
    assert_eq!(cfg.palette, PaletteConfig::default());
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = DotGridConfig {
        frame_budget_ms: Some(8.0),
        ..DotGridConfig::seeded_default()
    };
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(DotGridConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn invalid_values_are_rejected() {
    let err = DotGridConfig::from_json_str(r#"{ "grid": { "spacing": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("spacing"));

    let err = DotGridConfig::from_json_str(r#"{ "palette": { "threshold": 1.2 } }"#).unwrap_err();
    assert!(err.to_string().contains("threshold"));

    let err = DotGridConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let mut cfg = DotGridConfig::default();
    cfg.grid.spacing = 1e-9;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("spacing"));
    cfg.grid.spacing = GridLayout::MIN_SPACING;
    assert!(cfg.validate().is_ok());

    let cfg = DotGridConfig {
        frame_budget_ms: Some(-1.0),
        ..DotGridConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn seeded_configs_build_identical_fields() {
    let a = DotGridConfig::seeded_default().build_composer();
    let b = DotGridConfig::seeded_default().build_composer();
    assert_eq!(a.fbm(1.25, 3.5), b.fbm(1.25, 3.5));
    assert_eq!(
        DotGridConfig::default().frame_budget_ms(),
        DotGridConfig::DEFAULT_FRAME_BUDGET_MS
    );
}
