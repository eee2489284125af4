use super::*;

fn mapper() -> ColorMapper {
    ColorMapper::new(PaletteConfig::default())
}

#[test]
fn at_threshold_is_exactly_base() {
    let c = mapper().map(0.70);
    assert_eq!(c, DotColor::from_rgb([58, 53, 46], 0.45));
}

#[test]
fn below_threshold_is_base() {
    let m = mapper();
    for n in [-0.5, 0.0, 0.3, 0.6999] {
        assert_eq!(m.map(n), DotColor::from_rgb([58, 53, 46], 0.45));
    }
}

#[test]
fn at_one_is_exactly_glow_and_peak_alpha() {
    let c = mapper().map(1.0);
    assert_eq!(c.r, 120.0);
    assert_eq!(c.g, 170.0);
    assert_eq!(c.b, 220.0);
    assert_eq!(c.a, 0.7);
}

#[test]
fn blend_is_quadratic_ease_in() {
    let c = mapper().map(0.85);
    // blend = 0.5, eased = 0.25
    assert!((c.r - (58.0 + 62.0 * 0.25)).abs() < 1e-9);
    assert!((c.g - (53.0 + 117.0 * 0.25)).abs() < 1e-9);
    assert!((c.b - (46.0 + 174.0 * 0.25)).abs() < 1e-9);
    assert!((c.a - (0.45 + 0.25 * 0.25)).abs() < 1e-9);
}

#[test]
fn overshoot_is_preserved_by_default_and_clamped_on_request() {
    let c = mapper().map(1.1);
    assert!(c.b > 220.0);
    assert!(c.a > 0.7);
    assert_eq!(c.to_rgba8()[2], 255);

    let clamped = ColorMapper::new(PaletteConfig {
        clamp_blend: true,
        ..PaletteConfig::default()
    })
    .map(1.1);
    assert_eq!(clamped.b, 220.0);
    assert_eq!(clamped.a, 0.7);
}

#[test]
fn nan_maps_to_base() {
    assert_eq!(mapper().map(f64::NAN), DotColor::from_rgb([58, 53, 46], 0.45));
}

#[test]
fn rgba8_truncates_channels() {
    let c = DotColor {
        r: 73.9,
        g: 0.2,
        b: 300.0,
        a: 0.45,
    };
    assert_eq!(c.to_rgba8(), [73, 0, 255, 115]);
}

#[test]
fn palette_validation() {
    assert!(PaletteConfig::default().validate().is_ok());
    let bad = PaletteConfig {
        threshold: 1.0,
        ..PaletteConfig::default()
    };
    assert!(bad.validate().is_err());
    let bad = PaletteConfig {
        peak_alpha: 1.5,
        ..PaletteConfig::default()
    };
    assert!(bad.validate().is_err());
}
