use super::*;
use crate::noise::simplex::DEFAULT_SEED;

fn default_composer() -> FractalComposer {
    FractalComposer::new(NoiseKernel::from_seed(DEFAULT_SEED), FractalParams::default())
}

#[test]
fn origin_matches_three_octave_reference() {
    let fbm = default_composer();
    let k = fbm.kernel();

    let freqs = [1.0, 2.2, 2.2 * 2.2];
    let amps = [0.6, 0.6 * 0.45, 0.6 * 0.45 * 0.45];
    assert!((freqs[2] - 4.84f64).abs() < 1e-12);
    assert!((amps[1] - 0.27f64).abs() < 1e-12);
    assert!((amps[2] - 0.1215f64).abs() < 1e-12);

    let reference: f64 = freqs
        .iter()
        .zip(amps.iter())
        .map(|(f, a)| a * k.sample(0.0 * f, 0.0 * f))
        .sum();
    assert_eq!(fbm.fbm(0.0, 0.0), reference);

    // Every octave samples the lattice origin, which is exactly 0.5.
    assert!((fbm.fbm(0.0, 0.0) - 0.49575).abs() < 1e-12);
}

#[test]
fn off_origin_matches_reference_composition() {
    let fbm = default_composer();
    let k = fbm.kernel();
    for (x, y) in [(0.192, 0.0), (1.5, -2.25), (37.0, 11.0)] {
        let mut expected = 0.0;
        let mut amp = 0.6;
        let mut freq = 1.0;
        for _ in 0..3 {
            expected += amp * k.sample(x * freq, y * freq);
            freq *= 2.2;
            amp *= 0.45;
        }
        assert_eq!(fbm.fbm(x, y).to_bits(), expected.to_bits());
    }
}

#[test]
fn output_stays_under_amplitude_sum() {
    let fbm = default_composer();
    let max = fbm.params().max_output();
    assert!((max - 0.9915).abs() < 1e-12);
    for i in 0..2_000 {
        let x = (i as f64) * 0.731 - 500.0;
        let y = (i as f64) * 0.419 + 12.0;
        let v = fbm.fbm(x, y);
        assert!(v.is_finite());
        assert!((0.0..=max + 1e-9).contains(&v), "fbm({x}, {y}) = {v}");
    }
}

#[test]
fn single_octave_is_scaled_kernel() {
    let params = FractalParams {
        octaves: 1,
        initial_amplitude: 1.0,
        ..FractalParams::default()
    };
    let fbm = FractalComposer::new(NoiseKernel::from_seed(9), params);
    assert_eq!(fbm.fbm(3.3, -1.7), fbm.kernel().sample(3.3, -1.7));
}

#[test]
fn validate_rejects_degenerate_layouts() {
    assert!(FractalParams::default().validate().is_ok());
    for bad in [
        FractalParams {
            octaves: 0,
            ..FractalParams::default()
        },
        FractalParams {
            lacunarity: f64::NAN,
            ..FractalParams::default()
        },
        FractalParams {
            persistence: -0.5,
            ..FractalParams::default()
        },
        FractalParams {
            initial_amplitude: 0.0,
            ..FractalParams::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
