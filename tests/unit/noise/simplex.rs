use super::*;

#[test]
fn sample_is_bit_identical_across_calls() {
    let k = NoiseKernel::from_seed(42);
    let again = NoiseKernel::from_seed(42);
    for i in 0..500 {
        let x = (i as f64) * 0.37 - 40.0;
        let y = (i as f64) * -1.13 + 9.5;
        let a = k.sample(x, y);
        assert_eq!(a.to_bits(), k.sample(x, y).to_bits());
        assert_eq!(a.to_bits(), again.sample(x, y).to_bits());
    }
}

#[test]
fn sample_stays_in_unit_range_over_wide_inputs() {
    let k = NoiseKernel::default();
    let mut rng = Rng64::new(0x00C0_FFEE);
    for _ in 0..100_000 {
        let x = rng.next_f64_01() * 2.0e6 - 1.0e6;
        let y = rng.next_f64_01() * 2.0e6 - 1.0e6;
        let v = k.sample(x, y);
        assert!(
            (-1e-9..=1.0 + 1e-9).contains(&v),
            "sample({x}, {y}) = {v} escaped [0, 1]"
        );
    }
}

#[test]
fn seeded_tables_are_permutations() {
    for seed in [0u64, 1, 2, 42, DEFAULT_SEED, u64::MAX] {
        let s = NoiseSeed::from_seed(seed);
        let mut sorted = s.permutation().to_vec();
        sorted.sort_unstable();
        let expected: Vec<u8> = (0..=255).collect();
        assert_eq!(sorted, expected, "seed {seed}");
        for i in 0..512 {
            assert_eq!(s.table()[i], s.permutation()[i & 255]);
        }
    }
}

#[test]
fn different_seeds_shuffle_differently() {
    let a = NoiseSeed::from_seed(1);
    let b = NoiseSeed::from_seed(2);
    assert_ne!(a.permutation(), b.permutation());
}

#[test]
fn from_permutation_rejects_duplicates() {
    let mut perm = [0u8; 256];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i as u8;
    }
    assert!(NoiseSeed::from_permutation(perm).is_ok());

    perm[10] = 11;
    let err = NoiseSeed::from_permutation(perm).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn explicit_permutation_is_kept_verbatim() {
    let mut perm = [0u8; 256];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = 255 - i as u8;
    }
    let s = NoiseSeed::from_permutation(perm).unwrap();
    assert_eq!(s.permutation(), &perm[..]);
}

#[test]
fn small_steps_change_value_roughly_linearly() {
    let k = NoiseKernel::default();
    // Includes lattice-aligned points where simplex cells meet.
    let points = [
        (0.0, 0.0),
        (1.0, 0.0),
        (3.0, 3.0),
        (-2.0, 5.0),
        (12.25, -7.5),
        (0.5, 0.25),
        (100.0, -100.0),
    ];
    for (x, y) in points {
        let base = k.sample(x, y);
        let d3 = (k.sample(x + 1e-3, y) - base).abs();
        let d4 = (k.sample(x + 1e-4, y) - base).abs();
        assert!(d3 < 1e-2, "jump of {d3} at ({x}, {y})");
        assert!(d4 <= d3 * 0.5 + 1e-9, "no shrink at ({x}, {y}): {d3} -> {d4}");
    }
}

#[test]
fn lattice_origin_samples_midpoint() {
    // At the origin every corner contribution vanishes regardless of seed.
    for seed in [0u64, 7, DEFAULT_SEED] {
        assert_eq!(NoiseKernel::from_seed(seed).sample(0.0, 0.0), 0.5);
    }
}

#[test]
fn gradients_are_fixed() {
    assert_eq!(GRADIENTS.len(), 8);
    assert_eq!(GRADIENTS[0], [1.0, 1.0]);
    assert_eq!(GRADIENTS[7], [0.0, -1.0]);
    assert!((F2 - 0.5 * (3f64.sqrt() - 1.0)).abs() < 1e-15);
    assert!((G2 - (3.0 - 3f64.sqrt()) / 6.0).abs() < 1e-15);
}
