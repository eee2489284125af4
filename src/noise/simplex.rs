//! Seeded 2D simplex gradient noise.
//!
//! The kernel evaluates noise on a triangular lattice: the input is skewed into
//! lattice space, the containing simplex is found, and the three corner
//! contributions `t⁴ × (g · d)` are summed. The result is remapped into `[0, 1]`.

use crate::foundation::{
    error::{DotcloudError, DotcloudResult},
    math::Rng64,
};

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 0x5EED_C10D;

/// Skew factor `(√3 − 1) / 2`.
pub const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor `(3 − √3) / 6`.
pub const G2: f64 = 0.211_324_865_405_187_13;

/// Brings the raw corner sum to roughly `[-1, 1]`.
const OUTPUT_SCALE: f64 = 70.0;

/// Gradient directions selected by the permutation hash.
pub const GRADIENTS: [[f64; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Permutation of `0..=255` doubled into a 512-entry lookup table.
///
/// `table[i] == perm[i & 255]`, so lattice hashes of the form
/// `table[a + table[b]]` with `a, b <= 256` never need a modulo.
#[derive(Clone)]
pub struct NoiseSeed {
    table: [u8; 512],
}

impl std::fmt::Debug for NoiseSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSeed")
            .field("head", &&self.table[..8])
            .finish_non_exhaustive()
    }
}

impl NoiseSeed {
    /// Shuffle `0..=255` with Fisher–Yates driven by a SplitMix64 stream.
    pub fn from_seed(seed: u64) -> Self {
        let mut perm = [0u8; 256];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }
        let mut rng = Rng64::new(seed);
        for i in (1..256).rev() {
            let j = rng.next_index_inclusive(i);
            perm.swap(i, j);
        }
        Self::from_valid_permutation(&perm)
    }

    /// Build from an explicit permutation, failing if it is not a permutation of `0..=255`.
    pub fn from_permutation(perm: [u8; 256]) -> DotcloudResult<Self> {
        let mut seen = [false; 256];
        for (i, &v) in perm.iter().enumerate() {
            if std::mem::replace(&mut seen[usize::from(v)], true) {
                return Err(DotcloudError::validation(format!(
                    "seed table repeats value {v} at index {i}"
                )));
            }
        }
        Ok(Self::from_valid_permutation(&perm))
    }

    /// Seed from ambient process state (wall clock and pid).
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let pid = u64::from(std::process::id());
        Self::from_seed(nanos ^ pid.rotate_left(32))
    }

    fn from_valid_permutation(perm: &[u8; 256]) -> Self {
        let mut table = [0u8; 512];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = perm[i & 255];
        }
        Self { table }
    }

    /// The underlying 256-entry permutation.
    pub fn permutation(&self) -> &[u8] {
        &self.table[..256]
    }

    /// The full 512-entry lookup table.
    pub fn table(&self) -> &[u8; 512] {
        &self.table
    }

    #[inline]
    fn at(&self, i: usize) -> usize {
        usize::from(self.table[i])
    }
}

/// Deterministic 2D simplex noise over a fixed [`NoiseSeed`].
#[derive(Clone, Debug)]
pub struct NoiseKernel {
    seed: NoiseSeed,
}

impl Default for NoiseKernel {
    fn default() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }
}

impl NoiseKernel {
    /// Kernel over an existing seed table.
    pub fn new(seed: NoiseSeed) -> Self {
        Self { seed }
    }

    /// Kernel seeded from a 64-bit value.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(NoiseSeed::from_seed(seed))
    }

    /// The kernel's seed table.
    pub fn seed(&self) -> &NoiseSeed {
        &self.seed
    }

    /// Sample the noise field at `(x, y)`; the result lies in `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower triangle when x0 > y0, upper otherwise.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = wrap_cell(i);
        let jj = wrap_cell(j);

        let g0 = self.gradient_index(ii, jj);
        let g1 = self.gradient_index(ii + i1, jj + j1);
        let g2 = self.gradient_index(ii + 1, jj + 1);

        let n = corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2, x2, y2);
        (OUTPUT_SCALE * n + 1.0) * 0.5
    }

    #[inline]
    fn gradient_index(&self, i: usize, j: usize) -> usize {
        self.seed.at(i + self.seed.at(j)) & 7
    }
}

/// Lattice coordinate masked into `0..=255`; two's-complement wrap for negatives.
#[inline]
fn wrap_cell(c: f64) -> usize {
    // Saturating cast keeps absurdly large inputs finite; masking uses the low bits.
    ((c as i64) & 255) as usize
}

#[inline]
fn corner(gi: usize, dx: f64, dy: f64) -> f64 {
    let t = 0.5 - dx * dx - dy * dy;
    if t <= 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    let g = GRADIENTS[gi];
    t2 * t2 * (g[0] * dx + g[1] * dy)
}

#[cfg(test)]
#[path = "../../tests/unit/noise/simplex.rs"]
mod tests;
