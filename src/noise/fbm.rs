use crate::{
    foundation::error::{DotcloudError, DotcloudResult},
    noise::simplex::NoiseKernel,
};

/// Octave layout for fractal Brownian motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Number of kernel evaluations summed per sample.
    pub octaves: u32,
    /// Frequency multiplier applied after each octave.
    pub lacunarity: f64,
    /// Amplitude multiplier applied after each octave.
    pub persistence: f64,
    /// Amplitude of the first octave.
    pub initial_amplitude: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 3,
            lacunarity: 2.2,
            persistence: 0.45,
            initial_amplitude: 0.6,
        }
    }
}

impl FractalParams {
    /// Reject layouts that would produce non-finite or empty sums.
    pub fn validate(&self) -> DotcloudResult<()> {
        if self.octaves == 0 {
            return Err(DotcloudError::validation("fractal octaves must be >= 1"));
        }
        if self.octaves > 16 {
            return Err(DotcloudError::validation("fractal octaves must be <= 16"));
        }
        for (name, v) in [
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
            ("initial_amplitude", self.initial_amplitude),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DotcloudError::validation(format!(
                    "fractal {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Largest value [`FractalComposer::fbm`] can return, reached when every octave samples 1.
    pub fn max_output(&self) -> f64 {
        let mut amp = self.initial_amplitude;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            total += amp;
            amp *= self.persistence;
        }
        total
    }
}

/// Multi-octave composition over a [`NoiseKernel`].
#[derive(Clone, Debug)]
pub struct FractalComposer {
    kernel: NoiseKernel,
    params: FractalParams,
}

impl FractalComposer {
    /// Compose `kernel` with the given octave layout.
    pub fn new(kernel: NoiseKernel, params: FractalParams) -> Self {
        Self { kernel, params }
    }

    /// The underlying kernel.
    pub fn kernel(&self) -> &NoiseKernel {
        &self.kernel
    }

    /// The octave layout.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    /// Weighted octave sum at `(x, y)`.
    ///
    /// Not clamped: with amplitudes summing above 1 the result can leave `[0, 1]`.
    pub fn fbm(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut amp = self.params.initial_amplitude;
        let mut freq = 1.0;
        for _ in 0..self.params.octaves {
            value += amp * self.kernel.sample(x * freq, y * freq);
            freq *= self.params.lacunarity;
            amp *= self.params.persistence;
        }
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/noise/fbm.rs"]
mod tests;
