use std::path::Path;

use crate::{
    color::mapper::PaletteConfig,
    foundation::error::{DotcloudError, DotcloudResult},
    noise::{
        fbm::{FractalComposer, FractalParams},
        simplex::{DEFAULT_SEED, NoiseKernel},
    },
};

/// Dot lattice geometry in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Distance between neighbouring dot centers.
    pub spacing: f64,
    /// Radius of each dot.
    pub dot_radius: f64,
}

impl GridLayout {
    /// Smallest accepted spacing in logical pixels.
    pub const MIN_SPACING: f64 = 0.5;
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            spacing: 24.0,
            dot_radius: 0.8,
        }
    }
}

/// How pixel positions and time feed the noise field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldMotion {
    /// Noise units per logical pixel (smaller means larger clouds).
    pub noise_scale: f64,
    /// Noise units per millisecond of animation time.
    pub time_speed: f64,
    /// Fraction of the horizontal drift rate applied to the vertical axis.
    pub vertical_drift: f64,
}

impl Default for FieldMotion {
    fn default() -> Self {
        Self {
            noise_scale: 0.008,
            time_speed: 0.0004,
            vertical_drift: 0.7,
        }
    }
}

/// Everything that shapes one run of the dot-grid animation.
///
/// All values are fixed for the lifetime of a run. Defaults reproduce the
/// warm-gray/light-blue cloud exactly.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DotGridConfig {
    /// Lattice geometry.
    pub grid: GridLayout,
    /// Noise field sampling.
    pub field: FieldMotion,
    /// Colors, alphas, and glow threshold.
    pub palette: PaletteConfig,
    /// Octave layout.
    pub fractal: FractalParams,
    /// Permutation seed; `None` seeds from ambient entropy.
    pub seed: Option<u64>,
    /// Soft per-frame budget in milliseconds; overruns are logged.
    pub frame_budget_ms: Option<f64>,
}

impl DotGridConfig {
    /// Default per-frame budget for a 60 Hz display.
    pub const DEFAULT_FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

    /// Defaults with the fixed [`DEFAULT_SEED`].
    pub fn seeded_default() -> Self {
        Self {
            seed: Some(DEFAULT_SEED),
            ..Self::default()
        }
    }

    /// Effective frame budget.
    pub fn frame_budget_ms(&self) -> f64 {
        self.frame_budget_ms
            .unwrap_or(Self::DEFAULT_FRAME_BUDGET_MS)
    }

    /// Validate every section.
    pub fn validate(&self) -> DotcloudResult<()> {
        if !(self.grid.spacing.is_finite() && self.grid.spacing >= GridLayout::MIN_SPACING) {
            return Err(DotcloudError::validation(format!(
                "grid spacing must be finite and >= {}",
                GridLayout::MIN_SPACING
            )));
        }
        if !(self.grid.dot_radius.is_finite() && self.grid.dot_radius > 0.0) {
            return Err(DotcloudError::validation(
                "grid dot_radius must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("noise_scale", self.field.noise_scale),
            ("time_speed", self.field.time_speed),
            ("vertical_drift", self.field.vertical_drift),
        ] {
            if !v.is_finite() {
                return Err(DotcloudError::validation(format!(
                    "field {name} must be finite"
                )));
            }
        }
        if let Some(budget) = self.frame_budget_ms
            && !(budget.is_finite() && budget > 0.0)
        {
            return Err(DotcloudError::validation(
                "frame_budget_ms must be finite and > 0",
            ));
        }
        self.palette.validate()?;
        self.fractal.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> DotcloudResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| DotcloudError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> DotcloudResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            DotcloudError::Other(
                anyhow::Error::new(e).context(format!("read config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON rendering of this config.
    pub fn to_json_pretty(&self) -> DotcloudResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DotcloudError::serde(e.to_string()))
    }

    /// Build the noise stack this config describes.
    pub fn build_composer(&self) -> FractalComposer {
        let kernel = match self.seed {
            Some(seed) => NoiseKernel::from_seed(seed),
            None => NoiseKernel::new(crate::noise::simplex::NoiseSeed::from_entropy()),
        };
        FractalComposer::new(kernel, self.fractal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
