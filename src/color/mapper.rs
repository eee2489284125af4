use crate::foundation::error::{DotcloudError, DotcloudResult};

/// Straight-alpha color of one dot. Channels are in `0..=255`, alpha in `0..=1`,
/// except where an unclamped blend overshoots the glow endpoint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DotColor {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Opacity.
    pub a: f64,
}

impl DotColor {
    /// Opaque-channel color with the given opacity.
    pub fn from_rgb(rgb: [u8; 3], a: f64) -> Self {
        Self {
            r: f64::from(rgb[0]),
            g: f64::from(rgb[1]),
            b: f64::from(rgb[2]),
            a,
        }
    }

    /// Straight RGBA8. RGB truncates toward zero; out-of-range values saturate.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            self.r as u8,
            self.g as u8,
            self.b as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

/// Endpoint colors and thresholds for noise-to-color mapping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Color of dots below the threshold (`#3a352e` warm gray).
    pub base_rgb: [u8; 3],
    /// Color approached as noise rises above the threshold (light blue).
    pub glow_rgb: [u8; 3],
    /// Opacity of base dots.
    pub base_alpha: f64,
    /// Opacity reached at full glow.
    pub peak_alpha: f64,
    /// Noise level above which dots start to glow, in `[0, 1)`.
    pub threshold: f64,
    /// Clamp the blend factor to `[0, 1]` so values above 1 cannot overshoot the glow color.
    pub clamp_blend: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base_rgb: [58, 53, 46],
            glow_rgb: [120, 170, 220],
            base_alpha: 0.45,
            peak_alpha: 0.7,
            threshold: 0.70,
            clamp_blend: false,
        }
    }
}

impl PaletteConfig {
    /// Check that alphas and the threshold are usable.
    pub fn validate(&self) -> DotcloudResult<()> {
        if !(self.threshold.is_finite() && (0.0..1.0).contains(&self.threshold)) {
            return Err(DotcloudError::validation(
                "palette threshold must be in [0, 1)",
            ));
        }
        for (name, a) in [("base_alpha", self.base_alpha), ("peak_alpha", self.peak_alpha)] {
            if !(a.is_finite() && (0.0..=1.0).contains(&a)) {
                return Err(DotcloudError::validation(format!(
                    "palette {name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Maps a fractal noise value to a dot color.
#[derive(Clone, Copy, Debug)]
pub struct ColorMapper {
    palette: PaletteConfig,
    base: DotColor,
    glow: DotColor,
}

impl ColorMapper {
    /// Mapper over a palette.
    pub fn new(palette: PaletteConfig) -> Self {
        Self {
            palette,
            base: DotColor::from_rgb(palette.base_rgb, palette.base_alpha),
            glow: DotColor::from_rgb(palette.glow_rgb, palette.peak_alpha),
        }
    }

    /// The palette in use.
    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Color for noise value `n`.
    ///
    /// At or below the threshold this is exactly the base color. Above it, each
    /// channel and alpha moves toward the glow endpoint by `blend²`, where
    /// `blend = (n − θ) / (1 − θ)`. Without `clamp_blend`, `n > 1` pushes past
    /// the glow color.
    pub fn map(&self, n: f64) -> DotColor {
        let theta = self.palette.threshold;
        if n.is_nan() || n <= theta {
            return self.base;
        }
        let mut blend = (n - theta) / (1.0 - theta);
        if self.palette.clamp_blend {
            blend = blend.min(1.0);
        }
        let eased = blend * blend;
        DotColor {
            r: lerp(self.base.r, self.glow.r, eased),
            g: lerp(self.base.g, self.glow.g, eased),
            b: lerp(self.base.b, self.glow.b, eased),
            a: lerp(self.base.a, self.glow.a, eased),
        }
    }
}

// Exact at both endpoints.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
#[path = "../../tests/unit/color/mapper.rs"]
mod tests;
