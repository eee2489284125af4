use crate::{
    foundation::{
        core::{Affine, LogicalSize},
        error::DotcloudResult,
    },
    render::surface::DrawSurface,
};

/// What the host reports about the display area.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayMetrics {
    /// Window width in logical pixels.
    pub logical_width: f64,
    /// Window height in logical pixels.
    pub logical_height: f64,
    /// Physical pixels per logical pixel; hosts may report 0 when unknown.
    pub device_pixel_ratio: f64,
}

impl DisplayMetrics {
    /// Metrics for a `width × height` window at `device_pixel_ratio`.
    pub fn new(logical_width: f64, logical_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            logical_width,
            logical_height,
            device_pixel_ratio,
        }
    }
}

/// Logical viewport geometry read by every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportState {
    /// Width in logical pixels.
    pub logical_width: f64,
    /// Height in logical pixels.
    pub logical_height: f64,
    /// Effective device pixel ratio (always finite and > 0).
    pub device_pixel_ratio: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            logical_width: 0.0,
            logical_height: 0.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ViewportState {
    /// Derive state from host metrics, sanitizing the inputs.
    ///
    /// Missing or non-positive pixel ratios fall back to 1; negative or non-finite
    /// sizes collapse to 0.
    pub fn from_metrics(m: DisplayMetrics) -> Self {
        let dpr = if m.device_pixel_ratio.is_finite() && m.device_pixel_ratio > 0.0 {
            m.device_pixel_ratio
        } else {
            1.0
        };
        Self {
            logical_width: sanitize_len(m.logical_width),
            logical_height: sanitize_len(m.logical_height),
            device_pixel_ratio: dpr,
        }
    }

    /// Logical size.
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.logical_width, self.logical_height)
    }

    /// Backing store size: `round(logical × dpr)` per axis.
    pub fn physical_size(&self) -> (u32, u32) {
        let px = |v: f64| (v * self.device_pixel_ratio).round() as u32;
        (px(self.logical_width), px(self.logical_height))
    }

    /// Transform taking logical drawing coordinates to physical pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }
}

fn sanitize_len(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Owner of the shared [`ViewportState`].
///
/// Only [`Viewport::resize`] writes the state; frames read it through
/// [`Viewport::state`]. The single-threaded host loop keeps the two from interleaving.
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    state: ViewportState,
}

impl Viewport {
    /// Viewport with zero size and a pixel ratio of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Apply host metrics: size the backing store to `logical × dpr` and install
    /// the `scale(dpr)` transform so everything else draws in logical pixels.
    ///
    /// Safe to call repeatedly; unchanged metrics give an unchanged state and transform.
    #[tracing::instrument(skip(self, surface))]
    pub fn resize(
        &mut self,
        metrics: DisplayMetrics,
        surface: &mut dyn DrawSurface,
    ) -> DotcloudResult<&ViewportState> {
        let next = ViewportState::from_metrics(metrics);
        let (pw, ph) = next.physical_size();
        surface.resize_backing(pw, ph)?;
        surface.set_transform(next.transform());
        if next != self.state {
            tracing::debug!(
                width = next.logical_width,
                height = next.logical_height,
                dpr = next.device_pixel_ratio,
                physical_width = pw,
                physical_height = ph,
                "viewport resized"
            );
        }
        self.state = next;
        Ok(&self.state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/state.rs"]
mod tests;
