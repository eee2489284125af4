//! Per-frame grid planning and rasterization.
//!
//! [`plan_frame`] is a pure function of `(timestamp, viewport, config, field)`
//! and returns the ordered dot list for one tick. [`draw_frame`] clears the
//! viewport and replays a plan into any [`DrawSurface`].

use crate::{
    color::mapper::{ColorMapper, DotColor},
    config::model::DotGridConfig,
    foundation::{
        core::{FrameTick, Point},
        error::{DotcloudError, DotcloudResult},
    },
    noise::fbm::FractalComposer,
    render::surface::DrawSurface,
    viewport::state::ViewportState,
};

/// Number of dot rows and columns needed to cover a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridExtent {
    /// Dots per row.
    pub cols: u32,
    /// Dots per column.
    pub rows: u32,
}

impl GridExtent {
    /// Upper bound on dots planned for a single frame.
    pub const MAX_DOTS: usize = 1 << 24;

    /// `ceil(size / spacing) + 1` per axis, so partial edge cells are covered.
    ///
    /// Fails when `spacing` is not a positive finite number or the grid would
    /// exceed [`GridExtent::MAX_DOTS`].
    pub fn for_viewport(viewport: &ViewportState, spacing: f64) -> DotcloudResult<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(DotcloudError::validation(
                "grid spacing must be finite and > 0",
            ));
        }
        // Float-to-int casts saturate, so only the edge column can overflow.
        let span = |len: f64| ((len / spacing).ceil() as u32).saturating_add(1);
        let extent = Self {
            cols: span(viewport.logical_width),
            rows: span(viewport.logical_height),
        };
        if u64::from(extent.cols) * u64::from(extent.rows) > Self::MAX_DOTS as u64 {
            return Err(DotcloudError::validation(format!(
                "grid of {}x{} dots exceeds the per-frame limit of {}",
                extent.cols,
                extent.rows,
                Self::MAX_DOTS
            )));
        }
        Ok(extent)
    }

    /// Total dots drawn per frame.
    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Always false; a grid covers at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotCommand {
    /// Center in logical pixels.
    pub center: Point,
    /// Fill color.
    pub color: DotColor,
}

/// Everything drawn for one tick, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Tick the plan was computed for.
    pub tick: FrameTick,
    /// Grid dimensions.
    pub extent: GridExtent,
    /// Dot radius in logical pixels.
    pub radius: f64,
    /// Dots, row-major.
    pub dots: Vec<DotCommand>,
}

/// Compute the dots for one tick.
///
/// The sample point for the dot at `(px, py)` is
/// `(px × scale + t, py × scale + t × drift)` with `t = timestamp × time_speed`.
/// Errors only when the grid extent is out of range.
#[tracing::instrument(level = "trace", skip(viewport, config, field))]
pub fn plan_frame(
    tick: FrameTick,
    viewport: &ViewportState,
    config: &DotGridConfig,
    field: &FractalComposer,
) -> DotcloudResult<FramePlan> {
    let spacing = config.grid.spacing;
    let scale = config.field.noise_scale;
    let t = tick.phase(config.field.time_speed);
    let ty = t * config.field.vertical_drift;
    let mapper = ColorMapper::new(config.palette);

    let extent = GridExtent::for_viewport(viewport, spacing)?;
    let mut dots = Vec::with_capacity(extent.len());
    for row in 0..extent.rows {
        let py = f64::from(row) * spacing;
        for col in 0..extent.cols {
            let px = f64::from(col) * spacing;
            let n = field.fbm(px * scale + t, py * scale + ty);
            dots.push(DotCommand {
                center: Point::new(px, py),
                color: mapper.map(n),
            });
        }
    }

    Ok(FramePlan {
        tick,
        extent,
        radius: config.grid.dot_radius,
        dots,
    })
}

/// Fill every dot of `plan` into `surface`, without clearing first.
pub fn rasterize(plan: &FramePlan, surface: &mut dyn DrawSurface) {
    for dot in &plan.dots {
        surface.set_fill(dot.color);
        surface.fill_circle(dot.center, plan.radius);
    }
}

/// Clear the logical viewport, then rasterize `plan`.
pub fn draw_frame(plan: &FramePlan, viewport: &ViewportState, surface: &mut dyn DrawSurface) {
    surface.clear_rect(viewport.logical_size().to_rect());
    rasterize(plan, surface);
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
