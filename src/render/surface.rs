use crate::{
    color::mapper::DotColor,
    foundation::{
        core::{Affine, Point, Rect},
        error::DotcloudResult,
    },
};

/// Immediate-mode 2D raster target the animation draws into.
///
/// Coordinates passed to [`clear_rect`](DrawSurface::clear_rect) and
/// [`fill_circle`](DrawSurface::fill_circle) are transformed by the current
/// transform before they reach backing pixels.
pub trait DrawSurface {
    /// Reallocate the backing store to `width × height` physical pixels.
    fn resize_backing(&mut self, width: u32, height: u32) -> DotcloudResult<()>;

    /// Current backing size in physical pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Current transform.
    fn transform(&self) -> Affine;

    /// Reset `rect` (in transformed coordinates) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Set the fill color used by subsequent fills.
    fn set_fill(&mut self, color: DotColor);

    /// Fill a circle with the current fill color.
    fn fill_circle(&mut self, center: Point, radius: f64);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`DrawSurface::resize_backing`].
    ResizeBacking {
        /// Physical width.
        width: u32,
        /// Physical height.
        height: u32,
    },
    /// [`DrawSurface::set_transform`].
    SetTransform(Affine),
    /// [`DrawSurface::clear_rect`].
    ClearRect(Rect),
    /// [`DrawSurface::set_fill`].
    SetFill(DotColor),
    /// [`DrawSurface::fill_circle`].
    FillCircle {
        /// Center in transformed coordinates.
        center: Point,
        /// Radius in transformed coordinates.
        radius: f64,
    },
}

/// Surface that records every call instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    transform: Affine,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            transform: Affine::IDENTITY,
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    /// Empty recorder with a zero-sized backing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of circles filled so far.
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillCircle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn resize_backing(&mut self, width: u32, height: u32) -> DotcloudResult<()> {
        self.width = width;
        self.height = height;
        self.calls.push(DrawCall::ResizeBacking { width, height });
        Ok(())
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.calls.push(DrawCall::SetTransform(transform));
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClearRect(rect));
    }

    fn set_fill(&mut self, color: DotColor) {
        self.calls.push(DrawCall::SetFill(color));
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.calls.push(DrawCall::FillCircle { center, radius });
    }
}
