use crate::{
    foundation::{core::FrameTick, error::DotcloudResult},
    render::surface::DrawSurface,
    viewport::state::DisplayMetrics,
};

/// Handle for one pending animation-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// Event delivered by a host's event loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The window size or pixel ratio changed; re-query [`AnimationHost::display_metrics`].
    Resize,
    /// A requested animation frame is due.
    Frame {
        /// The request being fulfilled.
        id: FrameRequestId,
        /// Monotonic timestamp for this display refresh.
        tick: FrameTick,
    },
}

/// The environment an animation runs in: display geometry, a drawing surface,
/// and a one-shot animation-frame scheduler.
///
/// Hosts deliver events one at a time, so frame and resize handling never interleave.
pub trait AnimationHost {
    /// Current window size and device pixel ratio.
    fn display_metrics(&self) -> DisplayMetrics;

    /// The drawing surface, or `None` if the host has none.
    fn surface(&mut self) -> Option<&mut dyn DrawSurface>;

    /// Ask for one [`HostEvent::Frame`] at the next display refresh.
    fn request_animation_frame(&mut self) -> FrameRequestId;

    /// Withdraw a pending request; unknown or fulfilled ids are ignored.
    fn cancel_animation_frame(&mut self, id: FrameRequestId);

    /// Block until the next event; `None` once the host has shut down.
    fn next_event(&mut self) -> Option<HostEvent>;

    /// Called after a frame callback finishes drawing.
    fn present(&mut self, _tick: FrameTick) -> DotcloudResult<()> {
        Ok(())
    }
}
