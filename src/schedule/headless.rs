use std::collections::{BTreeMap, VecDeque};

use crate::{
    foundation::{
        core::FrameTick,
        error::{DotcloudError, DotcloudResult},
    },
    render::{cpu::CpuSurface, sink::FrameSink, surface::DrawSurface},
    schedule::host::{AnimationHost, FrameRequestId, HostEvent},
    viewport::state::DisplayMetrics,
};

/// Host driven by a virtual clock instead of a display.
///
/// Refreshes happen every `1000 / fps` milliseconds starting at `start_ms`. A
/// pending frame request is fulfilled at the next refresh; refreshes with no
/// pending request are skipped. Scripted resizes fire before the frame with the
/// matching index. The host shuts down after `max_frames` presented frames.
pub struct HeadlessHost<S: FrameSink> {
    metrics: DisplayMetrics,
    surface: Option<CpuSurface>,
    sink: S,
    frame_interval_ms: f64,
    next_refresh_ms: f64,
    max_frames: u64,
    presented: u64,
    next_request: u64,
    pending: Option<FrameRequestId>,
    resizes: BTreeMap<u64, DisplayMetrics>,
    queued: VecDeque<HostEvent>,
}

impl<S: FrameSink> HeadlessHost<S> {
    /// Host with a CPU surface, refreshing at `fps` and presenting into `sink`.
    pub fn new(metrics: DisplayMetrics, fps: f64, max_frames: u64, sink: S) -> DotcloudResult<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(DotcloudError::validation("fps must be finite and > 0"));
        }
        Ok(Self {
            metrics,
            surface: Some(CpuSurface::new()),
            sink,
            frame_interval_ms: 1000.0 / fps,
            next_refresh_ms: 0.0,
            max_frames,
            presented: 0,
            next_request: 0,
            pending: None,
            resizes: BTreeMap::new(),
            queued: VecDeque::new(),
        })
    }

    /// Host without a drawing surface.
    pub fn without_surface(mut self) -> Self {
        self.surface = None;
        self
    }

    /// Timestamp of the first refresh.
    pub fn with_start_ms(mut self, start_ms: f64) -> Self {
        self.next_refresh_ms = start_ms;
        self
    }

    /// Change the window to `metrics` just before frame `frame_index` is delivered.
    pub fn schedule_resize(&mut self, frame_index: u64, metrics: DisplayMetrics) {
        self.resizes.insert(frame_index, metrics);
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    /// The drawing surface, if any.
    pub fn cpu_surface(&mut self) -> Option<&mut CpuSurface> {
        self.surface.as_mut()
    }

    /// The frame sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Close the sink and hand it back.
    pub fn finish(mut self) -> DotcloudResult<S> {
        self.sink.end()?;
        Ok(self.sink)
    }
}

impl<S: FrameSink> AnimationHost for HeadlessHost<S> {
    fn display_metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    fn surface(&mut self) -> Option<&mut dyn DrawSurface> {
        self.surface.as_mut().map(|s| s as &mut dyn DrawSurface)
    }

    fn request_animation_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_request);
        self.next_request += 1;
        self.pending = Some(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameRequestId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        if let Some(ev) = self.queued.pop_front() {
            return Some(ev);
        }
        if self.presented >= self.max_frames {
            return None;
        }
        let id = self.pending.take()?;

        let tick = FrameTick(self.next_refresh_ms);
        self.next_refresh_ms += self.frame_interval_ms;
        let frame = HostEvent::Frame { id, tick };

        if let Some(metrics) = self.resizes.remove(&self.presented) {
            self.metrics = metrics;
            self.queued.push_back(frame);
            return Some(HostEvent::Resize);
        }
        Some(frame)
    }

    fn present(&mut self, tick: FrameTick) -> DotcloudResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let frame = surface.snapshot();
        self.sink.push_frame(self.presented, tick, &frame)?;
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/headless.rs"]
mod tests;
