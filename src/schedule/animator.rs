use std::time::Instant;

use crate::{
    config::model::DotGridConfig,
    foundation::{core::FrameTick, error::DotcloudResult},
    noise::fbm::FractalComposer,
    render::grid::{draw_frame, plan_frame},
    schedule::host::{AnimationHost, FrameRequestId, HostEvent},
    viewport::state::{Viewport, ViewportState},
};

/// Timing counters for a running animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame callbacks that drew.
    pub frames_rendered: u64,
    /// Frames that took longer than the configured budget.
    pub budget_overruns: u64,
    /// Slowest frame so far, in milliseconds.
    pub max_frame_ms: f64,
    /// Tick of the most recent frame.
    pub last_tick: Option<FrameTick>,
}

/// The dot-grid cloud animation bound to a host.
///
/// Created by [`DotGridAnimation::start`], which performs the initial resize and
/// requests the first frame. Each frame clears the viewport, draws the grid, and
/// requests the next frame; [`DotGridAnimation::stop`] cancels the pending request.
pub struct DotGridAnimation {
    config: DotGridConfig,
    field: FractalComposer,
    viewport: Viewport,
    pending: Option<FrameRequestId>,
    running: bool,
    stats: FrameStats,
}

impl std::fmt::Debug for DotGridAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotGridAnimation")
            .field("viewport", self.viewport.state())
            .field("pending", &self.pending)
            .field("running", &self.running)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl DotGridAnimation {
    /// Bind an animation to `host` and schedule its first frame.
    ///
    /// Returns `Ok(None)` without touching the scheduler when the host has no
    /// drawing surface. Configuration errors are reported before anything starts.
    pub fn start(
        config: DotGridConfig,
        host: &mut dyn AnimationHost,
    ) -> DotcloudResult<Option<Self>> {
        config.validate()?;
        let metrics = host.display_metrics();
        let Some(surface) = host.surface() else {
            tracing::debug!("no drawing surface; animation not started");
            return Ok(None);
        };

        let mut viewport = Viewport::new();
        viewport.resize(metrics, surface)?;

        let field = config.build_composer();
        let id = host.request_animation_frame();
        tracing::debug!(request = id.0, "animation started");
        Ok(Some(Self {
            config,
            field,
            viewport,
            pending: Some(id),
            running: true,
            stats: FrameStats::default(),
        }))
    }

    /// Cancel the pending frame request. Later frame events are ignored.
    pub fn stop(&mut self, host: &mut dyn AnimationHost) {
        if let Some(id) = self.pending.take() {
            host.cancel_animation_frame(id);
        }
        if self.running {
            tracing::debug!(frames = self.stats.frames_rendered, "animation stopped");
        }
        self.running = false;
    }

    /// Whether frames are still being scheduled.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request id of the frame currently scheduled, if any.
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    /// Timing counters.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Current viewport state.
    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    /// React to one host event.
    ///
    /// A failed frame or resize is logged and returned, but the next frame is
    /// already scheduled, so the animation stays live and can be pumped again.
    pub fn handle_event(
        &mut self,
        host: &mut dyn AnimationHost,
        event: HostEvent,
    ) -> DotcloudResult<()> {
        match event {
            HostEvent::Resize => self.on_resize(host).inspect_err(|err| {
                tracing::warn!(error = %err, "resize failed; keeping previous viewport");
            }),
            HostEvent::Frame { id, tick } => {
                if !self.running || self.pending != Some(id) {
                    tracing::trace!(request = id.0, "ignoring stale frame");
                    return Ok(());
                }
                self.pending = None;
                let drawn = self.on_frame(host, tick);
                if self.running {
                    self.pending = Some(host.request_animation_frame());
                }
                drawn.inspect_err(|err| {
                    tracing::warn!(tick_ms = tick.0, error = %err, "frame failed");
                })
            }
        }
    }

    /// Pump host events until the host shuts down or the animation is stopped.
    pub fn run_until_stopped(&mut self, host: &mut dyn AnimationHost) -> DotcloudResult<()> {
        while self.running {
            let Some(event) = host.next_event() else {
                break;
            };
            self.handle_event(host, event)?;
        }
        Ok(())
    }

    fn on_resize(&mut self, host: &mut dyn AnimationHost) -> DotcloudResult<()> {
        let metrics = host.display_metrics();
        if let Some(surface) = host.surface() {
            self.viewport.resize(metrics, surface)?;
        }
        Ok(())
    }

    fn on_frame(&mut self, host: &mut dyn AnimationHost, tick: FrameTick) -> DotcloudResult<()> {
        let started = Instant::now();
        let state = *self.viewport.state();
        let Some(surface) = host.surface() else {
            return Ok(());
        };
        let plan = plan_frame(tick, &state, &self.config, &self.field)?;
        draw_frame(&plan, &state, surface);
        host.present(tick)?;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.record_frame(tick, elapsed_ms, plan.dots.len());
        Ok(())
    }

    fn record_frame(&mut self, tick: FrameTick, elapsed_ms: f64, dots: usize) {
        let budget = self.config.frame_budget_ms();
        let stats = &mut self.stats;
        stats.frames_rendered += 1;
        stats.last_tick = Some(tick);
        stats.max_frame_ms = stats.max_frame_ms.max(elapsed_ms);
        if elapsed_ms > budget {
            stats.budget_overruns += 1;
            tracing::warn!(
                tick_ms = tick.0,
                elapsed_ms,
                budget_ms = budget,
                dots,
                "frame exceeded budget"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/animator.rs"]
mod tests;
