use rayon::prelude::*;

use crate::{
    config::model::DotGridConfig,
    foundation::{
        core::FrameTick,
        error::{DotcloudError, DotcloudResult},
    },
    noise::fbm::FractalComposer,
    render::{
        cpu::{CpuSurface, FrameRGBA},
        grid::{draw_frame, plan_frame},
        sink::FrameSink,
    },
    viewport::state::{DisplayMetrics, Viewport},
};

/// Render one tick offline into a fresh [`CpuSurface`].
///
/// Runs the same resize, clear, plan, and fill steps as the live loop and
/// returns **premultiplied** physical pixels.
pub fn render_frame(
    config: &DotGridConfig,
    field: &FractalComposer,
    metrics: DisplayMetrics,
    tick: FrameTick,
) -> DotcloudResult<FrameRGBA> {
    let mut surface = CpuSurface::new();
    let mut viewport = Viewport::new();
    let state = *viewport.resize(metrics, &mut surface)?;
    let plan = plan_frame(tick, &state, config, field)?;
    draw_frame(&plan, &state, &mut surface);
    Ok(surface.snapshot())
}

/// Threading options for [`render_frames`].
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render ticks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Ticks rendered per parallel batch; bounds peak memory before frames reach the sink.
    pub chunk_size: usize,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Counters from a batch render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Parallel batches executed (0 for sequential renders).
    pub chunks: u64,
}

/// Render independent ticks offline and push them to `sink` in tick order.
///
/// Each tick gets its own surface, so frames can be produced in parallel while
/// the sink still sees them in order.
pub fn render_frames(
    config: &DotGridConfig,
    metrics: DisplayMetrics,
    ticks: &[FrameTick],
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> DotcloudResult<RenderStats> {
    if ticks.is_empty() {
        return Err(DotcloudError::validation("render needs at least one tick"));
    }
    config.validate()?;
    let field = config.build_composer();
    let mut stats = RenderStats::default();

    if !threading.parallel {
        for (i, &tick) in ticks.iter().enumerate() {
            let frame = render_frame(config, &field, metrics, tick)?;
            sink.push_frame(i as u64, tick, &frame)?;
            stats.frames_rendered += 1;
        }
        sink.end()?;
        return Ok(stats);
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = threading.chunk_size.max(1);
    for (chunk_idx, chunk) in ticks.chunks(chunk_size).enumerate() {
        let frames: Vec<FrameRGBA> = pool.install(|| {
            chunk
                .par_iter()
                .map(|&tick| render_frame(config, &field, metrics, tick))
                .collect::<DotcloudResult<Vec<_>>>()
        })?;
        let base = (chunk_idx * chunk_size) as u64;
        for (offset, (frame, &tick)) in frames.iter().zip(chunk).enumerate() {
            sink.push_frame(base + offset as u64, tick, frame)?;
            stats.frames_rendered += 1;
        }
        stats.chunks += 1;
        tracing::debug!(chunk = chunk_idx, frames = chunk.len(), "rendered chunk");
    }
    sink.end()?;
    Ok(stats)
}

/// Ticks `start_ms, start_ms + 1000/fps, ...` for `count` frames.
pub fn ticks_at_fps(start_ms: f64, fps: f64, count: u64) -> DotcloudResult<Vec<FrameTick>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(DotcloudError::validation("fps must be finite and > 0"));
    }
    let step = 1000.0 / fps;
    Ok((0..count)
        .map(|i| FrameTick(start_ms + (i as f64) * step))
        .collect())
}

fn build_thread_pool(threads: Option<usize>) -> DotcloudResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(DotcloudError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DotcloudError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
