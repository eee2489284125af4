//! dotcloud renders a drifting "cloud" over a grid of dots.
//!
//! Every frame, each dot of a regular lattice samples a seeded simplex-noise
//! field (layered into fractal Brownian motion) at a position that drifts with
//! time. Dots whose noise rises above a threshold glow from warm gray toward
//! light blue.
//!
//! # Pipeline overview
//!
//! 1. **Resize**: `DisplayMetrics -> ViewportState` (logical size, pixel ratio, backing transform)
//! 2. **Plan**: `FrameTick + ViewportState + DotGridConfig -> FramePlan` (pure, one dot per cell)
//! 3. **Draw**: `FramePlan -> DrawSurface` (clear, then one filled circle per dot)
//! 4. **Schedule**: [`DotGridAnimation`] binds the steps above to an [`AnimationHost`]
//!    and re-requests a frame after every tick until stopped
//!
//! Key properties:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic for a fixed seed**: noise, plans, and CPU frames are reproducible.
//! - **Logical coordinates**: only the viewport knows about device pixels.
//! - **Premultiplied RGBA8** frames come out of [`CpuSurface`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod config;
mod foundation;
mod noise;
mod render;
mod schedule;
mod viewport;

pub use color::mapper::{ColorMapper, DotColor, PaletteConfig};
pub use config::model::{DotGridConfig, FieldMotion, GridLayout};
pub use foundation::core::{Affine, FrameTick, LogicalSize, Point, Rect};
pub use foundation::error::{DotcloudError, DotcloudResult};
pub use foundation::math::Rng64;
pub use noise::fbm::{FractalComposer, FractalParams};
pub use noise::simplex::{DEFAULT_SEED, F2, G2, GRADIENTS, NoiseKernel, NoiseSeed};
pub use render::cpu::{CpuSurface, FrameRGBA};
pub use render::grid::{DotCommand, FramePlan, GridExtent, draw_frame, plan_frame, rasterize};
pub use render::pipeline::{RenderStats, RenderThreading, render_frame, render_frames, ticks_at_fps};
pub use render::sink::{FrameSink, InMemorySink, PngSequenceSink, sha256_hex, write_png};
pub use render::surface::{DrawCall, DrawSurface, RecordingSurface};
pub use schedule::animator::{DotGridAnimation, FrameStats};
pub use schedule::headless::HeadlessHost;
pub use schedule::host::{AnimationHost, FrameRequestId, HostEvent};
pub use viewport::state::{DisplayMetrics, Viewport, ViewportState};
