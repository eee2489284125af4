pub use kurbo::{Affine, Point, Rect};

/// Timestamp delivered with an animation-frame callback, in milliseconds.
///
/// Ticks are monotonically increasing within one run and are consumed once to
/// derive the frame's time phase.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct FrameTick(pub f64);

impl FrameTick {
    /// Time phase fed to the noise field: `timestamp × time_speed`.
    pub fn phase(self, time_speed: f64) -> f64 {
        self.0 * time_speed
    }
}

/// Logical size in layout pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl LogicalSize {
    /// Build a logical size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The rectangle `(0, 0) .. (width, height)`.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
