use vello_cpu::kurbo::Shape as _;

use crate::{
    color::mapper::DotColor,
    foundation::{
        core::{Affine, Point, Rect},
        error::{DotcloudError, DotcloudResult},
        math::over_premul,
    },
    render::surface::DrawSurface,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from [`CpuSurface`] are **premultiplied alpha**; the flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy, suitable for PNG encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                px.copy_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Opaque straight RGBA8 with every pixel composited over `bg_rgb`.
    pub fn flatten_over(&self, bg_rgb: [u8; 3]) -> Vec<u8> {
        let bg = [bg_rgb[0], bg_rgb[1], bg_rgb[2], 255];
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let src = if self.premultiplied {
                [px[0], px[1], px[2], px[3]]
            } else {
                premul_rgba8(px[0], px[1], px[2], px[3])
            };
            out.extend_from_slice(&over_premul(bg, src));
        }
        out
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}

/// CPU raster surface backed by a `vello_cpu` pixmap.
///
/// Fills are recorded into a `vello_cpu::RenderContext` and composited onto the
/// retained pixmap whenever the pixels are needed: on `clear_rect`, `resize_backing`
/// and [`CpuSurface::snapshot`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: Option<vello_cpu::Pixmap>,
    pending: Option<vello_cpu::RenderContext>,
    transform: Affine,
    fill: DotColor,
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// Surface with a zero-sized backing store; call `resize_backing` before drawing.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            pixmap: None,
            pending: None,
            transform: Affine::IDENTITY,
            fill: DotColor {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
        }
    }

    /// Surface already sized to `width × height` physical pixels.
    pub fn with_size(width: u32, height: u32) -> DotcloudResult<Self> {
        let mut s = Self::new();
        s.resize_backing(width, height)?;
        Ok(s)
    }

    /// Composite pending fills and copy the current pixels out.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.flush();
        let data = self
            .pixmap
            .as_ref()
            .map(|p| p.data_as_u8_slice().to_vec())
            .unwrap_or_default();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }

    fn flush(&mut self) {
        let Some(mut ctx) = self.pending.take() else {
            return;
        };
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);

        let dst = pixmap.data_as_u8_slice_mut();
        for (d, s) in dst.chunks_exact_mut(4).zip(layer.data_as_u8_slice().chunks_exact(4)) {
            let out = over_premul([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }

    fn context(&mut self) -> Option<&mut vello_cpu::RenderContext> {
        self.pixmap.as_ref()?;
        let (w, h) = (self.width, self.height);
        Some(
            self.pending
                .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h)),
        )
    }
}

impl DrawSurface for CpuSurface {
    fn resize_backing(&mut self, width: u32, height: u32) -> DotcloudResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| DotcloudError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| DotcloudError::render("surface height exceeds u16"))?;

        // Resizing a canvas discards its contents and transform.
        self.pending = None;
        self.transform = Affine::IDENTITY;
        self.width = width_u16;
        self.height = height_u16;
        self.pixmap = if width_u16 == 0 || height_u16 == 0 {
            None
        } else {
            Some(vello_cpu::Pixmap::new(width_u16, height_u16))
        };
        Ok(())
    }

    fn backing_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.flush();
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let bbox = self.transform.transform_rect_bbox(rect);
        let x0 = bbox.x0.floor().clamp(0.0, w as f64) as usize;
        let x1 = bbox.x1.ceil().clamp(0.0, w as f64) as usize;
        let y0 = bbox.y0.floor().clamp(0.0, h as f64) as usize;
        let y1 = bbox.y1.ceil().clamp(0.0, h as f64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let data = pixmap.data_as_u8_slice_mut();
        for y in y0..y1 {
            data[(y * w + x0) * 4..(y * w + x1) * 4].fill(0);
        }
    }

    fn set_fill(&mut self, color: DotColor) {
        self.fill = color;
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        let transform = affine_to_cpu(self.transform);
        let [r, g, b, a] = self.fill.to_rgba8();
        let Some(ctx) = self.context() else {
            return;
        };
        ctx.set_transform(transform);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        let circle =
            vello_cpu::kurbo::Circle::new(vello_cpu::kurbo::Point::new(center.x, center.y), radius);
        ctx.fill_path(&circle.to_path(0.01));
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
