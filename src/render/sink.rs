use std::path::{Path, PathBuf};

use sha2::Digest as _;

use crate::{
    foundation::{
        core::FrameTick,
        error::{DotcloudError, DotcloudResult},
    },
    render::cpu::FrameRGBA,
};

/// Consumer of presented frames.
///
/// `push_frame` is called in presentation order with a strictly increasing `index`.
pub trait FrameSink {
    /// Accept one presented frame.
    fn push_frame(&mut self, index: u64, tick: FrameTick, frame: &FrameRGBA) -> DotcloudResult<()>;

    /// Called once after the last frame.
    fn end(&mut self) -> DotcloudResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Frames in presentation order.
    pub frames: Vec<(u64, FrameTick, FrameRGBA)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, index: u64, tick: FrameTick, frame: &FrameRGBA) -> DotcloudResult<()> {
        self.frames.push((index, tick, frame.clone()));
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    background: Option<[u8; 3]>,
    digests: Vec<String>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, creating it if needed.
    ///
    /// With `background`, frames are flattened over that color; otherwise PNGs keep alpha.
    pub fn create(dir: &Path, background: Option<[u8; 3]>) -> DotcloudResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            DotcloudError::Other(
                anyhow::Error::new(e).context(format!("create output dir '{}'", dir.display())),
            )
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            background,
            digests: Vec::new(),
        })
    }

    /// Path of the PNG for frame `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }

    /// SHA-256 (hex) of each written frame's premultiplied pixels, in order.
    pub fn digests(&self) -> &[String] {
        &self.digests
    }
}

impl FrameSink for PngSequenceSink {
    fn push_frame(&mut self, index: u64, _tick: FrameTick, frame: &FrameRGBA) -> DotcloudResult<()> {
        let path = self.frame_path(index);
        write_png(&path, frame, self.background)?;
        self.digests.push(sha256_hex(&frame.data));
        Ok(())
    }
}

/// Encode `frame` as a PNG at `path`.
pub fn write_png(path: &Path, frame: &FrameRGBA, background: Option<[u8; 3]>) -> DotcloudResult<()> {
    if frame.width == 0 || frame.height == 0 {
        return Err(DotcloudError::render("cannot encode an empty frame"));
    }
    let bytes = match background {
        Some(bg) => frame.flatten_over(bg),
        None => frame.to_straight_rgba8(),
    };
    image::save_buffer_with_format(
        path,
        &bytes,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| {
        DotcloudError::Other(
            anyhow::Error::new(e).context(format!("write png '{}'", path.display())),
        )
    })
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
