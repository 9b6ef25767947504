use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::{
    foundation::{
        core::Fps,
        error::{OrreryError, OrreryResult},
    },
    render::backend::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub out_path: PathBuf,
    /// NeuQuant sampling speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
    /// Background to flatten alpha over (straight RGBA8).
    pub bg_rgba: [u8; 4],
}

impl EncodeConfig {
    pub fn validate(&self) -> OrreryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrreryError::validation("encode width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(OrreryError::validation(
                "encode width/height must fit in u16 (gif logical screen limit)",
            ));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(OrreryError::validation("gif encoder speed must be in 1..=30"));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(OrreryError::validation("encode out_path must be non-empty"));
        }
        Ok(())
    }

    /// Display time of frame `index` in GIF centiseconds.
    ///
    /// GIF delays are whole centiseconds, so each frame gets the difference of the rounded
    /// cumulative end times. At 30 fps this alternates 3/3/4 cs and the loop lasts exactly
    /// `frames / fps` seconds.
    pub fn frame_delay_cs(&self, index: u64) -> u16 {
        let end_cs = |n: u64| {
            let num = u128::from(self.fps.num);
            let scaled = u128::from(n) * 100 * u128::from(self.fps.den);
            (scaled * 2 + num) / (2 * num)
        };
        (end_cs(index + 1) - end_cs(index)).min(u128::from(u16::MAX)) as u16
    }

    pub fn frame_delay(&self, index: u64) -> image::Delay {
        image::Delay::from_numer_denom_ms(u32::from(self.frame_delay_cs(index)) * 10, 1)
    }
}

pub fn ensure_parent_dir(path: &Path) -> OrreryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// `Write` target the encoder owns while the sink keeps a handle to the bytes.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| std::io::Error::other("gif buffer lock poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn take(&self) -> OrreryResult<Vec<u8>> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| OrreryError::encode("gif buffer lock poisoned"))?;
        Ok(std::mem::take(&mut *inner))
    }
}

/// Streams frames into an in-memory looping GIF, then replaces `out_path` in one rename.
pub struct GifSink {
    cfg: EncodeConfig,
    encoder: Option<GifEncoder<SharedBuffer>>,
    buffer: SharedBuffer,
    scratch: Vec<u8>,
    frames: u64,
}

impl GifSink {
    pub fn new(cfg: EncodeConfig) -> OrreryResult<Self> {
        cfg.validate()?;

        let buffer = SharedBuffer::default();
        let mut encoder = GifEncoder::new_with_speed(buffer.clone(), cfg.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| OrreryError::encode(format!("failed to set gif repeat: {e}")))?;

        Ok(Self {
            scratch: vec![0u8; cfg.width as usize * cfg.height as usize * 4],
            cfg,
            encoder: Some(encoder),
            buffer,
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> OrreryResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(OrreryError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(OrreryError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.bg_rgba,
        )?;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(OrreryError::encode("gif encoder is already finalized"));
        };

        let image = image::RgbaImage::from_raw(self.cfg.width, self.cfg.height, self.scratch.clone())
            .ok_or_else(|| OrreryError::encode("frame buffer does not match gif dimensions"))?;
        encoder
            .encode_frame(image::Frame::from_parts(image, 0, 0, self.cfg.frame_delay(self.frames)))
            .map_err(|e| OrreryError::encode(format!("failed to encode gif frame: {e}")))?;

        self.frames += 1;
        Ok(())
    }

    /// Writes the trailer and atomically replaces `out_path` with the finished GIF.
    pub fn finish(mut self) -> OrreryResult<PathBuf> {
        if self.frames == 0 {
            return Err(OrreryError::encode("gif needs at least one frame"));
        }
        // Dropping the encoder writes the GIF trailer into the buffer.
        drop(self.encoder.take());
        let bytes = self.buffer.take()?;

        ensure_parent_dir(&self.cfg.out_path)?;
        // Each call gets its own temp file, so concurrent writers to one path never share one.
        let dir = match self.cfg.out_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".orrery-")
            .suffix(".gif.tmp")
            .tempfile_in(dir)
            .with_context(|| format!("create temp file in '{}'", dir.display()))?;
        tmp.write_all(&bytes)
            .with_context(|| format!("write gif to '{}'", tmp.path().display()))?;
        tmp.persist(&self.cfg.out_path)
            .map_err(|e| e.error)
            .with_context(|| format!("replace '{}'", self.cfg.out_path.display()))?;

        tracing::debug!(
            path = %self.cfg.out_path.display(),
            frames = self.frames,
            bytes = bytes.len(),
            "gif written"
        );
        Ok(self.cfg.out_path)
    }
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> OrreryResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(OrreryError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if src_is_premul {
            (
                s[0] as u16 + mul_div255(bg_r, inv),
                s[1] as u16 + mul_div255(bg_g, inv),
                s[2] as u16 + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(s[0] as u16, a) + mul_div255(bg_r, inv),
                mul_div255(s[1] as u16, a) + mul_div255(bg_g, inv),
                mul_div255(s[2] as u16, a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
