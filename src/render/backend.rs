use crate::{compile::plan::RenderPlan, foundation::error::OrreryResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 of the pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
        if !self.premultiplied || a == 255 || a == 0 {
            return Some([r, g, b, a]);
        }
        let unpremul = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
        Some([unpremul(r), unpremul(g), unpremul(b), a])
    }

    /// Copy of the pixel data with straight alpha, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            for x in 0..self.width {
                out.extend_from_slice(&self.pixel(x, y).unwrap_or([0, 0, 0, 0]));
            }
        }
        out
    }
}

pub trait RenderBackend: Send {
    fn render_plan(&mut self, plan: &RenderPlan) -> OrreryResult<FrameRGBA>;

    /// Whether frames may be rendered on a rayon pool with one fresh CPU backend per worker.
    fn supports_cpu_workers(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Cpu,
}

pub fn create_backend(kind: BackendKind) -> OrreryResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
