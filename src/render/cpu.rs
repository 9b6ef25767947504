use std::collections::HashMap;

use kurbo::Shape as _;

use crate::{
    compile::plan::{DrawOp, RenderPlan},
    foundation::{
        core::{Point, Rgba8},
        error::{OrreryError, OrreryResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        labels::{LabelKey, rasterize_label},
    },
};

/// Curve flattening tolerance for circles, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

#[derive(Default)]
pub struct CpuBackend {
    label_cache: HashMap<LabelKey, vello_cpu::Image>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn cached_labels(&self) -> usize {
        self.label_cache.len()
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> OrreryResult<FrameRGBA> {
        plan.canvas.validate()?;
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| OrreryError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| OrreryError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let mut ctx = vello_cpu::RenderContext::new(width, height);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(plan.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for op in &plan.ops {
            draw_op(self, &mut ctx, op)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn supports_cpu_workers(&self) -> bool {
        true
    }
}

fn draw_op(
    backend: &mut CpuBackend,
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
) -> OrreryResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillCircle {
            center,
            radius,
            color,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&circle_path(*center, *radius));
            Ok(())
        }
        DrawOp::StrokeCircle {
            center,
            radius,
            width,
            color,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&circle_path(*center, *radius));
            Ok(())
        }
        DrawOp::Label {
            text,
            anchor,
            size_px,
            color,
        } => {
            let key = LabelKey::new(text, *size_px, *color);
            let paint = backend.label_paint_for(&key)?;
            let (w, h) = image_paint_size(&paint)?;

            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                anchor.x.round(),
                (anchor.y - h / 2.0).round(),
            )));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            Ok(())
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let path = kurbo::Circle::new(center, radius.max(0.0)).to_path(PATH_TOLERANCE);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> OrreryResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| OrreryError::render("label width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| OrreryError::render("label height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(OrreryError::render("label sprite byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint_size(image: &vello_cpu::Image) -> OrreryResult<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Ok((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => Err(OrreryError::render(
            "cpu backend does not support opaque image ids",
        )),
    }
}

impl CpuBackend {
    fn label_paint_for(&mut self, key: &LabelKey) -> OrreryResult<vello_cpu::Image> {
        if let Some(paint) = self.label_cache.get(key) {
            return Ok(paint.clone());
        }

        let sprite = rasterize_label(key)?;
        let pixmap =
            image_premul_bytes_to_pixmap(&sprite.rgba8_premul, sprite.width, sprite.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.label_cache.insert(key.clone(), paint.clone());
        Ok(paint)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
