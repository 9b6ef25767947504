use crate::{
    eval::evaluator::OrbitFrame,
    foundation::core::{Canvas, Point, Rgba8},
    system::bodies::{Body, max_scaled_radius},
};

/// Side length the marker and label sizes in [`PlotStyle`] are tuned for.
const REFERENCE_SIDE_PX: f64 = 600.0;

/// Visual parameters shared by every frame of an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    pub background: Rgba8,
    pub guide_color: Rgba8,
    pub guide_width_px: f64,
    pub label_color: Rgba8,
    pub label_size_px: f64,
    /// Marker radius in pixels per unit of `display_size`, at the reference canvas size.
    pub marker_px_per_size: f64,
    /// World extent is the outermost orbit times this factor.
    pub extent_margin: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(11, 13, 23),
            guide_color: Rgba8::rgba(255, 255, 255, 46),
            guide_width_px: 1.0,
            label_color: Rgba8::rgb(225, 228, 236),
            label_size_px: 12.0,
            marker_px_per_size: 0.7,
            extent_margin: 1.15,
        }
    }
}

/// Maps world units (origin-centred, y up) to canvas pixels (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub px_per_unit: f64,
    /// Scale of marker and label sizes relative to the reference canvas.
    pub size_scale: f64,
}

impl Viewport {
    pub fn fit(canvas: Canvas, max_radius: f64, margin: f64) -> Self {
        let extent = if max_radius > 0.0 {
            max_radius * margin.max(1.0)
        } else {
            1.0
        };
        Self {
            center: canvas.center(),
            px_per_unit: (canvas.min_side() / 2.0) / extent,
            size_scale: canvas.min_side() / REFERENCE_SIDE_PX,
        }
    }

    pub fn to_px(&self, p: Point) -> Point {
        Point::new(
            self.center.x + p.x * self.px_per_unit,
            self.center.y - p.y * self.px_per_unit,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgba8,
    },
    /// `anchor` is the left edge, vertical middle of the label.
    Label {
        text: String,
        anchor: Point,
        size_px: f64,
        color: Rgba8,
    },
}

/// Everything the backend needs to rasterise one frame, in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub ops: Vec<DrawOp>,
}

pub fn compile_frame(
    frame: &OrbitFrame,
    bodies: &[Body],
    canvas: Canvas,
    style: &PlotStyle,
) -> RenderPlan {
    let vp = Viewport::fit(canvas, max_scaled_radius(bodies), style.extent_margin);
    let marker = |display_size: f64| (display_size * style.marker_px_per_size * vp.size_scale).max(1.0);
    let label_size = (style.label_size_px * vp.size_scale).max(6.0);

    let mut ops = Vec::with_capacity(1 + frame.placements.len() * 3);

    for p in &frame.placements {
        ops.push(DrawOp::StrokeCircle {
            center: vp.center,
            radius: p.orbit_radius * vp.px_per_unit,
            width: style.guide_width_px,
            color: style.guide_color,
        });
    }

    ops.push(DrawOp::FillCircle {
        center: vp.center,
        radius: marker(frame.central.display_size),
        color: frame.central.color,
    });

    for p in &frame.placements {
        let Some(body) = bodies.get(p.body) else {
            continue;
        };
        let at = vp.to_px(p.position);
        let radius = marker(body.display_size);
        ops.push(DrawOp::FillCircle {
            center: at,
            radius,
            color: body.color,
        });
        ops.push(DrawOp::Label {
            text: p.name.to_string(),
            anchor: Point::new(at.x + radius + 3.0, at.y),
            size_px: label_size,
            color: style.label_color,
        });
    }

    RenderPlan {
        canvas,
        background: style.background,
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
