use super::*;
use crate::{
    compile::plan::{PlotStyle, compile_frame},
    eval::evaluator::Evaluator,
    foundation::core::{Canvas, FrameIndex},
    system::bodies::{SOLAR_SYSTEM, SUN},
};

fn plan(width: u32, height: u32, t: f64) -> RenderPlan {
    let frame = Evaluator::eval_frame(&SOLAR_SYSTEM, SUN, FrameIndex(0), t);
    compile_frame(
        &frame,
        &SOLAR_SYSTEM,
        Canvas { width, height },
        &PlotStyle::default(),
    )
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn renders_background_and_sun() {
    let mut backend = CpuBackend::new();
    let frame = backend.render_plan(&plan(200, 200, 0.0)).unwrap();

    assert_eq!((frame.width, frame.height), (200, 200));
    assert_eq!(frame.data.len(), 200 * 200 * 4);
    assert!(frame.premultiplied);

    let bg = PlotStyle::default().background.to_array();
    assert!(close(frame.pixel(0, 0).unwrap(), bg));
    assert!(close(frame.pixel(100, 100).unwrap(), SUN.color.to_array()));
}

#[test]
fn plan_background_fills_the_corners() {
    let mut backend = CpuBackend::new();
    let mut p = plan(64, 64, 0.0);
    p.background = Rgba8::rgb(255, 0, 255);
    let frame = backend.render_plan(&p).unwrap();
    assert!(close(frame.pixel(0, 63).unwrap(), [255, 0, 255, 255]));
    assert!(close(frame.pixel(63, 0).unwrap(), [255, 0, 255, 255]));
}

#[test]
fn label_sprites_are_cached_across_frames() {
    let mut backend = CpuBackend::new();
    backend.render_plan(&plan(120, 120, 0.0)).unwrap();
    assert_eq!(backend.cached_labels(), SOLAR_SYSTEM.len());
    backend.render_plan(&plan(120, 120, 3.0)).unwrap();
    assert_eq!(backend.cached_labels(), SOLAR_SYSTEM.len());
}

#[test]
fn frames_at_different_times_differ() {
    let mut backend = CpuBackend::new();
    let a = backend.render_plan(&plan(96, 96, 0.0)).unwrap();
    let b = backend.render_plan(&plan(96, 96, 2.0)).unwrap();
    assert_ne!(a.data, b.data);
}

#[test]
fn rejects_empty_canvas() {
    let mut backend = CpuBackend::new();
    let mut p = plan(10, 10, 0.0);
    p.canvas = Canvas {
        width: 0,
        height: 10,
    };
    assert!(backend.render_plan(&p).is_err());
}
