use super::*;
use crate::{
    foundation::core::Fps,
    render::cpu::CpuBackend,
    system::bodies::{SOLAR_SYSTEM, SUN},
};

fn scene(fps: u32, seconds: f64, side: u32) -> OrbitScene {
    OrbitScene {
        bodies: SOLAR_SYSTEM.to_vec(),
        central: SUN,
        canvas: Canvas {
            width: side,
            height: side,
        },
        style: PlotStyle::default(),
        schedule: FrameSchedule::new(Fps::integer(fps).unwrap(), seconds).unwrap(),
    }
}

fn gif_config(out: std::path::PathBuf, side: u32, fps: Fps) -> EncodeConfig {
    EncodeConfig {
        width: side,
        height: side,
        fps,
        out_path: out,
        speed: 30,
        bg_rgba: [0, 0, 0, 255],
    }
}

#[test]
fn renders_every_frame_in_range() {
    let s = scene(5, 2.0, 48);
    let mut backend = CpuBackend::new();
    let (frames, stats) = render_frames_with_stats(
        &s,
        s.schedule.range(),
        &mut backend,
        &RenderThreading::default(),
    )
    .unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 10,
            frames_rendered: 10
        }
    );
}

#[test]
fn parallel_matches_sequential() {
    let s = scene(5, 2.0, 48);
    let mut backend = CpuBackend::new();
    let (seq, _) = render_frames_with_stats(
        &s,
        s.schedule.range(),
        &mut backend,
        &RenderThreading::default(),
    )
    .unwrap();
    let (par, _) = render_frames_with_stats(
        &s,
        s.schedule.range(),
        &mut backend,
        &RenderThreading {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(par.iter()) {
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn empty_range_is_rejected() {
    let s = scene(5, 2.0, 32);
    let mut backend = CpuBackend::new();
    let empty = FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap();
    assert!(
        render_frames_with_stats(&s, empty, &mut backend, &RenderThreading::default()).is_err()
    );
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(normalized_chunk_size(0), 1);
}

#[test]
fn render_to_gif_requires_matching_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let s = scene(2, 1.0, 32);
    let cfg = gif_config(dir.path().join("x.gif"), 64, s.schedule.fps());
    let mut backend = CpuBackend::new();
    assert!(render_to_gif(&s, cfg, &mut backend, &RenderThreading::default()).is_err());
}

#[test]
fn render_to_gif_reports_all_frames() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("orbits.gif");
    let s = scene(4, 1.5, 32);
    let cfg = gif_config(out.clone(), 32, s.schedule.fps());
    let mut backend = CpuBackend::new();
    let stats = render_to_gif(&s, cfg, &mut backend, &RenderThreading::default()).unwrap();
    assert_eq!(stats.frames_total, 6);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn invalid_body_is_rejected() {
    let mut s = scene(2, 1.0, 32);
    s.bodies[0].period_days = 0.0;
    assert!(s.validate().is_err());
}

struct SingleThreadedBackend(CpuBackend);

impl RenderBackend for SingleThreadedBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> OrreryResult<FrameRGBA> {
        self.0.render_plan(plan)
    }
}

#[test]
fn parallel_requires_worker_support() {
    let s = scene(2, 1.0, 32);
    let mut backend = SingleThreadedBackend(CpuBackend::new());
    let threading = RenderThreading {
        parallel: true,
        ..RenderThreading::default()
    };
    assert!(render_frames_with_stats(&s, s.schedule.range(), &mut backend, &threading).is_err());
}
