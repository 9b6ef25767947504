//! One-call entry point: fixed solar system in, looping GIF on disk out.

use std::path::Path;

use crate::{
    compile::plan::PlotStyle,
    encode::gif::EncodeConfig,
    eval::schedule::FrameSchedule,
    foundation::{
        core::{Canvas, Fps},
        error::OrreryResult,
    },
    render::{
        backend::{BackendKind, create_backend},
        pipeline::{OrbitScene, RenderStats, RenderThreading, render_to_gif},
    },
    system::bodies::{SOLAR_SYSTEM, SUN},
};

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_SECONDS: f64 = 12.0;

#[derive(Clone, Debug)]
pub struct GenerateOpts {
    pub fps: u32,
    pub seconds: f64,
    pub canvas: Canvas,
    pub style: PlotStyle,
    /// GIF quantizer speed, 1 (best) ..= 30 (fastest).
    pub encoder_speed: i32,
    pub threading: RenderThreading,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seconds: DEFAULT_SECONDS,
            canvas: Canvas::default(),
            style: PlotStyle::default(),
            encoder_speed: 10,
            threading: RenderThreading::default(),
        }
    }
}

impl GenerateOpts {
    pub fn scene(&self) -> OrreryResult<OrbitScene> {
        let schedule = FrameSchedule::new(Fps::integer(self.fps)?, self.seconds)?;
        let scene = OrbitScene {
            bodies: SOLAR_SYSTEM.to_vec(),
            central: SUN,
            canvas: self.canvas,
            style: self.style.clone(),
            schedule,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Write the orbit animation to `out_path` with the default canvas and style.
pub fn generate(out_path: impl AsRef<Path>, fps: u32, seconds: f64) -> OrreryResult<()> {
    let opts = GenerateOpts {
        fps,
        seconds,
        ..GenerateOpts::default()
    };
    generate_with(out_path, &opts).map(|_| ())
}

#[tracing::instrument(
    skip_all,
    fields(path = %out_path.as_ref().display(), fps = opts.fps, seconds = opts.seconds)
)]
pub fn generate_with(
    out_path: impl AsRef<Path>,
    opts: &GenerateOpts,
) -> OrreryResult<RenderStats> {
    let scene = opts.scene()?;
    let mut backend = create_backend(BackendKind::Cpu)?;

    let cfg = EncodeConfig {
        width: scene.canvas.width,
        height: scene.canvas.height,
        fps: scene.schedule.fps(),
        out_path: out_path.as_ref().to_path_buf(),
        speed: opts.encoder_speed,
        bg_rgba: scene.style.background.to_array(),
    };

    let started = std::time::Instant::now();
    let stats = render_to_gif(&scene, cfg, backend.as_mut(), &opts.threading)?;
    tracing::info!(
        frames = stats.frames_total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "orbit animation generated"
    );
    Ok(stats)
}
