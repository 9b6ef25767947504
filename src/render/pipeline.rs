use rayon::prelude::*;

use crate::{
    compile::plan::{PlotStyle, RenderPlan, compile_frame},
    encode::gif::{EncodeConfig, GifSink},
    eval::{evaluator::Evaluator, schedule::FrameSchedule},
    foundation::{
        core::{Canvas, FrameIndex, FrameRange},
        error::{OrreryError, OrreryResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        cpu::CpuBackend,
    },
    system::bodies::{Body, CentralBody},
};

/// Everything needed to turn a frame index into pixels.
#[derive(Clone, Debug)]
pub struct OrbitScene {
    pub bodies: Vec<Body>,
    pub central: CentralBody,
    pub canvas: Canvas,
    pub style: PlotStyle,
    pub schedule: FrameSchedule,
}

impl OrbitScene {
    pub fn validate(&self) -> OrreryResult<()> {
        self.canvas.validate()?;
        for b in &self.bodies {
            if !(b.orbital_radius > 0.0 && b.period_days > 0.0 && b.display_size > 0.0) {
                return Err(OrreryError::validation(format!(
                    "body '{}' needs positive radius, period and display size",
                    b.name
                )));
            }
        }
        Ok(())
    }

    /// Evaluate + compile one frame.
    pub fn plan_frame(&self, frame: FrameIndex) -> RenderPlan {
        let t = self.schedule.sample_time(frame);
        let eval = Evaluator::eval_frame(&self.bodies, self.central, frame, t);
        compile_frame(&eval, &self.bodies, self.canvas, &self.style)
    }
}

/// Evaluate + compile + render a single frame.
pub fn render_frame(
    scene: &OrbitScene,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> OrreryResult<FrameRGBA> {
    backend.render_plan(&scene.plan_frame(frame))
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 32,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// Render a range of frames (inclusive start, exclusive end) into memory.
pub fn render_frames_with_stats(
    scene: &OrbitScene,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> OrreryResult<(Vec<FrameRGBA>, RenderStats)> {
    if range.is_empty() {
        return Err(OrreryError::validation("render range must be non-empty"));
    }

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    for_each_chunk(scene, range, backend, threading, |frames| {
        stats.frames_total += frames.len() as u64;
        stats.frames_rendered += frames.len() as u64;
        out.extend(frames);
        Ok(())
    })?;
    Ok((out, stats))
}

/// Render every scheduled frame and stream it into a looping GIF at `cfg.out_path`.
#[tracing::instrument(skip_all, fields(path = %cfg.out_path.display(), frames = scene.schedule.len()))]
pub fn render_to_gif(
    scene: &OrbitScene,
    cfg: EncodeConfig,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> OrreryResult<RenderStats> {
    scene.validate()?;
    if cfg.width != scene.canvas.width || cfg.height != scene.canvas.height {
        return Err(OrreryError::validation(
            "gif size must match the scene canvas",
        ));
    }

    let mut sink = GifSink::new(cfg)?;
    let mut stats = RenderStats::default();
    for_each_chunk(scene, scene.schedule.range(), backend, threading, |frames| {
        for frame in &frames {
            sink.encode_frame(frame)?;
        }
        stats.frames_total += frames.len() as u64;
        stats.frames_rendered += frames.len() as u64;
        Ok(())
    })?;

    sink.finish()?;
    Ok(stats)
}

fn for_each_chunk(
    scene: &OrbitScene,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
    mut consume: impl FnMut(Vec<FrameRGBA>) -> OrreryResult<()>,
) -> OrreryResult<()> {
    let chunk_size = normalized_chunk_size(threading.chunk_size);

    let mut maybe_pool = None;
    if threading.parallel {
        if !backend.supports_cpu_workers() {
            return Err(OrreryError::render(
                "parallel render requires a backend with cpu worker support",
            ));
        }
        maybe_pool = Some(build_thread_pool(threading.threads)?);
    }

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;

        let frames = match maybe_pool.as_ref() {
            Some(pool) => render_chunk_parallel_cpu(scene, chunk, pool)?,
            None => render_chunk_sequential(scene, chunk, backend)?,
        };
        consume(frames)?;
        chunk_start = chunk_end;
    }
    Ok(())
}

fn render_chunk_sequential(
    scene: &OrbitScene,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
) -> OrreryResult<Vec<FrameRGBA>> {
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for f in range.start.0..range.end.0 {
        out.push(render_frame(scene, FrameIndex(f), backend)?);
    }
    Ok(out)
}

fn render_chunk_parallel_cpu(
    scene: &OrbitScene,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> OrreryResult<Vec<FrameRGBA>> {
    let plans: Vec<RenderPlan> = (range.start.0..range.end.0)
        .map(|f| scene.plan_frame(FrameIndex(f)))
        .collect();

    let rendered = pool.install(|| {
        plans
            .par_iter()
            .map_init(
                CpuBackend::new,
                |worker_backend, plan| worker_backend.render_plan(plan),
            )
            .collect::<Vec<_>>()
    });

    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> OrreryResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(OrreryError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| OrreryError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
