#![forbid(unsafe_code)]
//! Orrery renders eight planets on circular orbits around a sun into a looping GIF, and serves
//! that GIF from a small HTTP front end that builds it lazily and caches it on disk.
//!
//! Pipeline: evaluate body positions for a frame, compile them into a [`RenderPlan`], rasterize
//! with the CPU backend, then stream frames into the GIF encoder.

pub mod compile;
pub mod encode;
pub mod eval;
pub mod foundation;
pub mod generator;
pub mod render;
pub mod server;
pub mod service;
pub mod system;

pub use compile::plan::{DrawOp, PlotStyle, RenderPlan, Viewport, compile_frame};
pub use encode::gif::{EncodeConfig, GifSink};
pub use eval::{
    evaluator::{BodyPlacement, Evaluator, OrbitFrame},
    schedule::FrameSchedule,
};
pub use foundation::{
    core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8},
    error::{OrreryError, OrreryResult},
};
pub use generator::{DEFAULT_FPS, DEFAULT_SECONDS, GenerateOpts, generate, generate_with};
pub use render::{
    backend::{BackendKind, FrameRGBA, RenderBackend, create_backend},
    cpu::CpuBackend,
    pipeline::{
        OrbitScene, RenderStats, RenderThreading, render_frame, render_frames_with_stats,
        render_to_gif,
    },
};
pub use server::http::{HttpServer, ServerHandle};
pub use service::{
    artifact::{ArtifactStore, Ensured},
    config::ServerConfig,
    pages::{landing_page, viewer_page},
};
pub use system::bodies::{Body, CentralBody, RADIUS_SCALE, SOLAR_SYSTEM, SPEED, SUN};
