use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orrery", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full looping GIF.
    Generate(GenerateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print body positions at a time offset as JSON.
    Positions(PositionsArgs),
    /// Serve the landing page, viewer and GIF over HTTP.
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct TimingArgs {
    /// Frames per second.
    #[arg(long, default_value_t = orrery::DEFAULT_FPS)]
    fps: u32,

    /// Animation length in seconds.
    #[arg(long, default_value_t = orrery::DEFAULT_SECONDS)]
    seconds: f64,

    #[arg(long, default_value_t = 600)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,
}

impl TimingArgs {
    fn opts(&self) -> orrery::GenerateOpts {
        orrery::GenerateOpts {
            fps: self.fps,
            seconds: self.seconds,
            canvas: orrery::Canvas {
                width: self.width,
                height: self.height,
            },
            ..orrery::GenerateOpts::default()
        }
    }
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    timing: TimingArgs,

    /// Rasterize frames on a rayon pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Parser, Debug)]
struct PositionsArgs {
    /// Seconds since the start of the animation.
    #[arg(long)]
    time: f64,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen port. Falls back to $PORT, then 5000.
    #[arg(long)]
    port: Option<u16>,

    /// Listen address. Falls back to $ORRERY_BIND, then 0.0.0.0.
    #[arg(long)]
    bind: Option<String>,

    /// Cached GIF location. Falls back to $ORRERY_ARTIFACT, then static/orbits.gif.
    #[arg(long)]
    artifact: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Positions(args) => cmd_positions(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut opts = args.timing.opts();
    opts.threading.parallel = args.parallel;

    let stats = orrery::generate_with(&args.out, &opts)?;
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_total
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = args.timing.opts().scene()?;
    if args.index >= scene.schedule.len() {
        anyhow::bail!(
            "frame index {} out of range (animation has {} frames)",
            args.index,
            scene.schedule.len()
        );
    }

    let mut backend = orrery::create_backend(orrery::BackendKind::Cpu)?;
    let frame = orrery::render_frame(&scene, orrery::FrameIndex(args.index), backend.as_mut())?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_positions(args: PositionsArgs) -> anyhow::Result<()> {
    if !args.time.is_finite() {
        anyhow::bail!("--time must be a finite number of seconds");
    }
    let frame = orrery::Evaluator::eval_frame(
        &orrery::SOLAR_SYSTEM,
        orrery::SUN,
        orrery::FrameIndex(0),
        args.time,
    );
    let json = serde_json::to_string_pretty(&frame).context("serialize positions")?;
    println!("{json}");
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = orrery::ServerConfig::from_env()?;
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(bind) = args.bind {
        cfg.bind = bind;
    }
    if let Some(artifact) = args.artifact {
        cfg.artifact_path = artifact;
    }

    let store = Arc::new(orrery::ArtifactStore::new(
        &cfg.artifact_path,
        orrery::GenerateOpts::default(),
    ));
    let server = orrery::HttpServer::bind(&cfg.addr(), store)?;
    server.serve();
    Ok(())
}
