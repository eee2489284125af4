use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dotcloud", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Drive the animation loop headlessly and write a PNG sequence.
    Run(RunArgs),
    /// Print the default configuration as JSON.
    DumpConfig,
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Configuration JSON (defaults are used for missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Noise seed; overrides the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Flatten frames over this background color (`RRGGBB`) instead of keeping alpha.
    #[arg(long, value_parser = parse_hex_rgb)]
    bg: Option<[u8; 3]>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Animation timestamp in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Display refresh rate of the virtual clock.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of frames to present.
    #[arg(long)]
    frames: u64,

    /// Timestamp of the first frame in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    start_ms: f64,

    /// Resize the window before a frame: `FRAME:WIDTHxHEIGHT[@DPR]` (repeatable).
    #[arg(long = "resize-at", value_parser = parse_resize)]
    resize_at: Vec<(u64, dotcloud::DisplayMetrics)>,

    /// Render frames offline on a thread pool instead of the live loop (ignores `--resize-at`).
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Print the SHA-256 of each frame's pixels.
    #[arg(long)]
    digest: bool,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
        Command::DumpConfig => {
            println!("{}", dotcloud::DotGridConfig::seeded_default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(view: &ViewArgs) -> anyhow::Result<dotcloud::DotGridConfig> {
    let mut cfg = match &view.config {
        Some(path) => dotcloud::DotGridConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => dotcloud::DotGridConfig::seeded_default(),
    };
    if view.seed.is_some() {
        cfg.seed = view.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn metrics(view: &ViewArgs) -> dotcloud::DisplayMetrics {
    dotcloud::DisplayMetrics::new(view.width, view.height, view.dpr)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.view)?;
    let field = cfg.build_composer();
    let frame = dotcloud::render_frame(
        &cfg,
        &field,
        metrics(&args.view),
        dotcloud::FrameTick(args.time_ms),
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    dotcloud::write_png(&args.out, &frame, args.view.bg)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be >= 1");
    }
    let cfg = load_config(&args.view)?;
    let sink = dotcloud::PngSequenceSink::create(&args.out_dir, args.view.bg)?;

    let sink = if args.parallel {
        run_offline(&args, &cfg, sink)?
    } else {
        run_live(&args, cfg, sink)?
    };

    if args.digest {
        for (i, d) in sink.digests().iter().enumerate() {
            println!("{}  {}", d, file_name(&sink.frame_path(i as u64)));
        }
    }
    eprintln!(
        "wrote {} frames to {}",
        sink.digests().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn run_live(
    args: &RunArgs,
    cfg: dotcloud::DotGridConfig,
    sink: dotcloud::PngSequenceSink,
) -> anyhow::Result<dotcloud::PngSequenceSink> {
    let mut host = dotcloud::HeadlessHost::new(metrics(&args.view), args.fps, args.frames, sink)?
        .with_start_ms(args.start_ms);
    for (frame, m) in &args.resize_at {
        host.schedule_resize(*frame, *m);
    }

    let Some(mut anim) = dotcloud::DotGridAnimation::start(cfg, &mut host)? else {
        anyhow::bail!("headless host has no drawing surface (bug)");
    };
    anim.run_until_stopped(&mut host)?;
    anim.stop(&mut host);

    let stats = *anim.stats();
    tracing::info!(
        frames = stats.frames_rendered,
        overruns = stats.budget_overruns,
        max_frame_ms = stats.max_frame_ms,
        "run finished"
    );
    Ok(host.finish()?)
}

fn run_offline(
    args: &RunArgs,
    cfg: &dotcloud::DotGridConfig,
    mut sink: dotcloud::PngSequenceSink,
) -> anyhow::Result<dotcloud::PngSequenceSink> {
    if !args.resize_at.is_empty() {
        tracing::warn!("--resize-at is ignored with --parallel");
    }
    let ticks = dotcloud::ticks_at_fps(args.start_ms, args.fps, args.frames)?;
    let threading = dotcloud::RenderThreading {
        parallel: true,
        threads: args.threads,
        ..dotcloud::RenderThreading::default()
    };
    dotcloud::render_frames(cfg, metrics(&args.view), &ticks, &threading, &mut sink)?;
    Ok(sink)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_hex_rgb(s: &str) -> Result<[u8; 3], String> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| format!("bad hex '{s}': {e}"))
    };
    Ok([byte(0)?, byte(2)?, byte(4)?])
}

fn parse_resize(s: &str) -> Result<(u64, dotcloud::DisplayMetrics), String> {
    let (frame, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:WxH[@DPR], got '{s}'"))?;
    let (size, dpr) = match rest.split_once('@') {
        Some((size, dpr)) => (size, dpr.parse::<f64>().map_err(|e| e.to_string())?),
        None => (rest, 1.0),
    };
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| format!("expected WxH, got '{size}'"))?;
    let frame = frame.parse::<u64>().map_err(|e| e.to_string())?;
    let w = w.parse::<f64>().map_err(|e| e.to_string())?;
    let h = h.parse::<f64>().map_err(|e| e.to_string())?;
    Ok((frame, dotcloud::DisplayMetrics::new(w, h, dpr)))
}
