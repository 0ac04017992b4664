use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use mindseye::TimelineControls as _;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "mindseye", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a saved animation.
    Inspect(InspectArgs),
    /// Snapshot an idea list, as the recorder would.
    Capture(CaptureArgs),
    /// Interpolate an idea list at one progress value.
    Sample(SampleArgs),
    /// Play an animation offline and write one JSON line per frame.
    Play(PlayArgs),
    /// Record an animation from idea-list poses.
    Record(RecordArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input animation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Idea list JSON (array of ideas).
    #[arg(long)]
    ideas: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Input animation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Idea list JSON to write the pose into.
    #[arg(long)]
    ideas: PathBuf,

    /// Timeline progress, 0..1.
    #[arg(long)]
    progress: f64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Input animation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Idea list JSON to animate.
    #[arg(long)]
    ideas: PathBuf,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second; overrides the config file.
    #[arg(long)]
    fps: Option<f64>,

    /// Optional studio config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Idea list JSON captured at the start.
    #[arg(long)]
    from: PathBuf,

    /// Idea list JSON captured at the end.
    #[arg(long)]
    to: PathBuf,

    /// Interior keyframe as `PROGRESS=PATH` (repeatable).
    #[arg(long = "key", value_parser = parse_key)]
    keys: Vec<(f64, PathBuf)>,

    /// Progress at which the recording ends.
    #[arg(long, default_value_t = 1.0)]
    end_at: f64,

    /// Timeline duration in milliseconds; overrides the config file.
    #[arg(long)]
    duration_ms: Option<f64>,

    /// Optional studio config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output animation JSON.
    #[arg(long)]
    out: PathBuf,
}

fn parse_key(s: &str) -> Result<(f64, PathBuf), String> {
    let (p, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PROGRESS=PATH, got '{s}'"))?;
    let p: f64 = p
        .trim()
        .parse()
        .map_err(|e| format!("bad progress '{p}': {e}"))?;
    Ok((p, PathBuf::from(path)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Capture(args) => cmd_capture(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Play(args) => cmd_play(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_ideas(path: &Path) -> anyhow::Result<Vec<mindseye::Idea>> {
    let f = File::open(path).with_context(|| format!("open ideas '{}'", path.display()))?;
    let ideas: Vec<mindseye::Idea> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse ideas JSON '{}'", path.display()))?;
    Ok(ideas)
}

fn load_opts(config: Option<&Path>) -> anyhow::Result<mindseye::StudioOpts> {
    match config {
        Some(p) => Ok(mindseye::StudioOpts::from_path(p)?),
        None => Ok(mindseye::StudioOpts::default()),
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize JSON output")?;
    match out {
        Some(path) => {
            ensure_parent_dir(path)?;
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = mindseye::AnimationDocument::from_path(&args.in_path)?;
    let mut state = mindseye::AnimationState::new();
    doc.apply_to(&mut state)?;

    println!("name:       {}", doc.name);
    println!("in/out:     {:.3}s .. {:.3}s", state.in_point, state.out_point);
    println!("duration:   {} ms", state.duration_ms);
    println!("keyframes:  {}", state.keyframes().len());
    for k in state.keyframes() {
        println!(
            "  t={:>8.3}s ({})  ideas={}",
            k.time(),
            mindseye::format_clock(k.time()),
            k.positions().len()
        );
    }
    println!("markers:");
    for m in mindseye::build_markers(&state) {
        println!("  {:<8?} {:>8.3}s {:>6.1}%", m.kind, m.time, m.position);
    }
    if state.time_bases_diverge() {
        println!(
            "warning: duration ({:.3}s) differs from in/out span ({:.3}s)",
            state.duration_secs(),
            state.span_secs()
        );
    }
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let ideas = read_ideas(&args.ideas)?;
    let snaps = mindseye::capture(&ideas);
    write_json(args.out.as_deref(), &snaps)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let doc = mindseye::AnimationDocument::from_path(&args.in_path)?;
    let mut state = mindseye::AnimationState::new();
    doc.apply_to(&mut state)?;

    let mut ideas = read_ideas(&args.ideas)?;
    let seg = mindseye::interpolate(&state, args.progress, &mut ideas);
    tracing::info!(progress = args.progress, ?seg, "sampled");
    write_json(args.out.as_deref(), &ideas)
}

#[derive(serde::Serialize)]
struct FrameLine<'a> {
    frame: u64,
    progress: f64,
    time: &'a str,
    ideas: &'a [mindseye::Idea],
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(fps) = args.fps {
        opts.fps = fps;
    }
    opts.validate()?;

    let clock = mindseye::ManualClock::new(0.0);
    let controls = mindseye::HeadlessControls::new(opts.duration_ms);
    let interval = opts.frame_interval_ms();
    let mut studio = mindseye::Studio::new(controls, &clock, opts);
    studio.load_path(&args.in_path)?;

    let mut ideas = read_ideas(&args.ideas)?;
    studio.toggle_play()?;

    ensure_parent_dir(&args.out)?;
    let f = File::create(&args.out)
        .with_context(|| format!("create frames '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);

    let mut frame = 0u64;
    loop {
        let more = studio.frame(&mut ideas);
        let line = FrameLine {
            frame,
            progress: studio.controls().progress,
            time: &studio.controls().time_label,
            ideas: &ideas,
        };
        serde_json::to_writer(&mut w, &line).context("serialize frame")?;
        w.write_all(b"\n").context("write frame")?;
        if !more {
            break;
        }
        frame += 1;
        clock.advance(interval);
    }
    w.flush().context("flush frames")?;

    eprintln!("wrote {} frames to {}", frame + 1, args.out.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(d) = args.duration_ms {
        opts.duration_ms = d;
    }
    opts.validate()?;

    let clock = mindseye::SystemClock::new();
    let controls = mindseye::HeadlessControls::new(opts.duration_ms);
    let mut studio = mindseye::Studio::new(controls, clock, opts);

    let start = read_ideas(&args.from)?;
    studio.record(mindseye::RecordAction::Start, &start)?;

    for (progress, path) in &args.keys {
        let ideas = read_ideas(path)?;
        studio.controls_mut().set_progress(*progress);
        studio
            .record(mindseye::RecordAction::Keyframe, &ideas)
            .with_context(|| format!("keyframe at progress {progress}"))?;
    }

    let end = read_ideas(&args.to)?;
    studio.controls_mut().set_progress(args.end_at);
    studio.record(mindseye::RecordAction::End, &end)?;

    let doc = studio.save_to_path(&args.out)?;
    eprintln!(
        "wrote {} ({} keyframes)",
        args.out.display(),
        doc.keyframes.as_ref().map_or(0, Vec::len)
    );
    Ok(())
}
