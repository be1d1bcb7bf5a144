use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollyviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll to one step and write the canvas as SVG or PNG.
    Frame(FrameArgs),
    /// Scroll through every step and write one settled PNG per step.
    Walk(WalkArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Story configuration JSON. Data and images resolve relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Step to scroll to (0-based).
    #[arg(long)]
    step: usize,

    /// Milliseconds to advance the clock after scrolling.
    #[arg(long, default_value_t = 1000)]
    at_ms: u64,

    /// Output path; `.svg` writes SVG text, anything else writes PNG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct WalkArgs {
    /// Story configuration JSON. Data and images resolve relative to its directory.
    #[arg(long)]
    config: PathBuf,

    /// Directory receiving `step-<n>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Milliseconds to let transitions settle before each capture.
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Walk(args) => cmd_walk(args),
    }
}

type DirStory = scrollyviz::Story<scrollyviz::DirSource>;

fn open_story(config_path: &Path) -> anyhow::Result<(DirStory, PathBuf)> {
    let config = scrollyviz::StoryConfig::from_path(config_path)
        .with_context(|| format!("load story config '{}'", config_path.display()))?;
    let root = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let source = scrollyviz::DirSource::new(root.join(&config.data_dir));
    let story = scrollyviz::Story::new(config, source).with_context(|| "start story")?;
    Ok((story, root))
}

fn report_failures(report: &scrollyviz::DispatchReport) {
    for (scene, err) in &report.failures {
        eprintln!("scene {scene:?} failed: {err}");
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(svg: &str, resources: &Path, out: &Path) -> anyhow::Result<()> {
    let frame = scrollyviz::rasterize(svg, Some(resources))?;
    scrollyviz::save_png(&frame, out)?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut story, root) = open_story(&args.config)?;

    let report = story
        .on_active(args.step)
        .with_context(|| format!("scroll to step {}", args.step))?;
    report_failures(&report);
    story.advance_by(args.at_ms);

    let svg = scrollyviz::to_svg(&story.render())?;
    ensure_parent(&args.out)?;

    let is_svg = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        write_png(&svg, &root, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_walk(args: WalkArgs) -> anyhow::Result<()> {
    let (mut story, root) = open_story(&args.config)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for step in 0..scrollyviz::Scene::ALL.len() {
        let report = story
            .on_active(step)
            .with_context(|| format!("scroll to step {step}"))?;
        report_failures(&report);
        story.advance_by(args.settle_ms);

        let out = args.out_dir.join(format!("step-{step}.png"));
        let svg = scrollyviz::to_svg(&story.render())?;
        write_png(&svg, &root, &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
