use std::path::{Path, PathBuf};

use anyhow::Context as _;
use aspect_match::{EventScope, MatchOpts, MediaType, Project};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aspect-match", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reshape video keyframes to the project's output aspect.
    Match(MatchArgs),
    /// Print the target aspect and every video keyframe's current aspect.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct MatchArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output project JSON (may be the same file as the input).
    #[arg(long)]
    out: PathBuf,

    /// Match every video event, ignoring the selection.
    #[arg(long)]
    all: bool,

    /// Exit with an error if any keyframe could not be corrected.
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Match(args) => cmd_match(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_project(path: &Path) -> anyhow::Result<Project> {
    let project =
        Project::from_path(path).with_context(|| format!("load project '{}'", path.display()))?;
    project.validate()?;
    Ok(project)
}

fn cmd_match(args: MatchArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;

    let opts = MatchOpts {
        scope: if args.all {
            EventScope::All
        } else {
            EventScope::SelectedOrAll
        },
    };
    let report = aspect_match::match_output_aspect(&mut project, opts)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    project
        .to_path(&args.out)
        .with_context(|| format!("write project '{}'", args.out.display()))?;

    eprintln!(
        "target aspect {:.4}: {} events, {} keyframes corrected, {} skipped events, {} failed keyframes",
        report.target_aspect,
        report.events_matched,
        report.keyframes_corrected,
        report.events_skipped,
        report.failures.len()
    );
    for f in &report.failures {
        eprintln!(
            "  track {} event {} keyframe {} (frame {}): {}",
            f.track, f.event, f.keyframe, f.frame.0, f.error
        );
    }
    eprintln!("wrote {}", args.out.display());

    if args.strict && !report.is_clean() {
        anyhow::bail!("{} keyframe(s) could not be corrected", report.failures.len());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;

    println!("target aspect: {:.6}", project.video.output_aspect());
    println!(
        "selected video events: {}",
        project.selection_count(MediaType::Video)
    );

    for (ti, track) in project.tracks.iter().enumerate() {
        if track.kind != MediaType::Video {
            continue;
        }
        for (ei, event) in track.events.iter().enumerate() {
            let Some(par) = project.active_video_stream(event) else {
                println!("track {ti} event {ei}: no video stream");
                continue;
            };
            for (ki, kf) in event.keyframes.iter().enumerate() {
                match aspect_match::measure_aspect(&kf.bounds, kf.rotation, par) {
                    Ok(a) => println!(
                        "track {ti} event {ei} keyframe {ki} (frame {}): {a:.6}",
                        kf.frame.0
                    ),
                    Err(e) => println!(
                        "track {ti} event {ei} keyframe {ki} (frame {}): {e}",
                        kf.frame.0
                    ),
                }
            }
        }
    }
    Ok(())
}
