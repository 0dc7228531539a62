//! Plan a camera survey over a rectangular area.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use survey_cli::{load_mission, render, resolve_options, Config, MissionOptions, OutputFormat};
use survey_core::{CaptureMode, GridAlignment, SurveyPlanner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Plan a serpentine camera survey and time every leg
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission file (JSON with `camera`, `flight` and optional `options`)
    #[arg(long)]
    mission: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Allowed motion blur per exposure in pixels
    #[arg(long)]
    blur_px: Option<f64>,

    /// Grid alignment: boundary or centered
    #[arg(long)]
    alignment: Option<GridAlignment>,

    /// Capture mode: stop-and-shoot or fly-through
    #[arg(long)]
    mode: Option<CaptureMode>,

    /// Write output here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new("survey_cli=info,survey_core=info")
    })?;
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs)?;

    let config = Config::from_env();
    let mission = load_mission(&args.mission)?;
    tracing::info!(mission = %args.mission.display(), "Loaded mission");

    let overrides = MissionOptions {
        blur_px_budget: args.blur_px,
        alignment: args.alignment,
        capture_mode: args.mode,
    };
    let options = resolve_options(&mission.options, &overrides, &config);

    let planner = SurveyPlanner::new(mission.camera, mission.flight, options)
        .context("Mission rejected")?;
    let plan = planner.plan().context("Planning failed")?;

    let format = args.format.unwrap_or(config.output_format);
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            render(&plan, format, &mut sink)?;
            sink.flush()?;
            tracing::info!(output = %path.display(), %format, "Wrote plan");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            render(&plan, format, &mut sink)?;
        }
    }

    Ok(())
}
