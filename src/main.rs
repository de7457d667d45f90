use std::path::PathBuf;

use anyhow::{bail, Result};
use chroma::contrast;
use chroma::emit::TargetFormat;
use chroma::pipeline::{self, Options};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chroma")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the palette definition document
    #[arg(long)]
    palette: PathBuf,

    /// Path to the rule-specification document
    #[arg(long)]
    rules: PathBuf,

    /// Path for the emitted theme document
    #[arg(long)]
    out: PathBuf,

    /// Output format for the emitted theme
    #[arg(long, default_value = "vscode")]
    format: String,

    /// Minimum contrast ratio a pairing must reach
    #[arg(long, default_value_t = contrast::WCAG_AA)]
    min_contrast: f64,

    /// Also write a human-readable contrast report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit nonzero when any pairing fails the contrast check
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chroma=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let options = Options {
        min_contrast: cli.min_contrast,
        format: cli.format.parse::<TargetFormat>()?,
    };

    let outcome = pipeline::run(
        &cli.palette,
        &cli.rules,
        &cli.out,
        cli.report.as_deref(),
        &options,
    )?;

    if cli.strict && outcome.violation_count() > 0 {
        bail!(
            "{} of {} pairings fall below the {:.2} contrast minimum",
            outcome.violation_count(),
            outcome.reports.len(),
            cli.min_contrast,
        );
    }

    Ok(())
}
