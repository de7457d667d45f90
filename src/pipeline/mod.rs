//! Build pipeline
//!
//! Orchestrates the stages: load the palette and rule documents, expand,
//! validate contrast, emit. Each stage is a pure transform over immutable
//! input; this module adds the one-time file reads at entry and the
//! all-or-nothing writes at exit.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

use crate::contrast::{self, ContrastReport};
use crate::emit::{self, TargetFormat};
use crate::palette::PaletteTable;
use crate::rules::{self, RuleDoc};

/// Build configuration
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum contrast ratio a pairing must reach
    pub min_contrast: f64,
    pub format: TargetFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_contrast: contrast::WCAG_AA,
            format: TargetFormat::VsCode,
        }
    }
}

/// What a build produced, minus the document itself
#[derive(Debug)]
pub struct BuildOutcome {
    pub theme_name: String,
    pub token_rules: usize,
    pub ui_rules: usize,
    pub reports: Vec<ContrastReport>,
}

impl BuildOutcome {
    pub fn violations(&self) -> impl Iterator<Item = &ContrastReport> {
        self.reports.iter().filter(|report| !report.passes)
    }

    pub fn violation_count(&self) -> usize {
        self.violations().count()
    }
}

/// Run the full pipeline over in-memory documents
///
/// Returns the emitted theme document and the build outcome. Structural
/// errors (schema, unresolved reference) abort immediately; contrast
/// violations are data on the outcome.
pub fn build(
    palette_json: &str,
    rules_json: &str,
    options: &Options,
) -> Result<(String, BuildOutcome)> {
    let palette =
        PaletteTable::from_json(palette_json).context("failed to load palette document")?;

    let doc = RuleDoc::from_json(rules_json).context("failed to parse rule document")?;

    let expansion = rules::expand(&palette, &doc)?;
    let reports = contrast::validate(&expansion.pairings, options.min_contrast);
    let document = emit::emit(&palette, &expansion, options.format);

    let outcome = BuildOutcome {
        theme_name: palette.name().to_string(),
        token_rules: expansion.token_rules.len(),
        ui_rules: expansion.ui_rules.len(),
        reports,
    };

    Ok((document, outcome))
}

/// Run the pipeline over files on disk
///
/// Reads both input documents once, writes the emitted theme (and the
/// optional contrast report) atomically. Nothing is written when any stage
/// fails.
pub fn run(
    palette_path: &Path,
    rules_path: &Path,
    out_path: &Path,
    report_path: Option<&Path>,
    options: &Options,
) -> Result<BuildOutcome> {
    let palette_json = fs::read_to_string(palette_path)
        .with_context(|| format!("failed to read palette from {}", palette_path.display()))?;
    let rules_json = fs::read_to_string(rules_path)
        .with_context(|| format!("failed to read rules from {}", rules_path.display()))?;

    let (document, outcome) = build(&palette_json, &rules_json, options)?;

    write_atomic(out_path, &document)
        .with_context(|| format!("failed to write theme to {}", out_path.display()))?;

    if let Some(report_path) = report_path {
        let report = contrast::render_report(&outcome.reports, options.min_contrast);
        write_atomic(report_path, &report)
            .with_context(|| format!("failed to write report to {}", report_path.display()))?;
    }

    info!(
        theme = %outcome.theme_name,
        tokens = outcome.token_rules,
        ui = outcome.ui_rules,
        pairings = outcome.reports.len(),
        violations = outcome.violation_count(),
        out = %out_path.display(),
        "theme compiled"
    );

    Ok(outcome)
}

/// Write fully to a temp file in the destination directory, then rename
/// into place, so a partial document is never observable.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}
