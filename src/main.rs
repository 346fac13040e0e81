// SPDX-License-Identifier: MIT
//
// tc-audit — WCAG contrast audit for a site theme's CSS color variables.
//
// This is the binary that wires the crates together:
//
//   tc-color → color parsing, alpha compositing, luminance/contrast
//   tc-theme → stylesheet extraction, theme scopes, audits, reports
//
// One run:
//
//   theme.css → Stylesheet → Auditor ─┬─ fixed pairs   → stdout
//                                     ├─ full palette  → CSV + stdout summary
//                                     └─ semantic      → stdout
//
// With no arguments every audit runs with the built-in defaults. Report
// text goes to stdout; logs (RUST_LOG) go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use tc_theme::report;
use tc_theme::{AuditConfig, Auditor, SemanticReport, Stylesheet};

// ─── CLI ────────────────────────────────────────────────────────────────────

/// Which audits to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Curated foreground/background pairs, every threshold.
    Fixed,
    /// Every variable against every background target, written to CSV.
    Palette,
    /// Text-like variables only, AA failures only.
    Semantic,
    /// All of the above.
    All,
}

#[derive(Debug, Parser)]
#[command(name = "tc-audit", version)]
#[command(about = "Audit a theme stylesheet's color variables for WCAG contrast")]
struct Cli {
    /// Stylesheet to audit (overrides the config file).
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Where to write the full-palette CSV (overrides the config file).
    #[arg(long)]
    report: Option<PathBuf>,

    /// Optional TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Audits to run; repeat to pick several.
    #[arg(long, value_enum, default_values_t = [Mode::All])]
    mode: Vec<Mode>,
}

impl Cli {
    /// CLI > config file > defaults.
    fn into_config(self) -> Result<(AuditConfig, Vec<Mode>)> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                AuditConfig::load(path)?
            }
            None => AuditConfig::default(),
        };
        if let Some(stylesheet) = self.stylesheet {
            config.stylesheet = stylesheet;
        }
        if let Some(path) = self.report {
            config.report = path;
        }
        Ok((config, self.mode))
    }
}

fn wants(modes: &[Mode], mode: Mode) -> bool {
    modes.iter().any(|m| *m == mode || *m == Mode::All)
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    let (config, modes) = cli.into_config()?;
    let sheet = Stylesheet::load(&config.stylesheet)?;
    let auditor = Auditor::new(&sheet, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::render_loaded(&mut out, &sheet)?;

    if wants(&modes, Mode::Fixed) {
        for audit in auditor.fixed_pairs() {
            report::render_theme_audit(&mut out, &audit)?;
        }
        for kind in sheet.missing_themes() {
            report::render_missing_theme(&mut out, kind)?;
        }
    }

    if wants(&modes, Mode::Palette) {
        let palette = auditor.full_palette();
        report::save_csv(&config.report, &palette.rows)?;
        report::render_palette_summary(&mut out, &palette, &config.report, config.top_failures)?;
    }

    if wants(&modes, Mode::Semantic) {
        let found = semantic(&auditor, &config, &mut out)?;
        log::debug!("{} semantic failures", found.failures.len());
    }

    out.flush().context("flushing stdout")?;
    Ok(())
}

fn semantic(auditor: &Auditor<'_>, config: &AuditConfig, out: &mut impl Write) -> Result<SemanticReport> {
    let patterns = config.foreground_patterns()?;
    let found = auditor.semantic(|name| patterns.matches(name));
    report::render_semantic(out, &found, config.semantic_failure_limit)?;
    Ok(found)
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("tc-audit: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
