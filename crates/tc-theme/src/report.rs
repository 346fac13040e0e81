// SPDX-License-Identifier: MIT

//! Console and CSV output for the audits.
//!
//! Console text is for people: stable for a given input, but not a format
//! to parse. The CSV is the machine-readable contract:
//!
//! ```text
//! theme,fg_var,fg_val,bg_var,bg_val,contrast,AA,AAA
//! light,--text-muted,#94a3b8,--main-background-color,#ffffff,2.56,FAIL,FAIL
//! ```
//!
//! Every renderer writes to an `io::Write` so the binary can hand it stdout
//! and the tests a `Vec<u8>`.

use std::borrow::Cow;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tc_color::WcagLevel;

use crate::audit::{AuditResult, PairOutcome, PaletteReport, SemanticReport, SkipReason, ThemeAudit};
use crate::error::{AuditError, Result};
use crate::scope::ThemeKind;
use crate::stylesheet::Stylesheet;

/// Header row of the palette CSV.
pub const CSV_HEADER: [&str; 8] = ["theme", "fg_var", "fg_val", "bg_var", "bg_val", "contrast", "AA", "AAA"];

const fn verdict(pass: bool) -> &'static str {
    if pass { "PASS" } else { "FAIL" }
}

// ─── Console ────────────────────────────────────────────────────────────────

/// `Loaded vars: root: N dark: N media-dark: N`
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_loaded(out: &mut impl Write, sheet: &Stylesheet) -> io::Result<()> {
    writeln!(
        out,
        "Loaded vars: root: {} dark: {} media-dark: {}",
        sheet.root.len(),
        sheet.dark.len(),
        sheet.media_dark.len()
    )
}

/// Note a dark variant the stylesheet doesn't define.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_missing_theme(out: &mut impl Write, kind: ThemeKind) -> io::Result<()> {
    match kind {
        ThemeKind::Light => Ok(()),
        ThemeKind::Dark => writeln!(out, "\nNo [data-theme=\"dark\"] found to analyze"),
        ThemeKind::MediaDark => writeln!(out, "\nNo media prefers-color-scheme dark block found"),
    }
}

/// One theme's fixed-pair lines.
///
/// ```text
/// === Theme audit: light (root) ===
/// - --text-primary on --main-background-color: 4.48 -> AA(normal)=FAIL AA(large)=PASS ... (fg: #777777 bg: #ffffff)
/// - --form-text missing; skipping
/// ```
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_theme_audit(out: &mut impl Write, audit: &ThemeAudit) -> io::Result<()> {
    writeln!(out, "\n=== Theme audit: {} ===", audit.theme.label())?;
    for outcome in &audit.outcomes {
        match outcome {
            PairOutcome::Evaluated(r) => {
                write!(out, "- {} on {}: {:.2} ->", r.fg_var, r.bg_var, r.contrast)?;
                for level in WcagLevel::ALL {
                    write!(out, " {level}={}", verdict(r.passes(level)))?;
                }
                writeln!(out, " (fg: {} bg: {})", r.fg_value, r.bg_value)?;
            }
            PairOutcome::Skipped(skip) => match &skip.reason {
                SkipReason::MissingForeground => {
                    writeln!(out, "- {} missing; skipping", skip.fg_var)?;
                }
                SkipReason::MissingBackground => {
                    writeln!(out, "- {} missing and no fallback; skipping", skip.bg_var)?;
                }
                SkipReason::Unparseable { fg_value, bg_value } => writeln!(
                    out,
                    "- {} or {} parse failed (fg:{fg_value}, bg:{bg_value})",
                    skip.fg_var, skip.bg_var
                )?,
            },
        }
    }
    Ok(())
}

fn failure_line(out: &mut impl Write, r: &AuditResult) -> io::Result<()> {
    write!(
        out,
        "- [{}] {} ({}) on {} ({}) -> {:.2}",
        r.theme, r.fg_var, r.fg_value, r.bg_var, r.bg_value, r.contrast
    )
}

/// Palette totals and the first `limit` AA failures.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_palette_summary(
    out: &mut impl Write,
    report: &PaletteReport,
    csv_path: &Path,
    limit: usize,
) -> io::Result<()> {
    writeln!(out, "\nFull palette audit written to {}", csv_path.display())?;
    writeln!(
        out,
        "Total checks: {}, Failures (no AA): {}",
        report.rows.len(),
        report.failure_count()
    )?;

    let mut failures = report.failures().take(limit).peekable();
    if failures.peek().is_some() {
        writeln!(out, "\nTop failures (first {limit}):")?;
        for r in failures {
            failure_line(out, r)?;
            writeln!(out, " : AA=FAIL")?;
        }
    }
    Ok(())
}

/// Semantic totals and the first `limit` failures.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_semantic(out: &mut impl Write, report: &SemanticReport, limit: usize) -> io::Result<()> {
    writeln!(out, "\n=== Semantic palette audit (focused on text/icons/buttons) ===")?;
    writeln!(
        out,
        "Total semantic checks: {}, Failures: {}",
        report.total,
        report.failures.len()
    )?;

    if report.failures.is_empty() {
        return writeln!(out, "No semantic failures found.");
    }

    writeln!(out, "\nSemantic failures: (first {limit})")?;
    for r in report.failures.iter().take(limit) {
        failure_line(out, r)?;
        writeln!(out)?;
    }
    Ok(())
}

// ─── CSV ────────────────────────────────────────────────────────────────────

/// Quote a CSV field when it needs it (RFC 4180).
fn csv_field(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

fn csv_row<'a>(out: &mut impl Write, fields: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
    let line = fields.into_iter().map(csv_field).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Write palette rows as CSV.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn write_csv(out: &mut impl Write, rows: &[AuditResult]) -> io::Result<()> {
    csv_row(out, CSV_HEADER)?;
    for r in rows {
        let contrast = format!("{:.2}", r.contrast);
        csv_row(
            out,
            [
                r.theme.name(),
                r.fg_var.as_str(),
                r.fg_value.as_str(),
                r.bg_var.as_str(),
                r.bg_value.as_str(),
                contrast.as_str(),
                verdict(r.passes(WcagLevel::AaNormal)),
                verdict(r.passes(WcagLevel::AaaNormal)),
            ],
        )?;
    }
    out.flush()
}

/// Write the palette CSV to `path`, creating parent directories and
/// replacing any previous report.
///
/// # Errors
///
/// [`AuditError::WriteReport`] if the directory or file can't be written.
pub fn save_csv(path: &Path, rows: &[AuditResult]) -> Result<()> {
    let wrap = |source| AuditError::WriteReport {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    let file = fs::File::create(path).map_err(wrap)?;
    write_csv(&mut BufWriter::new(file), rows).map_err(wrap)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Auditor, Skip};
    use crate::config::{AuditConfig, AuditPair};
    use crate::stylesheet::extract;
    use pretty_assertions::assert_eq;
    use tc_color::Compliance;

    fn row(fg_value: &str, contrast: f64) -> AuditResult {
        AuditResult {
            theme: ThemeKind::Light,
            fg_var: "--text-primary".into(),
            fg_value: fg_value.into(),
            bg_var: "--main-background-color".into(),
            bg_value: "#ffffff".into(),
            contrast,
            compliance: Compliance::from_ratio(contrast),
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        assert_eq!(csv_field("#fff"), "#fff");
        assert_eq!(csv_field("rgba(0, 0, 0, 0.5)"), "\"rgba(0, 0, 0, 0.5)\"");
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn csv_layout() {
        let text = render(|out| write_csv(out, &[row("#777777", 4.478), row("rgba(0, 0, 0, 0.9)", 18.1)]));
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], "theme,fg_var,fg_val,bg_var,bg_val,contrast,AA,AAA");
        assert_eq!(
            lines[1],
            "light,--text-primary,#777777,--main-background-color,#ffffff,4.48,FAIL,FAIL"
        );
        assert_eq!(
            lines[2],
            "light,--text-primary,\"rgba(0, 0, 0, 0.9)\",--main-background-color,#ffffff,18.10,PASS,PASS"
        );
        assert_eq!(lines[3], "");
    }

    #[test]
    fn save_creates_parent_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/palette.csv");

        save_csv(&path, &[row("#000", 21.0), row("#777777", 4.48)]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);

        save_csv(&path, &[row("#000", 21.0)]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn fixed_pair_lines() {
        let sheet = extract(":root {\n--text-primary:#777777;\n--main-background-color:#ffffff;\n}\n");
        let config = AuditConfig {
            pairs: vec![
                AuditPair::new("--text-primary", "--main-background-color"),
                AuditPair::new("--form-text", "--form-bg"),
            ],
            ..AuditConfig::default()
        };
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        let text = render(|out| render_theme_audit(out, &audits[0]));
        assert_eq!(
            text,
            "\n=== Theme audit: light (root) ===\n\
             - --text-primary on --main-background-color: 4.48 -> AA(normal)=FAIL AA(large)=PASS \
             AAA(normal)=FAIL AAA(large)=FAIL (fg: #777777 bg: #ffffff)\n\
             - --form-text missing; skipping\n"
        );
    }

    #[test]
    fn skip_lines() {
        let audit = ThemeAudit {
            theme: ThemeKind::Dark,
            outcomes: vec![
                PairOutcome::Skipped(Skip {
                    theme: ThemeKind::Dark,
                    fg_var: "--a".into(),
                    bg_var: "--b".into(),
                    reason: SkipReason::MissingBackground,
                }),
                PairOutcome::Skipped(Skip {
                    theme: ThemeKind::Dark,
                    fg_var: "--a".into(),
                    bg_var: "--b".into(),
                    reason: SkipReason::Unparseable {
                        fg_value: "inherit".into(),
                        bg_value: "#fff".into(),
                    },
                }),
            ],
        };
        let text = render(|out| render_theme_audit(out, &audit));
        assert!(text.contains("=== Theme audit: dark (data-theme) ==="));
        assert!(text.contains("- --b missing and no fallback; skipping\n"));
        assert!(text.contains("- --a or --b parse failed (fg:inherit, bg:#fff)\n"));
    }

    #[test]
    fn palette_summary_limits_failures() {
        let report = PaletteReport {
            rows: vec![row("#aaa", 2.32), row("#000", 21.0), row("#bbb", 1.92), row("#ccc", 1.61)],
        };
        let text = render(|out| render_palette_summary(out, &report, Path::new("out.csv"), 2));
        assert!(text.contains("Full palette audit written to out.csv\n"));
        assert!(text.contains("Total checks: 4, Failures (no AA): 3\n"));
        assert!(text.contains("Top failures (first 2):\n"));
        assert!(text.contains("(#aaa) on --main-background-color (#ffffff) -> 2.32 : AA=FAIL"));
        assert!(text.contains("#bbb"));
        assert!(!text.contains("#ccc"));
    }

    #[test]
    fn palette_summary_without_failures() {
        let report = PaletteReport { rows: vec![row("#000", 21.0)] };
        let text = render(|out| render_palette_summary(out, &report, Path::new("out.csv"), 12));
        assert!(!text.contains("Top failures"));
    }

    #[test]
    fn semantic_summary() {
        let clean = SemanticReport { total: 5, failures: vec![] };
        let text = render(|out| render_semantic(out, &clean, 20));
        assert!(text.ends_with("Total semantic checks: 5, Failures: 0\nNo semantic failures found.\n"));

        let failing = SemanticReport {
            total: 5,
            failures: vec![row("#999", 2.85)],
        };
        let text = render(|out| render_semantic(out, &failing, 20));
        assert!(text.contains("Semantic failures: (first 20)\n"));
        assert!(text.contains("- [light] --text-primary (#999) on --main-background-color (#ffffff) -> 2.85\n"));
    }

    #[test]
    fn loaded_and_missing_notes() {
        let sheet = extract(":root {\n--a:#fff;\n--b:#000;\n}\n");
        let text = render(|out| {
            render_loaded(out, &sheet)?;
            for kind in sheet.missing_themes() {
                render_missing_theme(out, kind)?;
            }
            Ok(())
        });
        assert_eq!(
            text,
            "Loaded vars: root: 2 dark: 0 media-dark: 0\n\
             \nNo [data-theme=\"dark\"] found to analyze\n\
             \nNo media prefers-color-scheme dark block found\n"
        );
    }
}
