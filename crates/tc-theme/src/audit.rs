// SPDX-License-Identifier: MIT

//! The three contrast audits.
//!
//! ```text
//! Stylesheet ──▶ ThemeScope per theme ──▶ resolve fg / bg values
//!                                              │
//!                     bg: to_opaque over the main background
//!                     fg: flatten onto the opaque bg
//!                                              │
//!                                              ▼
//!                                contrast_ratio → Compliance → AuditResult
//! ```
//!
//! - [`Auditor::fixed_pairs`] checks the curated pairs from the config.
//! - [`Auditor::full_palette`] checks every parseable variable against every
//!   background target.
//! - [`Auditor::semantic`] runs the same sweep restricted to foreground-looking
//!   names and keeps only AA failures.
//!
//! All three share [`Auditor::measure`]; they differ only in which pairs they
//! pick and what they keep.

use tc_color::{Compliance, WcagLevel, contrast_ratio, parse_color, to_opaque};

use crate::config::{AuditConfig, AuditPair};
use crate::scope::{ThemeKind, ThemeScope};
use crate::stylesheet::Stylesheet;

// ─── Results ────────────────────────────────────────────────────────────────

/// One evaluated (foreground, background) pair in one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    pub theme: ThemeKind,
    pub fg_var: String,
    pub fg_value: String,
    pub bg_var: String,
    /// The background value actually measured against, after any fallback
    /// to the main background.
    pub bg_value: String,
    pub contrast: f64,
    pub compliance: Compliance,
}

impl AuditResult {
    /// Whether this pair meets `level`.
    #[must_use]
    pub const fn passes(&self, level: WcagLevel) -> bool {
        self.compliance.meets(level)
    }
}

/// Why a pair was not evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The foreground variable is declared nowhere in the scope.
    MissingForeground,
    /// The background variable is missing and so is the main background.
    MissingBackground,
    /// One of the values is not a color we can read.
    Unparseable { fg_value: String, bg_value: String },
}

/// A pair the audit had to pass over, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub theme: ThemeKind,
    pub fg_var: String,
    pub bg_var: String,
    pub reason: SkipReason,
}

/// Outcome of one fixed pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Evaluated(AuditResult),
    Skipped(Skip),
}

/// Fixed-pair outcomes for one theme, in config order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeAudit {
    pub theme: ThemeKind,
    pub outcomes: Vec<PairOutcome>,
}

/// Every row of the full-palette sweep.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteReport {
    pub rows: Vec<AuditResult>,
}

impl PaletteReport {
    /// Rows that fail AA for normal text.
    pub fn failures(&self) -> impl Iterator<Item = &AuditResult> {
        self.rows.iter().filter(|r| !r.passes(WcagLevel::AaNormal))
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Semantic sweep: how many checks ran and which failed AA.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SemanticReport {
    pub total: usize,
    pub failures: Vec<AuditResult>,
}

// ─── Auditor ────────────────────────────────────────────────────────────────

/// Runs audits over one stylesheet with one configuration.
pub struct Auditor<'a> {
    config: &'a AuditConfig,
    scopes: Vec<ThemeScope<'a>>,
}

impl<'a> Auditor<'a> {
    #[must_use]
    pub fn new(stylesheet: &'a Stylesheet, config: &'a AuditConfig) -> Self {
        Self {
            config,
            scopes: stylesheet.scopes(),
        }
    }

    /// The theme scopes this auditor evaluates, light first.
    #[must_use]
    pub fn scopes(&self) -> &[ThemeScope<'a>] {
        &self.scopes
    }

    /// Contrast between a foreground and background value as they would
    /// render in `scope`.
    ///
    /// A translucent background is flattened onto the scope's main
    /// background (white if that is missing or unreadable); the foreground is
    /// then flattened onto the result. `None` if either value doesn't parse.
    #[must_use]
    pub fn measure(&self, scope: &ThemeScope<'_>, fg_value: &str, bg_value: &str) -> Option<f64> {
        let main = scope.resolve(&self.config.main_background);
        let bg = to_opaque(bg_value, main)?;
        let fg = parse_color(fg_value)?.flatten_onto(&bg);
        Some(contrast_ratio(fg, bg))
    }

    fn result(
        scope: &ThemeScope<'_>,
        fg_var: &str,
        fg_value: &str,
        bg_var: &str,
        bg_value: &str,
        contrast: f64,
    ) -> AuditResult {
        AuditResult {
            theme: scope.kind,
            fg_var: fg_var.to_string(),
            fg_value: fg_value.to_string(),
            bg_var: bg_var.to_string(),
            bg_value: bg_value.to_string(),
            contrast,
            compliance: Compliance::from_ratio(contrast),
        }
    }

    // ─── Fixed pairs ────────────────────────────────────────────────────

    /// Evaluate every configured pair in every available theme.
    #[must_use]
    pub fn fixed_pairs(&self) -> Vec<ThemeAudit> {
        self.scopes
            .iter()
            .map(|scope| ThemeAudit {
                theme: scope.kind,
                outcomes: self
                    .config
                    .pairs
                    .iter()
                    .map(|pair| self.evaluate_pair(scope, pair))
                    .collect(),
            })
            .collect()
    }

    /// Evaluate one pair in one scope.
    ///
    /// A background that is missing, or that mentions `transparent`, is
    /// replaced by the main background before measuring.
    #[must_use]
    pub fn evaluate_pair(&self, scope: &ThemeScope<'_>, pair: &AuditPair) -> PairOutcome {
        let skip = |reason| {
            PairOutcome::Skipped(Skip {
                theme: scope.kind,
                fg_var: pair.foreground.clone(),
                bg_var: pair.background.clone(),
                reason,
            })
        };

        let Some(fg_value) = scope.resolve(&pair.foreground) else {
            log::debug!("[{}] {} not found", scope.kind, pair.foreground);
            return skip(SkipReason::MissingForeground);
        };

        let bg_value = match scope.resolve(&pair.background) {
            Some(v) if !v.contains("transparent") => Some(v),
            _ => scope.resolve(&self.config.main_background),
        };
        let Some(bg_value) = bg_value else {
            log::debug!("[{}] {} not found, no fallback", scope.kind, pair.background);
            return skip(SkipReason::MissingBackground);
        };

        match self.measure(scope, fg_value, bg_value) {
            Some(contrast) => PairOutcome::Evaluated(Self::result(
                scope,
                &pair.foreground,
                fg_value,
                &pair.background,
                bg_value,
                contrast,
            )),
            None => {
                log::warn!(
                    "[{}] cannot parse {} ({fg_value}) or {} ({bg_value})",
                    scope.kind,
                    pair.foreground,
                    pair.background
                );
                skip(SkipReason::Unparseable {
                    fg_value: fg_value.to_string(),
                    bg_value: bg_value.to_string(),
                })
            }
        }
    }

    // ─── Palette sweeps ─────────────────────────────────────────────────

    /// Every visible variable whose name passes `is_foreground` and whose
    /// value parses, against every background target that resolves and
    /// parses. Rows come out theme by theme, foregrounds in name order,
    /// backgrounds in config order.
    fn sweep(&self, is_foreground: impl Fn(&str) -> bool) -> Vec<AuditResult> {
        let mut rows = Vec::new();

        for scope in &self.scopes {
            let before = rows.len();
            for fg_var in scope.names() {
                if !is_foreground(fg_var) {
                    continue;
                }
                let Some(fg_value) = scope.resolve(fg_var) else {
                    continue;
                };
                if parse_color(fg_value).is_none() {
                    log::debug!("[{}] {fg_var}: not a color ({fg_value})", scope.kind);
                    continue;
                }

                for bg_var in &self.config.background_targets {
                    let Some(bg_value) = scope.resolve(bg_var) else {
                        continue;
                    };
                    let Some(contrast) = self.measure(scope, fg_value, bg_value) else {
                        continue;
                    };
                    rows.push(Self::result(scope, fg_var, fg_value, bg_var, bg_value, contrast));
                }
            }
            log::debug!("[{}] {} palette checks", scope.kind, rows.len() - before);
        }

        rows
    }

    /// Check every parseable variable against every background target.
    #[must_use]
    pub fn full_palette(&self) -> PaletteReport {
        PaletteReport {
            rows: self.sweep(|_| true),
        }
    }

    /// Check foreground-looking variables against every background target
    /// and keep the AA (normal text) failures.
    #[must_use]
    pub fn semantic(&self, is_foreground: impl Fn(&str) -> bool) -> SemanticReport {
        let rows = self.sweep(is_foreground);
        let total = rows.len();
        let failures = rows
            .into_iter()
            .filter(|r| !r.passes(WcagLevel::AaNormal))
            .collect();
        SemanticReport { total, failures }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::extract;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn one_pair(fg: &str, bg: &str) -> AuditConfig {
        AuditConfig {
            pairs: vec![AuditPair::new(fg, bg)],
            ..AuditConfig::default()
        }
    }

    fn evaluated(outcome: &PairOutcome) -> &AuditResult {
        match outcome {
            PairOutcome::Evaluated(r) => r,
            PairOutcome::Skipped(s) => panic!("pair was skipped: {s:?}"),
        }
    }

    // ── Fixed pairs ─────────────────────────────────────────────────

    #[test]
    fn black_on_white_passes_everything() {
        let sheet = extract(":root {\n--text-primary:#000000;\n--main-background-color:#ffffff;\n}\n");
        let config = one_pair("--text-primary", "--main-background-color");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();

        assert_eq!(audits.len(), 1);
        let r = evaluated(&audits[0].outcomes[0]);
        assert_eq!(format!("{:.2}", r.contrast), "21.00");
        for level in WcagLevel::ALL {
            assert!(r.passes(level), "{level} should pass");
        }
    }

    #[test]
    fn gray_777_fails_aa_normal_passes_aa_large() {
        let sheet = extract(":root {\n--text-primary:#777777;\n--main-background-color:#ffffff;\n}\n");
        let config = one_pair("--text-primary", "--main-background-color");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();

        let r = evaluated(&audits[0].outcomes[0]);
        assert!(approx_eq(r.contrast, 4.48, 0.01), "contrast: {}", r.contrast);
        assert!(!r.passes(WcagLevel::AaNormal));
        assert!(r.passes(WcagLevel::AaLarge));
        assert!(!r.passes(WcagLevel::AaaNormal));
        assert!(!r.passes(WcagLevel::AaaLarge));
    }

    #[test]
    fn missing_foreground_is_skipped() {
        let sheet = extract(":root {\n--main-background-color:#fff;\n}\n");
        let config = one_pair("--text-primary", "--main-background-color");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        assert_eq!(
            audits[0].outcomes[0],
            PairOutcome::Skipped(Skip {
                theme: ThemeKind::Light,
                fg_var: "--text-primary".into(),
                bg_var: "--main-background-color".into(),
                reason: SkipReason::MissingForeground,
            })
        );
    }

    #[test]
    fn missing_background_without_fallback_is_skipped() {
        let sheet = extract(":root {\n--button-text:#fff;\n}\n");
        let config = one_pair("--button-text", "--button-bg");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        match &audits[0].outcomes[0] {
            PairOutcome::Skipped(s) => assert_eq!(s.reason, SkipReason::MissingBackground),
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn missing_background_falls_back_to_main() {
        let sheet = extract(":root {\n--button-text:#000;\n--main-background-color:#fff;\n}\n");
        let config = one_pair("--button-text", "--button-bg");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        let r = evaluated(&audits[0].outcomes[0]);
        assert_eq!(r.bg_value, "#fff");
        assert!(approx_eq(r.contrast, 21.0, 0.01));
    }

    #[test]
    fn transparent_background_falls_back_to_main() {
        let css = indoc! {"
            :root {
              --theme-toggle-color: #ffffff;
              --theme-toggle-bg: transparent;
              --main-background-color: #000000;
            }
        "};
        let sheet = extract(css);
        let config = one_pair("--theme-toggle-color", "--theme-toggle-bg");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        let r = evaluated(&audits[0].outcomes[0]);
        assert_eq!(r.bg_value, "#000000");
        assert!(approx_eq(r.contrast, 21.0, 0.01));
    }

    #[test]
    fn unparseable_value_is_skipped_with_values() {
        let css = ":root {\n--text-primary: var(--ink);\n--main-background-color:#fff;\n}\n";
        let sheet = extract(css);
        let config = one_pair("--text-primary", "--main-background-color");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();
        match &audits[0].outcomes[0] {
            PairOutcome::Skipped(s) => assert_eq!(
                s.reason,
                SkipReason::Unparseable {
                    fg_value: "var(--ink)".into(),
                    bg_value: "#fff".into(),
                }
            ),
            other => panic!("expected skip, got {other:?}"),
        }
    }

    #[test]
    fn translucent_foreground_is_flattened() {
        // 50% black over white renders as #808080.
        let css = ":root {\n--text-primary: rgba(0, 0, 0, 0.5);\n--main-background-color:#ffffff;\n}\n";
        let sheet = extract(css);
        let config = AuditConfig::default();
        let auditor = Auditor::new(&sheet, &config);
        let scope = auditor.scopes()[0];
        let direct = contrast_ratio(tc_color::Color::rgb8(128, 128, 128), tc_color::Color::WHITE);
        let measured = auditor.measure(&scope, "rgba(0, 0, 0, 0.5)", "#ffffff").unwrap();
        assert!(approx_eq(measured, direct, 1e-12));
    }

    #[test]
    fn translucent_background_sits_on_main_background() {
        let css = ":root {\n--main-background-color:#000000;\n}\n";
        let sheet = extract(css);
        let config = AuditConfig::default();
        let auditor = Auditor::new(&sheet, &config);
        let scope = auditor.scopes()[0];
        // 50% white over black → #808080; white text on that.
        let measured = auditor
            .measure(&scope, "#ffffff", "rgba(255, 255, 255, 0.5)")
            .unwrap();
        let direct = contrast_ratio(tc_color::Color::WHITE, tc_color::Color::rgb8(128, 128, 128));
        assert!(approx_eq(measured, direct, 1e-12));
    }

    #[test]
    fn dark_theme_inherits_and_overrides() {
        let css = indoc! {r#"
            :root {
              --text-primary: #000000;
              --main-background-color: #ffffff;
            }

            [data-theme="dark"] {
              --main-background-color: #000000;
            }
        "#};
        let sheet = extract(css);
        let config = one_pair("--text-primary", "--main-background-color");
        let audits = Auditor::new(&sheet, &config).fixed_pairs();

        assert_eq!(audits.len(), 2);
        assert_eq!(audits[1].theme, ThemeKind::Dark);
        // Black text inherited from :root on the dark override: no contrast.
        let r = evaluated(&audits[1].outcomes[0]);
        assert!(approx_eq(r.contrast, 1.0, 1e-9));
        assert!(!r.passes(WcagLevel::AaLarge));
    }

    // ── Full palette ────────────────────────────────────────────────

    const PALETTE: &str = indoc! {r#"
        :root {
          --main-background-color: #ffffff;
          --form-bg: #f1f5f9;
          --text-primary: #1e293b;
          --text-muted: #94a3b8;
          --shadow: 0 1px 2px rgba(0, 0, 0, 0.1);
          --radius: 4px;
          --accent: color-mix(in srgb, #2563eb 80%, white);
        }

        [data-theme="dark"] {
          --main-background-color: #0f172a;
          --text-primary: #e2e8f0;
        }
    "#};

    #[test]
    fn palette_has_one_row_per_parsed_combination() {
        let sheet = extract(PALETTE);
        let config = AuditConfig::default();
        let report = Auditor::new(&sheet, &config).full_palette();

        // Parseable foregrounds per theme: main-bg, form-bg, text-primary,
        // text-muted, shadow (rgba), accent (embedded hex) = 6. --radius is out.
        // Background targets that resolve: main-bg and form-bg = 2.
        // Two themes → 6 * 2 * 2.
        assert_eq!(report.rows.len(), 24);
        assert!(report.rows.iter().all(|r| r.fg_var != "--radius"));

        let light = report.rows.iter().filter(|r| r.theme == ThemeKind::Light).count();
        assert_eq!(light, 12);
    }

    #[test]
    fn palette_flags_match_recomputed_ratio() {
        let sheet = extract(PALETTE);
        let config = AuditConfig::default();
        let report = Auditor::new(&sheet, &config).full_palette();

        for row in &report.rows {
            assert_eq!(row.compliance, Compliance::from_ratio(row.contrast), "{row:?}");
        }
        let expected = report.rows.iter().filter(|r| r.contrast < 4.5).count();
        assert_eq!(report.failure_count(), expected);
    }

    #[test]
    fn palette_order_is_theme_then_name_then_target() {
        let sheet = extract(PALETTE);
        let config = AuditConfig::default();
        let report = Auditor::new(&sheet, &config).full_palette();
        let first: Vec<(&str, &str)> = report.rows[..4]
            .iter()
            .map(|r| (r.fg_var.as_str(), r.bg_var.as_str()))
            .collect();
        assert_eq!(
            first,
            vec![
                ("--accent", "--main-background-color"),
                ("--accent", "--form-bg"),
                ("--form-bg", "--main-background-color"),
                ("--form-bg", "--form-bg"),
            ]
        );
    }

    // ── Semantic ────────────────────────────────────────────────────

    #[test]
    fn semantic_only_checks_matching_names() {
        let sheet = extract(PALETTE);
        let config = AuditConfig::default();
        let patterns = config.foreground_patterns().unwrap();
        let report = Auditor::new(&sheet, &config).semantic(|name| patterns.matches(name));

        // --main-background-color (-color suffix), --text-primary, --text-muted
        // × 2 targets × 2 themes.
        assert_eq!(report.total, 12);
        assert!(report.failures.iter().all(|r| !r.passes(WcagLevel::AaNormal)));
        // #94a3b8 on white is well under 4.5.
        assert!(
            report
                .failures
                .iter()
                .any(|r| r.theme == ThemeKind::Light && r.fg_var == "--text-muted")
        );
    }

    #[test]
    fn semantic_with_custom_predicate() {
        let sheet = extract(PALETTE);
        let config = AuditConfig::default();
        let report = Auditor::new(&sheet, &config).semantic(|name| name == "--text-primary");
        assert_eq!(report.total, 4);
        // Dark text color on the light form background it inherits from :root.
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].theme, ThemeKind::Dark);
        assert_eq!(report.failures[0].bg_var, "--form-bg");
    }
}
