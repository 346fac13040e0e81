// SPDX-License-Identifier: MIT

//! WCAG 2.x relative luminance, contrast ratio, and conformance levels.
//!
//! Thresholds:
//!
//! | Level        | Minimum ratio |
//! |--------------|---------------|
//! | AA, normal   | 4.5:1         |
//! | AA, large    | 3.0:1         |
//! | AAA, normal  | 7.0:1         |
//! | AAA, large   | 4.5:1         |
//!
//! Luminance is computed from the color's sRGB channels as they are. Flatten
//! translucent colors onto their backdrop first (see
//! [`Color::flatten_onto`](crate::color::Color::flatten_onto)); alpha is
//! ignored here.

use std::fmt;

use crate::color::Color;

/// Linearize one 8-bit sRGB channel.
///
/// Uses the 0.03928 knee from the WCAG 2.x text, not the 0.04045 of the
/// sRGB standard. No 8-bit value falls between the two, so results agree.
#[must_use]
pub fn channel_to_linear(c: u8) -> f64 {
    let v = f64::from(c) / 255.0;
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.x.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let r_lin = channel_to_linear(color.r);
    let g_lin = channel_to_linear(color.g);
    let b_lin = channel_to_linear(color.b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// Argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Conformance levels ──────────────────────────────────────────────────────

/// A WCAG contrast requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WcagLevel {
    /// AA for body text.
    AaNormal,
    /// AA for large text (18pt, or 14pt bold).
    AaLarge,
    /// AAA for body text.
    AaaNormal,
    /// AAA for large text.
    AaaLarge,
}

impl WcagLevel {
    /// All four levels, in report column order.
    pub const ALL: [Self; 4] = [Self::AaNormal, Self::AaLarge, Self::AaaNormal, Self::AaaLarge];

    /// The minimum contrast ratio for this level.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::AaNormal | Self::AaaLarge => 4.5,
            Self::AaLarge => 3.0,
            Self::AaaNormal => 7.0,
        }
    }

    /// Whether `ratio` meets this level.
    #[must_use]
    pub fn passes(self, ratio: f64) -> bool {
        ratio >= self.threshold()
    }

    /// Short label, e.g. `AA(normal)`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AaNormal => "AA(normal)",
            Self::AaLarge => "AA(large)",
            Self::AaaNormal => "AAA(normal)",
            Self::AaaLarge => "AAA(large)",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pass/fail of one contrast ratio against every [`WcagLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Compliance {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

impl Compliance {
    /// Classify a contrast ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            aa_normal: WcagLevel::AaNormal.passes(ratio),
            aa_large: WcagLevel::AaLarge.passes(ratio),
            aaa_normal: WcagLevel::AaaNormal.passes(ratio),
            aaa_large: WcagLevel::AaaLarge.passes(ratio),
        }
    }

    /// Whether the given level passed.
    #[must_use]
    pub const fn meets(self, level: WcagLevel) -> bool {
        match level {
            WcagLevel::AaNormal => self.aa_normal,
            WcagLevel::AaLarge => self.aa_large,
            WcagLevel::AaaNormal => self.aaa_normal,
            WcagLevel::AaaLarge => self.aaa_large,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
