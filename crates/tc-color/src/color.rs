// SPDX-License-Identifier: MIT
//
// tc-color color model — CSS color values as 8-bit sRGB plus alpha.
//
// Theme stylesheets declare colors as text: `#abc`, `#aabbcc`,
// `rgba(0, 0, 0, 0.5)`, the `transparent` keyword, or functions like
// `color-mix(...)` that we do not evaluate. This module turns that text
// into a `Color` and flattens translucent colors onto their backdrop so
// the contrast engine only ever sees what actually lands on screen.
//
// Pipeline:
//
//   CSS value text → parse_color → Color (r, g, b, alpha)
//                                     │
//                 backdrop ──────────▶ blend / to_opaque → opaque Color
//
// Compositing happens on the 8-bit sRGB channels (the way browsers paint
// CSS colors), not in linear light.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A possibly-translucent color sample.
///
/// Channels are 8-bit sRGB, alpha is 0.0 (fully transparent) to 1.0
/// (fully opaque). Every constructor normalizes into these ranges, so a
/// `Color` never carries an out-of-range channel.
///
/// # Examples
///
/// ```
/// use tc_color::color::{Color, parse_color};
///
/// let ink = parse_color("#1e293b").unwrap();
/// assert!(ink.is_opaque());
///
/// let veil = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
/// let flat = veil.blend_over(&Color::WHITE);
/// assert_eq!(flat.to_hex(), "#808080");
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,

    /// Alpha (opacity): 0.0 (fully transparent) to 1.0 (fully opaque).
    pub alpha: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from 8-bit sRGB channels.
    #[inline]
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Create a color from 8-bit sRGB channels with alpha (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Create a color from a `#RGB` or `#RRGGBB` hex literal.
    ///
    /// The leading `#` is optional. Unlike [`parse_color`], this accepts
    /// only the literal itself, with nothing around it.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s.strip_prefix('#').unwrap_or(s))
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);

    /// Pure white. Also the backdrop of last resort when nothing else is known.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);

    /// Fully transparent black, what the `transparent` keyword means.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        alpha: 0.0,
    };

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha value.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba8(self.r, self.g, self.b, alpha)
    }

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Whether this color is fully transparent (alpha <= 0.0).
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    // ─── Alpha Blending ──────────────────────────────────────────────────

    /// Composite this color (source) over another (destination).
    ///
    /// Shorthand for [`blend`]`(self, *dst)`.
    #[inline]
    #[must_use]
    pub fn blend_over(self, dst: &Self) -> Self {
        blend(self, *dst)
    }

    /// Flatten this color onto an opaque backdrop.
    ///
    /// The backdrop is flattened onto white first, so the result is always
    /// opaque no matter what it is given.
    #[must_use]
    pub fn flatten_onto(self, backdrop: &Self) -> Self {
        if self.is_opaque() {
            return self;
        }
        let floor = if backdrop.is_opaque() {
            *backdrop
        } else {
            backdrop.blend_over(&Self::WHITE)
        };
        self.blend_over(&floor)
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Channels as an `(r, g, b)` tuple.
    #[inline]
    #[must_use]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Convert to a hex string (`#rrggbb`). Alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color(rgba({}, {}, {}, {:.3}))",
            self.r, self.g, self.b, self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            f.write_str(&self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
        }
    }
}

impl Default for Color {
    /// Defaults to transparent, like an unset CSS background.
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// A `#abc` or `#aabbcc` literal ending at a word boundary. `#aabbccdd`
/// and `#abcd` do not match.
static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("hex color pattern is valid")
});

/// `rgb(...)` / `rgba(...)` with everything between the parentheses captured.
static RGBA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgba?\(([^)]+)\)").expect("rgba pattern is valid"));

/// Parse a CSS color value.
///
/// Recognized, in this order (the first hit wins):
///
/// 1. A hex literal anywhere in the text (`#abc`, `#aabbcc`). Searching the
///    whole text doubles as the fallback for functions we don't model:
///    `color-mix(in srgb, #fff 40%, transparent)` reads as `#fff`.
/// 2. `rgb(r, g, b)` / `rgba(r, g, b, a)` with comma-separated components.
/// 3. The `transparent` keyword anywhere in the text.
///
/// Anything else is `None`. So is an `rgb()` value whose numeric components
/// don't parse: a malformed value is skipped, never a panic.
#[must_use]
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();

    if let Some(caps) = HEX_RE.captures(text) {
        return parse_hex(&caps[1]);
    }

    if let Some(caps) = RGBA_RE.captures(text) {
        if let Some(color) = parse_rgb_components(&caps[1]) {
            return Some(color);
        }
    }

    if text.contains("transparent") {
        return Some(Color::TRANSPARENT);
    }

    None
}

/// Parse the inside of `rgb(...)`. Needs at least three components.
fn parse_rgb_components(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let alpha = match parts.get(3) {
        Some(a) => parse_number(a)?,
        None => 1.0,
    };

    Some(Color::rgba8(r, g, b, alpha))
}

/// A channel component: decimal number, truncated toward zero, clamped to 0–255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_channel(s: &str) -> Option<u8> {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    parse_number(s).map(|v| v.trunc().clamp(0.0, 255.0) as u8)
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the digits of a hex literal (no `#`).
fn parse_hex(s: &str) -> Option<Color> {
    let bytes = s.as_bytes();
    match bytes.len() {
        // RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Compositing ─────────────────────────────────────────────────────────────

/// Porter-Duff "source over": composite `fg` over `bg`.
///
/// ```text
/// a = fg.a + bg.a × (1 − fg.a)
/// c = (fg.c × fg.a + bg.c × bg.a × (1 − fg.a)) / a
/// ```
///
/// Channels are rounded half-to-even. When both inputs are fully
/// transparent the result is [`Color::TRANSPARENT`].
#[must_use]
pub fn blend(fg: Color, bg: Color) -> Color {
    let inv = 1.0 - fg.alpha;
    let alpha = bg.alpha.mul_add(inv, fg.alpha);
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }

    let channel = |f: u8, b: u8| -> u8 {
        let v = f64::from(f).mul_add(fg.alpha, f64::from(b) * bg.alpha * inv) / alpha;
        to_u8(v)
    };

    Color::rgba8(
        channel(fg.r, bg.r),
        channel(fg.g, bg.g),
        channel(fg.b, bg.b),
        alpha,
    )
}

/// Parse `value` and flatten it to an opaque color.
///
/// Opaque values come back as-is. Translucent ones are composited over the
/// parsed `fallback_background`, or over white when the fallback is absent
/// or unparseable. Returns `None` only when `value` itself doesn't parse.
#[must_use]
pub fn to_opaque(value: &str, fallback_background: Option<&str>) -> Option<Color> {
    let color = parse_color(value)?;
    if color.is_opaque() {
        return Some(color);
    }
    let backdrop = fallback_background
        .and_then(parse_color)
        .unwrap_or(Color::WHITE);
    Some(color.flatten_onto(&backdrop))
}

/// Round a 0.0–255.0 channel value to a u8, ties to even.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
