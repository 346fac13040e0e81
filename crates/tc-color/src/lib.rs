// SPDX-License-Identifier: MIT
//
// tc-color — color math for tc-audit.
//
// Turns CSS color text into 8-bit sRGB samples, flattens translucent
// samples onto their backdrop, and measures WCAG contrast between the
// results. Everything here is pure and total: unparseable input is `None`,
// never an error or a panic.
//
//   color.rs    → parse_color, blend, to_opaque
//   contrast.rs → relative luminance, contrast ratio, WCAG levels

pub mod color;
pub mod contrast;

pub use color::{Color, blend, parse_color, to_opaque};
pub use contrast::{Compliance, WcagLevel, contrast_ratio, relative_luminance};
