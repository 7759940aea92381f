// SPDX-License-Identifier: MIT
//
// Canonical CSS text for a typed color.
//
//   Hex → `#rgb` when every channel compacts, else `#rrggbb` (lowercase)
//   Rgb → `rgb(r, g, b)`        or `rgba(r, g, b, a)`
//   Hsl → `hsl(h, s%, l%)`      or `hsla(h, s%, l%, a)`, one decimal each
//
// The alpha form is used when the color is not fully opaque, or when the
// user asked for alpha in every output. Hex has no alpha form.

use std::fmt;

use crate::model::{Color, Hex, Hsl, Rgb, tenths, tenths_hue};

/// Output policy, read from user configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    /// Write `rgba(...)`/`hsla(...)` even when alpha is 1.
    pub include_alpha: bool,
}

impl FormatOptions {
    #[must_use]
    pub const fn with_alpha(include_alpha: bool) -> Self {
        Self { include_alpha }
    }

    /// Whether a color with this alpha gets the alpha form.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn shows_alpha(self, alpha: f64) -> bool {
        self.include_alpha || alpha != 1.0
    }
}

/// Render a color as CSS text.
#[must_use]
pub fn format(color: &Color, options: FormatOptions) -> String {
    match color {
        Color::Hex(hex) => format_hex(*hex),
        Color::Rgb(rgb) => format_rgb(*rgb, options),
        Color::Hsl(hsl) => format_hsl(*hsl, options),
    }
}

#[must_use]
pub fn format_hex(hex: Hex) -> String {
    if hex.is_shorthand() {
        format!("#{:x}{:x}{:x}", hex.r & 0x0f, hex.g & 0x0f, hex.b & 0x0f)
    } else {
        format!("#{:02x}{:02x}{:02x}", hex.r, hex.g, hex.b)
    }
}

#[must_use]
pub fn format_rgb(rgb: Rgb, options: FormatOptions) -> String {
    let Rgb { r, g, b, alpha } = rgb;
    if options.shows_alpha(alpha) {
        format!("rgba({r}, {g}, {b}, {})", format_alpha(alpha))
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

#[must_use]
pub fn format_hsl(hsl: Hsl, options: FormatOptions) -> String {
    let h = one_decimal(tenths_hue(hsl.h));
    let s = one_decimal(tenths(hsl.s));
    let l = one_decimal(tenths(hsl.l));
    if options.shows_alpha(hsl.alpha) {
        format!("hsla({h}, {s}%, {l}%, {})", format_alpha(hsl.alpha))
    } else {
        format!("hsl({h}, {s}%, {l}%)")
    }
}

/// Tenths back to text with exactly one decimal (`502` → `50.2`).
fn one_decimal(tenths: i64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Shortest text that parses back to the same alpha: `0.5`, `1`, `0.1234`.
fn format_alpha(alpha: f64) -> String {
    format!("{alpha}")
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self, FormatOptions::default()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
