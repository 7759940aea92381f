// SPDX-License-Identifier: MIT
//
// Color model conversion — pure functions between Hex, RGB and HSL.
//
// RGB ↔ HSL follows the usual hexcone model:
//
//   rgb → hsl: hue from whichever channel is the maximum, lightness is
//              the midrange, saturation is chroma over (1 - |2l - 1|).
//   hsl → rgb: chroma c, second-largest component x, lightness offset m,
//              and one of six 60° sectors picks where c and x go.
//
// Alpha rides along untouched on every conversion. Hex ↔ RGB is a channel
// copy: the digit decoding happened in the parser, and the digit encoding
// (with shorthand compaction) happens in the formatter.

use crate::model::{Color, Hex, Hsl, Notation, Rgb};

// ─── Hex ↔ RGB ───────────────────────────────────────────────────────────────

#[inline]
#[must_use]
pub const fn hex_to_rgb(hex: Hex) -> Rgb {
    Rgb {
        r: hex.r,
        g: hex.g,
        b: hex.b,
        alpha: hex.alpha,
    }
}

#[inline]
#[must_use]
pub const fn rgb_to_hex(rgb: Rgb) -> Hex {
    Hex {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
        alpha: rgb.alpha,
    }
}

// ─── RGB ↔ HSL ───────────────────────────────────────────────────────────────

/// Convert RGB to HSL. Saturation and lightness come back in percent.
///
/// Achromatic input (`max == min`) short-circuits to `h = 0, s = 0`. This
/// also covers pure black and white, where the saturation denominator
/// `1 - |2l - 1|` would be zero.
#[must_use]
// `cmax` is a copy of one of the channels, so exact comparison is what
// identifies which channel it came from.
#[allow(clippy::float_cmp)]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;
    let l = (cmax + cmin) / 2.0;

    let (h, s) = if delta == 0.0 {
        (0.0, 0.0)
    } else {
        let h = if cmax == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if cmax == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = delta / (1.0 - 2.0f64.mul_add(l, -1.0).abs());
        (h, s)
    };

    Hsl::new(h, s * 100.0, l * 100.0).with_alpha(rgb.alpha)
}

/// Convert HSL to RGB, rounding each channel to the nearest integer.
///
/// Ties round away from zero: a channel landing on exactly 127.5 becomes
/// 128.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match sector(h) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
        alpha: hsl.alpha,
    }
}

/// Which 60° slice of the hue circle `h` (already in [0, 360)) falls in.
#[inline]
fn sector(h: f64) -> u8 {
    (h / 60.0).floor().clamp(0.0, 5.0) as u8
}

/// Scale a 0.0–1.0 component to a 0–255 channel.
#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Composites ──────────────────────────────────────────────────────────────

#[must_use]
pub fn hex_to_hsl(hex: Hex) -> Hsl {
    rgb_to_hsl(hex_to_rgb(hex))
}

#[must_use]
pub fn hsl_to_hex(hsl: Hsl) -> Hex {
    rgb_to_hex(hsl_to_rgb(hsl))
}

/// Convert a color to any notation. Same-notation conversion is identity.
#[must_use]
pub fn convert(color: Color, target: Notation) -> Color {
    match (color, target) {
        (Color::Hex(c), Notation::Hex) => Color::Hex(c),
        (Color::Hex(c), Notation::Rgb) => Color::Rgb(hex_to_rgb(c)),
        (Color::Hex(c), Notation::Hsl) => Color::Hsl(hex_to_hsl(c)),
        (Color::Rgb(c), Notation::Hex) => Color::Hex(rgb_to_hex(c)),
        (Color::Rgb(c), Notation::Rgb) => Color::Rgb(c),
        (Color::Rgb(c), Notation::Hsl) => Color::Hsl(rgb_to_hsl(c)),
        (Color::Hsl(c), Notation::Hex) => Color::Hex(hsl_to_hex(c)),
        (Color::Hsl(c), Notation::Rgb) => Color::Rgb(hsl_to_rgb(c)),
        (Color::Hsl(c), Notation::Hsl) => Color::Hsl(c),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
