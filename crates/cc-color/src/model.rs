// SPDX-License-Identifier: MIT
//
// Typed color values — one struct per CSS notation, each carrying alpha.
//
// The three notations describe the same sRGB color in different ways, and
// `Color` is the tagged union the rest of the crate passes around. Alpha is
// stored on every variant even though hex text never spells it out: the
// value has to survive a trip through hex when the user keeps cycling.

use std::fmt;

// ─── Notation ────────────────────────────────────────────────────────────────

/// Which CSS notation a color is written in.
///
/// Conversion cycles through these in a fixed order:
/// `Hex → Rgb → Hsl → Hex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `#rgb` / `#rrggbb`
    Hex,
    /// `rgb(r, g, b)` / `rgba(r, g, b, a)`
    Rgb,
    /// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`
    Hsl,
}

impl Notation {
    /// Every notation, in cycle order.
    pub const ALL: [Self; 3] = [Self::Hex, Self::Rgb, Self::Hsl];

    /// The notation a literal in `self` converts to.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hex => Self::Rgb,
            Self::Rgb => Self::Hsl,
            Self::Hsl => Self::Hex,
        }
    }

    /// Slot index, used by the session cache.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Hex => 0,
            Self::Rgb => 1,
            Self::Hsl => 2,
        }
    }

    /// Lowercase name as used by the CLI (`hex`, `rgb`, `hsl`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }

    /// Look up a notation by [`name`](Self::name), case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// A color written as `#rrggbb` (or its `#rgb` shorthand).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hex {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Not part of the text. Carried so a session's opacity survives hex.
    pub alpha: f64,
}

impl Hex {
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// True when the color can be written in 3-digit form without loss.
    ///
    /// Requires all three channels to have equal high and low nibbles:
    /// `#112233` compacts to `#123`, `#112234` does not compact at all.
    #[must_use]
    pub const fn is_shorthand(self) -> bool {
        const fn compactable(v: u8) -> bool {
            v >> 4 == v & 0x0f
        }
        compactable(self.r) && compactable(self.g) && compactable(self.b)
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A color written as `rgb(r, g, b)` with integer channels 0–255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity, 0.0 to 1.0.
    pub alpha: f64,
}

impl Rgb {
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color written as `hsl(h, s%, l%)`.
///
/// Values are kept at full `f64` precision; only the formatter rounds them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, [0, 360).
    pub h: f64,
    /// Saturation in percent, [0, 100].
    pub s: f64,
    /// Lightness in percent, [0, 100].
    pub l: f64,
    /// Opacity, 0.0 to 1.0.
    pub alpha: f64,
}

impl Hsl {
    /// Build an opaque HSL color. The hue is taken modulo 360.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s,
            l,
            alpha: 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A parsed or converted color in one of the three notations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Hex(Hex),
    Rgb(Rgb),
    Hsl(Hsl),
}

impl Color {
    #[must_use]
    pub const fn notation(&self) -> Notation {
        match self {
            Self::Hex(_) => Notation::Hex,
            Self::Rgb(_) => Notation::Rgb,
            Self::Hsl(_) => Notation::Hsl,
        }
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        match self {
            Self::Hex(c) => c.alpha,
            Self::Rgb(c) => c.alpha,
            Self::Hsl(c) => c.alpha,
        }
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        match self {
            Self::Hex(c) => Self::Hex(c.with_alpha(alpha)),
            Self::Rgb(c) => Self::Rgb(c.with_alpha(alpha)),
            Self::Hsl(c) => Self::Hsl(c.with_alpha(alpha)),
        }
    }

    /// True when both colors would print the same channels.
    ///
    /// Alpha is ignored. HSL components compare at the formatter's
    /// precision (one decimal), so a cached full-precision value still
    /// matches the rounded text it produced.
    #[must_use]
    pub fn same_channels(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Hex(a), Self::Hex(b)) => (a.r, a.g, a.b) == (b.r, b.g, b.b),
            (Self::Rgb(a), Self::Rgb(b)) => (a.r, a.g, a.b) == (b.r, b.g, b.b),
            (Self::Hsl(a), Self::Hsl(b)) => {
                tenths_hue(a.h) == tenths_hue(b.h)
                    && tenths(a.s) == tenths(b.s)
                    && tenths(a.l) == tenths(b.l)
            }
            _ => false,
        }
    }
}

impl From<Hex> for Color {
    fn from(c: Hex) -> Self {
        Self::Hex(c)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Self::Rgb(c)
    }
}

impl From<Hsl> for Color {
    fn from(c: Hsl) -> Self {
        Self::Hsl(c)
    }
}

/// A value rounded to one decimal place, as an integer count of tenths.
pub(crate) fn tenths(v: f64) -> i64 {
    (v * 10.0).round() as i64
}

/// Like [`tenths`], but 360.0 wraps to 0.0.
pub(crate) fn tenths_hue(h: f64) -> i64 {
    tenths(h).rem_euclid(3600)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
