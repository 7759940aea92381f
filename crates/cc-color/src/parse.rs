// SPDX-License-Identifier: MIT
//
// Color literal recognition.
//
// Three grammars, tried in a fixed order (hex, rgb(a), hsl(a)). The first
// one whose *shape* matches owns the text: if its components are then out
// of range, that is a range error, not a reason to try the next grammar.
// On well-formed input the grammars are mutually exclusive anyway.
//
// Hex text may arrive without its `#`. Editors happily let a double-click
// select just the digits, so the token records that the delimiter is
// missing and leaves it to the host to widen the selection. The parser
// never invents the `#` itself.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::model::{Color, Hex, Hsl, Notation, Rgb};

// ─── Grammars ────────────────────────────────────────────────────────────────

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#)?([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex grammar compiles")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .expect("rgb grammar compiles")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^hsla?\(\s*([0-9]*\.?[0-9]+)\s*,\s*([0-9]*\.?[0-9]+)%\s*,\s*([0-9]*\.?[0-9]+)%\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .expect("hsl grammar compiles")
});

/// A grammar's matcher: `None` when the shape doesn't match at all.
type Matcher = fn(&str) -> Option<Result<Token>>;

/// Grammars in priority order. First shape match wins.
const GRAMMARS: [(Notation, Matcher); 3] = [
    (Notation::Hex, match_hex),
    (Notation::Rgb, match_rgb),
    (Notation::Hsl, match_hsl),
];

// ─── Token ───────────────────────────────────────────────────────────────────

/// The result of recognizing one color literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// The typed color. Its alpha is the explicit alpha, or 1.0.
    pub color: Color,

    /// Alpha as written in the text, if any. Only `rgba(...)`/`hsla(...)`
    /// forms can carry one.
    pub alpha: Option<f64>,

    /// Hex digits were recognized without the leading `#`. The caller
    /// should grow the selection one character to the left before
    /// replacing it.
    pub missing_delimiter: bool,
}

impl Token {
    const fn new(color: Color, alpha: Option<f64>) -> Self {
        Self {
            color,
            alpha,
            missing_delimiter: false,
        }
    }

    #[must_use]
    pub const fn notation(&self) -> Notation {
        self.color.notation()
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Recognize `text` as a hex, rgb(a) or hsl(a) literal.
///
/// The text is matched as-is; surrounding whitespace is not part of any
/// grammar.
///
/// # Errors
///
/// [`Error::Parse`] when no grammar matches, [`Error::Range`] when a
/// grammar matches but a component is outside its legal domain.
pub fn parse(text: &str) -> Result<Token> {
    for (notation, matcher) in GRAMMARS {
        if let Some(result) = matcher(text) {
            log::debug!("{text:?} matched the {notation} grammar");
            return result;
        }
    }
    Err(Error::parse(text))
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s).map(|token| token.color)
    }
}

// ─── Matchers ────────────────────────────────────────────────────────────────

fn match_hex(text: &str) -> Option<Result<Token>> {
    let caps = HEX_RE.captures(text)?;
    let missing_delimiter = caps.get(1).is_none();
    Some(decode_hex(&caps[2]).map(|hex| Token {
        missing_delimiter,
        ..Token::new(Color::Hex(hex), None)
    }))
}

fn match_rgb(text: &str) -> Option<Result<Token>> {
    let caps = RGB_RE.captures(text)?;
    Some(rgb_from_captures(&caps))
}

fn match_hsl(text: &str) -> Option<Result<Token>> {
    let caps = HSL_RE.captures(text)?;
    Some(hsl_from_captures(&caps))
}

// ─── Component decoding ──────────────────────────────────────────────────────

/// Decode 3 or 6 hex digits. Shorthand digits are duplicated (`f` → `ff`).
fn decode_hex(digits: &str) -> Result<Hex> {
    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::parse(digits));
    if digits.len() == 3 {
        let nibble = |i: usize| byte(&digits[i..=i]).map(|v| v << 4 | v);
        Ok(Hex::new(nibble(0)?, nibble(1)?, nibble(2)?))
    } else {
        Ok(Hex::new(
            byte(&digits[0..2])?,
            byte(&digits[2..4])?,
            byte(&digits[4..6])?,
        ))
    }
}

fn rgb_from_captures(caps: &Captures<'_>) -> Result<Token> {
    let r = channel("red", &caps[1])?;
    let g = channel("green", &caps[2])?;
    let b = channel("blue", &caps[3])?;
    let alpha = caps.get(4).map(|m| alpha(m.as_str())).transpose()?;
    let rgb = Rgb::new(r, g, b).with_alpha(alpha.unwrap_or(1.0));
    Ok(Token::new(Color::Rgb(rgb), alpha))
}

fn hsl_from_captures(caps: &Captures<'_>) -> Result<Token> {
    let h = number("hue", &caps[1])?;
    let s = percent("saturation", &caps[2])?;
    let l = percent("lightness", &caps[3])?;
    let alpha = caps.get(4).map(|m| alpha(m.as_str())).transpose()?;
    let hsl = Hsl::new(h, s, l).with_alpha(alpha.unwrap_or(1.0));
    Ok(Token::new(Color::Hsl(hsl), alpha))
}

/// An integer RGB channel, 0–255.
fn channel(name: &'static str, s: &str) -> Result<u8> {
    s.parse::<u8>().map_err(|_| Error::range(name, s))
}

fn number(name: &'static str, s: &str) -> Result<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::range(name, s))
}

/// A percentage, 0–100 (the `%` is already stripped by the grammar).
fn percent(name: &'static str, s: &str) -> Result<f64> {
    number(name, s).and_then(|v| {
        if v <= 100.0 {
            Ok(v)
        } else {
            Err(Error::range(name, s))
        }
    })
}

/// An alpha value, 0.0–1.0.
fn alpha(s: &str) -> Result<f64> {
    number("alpha", s).and_then(|v| {
        if v <= 1.0 {
            Ok(v)
        } else {
            Err(Error::range("alpha", s))
        }
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn color(text: &str) -> Color {
        parse(text).unwrap().color
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_full_with_delimiter() {
        let token = parse("#f2e094").unwrap();
        assert_eq!(token.color, Color::Hex(Hex::new(0xf2, 0xe0, 0x94)));
        assert!(!token.missing_delimiter);
        assert_eq!(token.alpha, None);
    }

    #[test]
    fn hex_shorthand_duplicates_digits() {
        assert_eq!(color("#f0e"), Color::Hex(Hex::new(0xff, 0x00, 0xee)));
        assert_eq!(color("#000"), Color::Hex(Hex::new(0, 0, 0)));
    }

    #[test]
    fn hex_uppercase_digits() {
        assert_eq!(color("#ABCDEF"), Color::Hex(Hex::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn hex_without_delimiter_asks_for_extension() {
        let short = parse("f0e").unwrap();
        assert!(short.missing_delimiter);
        assert_eq!(short.color, Color::Hex(Hex::new(0xff, 0x00, 0xee)));

        let full = parse("123456").unwrap();
        assert!(full.missing_delimiter);
        assert_eq!(full.color, Color::Hex(Hex::new(0x12, 0x34, 0x56)));
    }

    #[test]
    fn hex_wrong_lengths_rejected() {
        for text in ["#", "#12", "#1234", "#12345", "#1234567", "12", "1234"] {
            assert!(
                matches!(parse(text), Err(Error::Parse { .. })),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn hex_non_digits_rejected() {
        assert!(parse("#ggg").is_err());
        assert!(parse("#12345g").is_err());
    }

    // ── RGB(A) ───────────────────────────────────────────────────────────

    #[test]
    fn rgb_basic() {
        let token = parse("rgb(128, 0, 0)").unwrap();
        assert_eq!(token.color, Color::Rgb(Rgb::new(128, 0, 0)));
        assert_eq!(token.alpha, None);
    }

    #[test]
    fn rgb_whitespace_is_ignored() {
        assert_eq!(color("rgb(0,9,126)"), Color::Rgb(Rgb::new(0, 9, 126)));
        assert_eq!(color("rgb(  0 ,9,  126 )"), Color::Rgb(Rgb::new(0, 9, 126)));
    }

    #[test]
    fn rgba_carries_alpha() {
        let token = parse("rgba(120, 34, 19, 0.2)").unwrap();
        assert_eq!(token.alpha, Some(0.2));
        assert_eq!(token.color, Color::Rgb(Rgb::new(120, 34, 19).with_alpha(0.2)));
    }

    #[test]
    fn rgba_alpha_forms() {
        assert_eq!(parse("rgba(0, 0, 0, 1)").unwrap().alpha, Some(1.0));
        assert_eq!(parse("rgba(0, 0, 0, .5)").unwrap().alpha, Some(0.5));
        assert_eq!(parse("rgba(0, 0, 0, 0)").unwrap().alpha, Some(0.0));
    }

    #[test]
    fn rgb_function_name_case_insensitive() {
        assert_eq!(color("RGB(1, 2, 3)"), Color::Rgb(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn rgb_missing_channel_is_parse_error() {
        assert!(matches!(parse("rgb(1,2)"), Err(Error::Parse { .. })));
    }

    #[test]
    fn rgb_channel_over_255_is_range_error() {
        assert_eq!(
            parse("rgb(256, 0, 0)"),
            Err(Error::Range {
                channel: "red",
                value: "256".into()
            })
        );
        assert!(matches!(
            parse("rgb(0, 0, 99999999999999999999)"),
            Err(Error::Range { channel: "blue", .. })
        ));
    }

    #[test]
    fn non_ascii_digits_are_parse_errors() {
        assert!(matches!(parse("rgb(١, 0, 0)"), Err(Error::Parse { .. })));
        assert!(matches!(parse("hsl(٠, 50%, 50%)"), Err(Error::Parse { .. })));
    }

    #[test]
    fn rgba_alpha_over_one_is_range_error() {
        assert!(matches!(
            parse("rgba(0, 0, 0, 1.5)"),
            Err(Error::Range { channel: "alpha", .. })
        ));
    }

    #[test]
    fn rgb_rejects_negative_and_percent_channels() {
        assert!(parse("rgb(-1, 0, 0)").is_err());
        assert!(parse("rgb(100%, 0%, 0%)").is_err());
    }

    // ── HSL(A) ───────────────────────────────────────────────────────────

    #[test]
    fn hsl_basic() {
        let token = parse("hsl(210, 50%, 40%)").unwrap();
        assert_eq!(token.color, Color::Hsl(Hsl::new(210.0, 50.0, 40.0)));
        assert_eq!(token.alpha, None);
    }

    #[test]
    fn hsl_fractional_components() {
        assert_eq!(
            color("hsl(0.5, 12.5%, 50.2%)"),
            Color::Hsl(Hsl::new(0.5, 12.5, 50.2))
        );
    }

    #[test]
    fn hsla_carries_alpha() {
        let token = parse("hsla(120, 100%, 25.1%, 0.5)").unwrap();
        assert_eq!(token.alpha, Some(0.5));
        assert!((token.color.alpha() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn hsl_hue_taken_mod_360() {
        assert_eq!(color("hsl(480, 10%, 10%)"), Color::Hsl(Hsl::new(120.0, 10.0, 10.0)));
    }

    #[test]
    fn hsl_requires_percent_signs() {
        assert!(matches!(parse("hsl(0, 50, 50)"), Err(Error::Parse { .. })));
    }

    #[test]
    fn hsl_percent_over_100_is_range_error() {
        assert!(matches!(
            parse("hsl(0, 101%, 50%)"),
            Err(Error::Range { channel: "saturation", .. })
        ));
        assert!(matches!(
            parse("hsl(0, 50%, 100.5%)"),
            Err(Error::Range { channel: "lightness", .. })
        ));
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn unrelated_text_is_parse_error() {
        for text in ["", "red", "rgb", "hsl()", "#fff ", " rgb(1, 2, 3)", "rgb(1, 2, 3"] {
            assert!(
                matches!(parse(text), Err(Error::Parse { .. })),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn from_str_returns_color() {
        let c: Color = "#123".parse().unwrap();
        assert_eq!(c, Color::Hex(Hex::new(0x11, 0x22, 0x33)));
        assert!("nope".parse::<Color>().is_err());
    }
}
