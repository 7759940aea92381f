// SPDX-License-Identifier: MIT
//
// cc-color — CSS color literal engine for colorcycle.
//
// Recognizes hex (`#rgb`, `#rrggbb`), `rgb()`/`rgba()` and `hsl()`/`hsla()`
// literals and rewrites them into the next notation of the cycle:
//
//   hex → rgb(a) → hsl(a) → hex → ...
//
// Pipeline for a single selection:
//
//   text → parse   → typed Color (+ explicit alpha?, missing '#'?)
//        → session → reuse cached high-precision value for the target
//        → convert → RGB ↔ HSL ↔ Hex math (pure)
//        → format  → canonical CSS text
//
// The session cache exists because rgb→hsl→hex→rgb is lossy once every
// step is rounded to text. Caching the un-rounded values per selection
// lets the user cycle forever without drift.

// Single-char channel names (r, g, b, h, s, l, c, x, m) are the standard
// notation in color conversion formulas.
#![allow(clippy::many_single_char_names)]
// Channel math moves between u8 and f64 constantly.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod convert;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod parse;
pub mod session;

pub use engine::{BoundaryAdjustment, Conversion, Engine};
pub use error::{Error, Result};
pub use format::FormatOptions;
pub use model::{Color, Hex, Hsl, Notation, Rgb};
pub use parse::{Token, parse};
pub use session::Session;
