//! # cc-editor — Editor host for colorcycle
//!
//! The color engine in `cc-color` only sees text. This crate is the editor
//! side it plugs into:
//!
//! - **[`position`]** — `Position` (line, col) and `Range` types, 0-indexed
//! - **[`buffer`]** — `Buffer` wrapping a rope with replace and file I/O
//! - **[`selection`]** — `Document` (buffer + ordered selections), the
//!   `SelectionHost` trait, and selection-change listeners
//! - **[`options`]** — `:set`-style directives and the TOML config file
//! - **[`command`]** — runs the color engine over every selection

pub mod buffer;
pub mod command;
pub mod error;
pub mod options;
pub mod position;
pub mod selection;

pub use error::{Error, Result};
