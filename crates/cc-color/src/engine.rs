// SPDX-License-Identifier: MIT
//
// The conversion pipeline for one selection:
//
//   parse → check/refresh session → settle alpha → cached target or convert
//         → record → format
//
// The engine owns one `Session` per selection index. The host calls
// `convert_selection` for each selection in order; an error on one of
// them is returned to the caller and leaves every other session alone.

use crate::convert::convert;
use crate::error::Result;
use crate::format::{FormatOptions, format};
use crate::model::{Color, Notation};
use crate::parse::{Token, parse};
use crate::session::Session;

/// How the host must adjust the selection before replacing its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAdjustment {
    /// Grow the selection this many characters to the left (to pull in a
    /// `#` that was not selected).
    ExtendLeft(usize),
}

/// A successful conversion of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Text to put in place of the selection.
    pub replacement: String,
    /// The typed value behind `replacement`, at full precision.
    pub color: Color,
    /// Notation the selection was written in.
    pub from: Notation,
    pub adjustment: Option<BoundaryAdjustment>,
}

/// Converts color literals and remembers what it has seen per selection.
#[derive(Debug, Default)]
pub struct Engine {
    sessions: Vec<Session>,
    options: FormatOptions,
}

impl Engine {
    #[must_use]
    pub const fn new(options: FormatOptions) -> Self {
        Self {
            sessions: Vec::new(),
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> FormatOptions {
        self.options
    }

    pub const fn set_options(&mut self, options: FormatOptions) {
        self.options = options;
    }

    /// The session for selection `index`, if that selection was ever seen.
    #[must_use]
    pub fn session(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    fn session_mut(&mut self, index: usize) -> &mut Session {
        if index >= self.sessions.len() {
            self.sessions.resize_with(index + 1, Session::new);
        }
        &mut self.sessions[index]
    }

    /// Forget every session. Called when the selection collapses to a
    /// cursor.
    pub fn reset_sessions(&mut self) {
        if self.sessions.iter().any(|s| !s.is_empty()) {
            log::debug!("resetting {} color session(s)", self.sessions.len());
        }
        self.sessions.clear();
    }

    /// Convert the literal in selection `index` to the next notation in the
    /// cycle (hex → rgb → hsl → hex).
    ///
    /// # Errors
    ///
    /// Returns the parse or range error when `text` is not a usable color
    /// literal. The session for `index` is left untouched in that case.
    pub fn convert_selection(&mut self, index: usize, text: &str) -> Result<Conversion> {
        let token = parse(text)?;
        Ok(self.convert_token(index, token, token.notation().next()))
    }

    /// Convert the literal in selection `index` to `target`.
    ///
    /// # Errors
    ///
    /// Same as [`convert_selection`](Self::convert_selection).
    pub fn convert_to(&mut self, index: usize, text: &str, target: Notation) -> Result<Conversion> {
        let token = parse(text)?;
        Ok(self.convert_token(index, token, target))
    }

    fn convert_token(
        &mut self,
        index: usize,
        token: Token,
        target: Notation,
    ) -> Conversion {
        let options = self.options;
        let session = self.session_mut(index);
        let from = token.notation();

        if !session.describes(&token.color) {
            log::debug!("selection {index} no longer matches its session, refreshing");
            session.reset();
        }

        let alpha = match token.alpha {
            Some(alpha) => {
                session.set_alpha(alpha);
                alpha
            }
            None => session.alpha().unwrap_or(1.0),
        };

        session.record_if_absent(token.color.with_alpha(alpha));

        let color = if let Some(cached) = session.get(target) {
            log::trace!("selection {index}: reusing cached {target} value");
            cached
        } else {
            let source = session.get(from).unwrap_or(token.color);
            let derived = convert(source, target);
            session.record_if_absent(derived);
            derived
        }
        .with_alpha(alpha);
        session.record_emitted(color);

        Conversion {
            replacement: format(&color, options),
            color,
            from,
            adjustment: token
                .missing_delimiter
                .then_some(BoundaryAdjustment::ExtendLeft(1)),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
