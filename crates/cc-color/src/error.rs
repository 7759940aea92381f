// SPDX-License-Identifier: MIT
//
// Errors for color recognition. Both kinds are local to one selection: the
// caller leaves that selection's text untouched and moves on.

/// Why a piece of text could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text matches none of the hex / rgb(a) / hsl(a) grammars.
    #[error("not a color literal: {text:?}")]
    Parse { text: String },

    /// The text has the right shape but a component is outside its domain
    /// (e.g. an RGB channel of 256). Rejected rather than clamped.
    #[error("{channel} out of range: {value}")]
    Range {
        channel: &'static str,
        value: String,
    },
}

impl Error {
    pub(crate) fn parse(text: &str) -> Self {
        Self::Parse {
            text: text.to_owned(),
        }
    }

    pub(crate) fn range(channel: &'static str, value: &str) -> Self {
        Self::Range {
            channel,
            value: value.to_owned(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
