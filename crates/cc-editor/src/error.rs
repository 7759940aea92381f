//! Errors for the editor host.
//!
//! Color recognition failures are not here: those belong to one selection
//! and are reported per selection by [`command`](crate::command).

use std::io;

use crate::position::Range;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A range does not fit inside the buffer.
    #[error("range {0} is outside the buffer")]
    OutOfBounds(Range),

    /// No selection with this index.
    #[error("no selection #{0}")]
    NoSelection(usize),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("invalid position: {0:?}")]
    InvalidPosition(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
