//! Text buffer — the text the selections point into.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with the handful of operations color
//! conversion needs: read a range, look at the character before a position,
//! replace a range, and load/save a file.
//!
//! Positions are `(line, col)` with columns in chars; byte offsets never
//! leak into the API. Unlike an interactive editor's buffer, every method
//! here reports out-of-range positions as an error instead of panicking,
//! because ranges come straight from the command line.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::error::{Error, Result};
use crate::position::{Position, Range};

/// A text buffer backed by a rope.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
            modified: false,
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            rope: Rope::from_str(&text),
            path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    // -- Text access --------------------------------------------------------

    /// Number of lines. An empty buffer has one (empty) line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// The text inside `range`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if either endpoint is outside the buffer.
    pub fn text(&self, range: Range) -> Result<String> {
        let (start, end) = self.char_span(range)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// The character just before `pos`, if there is one.
    #[must_use]
    pub fn char_before(&self, pos: Position) -> Option<char> {
        let idx = self.pos_to_char_idx(pos)?;
        idx.checked_sub(1).map(|i| self.rope.char(i))
    }

    /// All text as a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Convert a `Position` to an absolute char index.
    ///
    /// A column equal to the line's char count (just past the last char) is
    /// valid, since range ends are exclusive.
    #[must_use]
    pub fn pos_to_char_idx(&self, pos: Position) -> Option<usize> {
        if pos.line >= self.rope.len_lines() {
            return None;
        }
        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();
        if pos.col > line_len {
            return None;
        }
        Some(line_start + pos.col)
    }

    /// Convert an absolute char index back to a `Position`.
    #[must_use]
    pub fn char_idx_to_pos(&self, char_idx: usize) -> Option<Position> {
        if char_idx > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        Some(Position::new(line, char_idx - line_start))
    }

    /// Both endpoints of `range` as char indices.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if either endpoint is outside the buffer.
    pub fn char_span(&self, range: Range) -> Result<(usize, usize)> {
        match (
            self.pos_to_char_idx(range.start),
            self.pos_to_char_idx(range.end),
        ) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(Error::OutOfBounds(range)),
        }
    }

    // -- Editing ------------------------------------------------------------

    /// Replace the text in `range` and return the range the new text
    /// occupies.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if either endpoint is outside the buffer. The
    /// buffer is unchanged in that case.
    pub fn replace(&mut self, range: Range, text: &str) -> Result<Range> {
        let (start, end) = self.char_span(range)?;
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.modified = true;

        let new_end = start + text.chars().count();
        let end_pos = self
            .char_idx_to_pos(new_end)
            .ok_or(Error::OutOfBounds(range))?;
        Ok(Range::new(range.start, end_pos))
    }

    // -- Metadata -----------------------------------------------------------

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    // -- File I/O -----------------------------------------------------------

    /// Write the buffer back to the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer has no path or the write fails.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "buffer has no file path",
            ))
        })?;
        fs::write(&path, self.contents())?;
        self.modified = false;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
