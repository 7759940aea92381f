//! Selections — what the color command reads and rewrites.
//!
//! [`SelectionHost`] is the editor surface the command needs: list the
//! selections with their text, look one character to the left of a
//! selection, grow a selection leftwards, and replace a selection's text.
//! [`Document`] implements it over a [`Buffer`].
//!
//! Selection changes made by the *user* (not by the command's own edits)
//! go through [`Document::set_selections`], which notifies a
//! [`SelectionListener`]. The color command listens so it can drop its
//! cached values when the selection collapses to a bare cursor.
//!
//! # Edits shift later selections
//!
//! Replacing `#fff` with `rgb(255, 255, 255)` makes the line 14 chars
//! longer, so every selection after it moves right by 14. The document
//! keeps its selections valid across each replacement, which is what lets
//! the command process several selections in order.

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::position::Range;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// The editor operations color conversion depends on.
///
/// Selections are addressed by their index in the host's ordered list.
pub trait SelectionHost {
    /// Every selection in order, with its current text.
    fn selections(&self) -> Vec<(String, Range)>;

    /// The character immediately left of selection `index`.
    fn char_before(&self, index: usize) -> Option<char>;

    /// Grow selection `index` by `delta` chars to the left.
    ///
    /// # Errors
    ///
    /// Fails if there is no such selection or not enough text to its left.
    fn extend_selection(&mut self, index: usize, delta: usize) -> Result<Range>;

    /// Replace the text of selection `index`. The selection then covers
    /// the new text, which is returned as a range.
    ///
    /// # Errors
    ///
    /// Fails if there is no such selection.
    fn replace_selection(&mut self, index: usize, text: &str) -> Result<Range>;
}

/// Receives the new selection set whenever the user changes it.
pub trait SelectionListener {
    fn selection_changed(&mut self, selections: &[Range]);
}

/// True when the selection set is a single cursor with nothing selected.
#[must_use]
pub fn is_collapsed(selections: &[Range]) -> bool {
    matches!(selections, [only] if only.is_empty())
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A buffer plus an ordered list of selections into it.
#[derive(Debug, Default)]
pub struct Document {
    buffer: Buffer,
    selections: Vec<Range>,
}

impl Document {
    #[must_use]
    pub const fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            selections: Vec::new(),
        }
    }

    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }

    /// The current selections, in order.
    #[must_use]
    pub fn ranges(&self) -> &[Range] {
        &self.selections
    }

    /// Replace the selection set (a user action) and notify `listener`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if any range falls outside the buffer; the
    /// selections are unchanged and the listener is not called.
    pub fn set_selections(
        &mut self,
        selections: Vec<Range>,
        listener: &mut dyn SelectionListener,
    ) -> Result<()> {
        for &range in &selections {
            self.buffer.char_span(range)?;
        }
        self.selections = selections;
        listener.selection_changed(&self.selections);
        Ok(())
    }

    fn selection(&self, index: usize) -> Result<Range> {
        self.selections
            .get(index)
            .copied()
            .ok_or(Error::NoSelection(index))
    }
}

impl SelectionHost for Document {
    fn selections(&self) -> Vec<(String, Range)> {
        self.selections
            .iter()
            .map(|&range| (self.buffer.text(range).unwrap_or_default(), range))
            .collect()
    }

    fn char_before(&self, index: usize) -> Option<char> {
        let range = self.selections.get(index)?;
        self.buffer.char_before(range.start)
    }

    fn extend_selection(&mut self, index: usize, delta: usize) -> Result<Range> {
        let range = self.selection(index)?;
        let (start, _) = self.buffer.char_span(range)?;
        let grown = start
            .checked_sub(delta)
            .and_then(|s| self.buffer.char_idx_to_pos(s))
            .ok_or(Error::OutOfBounds(range))?;
        let extended = Range::new(grown, range.end);
        self.selections[index] = extended;
        Ok(extended)
    }

    fn replace_selection(&mut self, index: usize, text: &str) -> Result<Range> {
        let range = self.selection(index)?;
        let (old_start, old_end) = self.buffer.char_span(range)?;

        // Char spans of every selection, taken before the edit.
        let spans = self
            .selections
            .iter()
            .map(|&r| self.buffer.char_span(r))
            .collect::<Result<Vec<_>>>()?;

        let replaced = self.buffer.replace(range, text)?;
        let new_end = old_start + text.chars().count();

        let shift = |idx: usize| {
            if idx >= old_end {
                idx - old_end + new_end
            } else if idx > old_start {
                idx.min(new_end)
            } else {
                idx
            }
        };

        for (i, (start, end)) in spans.into_iter().enumerate() {
            if i == index {
                self.selections[i] = replaced;
                continue;
            }
            let (Some(start), Some(end)) = (
                self.buffer.char_idx_to_pos(shift(start)),
                self.buffer.char_idx_to_pos(shift(end)),
            ) else {
                return Err(Error::OutOfBounds(self.selections[i]));
            };
            self.selections[i] = Range::ordered(start, end);
        }

        Ok(replaced)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use pretty_assertions::assert_eq;

    fn range(l1: usize, c1: usize, l2: usize, c2: usize) -> Range {
        Range::new(Position::new(l1, c1), Position::new(l2, c2))
    }

    /// Records every selection set it is shown.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<Vec<Range>>,
    }

    impl SelectionListener for Recorder {
        fn selection_changed(&mut self, selections: &[Range]) {
            self.seen.push(selections.to_vec());
        }
    }

    fn document(text: &str, selections: Vec<Range>) -> Document {
        let mut doc = Document::new(Buffer::from_text(text));
        doc.set_selections(selections, &mut Recorder::default())
            .unwrap();
        doc
    }

    // -- is_collapsed -------------------------------------------------------

    #[test]
    fn collapsed_means_single_cursor() {
        let cursor = Range::point(Position::new(0, 3));
        assert!(is_collapsed(&[cursor]));
        assert!(!is_collapsed(&[range(0, 0, 0, 1)]));
        assert!(!is_collapsed(&[cursor, cursor]));
        assert!(!is_collapsed(&[]));
    }

    // -- set_selections -----------------------------------------------------

    #[test]
    fn set_selections_notifies_listener() {
        let mut doc = Document::new(Buffer::from_text("#fff"));
        let mut recorder = Recorder::default();
        doc.set_selections(vec![range(0, 0, 0, 4)], &mut recorder)
            .unwrap();
        assert_eq!(recorder.seen, vec![vec![range(0, 0, 0, 4)]]);
    }

    #[test]
    fn set_selections_rejects_out_of_bounds() {
        let mut doc = Document::new(Buffer::from_text("#fff"));
        let mut recorder = Recorder::default();
        assert!(doc
            .set_selections(vec![range(0, 0, 0, 9)], &mut recorder)
            .is_err());
        assert!(recorder.seen.is_empty());
        assert!(doc.ranges().is_empty());
    }

    // -- SelectionHost ------------------------------------------------------

    #[test]
    fn selections_carry_text() {
        let doc = document("a: #fff; b: #000;", vec![range(0, 3, 0, 7), range(0, 12, 0, 16)]);
        assert_eq!(
            doc.selections(),
            vec![
                ("#fff".to_string(), range(0, 3, 0, 7)),
                ("#000".to_string(), range(0, 12, 0, 16)),
            ]
        );
    }

    #[test]
    fn extend_selection_left() {
        let mut doc = document("a: #fff;", vec![range(0, 4, 0, 7)]);
        assert_eq!(doc.char_before(0), Some('#'));
        assert_eq!(doc.extend_selection(0, 1).unwrap(), range(0, 3, 0, 7));
        assert_eq!(doc.selections()[0].0, "#fff");
    }

    #[test]
    fn extend_selection_at_buffer_start_fails() {
        let mut doc = document("fff", vec![range(0, 0, 0, 3)]);
        assert_eq!(doc.char_before(0), None);
        assert!(doc.extend_selection(0, 1).is_err());
        assert!(matches!(doc.extend_selection(5, 1), Err(Error::NoSelection(5))));
    }

    #[test]
    fn replace_shifts_later_selections() {
        let mut doc = document(
            "a: #fff; b: #000;\nc: #123;",
            vec![range(0, 3, 0, 7), range(0, 12, 0, 16), range(1, 3, 1, 7)],
        );
        let new = doc.replace_selection(0, "rgb(255, 255, 255)").unwrap();
        assert_eq!(new, range(0, 3, 0, 21));

        let texts: Vec<String> = doc.selections().into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["rgb(255, 255, 255)", "#000", "#123"]);
        assert_eq!(doc.ranges()[1], range(0, 26, 0, 30));
        assert_eq!(doc.ranges()[2], range(1, 3, 1, 7));
    }

    #[test]
    fn replace_shorter_text_shifts_left() {
        let mut doc = document(
            "rgb(0, 0, 0) rgb(1, 1, 1)",
            vec![range(0, 0, 0, 12), range(0, 13, 0, 25)],
        );
        doc.replace_selection(0, "#000").unwrap();
        assert_eq!(doc.buffer().contents(), "#000 rgb(1, 1, 1)");
        assert_eq!(doc.selections()[1].0, "rgb(1, 1, 1)");
    }

    #[test]
    fn replace_unknown_selection() {
        let mut doc = document("#fff", vec![]);
        assert!(matches!(
            doc.replace_selection(0, "x"),
            Err(Error::NoSelection(0))
        ));
    }
}
