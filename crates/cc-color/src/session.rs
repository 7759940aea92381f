// SPDX-License-Identifier: MIT
//
// Per-selection conversion memory.
//
// Every text rendering rounds (integers for rgb, one decimal for hsl), so
// cycling hex → rgb → hsl → hex purely through text drifts. A session keeps
// the first full-precision value seen for each notation while the user
// keeps the same selection, and the engine reuses it instead of deriving a
// new one from rounded text.
//
// A session ends when the host reports that the selection collapsed to a
// cursor. Nothing here outlives the process.

use crate::model::{Color, Notation};

/// Cached values for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Indexed by [`Notation::index`].
    slots: [Option<Color>; 3],
    /// Opacity established in this session, if any.
    alpha: Option<f64>,
    /// The value most recently written back into the selection.
    emitted: Option<Color>,
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; 3],
            alpha: None,
            emitted: None,
        }
    }

    /// Store `color` under its notation unless a value is already there.
    ///
    /// Returns `true` when the value was stored. The first value wins
    /// because it is the least rounded one.
    pub fn record_if_absent(&mut self, color: Color) -> bool {
        let slot = &mut self.slots[color.notation().index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(color);
        true
    }

    /// The cached value for `notation`, if any.
    #[must_use]
    pub fn get(&self, notation: Notation) -> Option<Color> {
        self.slots[notation.index()]
    }

    #[must_use]
    pub const fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// Establish (or override) the session's opacity.
    pub const fn set_alpha(&mut self, alpha: f64) {
        self.alpha = Some(alpha);
    }

    /// Remember what was written back, so the next parse of the selection
    /// can be recognised as a continuation of the cycle.
    pub const fn record_emitted(&mut self, color: Color) {
        self.emitted = Some(color);
    }

    #[must_use]
    pub const fn emitted(&self) -> Option<Color> {
        self.emitted
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alpha.is_none() && self.emitted.is_none() && self.slots.iter().all(Option::is_none)
    }

    /// Whether `color` continues this session.
    ///
    /// It does when it matches, at display precision, either the value last
    /// written back or the cached value for its own notation. Anything else
    /// means the selected text was changed behind the session's back.
    #[must_use]
    pub fn describes(&self, color: &Color) -> bool {
        let mut known = self
            .emitted
            .iter()
            .chain(&self.slots[color.notation().index()])
            .peekable();
        known.peek().is_none() || known.any(|k| k.same_channels(color))
    }

    /// Forget all cached values and the alpha.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hex, Hsl, Rgb};
    use pretty_assertions::assert_eq;

    #[test]
    fn new_session_is_empty() {
        let session = Session::new();
        assert!(session.is_empty());
        for n in Notation::ALL {
            assert_eq!(session.get(n), None);
        }
        assert_eq!(session.alpha(), None);
    }

    #[test]
    fn first_record_wins() {
        let mut session = Session::new();
        let precise = Color::Hsl(Hsl::new(210.0, 33.333_333, 50.0));
        let rounded = Color::Hsl(Hsl::new(210.0, 33.3, 50.0));

        assert!(session.record_if_absent(precise));
        assert!(!session.record_if_absent(rounded));
        assert_eq!(session.get(Notation::Hsl), Some(precise));
    }

    #[test]
    fn notations_are_independent_slots() {
        let mut session = Session::new();
        session.record_if_absent(Color::Hex(Hex::new(1, 2, 3)));
        assert!(session.record_if_absent(Color::Rgb(Rgb::new(1, 2, 3))));
        assert_eq!(session.get(Notation::Hsl), None);
        assert_eq!(session.get(Notation::Rgb), Some(Color::Rgb(Rgb::new(1, 2, 3))));
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.record_if_absent(Color::Rgb(Rgb::new(1, 2, 3)));
        session.set_alpha(0.5);
        assert!(!session.is_empty());

        session.reset();
        assert!(session.is_empty());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn alpha_override() {
        let mut session = Session::new();
        session.set_alpha(0.5);
        session.set_alpha(0.25);
        assert_eq!(session.alpha(), Some(0.25));
    }

    #[test]
    fn describes_what_was_emitted() {
        let mut session = Session::new();
        session.record_if_absent(Color::Hex(Hex::new(0x33, 0x66, 0x99)));
        session.record_emitted(Color::Rgb(Rgb::new(51, 102, 153)));

        assert!(session.describes(&Color::Rgb(Rgb::new(51, 102, 153))));
        assert!(!session.describes(&Color::Rgb(Rgb::new(51, 102, 154))));
        assert!(session.describes(&Color::Hex(Hex::new(0x33, 0x66, 0x99))));
    }

    #[test]
    fn describes_precise_slot_at_display_precision() {
        let mut session = Session::new();
        session.record_if_absent(Color::Hsl(Hsl::new(10.34, 50.0, 50.0)));
        session.record_emitted(Color::Hex(Hex::new(0xbf, 0x56, 0x40)));

        assert!(session.describes(&Color::Hsl(Hsl::new(10.3, 50.0, 50.0))));
        assert!(!session.describes(&Color::Hsl(Hsl::new(10.4, 50.0, 50.0))));
    }

    #[test]
    fn reset_forgets_emitted() {
        let mut session = Session::new();
        session.record_emitted(Color::Rgb(Rgb::new(1, 2, 3)));
        assert!(!session.is_empty());
        session.reset();
        assert_eq!(session.emitted(), None);
    }

    #[test]
    fn empty_session_describes_anything() {
        assert!(Session::new().describes(&Color::Rgb(Rgb::new(9, 9, 9))));
    }
}
