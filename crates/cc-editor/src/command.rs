//! The color conversion command.
//!
//! Runs the `cc-color` engine over every selection of a [`SelectionHost`],
//! in order. Each selection is independent: one that isn't a color literal
//! is skipped and the rest are still converted.
//!
//! For hex digits selected without their `#`, the engine asks for the
//! selection to grow one character left. The command only does that when
//! the character really is `#`; otherwise the digits alone are replaced.

use cc_color::{BoundaryAdjustment, Engine, Notation};

use crate::error::Result;
use crate::options::ConfigSource;
use crate::position::Range;
use crate::selection::{SelectionHost, SelectionListener, is_collapsed};

/// What happened to one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The selection now holds `text`, converted from `from` to `to`.
    Converted {
        range: Range,
        from: Notation,
        to: Notation,
        text: String,
    },
    /// Left untouched.
    Skipped(cc_color::Error),
}

/// Color conversion over a host's selections, with its session memory.
#[derive(Debug, Default)]
pub struct ColorCommand {
    engine: Engine,
    /// Fixed target notation. `None` cycles to the next notation.
    target: Option<Notation>,
}

impl ColorCommand {
    /// A command configured from `config` (`include_alpha`).
    #[must_use]
    pub fn new(config: &dyn ConfigSource) -> Self {
        let mut command = Self::default();
        command.reload_config(config);
        command
    }

    /// Convert to `target` instead of cycling.
    #[must_use]
    pub const fn with_target(mut self, target: Notation) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Re-read configuration. Cached session values are kept.
    pub fn reload_config(&mut self, config: &dyn ConfigSource) {
        let include_alpha = config.load("include_alpha").unwrap_or(false);
        self.engine
            .set_options(cc_color::FormatOptions::with_alpha(include_alpha));
    }

    /// Convert every selection of `host`, in order.
    ///
    /// # Errors
    ///
    /// Only host failures (a selection that no longer fits the buffer) are
    /// errors. A selection that isn't a color is reported as
    /// [`Outcome::Skipped`].
    pub fn run<H: SelectionHost + ?Sized>(&mut self, host: &mut H) -> Result<Vec<Outcome>> {
        let selections = host.selections();
        let mut outcomes = Vec::with_capacity(selections.len());

        for (index, (text, range)) in selections.into_iter().enumerate() {
            let converted = match self.target {
                Some(target) => self.engine.convert_to(index, &text, target),
                None => self.engine.convert_selection(index, &text),
            };
            let conversion = match converted {
                Ok(conversion) => conversion,
                Err(err) => {
                    log::debug!("selection {index} at {range} left unchanged: {err}");
                    outcomes.push(Outcome::Skipped(err));
                    continue;
                }
            };

            if let Some(BoundaryAdjustment::ExtendLeft(delta)) = conversion.adjustment {
                if host.char_before(index) == Some('#') {
                    host.extend_selection(index, delta)?;
                }
            }

            let range = host.replace_selection(index, &conversion.replacement)?;
            outcomes.push(Outcome::Converted {
                range,
                from: conversion.from,
                to: conversion.color.notation(),
                text: conversion.replacement,
            });
        }

        Ok(outcomes)
    }
}

impl SelectionListener for ColorCommand {
    fn selection_changed(&mut self, selections: &[Range]) {
        if is_collapsed(selections) {
            self.engine.reset_sessions();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::options::Options;
    use crate::position::Position;
    use crate::selection::Document;
    use pretty_assertions::assert_eq;

    fn range(l1: usize, c1: usize, l2: usize, c2: usize) -> Range {
        Range::new(Position::new(l1, c1), Position::new(l2, c2))
    }

    fn setup(text: &str, selections: Vec<Range>) -> (Document, ColorCommand) {
        let mut command = ColorCommand::new(&Options::default());
        let mut doc = Document::new(Buffer::from_text(text));
        doc.set_selections(selections, &mut command).unwrap();
        (doc, command)
    }

    fn texts(outcomes: &[Outcome]) -> Vec<Option<&str>> {
        outcomes
            .iter()
            .map(|o| match o {
                Outcome::Converted { text, .. } => Some(text.as_str()),
                Outcome::Skipped(_) => None,
            })
            .collect()
    }

    // -- Single selection ---------------------------------------------------

    #[test]
    fn converts_hex_selection() {
        let (mut doc, mut command) = setup("color: #f2e094;", vec![range(0, 7, 0, 14)]);
        let outcomes = command.run(&mut doc).unwrap();
        assert_eq!(
            outcomes,
            vec![Outcome::Converted {
                range: range(0, 7, 0, 25),
                from: Notation::Hex,
                to: Notation::Rgb,
                text: "rgb(242, 224, 148)".into(),
            }]
        );
        assert_eq!(doc.buffer().contents(), "color: rgb(242, 224, 148);");
    }

    #[test]
    fn full_cycle_in_place() {
        let (mut doc, mut command) = setup("#123457", vec![range(0, 0, 0, 7)]);
        for _ in 0..3 {
            command.run(&mut doc).unwrap();
        }
        assert_eq!(doc.buffer().contents(), "#123457");
    }

    // -- Missing delimiter --------------------------------------------------

    #[test]
    fn digits_without_hash_pull_in_the_hash() {
        let (mut doc, mut command) = setup("color: #f0e;", vec![range(0, 8, 0, 11)]);
        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "color: rgb(255, 0, 238);");
        assert_eq!(doc.ranges(), &[range(0, 7, 0, 23)]);
    }

    #[test]
    fn digits_without_any_hash_replace_only_digits() {
        let (mut doc, mut command) = setup("x=f0e", vec![range(0, 2, 0, 5)]);
        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "x=rgb(255, 0, 238)");
    }

    // -- Multiple selections ------------------------------------------------

    #[test]
    fn bad_selection_does_not_stop_the_rest() {
        let (mut doc, mut command) = setup(
            "#fff rgb(1,2) rgba(0, 128, 0, 0.5)",
            vec![range(0, 0, 0, 4), range(0, 5, 0, 13), range(0, 14, 0, 34)],
        );
        let outcomes = command.run(&mut doc).unwrap();
        assert_eq!(
            texts(&outcomes),
            vec![
                Some("rgb(255, 255, 255)"),
                None,
                Some("hsla(120.0, 100.0%, 25.1%, 0.5)")
            ]
        );
        assert!(matches!(
            outcomes[1],
            Outcome::Skipped(cc_color::Error::Parse { .. })
        ));
        assert_eq!(
            doc.buffer().contents(),
            "rgb(255, 255, 255) rgb(1,2) hsla(120.0, 100.0%, 25.1%, 0.5)"
        );
    }

    #[test]
    fn range_error_is_skipped() {
        let (mut doc, mut command) = setup("rgb(300, 0, 0)", vec![range(0, 0, 0, 14)]);
        let outcomes = command.run(&mut doc).unwrap();
        assert!(matches!(
            outcomes[0],
            Outcome::Skipped(cc_color::Error::Range { .. })
        ));
        assert_eq!(doc.buffer().contents(), "rgb(300, 0, 0)");
    }

    // -- Sessions -----------------------------------------------------------

    #[test]
    fn alpha_carried_until_selection_collapses() {
        let (mut doc, mut command) = setup("rgba(0, 128, 0, 0.5)", vec![range(0, 0, 0, 20)]);
        command.run(&mut doc).unwrap();
        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "#008000");

        let hex = doc.ranges().to_vec();
        doc.set_selections(vec![Range::point(Position::ZERO)], &mut command)
            .unwrap();
        doc.set_selections(hex, &mut command).unwrap();

        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "rgb(0, 128, 0)");
    }

    #[test]
    fn non_collapsing_change_keeps_sessions() {
        let (mut doc, mut command) = setup("rgba(0, 128, 0, 0.5)", vec![range(0, 0, 0, 20)]);
        command.run(&mut doc).unwrap();
        command.run(&mut doc).unwrap();

        let hex = doc.ranges().to_vec();
        doc.set_selections(hex, &mut command).unwrap();
        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "rgba(0, 128, 0, 0.5)");
    }

    // -- Configuration ------------------------------------------------------

    #[test]
    fn include_alpha_from_config() {
        let options = Options {
            include_alpha: true,
        };
        let mut command = ColorCommand::new(&options);
        let mut doc = Document::new(Buffer::from_text("#f00"));
        doc.set_selections(vec![range(0, 0, 0, 4)], &mut command)
            .unwrap();
        command.run(&mut doc).unwrap();
        assert_eq!(doc.buffer().contents(), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn fixed_target() {
        let mut command = ColorCommand::new(&Options::default()).with_target(Notation::Hex);
        let mut doc = Document::new(Buffer::from_text("rgb(17, 34, 51)"));
        doc.set_selections(vec![range(0, 0, 0, 15)], &mut command)
            .unwrap();
        let outcomes = command.run(&mut doc).unwrap();
        assert_eq!(texts(&outcomes), vec![Some("#123")]);
    }
}
