//! Options — the configuration the color command reads.
//!
//! Options come from two places, applied in order:
//!
//! 1. A TOML file (`include_alpha = true`), loaded with [`Options::from_file`].
//! 2. `:set`-style directives on top of it, parsed by [`parse_set`].
//!
//! # Supported syntax
//!
//! | Syntax               | Effect                  |
//! |----------------------|-------------------------|
//! | `includealpha`       | Enable                  |
//! | `noincludealpha`     | Disable                 |
//! | `includealpha!`      | Toggle                  |
//! | `includealpha?`      | Query current value     |
//! | `includealpha=bool`  | Assign (`true`/`false`) |
//!
//! # Option names
//!
//! | Full name      | Abbrev | Config key      | Default |
//! |----------------|--------|-----------------|---------|
//! | `includealpha` | `ia`   | `include_alpha` | false   |

use std::path::Path;

use cc_color::FormatOptions;
use serde::Deserialize;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ConfigSource
// ---------------------------------------------------------------------------

/// Where the color command looks up its settings.
///
/// Keys are the config-file names (`include_alpha`). Unknown keys return
/// `None`.
pub trait ConfigSource {
    fn load(&self, key: &str) -> Option<bool>;
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// User options for color conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Always write `rgba(...)`/`hsla(...)`, even for opaque colors.
    pub include_alpha: bool,
}

impl Options {
    /// Parse options from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on malformed TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file can't be read, [`Error::Config`] if it
    /// doesn't parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&text)?;
        log::debug!("loaded options from {}: {options:?}", path.display());
        Ok(options)
    }

    /// Apply one directive. Returns a message for queries.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownOption`] for names other than `includealpha`/`ia`,
    /// [`Error::InvalidValue`] for a non-boolean assignment.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>> {
        let name = directive.name();
        if !is_bool_option(name) {
            return Err(Error::UnknownOption(name.to_string()));
        }
        match directive {
            SetDirective::On(_) => self.include_alpha = true,
            SetDirective::Off(_) => self.include_alpha = false,
            SetDirective::Toggle(_) => self.include_alpha = !self.include_alpha,
            SetDirective::Query(_) => {
                return Ok(Some(format_bool("includealpha", self.include_alpha)));
            }
            SetDirective::Assign(name, value) => {
                self.include_alpha = value.parse().map_err(|_| Error::InvalidValue {
                    name: name.clone(),
                    value: value.clone(),
                })?;
            }
        }
        Ok(None)
    }

    /// Parse and apply a whole `:set` argument string.
    ///
    /// # Errors
    ///
    /// Stops at the first directive that fails to apply.
    pub fn apply_set(&mut self, args: &str) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        for directive in parse_set(args) {
            messages.extend(self.apply(&directive)?);
        }
        Ok(messages)
    }

    #[must_use]
    pub const fn format_options(&self) -> FormatOptions {
        FormatOptions::with_alpha(self.include_alpha)
    }
}

impl ConfigSource for Options {
    fn load(&self, key: &str) -> Option<bool> {
        match key {
            "include_alpha" => Some(self.include_alpha),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// :set directives
// ---------------------------------------------------------------------------

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    On(String),
    Off(String),
    Toggle(String),
    Query(String),
    Assign(String, String),
}

impl SetDirective {
    /// The option name the directive targets.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::On(n) | Self::Off(n) | Self::Toggle(n) | Self::Query(n) | Self::Assign(n, _) => {
                n
            }
        }
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(name, "includealpha" | "ia")
}

/// Parse space-separated `:set` arguments into directives.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    args.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }
    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }
    // "no" only negates a known option, so an unknown "nothing" stays
    // unknown instead of becoming Off("thing").
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }
    SetDirective::On(arg.to_string())
}

/// `"name"` when true, `"noname"` when false.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
