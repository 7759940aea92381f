// SPDX-License-Identifier: MIT
//
// colorcycle — cycle CSS color literals between hex, rgb(a) and hsl(a).
//
// This binary wires the two crates together:
//
//   cc-color  → parse, convert, format, per-selection session memory
//   cc-editor → buffer, selections, options, the conversion command
//
// Two modes:
//
//   colorcycle [OPTIONS] COLOR...              each argument is a selection
//   colorcycle [OPTIONS] --file PATH RANGE...  each RANGE (line:col-line:col,
//                                              1-indexed) selects part of PATH
//
// Either way the text goes into a Document with one selection per literal,
// and the ColorCommand runs over it `--cycle` times. Running several times
// in one process shows the session memory at work: the third step of
// `#123457` comes back as `#123457`, not a rounded neighbour.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use cc_color::Notation;
use cc_editor::buffer::Buffer;
use cc_editor::command::{ColorCommand, Outcome};
use cc_editor::options::Options;
use cc_editor::position::{Position, Range};
use cc_editor::selection::{Document, SelectionHost};

const USAGE: &str = "\
usage: colorcycle [OPTIONS] COLOR...
       colorcycle [OPTIONS] --file PATH RANGE...

Converts CSS color literals hex → rgb(a) → hsl(a) → hex.

options:
  -a, --alpha          always write rgba()/hsla() (same as --set includealpha)
      --set ARGS       apply :set directives, e.g. --set 'noia'
      --config PATH    read options from a TOML file (include_alpha = bool)
      --to NOTATION    convert straight to hex, rgb or hsl
  -n, --cycle N        convert N times in one session (default 1)
  -f, --file PATH      convert RANGEs of PATH instead of COLOR arguments
  -w, --write          with --file, save the file instead of printing it
  -h, --help           show this help";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    set: Vec<String>,
    target: Option<Notation>,
    cycles: usize,
    file: Option<PathBuf>,
    write: bool,
    /// Color literals, or ranges when `file` is set.
    rest: Vec<String>,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut args = Self {
            cycles: 1,
            ..Self::default()
        };
        let mut argv = argv.into_iter();

        while let Some(arg) = argv.next() {
            let mut value = |flag: &str| {
                argv.next()
                    .ok_or_else(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "-h" | "--help" => return Err(String::new()),
                "-a" | "--alpha" => args.set.push("includealpha".into()),
                "--set" => args.set.push(value("--set")?),
                "--config" => args.config = Some(value("--config")?.into()),
                "--to" => {
                    let name = value("--to")?;
                    args.target = Some(
                        Notation::from_name(&name)
                            .ok_or_else(|| format!("unknown notation: {name}"))?,
                    );
                }
                "-n" | "--cycle" => {
                    let n = value("--cycle")?;
                    args.cycles = n
                        .parse()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(|| format!("invalid cycle count: {n}"))?;
                }
                "-f" | "--file" => args.file = Some(value("--file")?.into()),
                "-w" | "--write" => args.write = true,
                "--" => args.rest.extend(argv.by_ref()),
                // Anything else is a literal, even if it starts with '-'.
                _ => args.rest.push(arg),
            }
        }

        if args.rest.is_empty() {
            return Err("nothing to convert".into());
        }
        if args.write && args.file.is_none() {
            return Err("--write needs --file".into());
        }
        Ok(args)
    }

    fn options(&self) -> cc_editor::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)?,
            None => Options::default(),
        };
        for set in &self.set {
            for message in options.apply_set(set)? {
                println!("{message}");
            }
        }
        Ok(options)
    }
}

// ─── Modes ──────────────────────────────────────────────────────────────────

/// One selection per argument: the literals become the lines of a scratch
/// buffer. Prints each selection's history, `#f00 → rgb(255, 0, 0) → ...`.
fn convert_literals(args: &Args, command: &mut ColorCommand) -> cc_editor::Result<()> {
    let mut doc = Document::new(Buffer::from_text(&args.rest.join("\n")));
    let selections = args
        .rest
        .iter()
        .enumerate()
        .map(|(line, text)| {
            Range::new(
                Position::new(line, 0),
                Position::new(line, text.chars().count()),
            )
        })
        .collect();
    doc.set_selections(selections, command)?;

    let mut history: Vec<Vec<String>> = args.rest.iter().map(|t| vec![t.clone()]).collect();
    for _ in 0..args.cycles {
        for (steps, outcome) in history.iter_mut().zip(command.run(&mut doc)?) {
            if let Outcome::Converted { text, .. } = outcome {
                steps.push(text);
            }
        }
    }

    for (steps, (text, _)) in history.iter().zip(doc.selections()) {
        if steps.len() == 1 {
            eprintln!("colorcycle: {text:?} left unchanged: not a color literal");
        } else {
            println!("{}", steps.join(" → "));
        }
    }
    Ok(())
}

/// Convert ranges of a file, then print the result or write it back.
fn convert_file(path: &Path, args: &Args, command: &mut ColorCommand) -> cc_editor::Result<()> {
    let mut doc = Document::new(Buffer::from_file(path)?);
    let selections = args
        .rest
        .iter()
        .map(|r| r.parse::<Range>())
        .collect::<cc_editor::Result<Vec<_>>>()?;
    doc.set_selections(selections, command)?;

    for _ in 0..args.cycles {
        for (index, outcome) in command.run(&mut doc)?.into_iter().enumerate() {
            if let Outcome::Skipped(err) = outcome {
                eprintln!("colorcycle: selection {} left unchanged: {err}", index + 1);
            }
        }
    }

    let mut buffer = doc.into_buffer();
    if args.write {
        if buffer.is_modified() {
            buffer.save()?;
        }
    } else {
        print!("{}", buffer.contents());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse(env::args().skip(1)).unwrap_or_else(|msg| {
        if msg.is_empty() {
            println!("{USAGE}");
            process::exit(0);
        }
        eprintln!("colorcycle: {msg}\n\n{USAGE}");
        process::exit(2);
    });

    let options = args.options().unwrap_or_else(|e| {
        eprintln!("colorcycle: {e}");
        process::exit(2);
    });
    log::debug!("options: {options:?}");

    let mut command = ColorCommand::new(&options);
    if let Some(target) = args.target {
        command = command.with_target(target);
    }

    let result = match &args.file {
        Some(path) => convert_file(path, &args, &mut command),
        None => convert_literals(&args, &mut command),
    };
    if let Err(e) = result {
        eprintln!("colorcycle: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
