//! Line-based control console
//!
//! Stands in for a tray menu: each line on stdin selects a generator or asks
//! for status. Commands:
//!
//! - `white`, `brown`, `none` / `off` - switch generator
//! - `status` - print the engine status
//! - `help` - list commands
//! - `quit` / `exit` - stop playback (EOF does the same)

use std::io::{self, BufRead, Write};

use noisegen_core::{EngineHandle, GeneratorKind};

const HELP: &str = "Commands: white | brown | none | status | help | quit";

/// One parsed console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(GeneratorKind),
    Status,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

/// Parse one line, returning the unrecognized text on failure
pub fn parse_command(line: &str) -> Result<Command, String> {
    let word = line.trim();
    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => word
            .parse::<GeneratorKind>()
            .map(Command::Select)
            .map_err(|_| word.to_string()),
    }
}

/// Read commands from `input` until `quit` or EOF, applying them to the engine.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W, engine: &EngineHandle) -> io::Result<()> {
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Select(kind)) => {
                if !engine.select_kind(kind) {
                    writeln!(output, "engine stopped")?;
                    break;
                }
                writeln!(output, "{kind} noise")?;
            }
            Ok(Command::Status) => match engine.status() {
                Some(status) => writeln!(
                    output,
                    "kind={} in_flight={} next={} submitted={}",
                    status.kind, status.in_flight, status.current, status.submitted_total
                )?,
                None => {
                    writeln!(output, "engine stopped")?;
                    break;
                }
            },
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Err(unknown) => writeln!(output, "unknown command '{unknown}'. {HELP}")?,
        }
        output.flush()?;
    }
    Ok(())
}
