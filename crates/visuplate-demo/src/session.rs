//! Script execution against a live store.

use std::io::{BufRead, Write};

use visuplate::{ManualTimers, MenuStore, Msg, WatchList};
use web_time::Duration;

use crate::error::{DemoError, Result};
use crate::render::{OutputFormat, language_listing, menu_listing, state_json, state_line};
use crate::script::{Command, ParseError};

/// Counts reported after a script finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Lines that held a command.
    pub commands: usize,
    /// Commands that were rejected or had a bad argument.
    pub errors: usize,
}

/// A store driven by script commands on a manual clock.
///
/// Time only moves on `wait`, so a script replays identically on every run.
pub struct Session<O: Write> {
    store: MenuStore<WatchList>,
    timers: ManualTimers<Msg>,
    out: O,
    format: OutputFormat,
    summary: Summary,
}

impl<O: Write> Session<O> {
    pub fn new(store: MenuStore<WatchList>, out: O, format: OutputFormat) -> Self {
        Self {
            store,
            timers: ManualTimers::new(),
            out,
            format,
            summary: Summary::default(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &MenuStore<WatchList> {
        &self.store
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_output(self) -> O {
        self.out
    }

    /// Run every line of `input`. Stops at the first unknown command.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<Summary> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    self.summary.commands += 1;
                    self.execute(number, command)?;
                }
                Err(ParseError::Unknown(command)) => {
                    return Err(DemoError::UnknownCommand {
                        line: number,
                        command,
                    });
                }
                Err(err @ ParseError::BadArgument(_)) => {
                    self.summary.commands += 1;
                    self.report(number, &err.to_string())?;
                    self.dump()?;
                }
            }
        }
        tracing::info!(
            target: "visuplate.demo",
            commands = self.summary.commands,
            errors = self.summary.errors,
            "script finished"
        );
        Ok(self.summary)
    }

    /// Apply one command and print the resulting state.
    pub fn execute(&mut self, line: usize, command: Command) -> Result<()> {
        match command {
            Command::Wait(by) => self.advance(line, by)?,
            Command::Show => {
                let listing = menu_listing(&self.store);
                self.out.write_all(listing.as_bytes())?;
            }
            Command::Languages => {
                let listing = language_listing(&self.store);
                self.out.write_all(listing.as_bytes())?;
            }
            other => {
                if let Some(msg) = other.into_msg() {
                    if let Err(err) = self.store.update(msg, &mut self.timers) {
                        self.report(line, &err.to_string())?;
                    }
                }
            }
        }
        self.dump()
    }

    /// Advance the clock and feed due timer messages back into the store.
    fn advance(&mut self, line: usize, by: Duration) -> Result<()> {
        for msg in self.timers.advance(by) {
            if let Err(err) = self.store.update(msg, &mut self.timers) {
                self.report(line, &err.to_string())?;
            }
        }
        Ok(())
    }

    fn report(&mut self, line: usize, message: &str) -> Result<()> {
        self.summary.errors += 1;
        tracing::warn!(target: "visuplate.demo", line, error = message, "command failed");
        match self.format {
            OutputFormat::Text => writeln!(self.out, "line {line}: error: {message}")?,
            OutputFormat::Json => {
                let value = serde_json::json!({ "line": line, "error": message });
                writeln!(self.out, "{}", serde_json::to_string(&value)?)?;
            }
        }
        Ok(())
    }

    fn dump(&mut self) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", state_line(&self.store))?,
            OutputFormat::Json => {
                writeln!(self.out, "{}", serde_json::to_string(&state_json(&self.store))?)?;
            }
        }
        Ok(())
    }
}
