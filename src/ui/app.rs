//! Interactive terminal front end for the recon screen.
//!
//! Reads one command per line and re-renders the result area whenever the
//! controller's observable state changes.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::resolver::{ContentLocator, ImageReference};
use crate::ui::controller::ReconController;
use crate::ui::recon::ResultState;
use crate::ui::render::{render_header, render_result};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the built-in sample at this index.
    Submit(usize),
    /// Submit user content picked by locator.
    Open(String),
    List,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Ok(index) = line.parse::<usize>() {
        return Ok(Some(Command::Submit(index)));
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "open" | "pick" if !rest.is_empty() => Ok(Some(Command::Open(rest.to_string()))),
        "open" | "pick" => Err("usage: open <path>".to_string()),
        "list" | "ls" => Ok(Some(Command::List)),
        "help" | "?" => Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => Ok(Some(Command::Quit)),
        other => Err(format!("unknown command '{}' (try `help`)", other)),
    }
}

pub struct App<W: Write> {
    controller: ReconController,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(controller: ReconController, out: W) -> Self {
        Self { controller, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit`, or until input ends and nothing is in flight.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> io::Result<()> {
        let mut states = self.controller.subscribe();
        let mut lines = input.lines();
        let mut input_open = true;

        write!(self.out, "{}", render_header())?;
        writeln!(self.out, "{}", render_result(self.controller.state()))?;
        self.out.flush()?;

        loop {
            tokio::select! {
                _ = self.controller.next_completion() => {}
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = states.borrow_and_update().clone();
                    self.show(&state)?;
                    if !input_open && !state.is_loading() {
                        break;
                    }
                }
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if !self.handle_line(&line)? {
                                break;
                            }
                        }
                        None => {
                            input_open = false;
                            if !self.controller.state().is_loading() {
                                break;
                            }
                        }
                    }
                }
            }
        }

        if states.has_changed().unwrap_or(false) {
            let state = states.borrow_and_update().clone();
            self.show(&state)?;
        }
        Ok(())
    }

    fn show(&mut self, state: &ResultState) -> io::Result<()> {
        writeln!(self.out, "{}", render_result(state))?;
        self.out.flush()
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match parse_command(line) {
            Ok(None) => {}
            Ok(Some(Command::Submit(index))) => {
                self.controller.submit(ImageReference::BuiltInSample(index));
            }
            Ok(Some(Command::Open(locator))) => {
                self.controller
                    .submit(ImageReference::UserContent(ContentLocator::new(locator)));
            }
            Ok(Some(Command::List)) => write!(self.out, "{}", render_header())?,
            Ok(Some(Command::Help)) => writeln!(
                self.out,
                "commands: <index> | open <path> | list | help | quit"
            )?,
            Ok(Some(Command::Quit)) => return Ok(false),
            Err(message) => writeln!(self.out, "{}", message)?,
        }
        self.out.flush()?;
        Ok(true)
    }
}

/// Submit one reference, wait for it to settle, and print the result.
pub async fn run_once<W: Write>(
    controller: &mut ReconController,
    reference: ImageReference,
    out: &mut W,
) -> io::Result<ResultState> {
    controller.submit(reference);
    while controller.state().is_loading() {
        controller.next_completion().await;
    }

    let state = controller.state().clone();
    writeln!(out, "{}", render_result(&state))?;
    out.flush()?;
    Ok(state)
}
