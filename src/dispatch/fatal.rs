//! Fatal error handling.
//!
//! A FatalError log call hands the final (unmarked) message to a
//! [`FatalHandler`] before it is sunk. The handler may block, for example to
//! wait for a user to acknowledge the error, and decides whether the host
//! should keep running. The logger only reports that decision; halting is
//! up to the caller.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// What the host should do after a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalDecision {
    Continue,
    Halt,
}

/// Receives fatal messages.
pub trait FatalHandler: Send + Sync {
    fn on_fatal(&self, message: &str) -> FatalDecision;
}

impl<F> FatalHandler for F
where
    F: Fn(&str) -> FatalDecision + Send + Sync,
{
    fn on_fatal(&self, message: &str) -> FatalDecision {
        self(message)
    }
}

/// Always continues.
#[derive(Debug, Clone, Default)]
pub struct ContinueOnFatal;

impl FatalHandler for ContinueOnFatal {
    fn on_fatal(&self, _message: &str) -> FatalDecision {
        FatalDecision::Continue
    }
}

/// Always asks the host to halt.
#[derive(Debug, Clone, Default)]
pub struct HaltOnFatal;

impl FatalHandler for HaltOnFatal {
    fn on_fatal(&self, _message: &str) -> FatalDecision {
        FatalDecision::Halt
    }
}

/// Blocks on a terminal prompt: `[i]gnore` continues, `[b]reak` halts.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    /// Prompt on `output` and read the answer from `input`.
    ///
    /// Anything other than an answer starting with `b` continues, including
    /// end of input.
    pub fn ask<R: BufRead, W: Write>(&self, message: &str, mut input: R, mut output: W) -> FatalDecision {
        let _ = writeln!(output, "Fatal error: {}", message);
        let _ = write!(output, "[i]gnore / [b]reak? ");
        let _ = output.flush();

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) if answer.trim_start().to_ascii_lowercase().starts_with('b') => FatalDecision::Halt,
            Ok(_) => FatalDecision::Continue,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read fatal error prompt answer, continuing");
                FatalDecision::Continue
            }
        }
    }
}

impl FatalHandler for TerminalPrompt {
    fn on_fatal(&self, message: &str) -> FatalDecision {
        self.ask(message, std::io::stdin().lock(), std::io::stderr().lock())
    }
}

/// Handler selection in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatalHandlerKind {
    #[default]
    Continue,
    Halt,
    Prompt,
}
