use crate::selection::parse_selection;
use crate::types::DirectoryRecord;
use colored::Colorize;
use log::{info, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Source of operator answers. One call per prompt.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Reads answers from the terminal. End of input counts as an empty answer.
pub struct StdinPrompter<R> {
    input: R,
}

impl StdinPrompter<io::StdinLock<'static>> {
    #[must_use]
    pub fn new() -> Self {
        StdinPrompter {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdinPrompter<io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        print!("{question}");
        io::stdout().flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}

/// Recursive removal of a whole directory tree.
pub trait Remover {
    fn remove(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    ProceedPrompt,
    SelectionPrompt,
    ConfirmPrompt(Vec<usize>),
    Deleting(Vec<usize>),
    Done(SessionEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator did not want to delete anything.
    Declined,
    /// Selection input matched no listed entry.
    NothingSelected,
    /// Operator backed out at the final confirmation.
    Cancelled,
    /// Every selected path was attempted.
    Completed,
}

#[derive(Debug, Clone)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub selected: Vec<usize>,
    pub deleted: usize,
    pub failures: Vec<DeletionFailure>,
}

/// Interactive select, confirm and delete sequence over a ranked list.
///
/// Nothing is removed unless the operator answers yes to both the proceed
/// prompt and the final confirmation.
pub struct Session<'a, P, R, W> {
    dirs: &'a [DirectoryRecord],
    prompter: P,
    remover: R,
    out: W,
    state: SessionState,
    selected: Vec<usize>,
    deleted: usize,
    failures: Vec<DeletionFailure>,
}

impl<'a, P: Prompter, R: Remover, W: Write> Session<'a, P, R, W> {
    pub fn new(dirs: &'a [DirectoryRecord], prompter: P, remover: R, out: W) -> Self {
        Session {
            dirs,
            prompter,
            remover,
            out,
            state: SessionState::ProceedPrompt,
            selected: Vec::new(),
            deleted: 0,
            failures: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Drive the session to completion.
    pub fn run(mut self) -> io::Result<SessionReport> {
        let end = loop {
            if let SessionState::Done(end) = self.state {
                break end;
            }
            self.step()?;
        };

        Ok(SessionReport {
            end,
            selected: self.selected,
            deleted: self.deleted,
            failures: self.failures,
        })
    }

    /// Perform exactly one transition.
    pub fn step(&mut self) -> io::Result<()> {
        let state = std::mem::replace(&mut self.state, SessionState::Done(SessionEnd::Declined));
        self.state = match state {
            SessionState::ProceedPrompt => self.ask_proceed()?,
            SessionState::SelectionPrompt => self.ask_selection()?,
            SessionState::ConfirmPrompt(indices) => self.ask_confirm(indices)?,
            SessionState::Deleting(indices) => self.delete(&indices)?,
            done @ SessionState::Done(_) => done,
        };
        Ok(())
    }

    fn ask_proceed(&mut self) -> io::Result<SessionState> {
        if self.dirs.is_empty() {
            return Ok(SessionState::Done(SessionEnd::Declined));
        }
        let answer = self
            .prompter
            .ask("Would you like to delete any directories? (y/n): ")?;

        Ok(if is_affirmative(&answer) {
            SessionState::SelectionPrompt
        } else {
            SessionState::Done(SessionEnd::Declined)
        })
    }

    fn ask_selection(&mut self) -> io::Result<SessionState> {
        let answer = self.prompter.ask(
            "Enter the numbers of directories to delete (e.g., 1,2,3 or 1-3), or 'all': ",
        )?;
        let indices = parse_selection(&answer, self.dirs.len());
        self.selected.clone_from(&indices);

        if indices.is_empty() {
            writeln!(self.out, "{}", "No valid directories selected.".yellow())?;
            return Ok(SessionState::Done(SessionEnd::NothingSelected));
        }
        Ok(SessionState::ConfirmPrompt(indices))
    }

    fn ask_confirm(&mut self, indices: Vec<usize>) -> io::Result<SessionState> {
        writeln!(self.out, "\nThe following directories will be deleted:")?;
        for &i in &indices {
            let d = &self.dirs[i];
            writeln!(self.out, "- {} ({})", d.path.display(), d.size_display)?;
        }
        self.out.flush()?;

        let answer = self.prompter.ask("\nConfirm deletion? (y/n): ")?;
        Ok(if is_affirmative(&answer) {
            SessionState::Deleting(indices)
        } else {
            writeln!(self.out, "Deletion cancelled.")?;
            SessionState::Done(SessionEnd::Cancelled)
        })
    }

    fn delete(&mut self, indices: &[usize]) -> io::Result<SessionState> {
        let dirs = self.dirs;
        for &i in indices {
            let path = &dirs[i].path;
            writeln!(self.out, "Deleting {}...", path.display())?;

            match self.remover.remove(path) {
                Ok(()) => {
                    info!("deleted {}", path.display());
                    self.deleted += 1;
                }
                Err(err) => {
                    warn!("failed to delete {}: {err}", path.display());
                    writeln!(
                        self.out,
                        "{} {}: {err}",
                        "Error deleting".red(),
                        path.display()
                    )?;
                    self.failures.push(DeletionFailure {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        writeln!(self.out, "{}", "Deletion complete!".green())?;
        Ok(SessionState::Done(SessionEnd::Completed))
    }
}
