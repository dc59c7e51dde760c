// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! fzf session driver
//!
//! The driver feeds encoded records to fzf and registers two callbacks:
//! a preview command for the highlighted line and an execute command for the
//! confirmed selection. Both re-run the current executable, which fzf starts
//! as `$SHELL -c <command>`; pointing `$SHELL` at ourselves is what turns a
//! plain binary into its own callback handler.
//!
//! The execute command is bound with `become(...)` (fzf 0.38 or later): fzf
//! replaces itself with the callback, so the callback's exit status is the
//! session's exit status.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::codec::{Record, encode_argv, encode_records};
use crate::error::PickerError;
use crate::invoke::Call;
use crate::mode::{ARGV_ENV, EXECUTE_HEAD, PREVIEW_HEAD};

/// fzf exit code when no line matched the query
pub const EXIT_NO_MATCH: i32 = 1;

/// fzf exit code when the session was aborted (Esc or Ctrl-C)
pub const EXIT_CANCELLED: i32 = 130;

/// Default layout of the preview pane
pub const DEFAULT_PREVIEW_WINDOW: &str = "right:70%:wrap";

const SHARED_OPTS: [&str; 3] = ["--read0", "--print0", "--ansi"];

/// Picker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// Picker binary
    pub program: OsString,
    /// fzf `--preview-window` value
    pub preview_window: String,
    /// Allow selecting several lines
    pub multi: bool,
    /// Executable fzf calls back into; defaults to the current executable
    pub callback: Option<PathBuf>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            program: OsString::from("fzf"),
            preview_window: DEFAULT_PREVIEW_WINDOW.to_string(),
            multi: true,
            callback: None,
        }
    }
}

impl PickerOptions {
    /// Options for a specific picker binary
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Options with a different preview layout
    #[must_use]
    pub fn with_preview_window(mut self, spec: impl Into<String>) -> Self {
        self.preview_window = spec.into();
        self
    }

    /// Options restricted to a single selection
    #[must_use]
    pub fn single(mut self) -> Self {
        self.multi = false;
        self
    }
}

/// Callback command templates registered with fzf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    /// Runs whenever the highlighted line changes
    pub preview: String,
    /// Runs once on confirmation
    pub execute: String,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        // {f}: temp file with the current line, {+f}: with every selected line
        Self {
            preview: format!("{PREVIEW_HEAD}{{f}}"),
            execute: format!("{EXECUTE_HEAD}{{+f}}"),
        }
    }
}

/// One picker session
#[derive(Debug, Clone)]
pub struct PickerRequest {
    records: Vec<Record>,
    argv: Vec<OsString>,
    template: CommandTemplate,
}

impl PickerRequest {
    /// Build a session over `records`, to be re-entered with `argv`
    pub fn new<I, S>(records: Vec<Record>, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            records,
            argv: argv.into_iter().map(|a| a.as_ref().to_owned()).collect(),
            template: CommandTemplate::default(),
        }
    }

    /// Records shown in the picker
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Argument vector replayed by the callbacks
    #[must_use]
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    /// Callback templates
    #[must_use]
    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Command-line arguments passed to fzf
    #[must_use]
    pub fn fzf_args(&self, options: &PickerOptions) -> Vec<String> {
        let mut args: Vec<String> = SHARED_OPTS.iter().map(ToString::to_string).collect();
        if options.multi {
            args.push("--multi".to_string());
        }
        args.push(format!("--preview-window={}", options.preview_window));
        args.push(format!("--preview={}", self.template.preview));
        args.push(format!("--bind=enter:become({})", self.template.execute));
        args
    }

    /// Run the session, blocking until fzf exits
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Codec`] if a record cannot be encoded and
    /// [`PickerError::Process`] if fzf is missing or the session ends with a
    /// code other than 0, [`EXIT_NO_MATCH`] or [`EXIT_CANCELLED`]. A failing
    /// execute callback lands here with its own exit code.
    pub async fn run(&self, options: &PickerOptions) -> Result<PickerExit, PickerError> {
        let stdin = encode_records(&self.records)?;
        let callback = match &options.callback {
            Some(path) => path.clone(),
            None => std::env::current_exe()?,
        };

        info!(records = self.records.len(), "starting picker session");
        debug!(callback = %callback.display(), "registering picker callbacks");

        let done = Call::new(&options.program)
            .args(self.fzf_args(options))
            .env("SHELL", &callback)
            .env(ARGV_ENV, encode_argv(&self.argv))
            .stdin_bytes(stdin)
            .passthrough()
            .allow_codes(&[EXIT_NO_MATCH, EXIT_CANCELLED])
            .run()
            .await?;

        let exit = PickerExit::from_code(done.code);
        debug!(?exit, code = done.code, "picker session ended");
        Ok(exit)
    }
}

/// How a picker session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerExit {
    /// The selection was confirmed and the execute callback succeeded
    Accepted,
    /// Nothing matched the query
    NoMatch,
    /// The user aborted
    Cancelled,
}

impl PickerExit {
    /// Map an allow-listed fzf exit code
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            EXIT_NO_MATCH => Self::NoMatch,
            EXIT_CANCELLED => Self::Cancelled,
            _ => Self::Accepted,
        }
    }
}
