// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Invocation classifier
//!
//! A tool binary runs in one of three modes. A plain run from the shell is
//! [`Mode::Normal`]. When the picker driver spawns fzf it sets
//! [`ARGV_ENV`] and points `$SHELL` at the current executable, so fzf's
//! preview and execute bindings come back as `<exe> -c "<tag><payload>"`,
//! which this module turns into [`Mode::Preview`] or [`Mode::Execute`] along
//! with the selected records and the original argument vector.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use clap::Parser;

use crate::codec::{Record, decode_argv, decode_records};
use crate::error::CallbackError;

/// Environment variable holding the encoded original argv of a session
pub const ARGV_ENV: &str = "__GITFZ_ARGV__";

/// Command-string tag for preview callbacks
pub const PREVIEW_HEAD: &str = "preview::";

/// Command-string tag for execute callbacks
pub const EXECUTE_HEAD: &str = "execute::";

/// How the current process was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Started directly by the user
    Normal,
    /// Started by the picker to render the highlighted line
    Preview,
    /// Started by the picker to act on the confirmed selection
    Execute,
}

impl Mode {
    /// Whether this run is a picker callback
    #[must_use]
    pub fn is_callback(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Shape of a callback invocation: `<exe> -c <command>`
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct CallbackArgs {
    #[arg(short = 'c')]
    command: OsString,
}

/// A classified process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    mode: Mode,
    argv: Vec<OsString>,
    selection: Vec<Record>,
}

impl Invocation {
    /// Classify an argument vector
    ///
    /// `callback_argv` is the value of [`ARGV_ENV`], if set. Without it every
    /// argument vector is a normal invocation and is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns a [`CallbackError`] when the variable is set but the
    /// arguments do not follow the callback contract.
    pub fn classify<I, T>(args: I, callback_argv: Option<&OsStr>) -> Result<Self, CallbackError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let Some(encoded) = callback_argv else {
            return Ok(Self {
                mode: Mode::Normal,
                argv: args,
                selection: Vec::new(),
            });
        };

        let callback = CallbackArgs::try_parse_from(&args)
            .map_err(|e| CallbackError::MissingCommand(e.to_string()))?;
        let command = callback.command.as_bytes();

        let (mode, payload) = if let Some(rest) = command.strip_prefix(PREVIEW_HEAD.as_bytes()) {
            (Mode::Preview, rest)
        } else if let Some(rest) = command.strip_prefix(EXECUTE_HEAD.as_bytes()) {
            (Mode::Execute, rest)
        } else {
            return Err(CallbackError::UnknownPrefix(
                callback.command.to_string_lossy().into_owned(),
            ));
        };

        let path = PathBuf::from(OsStr::from_bytes(payload));
        let data = std::fs::read(&path).map_err(|source| CallbackError::Payload {
            path: path.clone(),
            source,
        })?;
        let selection = decode_records(&data);

        Ok(Self {
            mode,
            argv: decode_argv(encoded),
            selection,
        })
    }

    /// Classify the current process from `std::env`
    ///
    /// # Panics
    ///
    /// Panics if [`ARGV_ENV`] is set but the callback contract is broken.
    /// That means the driver and classifier have drifted apart, which no
    /// amount of recovery can fix.
    #[must_use]
    pub fn from_env() -> Self {
        let callback_argv = std::env::var_os(ARGV_ENV);
        match Self::classify(std::env::args_os(), callback_argv.as_deref()) {
            Ok(invocation) => invocation,
            Err(err) => panic!("picker callback contract violated: {err}"),
        }
    }

    /// The classified mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Argument vector of the original top-level invocation
    #[must_use]
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    /// Records selected in the picker (empty in normal mode)
    #[must_use]
    pub fn selection(&self) -> &[Record] {
        &self.selection
    }
}
