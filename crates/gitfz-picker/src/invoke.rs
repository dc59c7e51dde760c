// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! External process invocation
//!
//! [`Call`] is a small builder over [`tokio::process::Command`] that fixes
//! the stdio strategy and the exit-code policy of one run.
//!
//! # Example
//!
//! ```no_run
//! use gitfz_picker::invoke::Call;
//!
//! # async fn demo() -> Result<(), gitfz_picker::PickerError> {
//! let out = Call::new("git").args(["rev-parse", "HEAD"]).run().await?;
//! println!("{}", String::from_utf8_lossy(&out.stdout).trim());
//! # Ok(())
//! # }
//! ```

use std::ffi::{OsStr, OsString};
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::PickerError;

/// Where the child's standard input comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Input {
    /// Share the parent's stdin
    #[default]
    Inherit,
    /// Closed stdin
    Null,
    /// Pipe a buffer produced in memory
    Bytes(Vec<u8>),
}

/// What happens to one of the child's output streams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Output {
    /// Collect into memory for parsing or re-piping
    #[default]
    Capture,
    /// Write straight to the parent's stream
    Passthrough,
}

/// Result of a run that satisfied its exit-code policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completed {
    /// Exit code (`128 + signal` when killed by a signal)
    pub code: i32,
    /// Captured stdout (empty on passthrough)
    pub stdout: Vec<u8>,
    /// Captured stderr (empty on passthrough)
    pub stderr: Vec<u8>,
}

impl Completed {
    /// Whether the program exited with zero
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// A single external program run
#[derive(Debug, Clone)]
pub struct Call {
    program: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    cwd: Option<PathBuf>,
    stdin: Input,
    stdout: Output,
    stderr: Output,
    allowed: Vec<i32>,
}

impl Call {
    /// Start describing a run of `program`
    ///
    /// Defaults: stdin inherited, stdout captured, stderr passed through,
    /// only exit code zero accepted.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
            stdin: Input::Inherit,
            stdout: Output::Capture,
            stderr: Output::Passthrough,
            allowed: Vec::new(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Override one environment variable on top of the inherited environment
    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }

    /// Run in `dir` instead of the current directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Feed `data` to the child's stdin
    #[must_use]
    pub fn stdin_bytes(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Input::Bytes(data.into());
        self
    }

    /// Set the stdin strategy
    #[must_use]
    pub fn stdin(mut self, input: Input) -> Self {
        self.stdin = input;
        self
    }

    /// Let stdout go straight to the terminal
    #[must_use]
    pub fn passthrough(mut self) -> Self {
        self.stdout = Output::Passthrough;
        self
    }

    /// Collect stderr instead of passing it through
    #[must_use]
    pub fn capture_stderr(mut self) -> Self {
        self.stderr = Output::Capture;
        self
    }

    /// Treat `code` as success in addition to zero
    #[must_use]
    pub fn allow_code(mut self, code: i32) -> Self {
        self.allowed.push(code);
        self
    }

    /// Treat every code in `codes` as success in addition to zero
    #[must_use]
    pub fn allow_codes(mut self, codes: &[i32]) -> Self {
        self.allowed.extend_from_slice(codes);
        self
    }

    /// Program name for messages
    #[must_use]
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Spawn the program and wait for it
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Process`] when the program cannot be spawned or
    /// exits with a code that is neither zero nor allow-listed, and
    /// [`PickerError::Io`] when feeding stdin or collecting output fails.
    pub async fn run(self) -> Result<Completed, PickerError> {
        let program = self.program();
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(match self.stdin {
                Input::Inherit => Stdio::inherit(),
                Input::Null => Stdio::null(),
                Input::Bytes(_) => Stdio::piped(),
            })
            .stdout(stdio(self.stdout))
            .stderr(stdio(self.stderr));
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        debug!(program = %program, args = ?self.args, "spawning");
        let mut child = cmd.spawn().map_err(|e| PickerError::Process {
            program: program.clone(),
            detail: format!("failed to spawn: {e}"),
            code: None,
        })?;

        let feeder = match (self.stdin, child.stdin.take()) {
            (Input::Bytes(data), Some(mut pipe)) => Some(tokio::spawn(async move {
                let written = pipe.write_all(&data).await;
                drop(pipe);
                written
            })),
            _ => None,
        };

        let output = child.wait_with_output().await?;

        if let Some(feeder) = feeder {
            match feeder.await {
                Ok(Ok(())) => {}
                // the child may legitimately stop reading early
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(join) => return Err(std::io::Error::other(join).into()),
            }
        }

        let code = exit_code(output.status);
        debug!(program = %program, code, "exited");
        if code != 0 && !self.allowed.contains(&code) {
            return Err(PickerError::Process {
                program,
                detail: format!("exited with code {code}"),
                code: Some(code),
            });
        }

        Ok(Completed {
            code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

fn stdio(output: Output) -> Stdio {
    match output {
        Output::Capture => Stdio::piped(),
        Output::Passthrough => Stdio::inherit(),
    }
}

/// Exit code of a finished process, folding signals into `128 + signal`
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}
