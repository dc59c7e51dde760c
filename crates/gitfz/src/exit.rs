// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Process exit codes

use std::io;

use gitfz_git::GitError;
use gitfz_picker::picker::EXIT_NO_MATCH;
use gitfz_picker::{Mode, PickerError};

/// Everything worked, or the user cancelled the picker
pub const EXIT_OK: i32 = 0;

/// Generic failure
pub const EXIT_FAILURE: i32 = 1;

/// Stdout was closed by the reader (`gitfz ... | head`)
pub const EXIT_BROKEN_PIPE: i32 = 13;

/// Interrupted with Ctrl-C
pub const EXIT_SIGINT: i32 = 130;

/// An execute callback failed with a code fzf reserves for "no match"
pub const EXIT_CALLBACK_FAILED: i32 = 2;

/// Map a top-level error to the process exit code
///
/// A broken pipe anywhere in the chain wins; otherwise the exit code of a
/// failed external program is passed through.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    let broken_pipe = err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    });
    if broken_pipe {
        return EXIT_BROKEN_PIPE;
    }

    err.chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<GitError>()
                .and_then(GitError::exit_code)
                .or_else(|| {
                    cause
                        .downcast_ref::<PickerError>()
                        .and_then(PickerError::exit_code)
                })
        })
        .filter(|code| *code != EXIT_OK)
        .unwrap_or(EXIT_FAILURE)
}

/// Exit code of a failed run in `mode`
///
/// The execute callback's status becomes the picker session's status, so it
/// must not look like a query with no match.
#[must_use]
pub fn exit_code_in(mode: Mode, err: &anyhow::Error) -> i32 {
    match exit_code_for(err) {
        EXIT_NO_MATCH if mode == Mode::Execute => EXIT_CALLBACK_FAILED,
        code => code,
    }
}
