// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Error types for gitfz-git

use gitfz_picker::PickerError;
use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// An external program failed
    #[error(transparent)]
    Picker(#[from] PickerError),

    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error, typically while writing to stdout
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, SHA or reflog selector)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// git printed something we could not make sense of
    #[error("Unexpected {what} output: {input}")]
    Parse {
        /// Which listing was being parsed
        what: &'static str,
        /// The offending fragment
        input: String,
    },
}

impl GitError {
    /// Exit code of the failed program, if any
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Picker(err) => err.exit_code(),
            _ => None,
        }
    }
}
