// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Error types for gitfz-picker

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running external programs or picker sessions
#[derive(Debug, Error)]
pub enum PickerError {
    /// An external program could not be spawned or exited with a code
    /// outside its allow-list
    #[error("{program}: {detail}")]
    Process {
        /// The program that was invoked
        program: String,
        /// Human readable description of the failure
        detail: String,
        /// Exit code, when the program ran at all
        code: Option<i32>,
    },

    /// Records could not be encoded for the picker
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// IO error while talking to a child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PickerError {
    /// Exit code reported by the failed program, if any
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process { code, .. } => *code,
            _ => None,
        }
    }
}

/// Violations of the record wire format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A field contains the field or record separator
    #[error("field {field} of record {record} contains a separator byte")]
    SeparatorInField {
        /// Index of the offending record
        record: usize,
        /// Index of the offending field within the record
        field: usize,
    },

    /// A record would encode to zero bytes and vanish on decode
    #[error("record {record} encodes to an empty line")]
    EmptyRecord {
        /// Index of the offending record
        record: usize,
    },
}

/// Broken callback contract between the picker driver and the classifier
///
/// These indicate that the driver and classifier disagree about the
/// re-invocation protocol, never bad user input.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The callback was not started as `<exe> -c <command>`
    #[error("callback invoked without a -c command: {0}")]
    MissingCommand(String),

    /// The command string carries neither the preview nor the execute tag
    #[error("unrecognized callback command: {0:?}")]
    UnknownPrefix(String),

    /// The payload file named by the command could not be read
    #[error("cannot read callback payload {path}: {source}")]
    Payload {
        /// Path taken from the command string
        path: PathBuf,
        /// Underlying read failure
        source: std::io::Error,
    },
}
