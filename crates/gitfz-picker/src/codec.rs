// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Line codec for the picker wire format
//!
//! A [`Record`] is an ordered tuple of opaque byte fields. Fields join with
//! [`FIELD_SEP`] (`\n`) and records join with [`RECORD_SEP`] (NUL), which is
//! what `fzf --read0 --print0` consumes and writes back into its `{f}` and
//! `{+f}` payload files.
//!
//! The original argument vector of a session travels separately, through an
//! environment variable, joined with [`ARGV_SEP`].

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

use crate::error::CodecError;

/// Separator between the fields of one record
pub const FIELD_SEP: u8 = b'\n';

/// Separator between records
pub const RECORD_SEP: u8 = b'\0';

/// Separator between encoded argv entries (EOT)
pub const ARGV_SEP: u8 = 0x04;

/// One line handed to the picker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<Vec<u8>>,
}

impl Record {
    /// Create a record from its fields
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Vec<u8>>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a record holding a single field
    pub fn single(field: impl Into<Vec<u8>>) -> Self {
        Self {
            fields: vec![field.into()],
        }
    }

    /// All fields in order
    #[must_use]
    pub fn fields(&self) -> &[Vec<u8>] {
        &self.fields
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw bytes of field `index`
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&[u8]> {
        self.fields.get(index).map(Vec::as_slice)
    }

    /// Field `index` as text, replacing invalid UTF-8
    #[must_use]
    pub fn field_str(&self, index: usize) -> Option<Cow<'_, str>> {
        self.field(index).map(String::from_utf8_lossy)
    }

    /// Field `index` as an OS string, byte for byte
    #[must_use]
    pub fn field_os(&self, index: usize) -> Option<&OsStr> {
        self.field(index).map(OsStr::from_bytes)
    }

    /// Encoded form of this record, without the record separator
    #[must_use]
    pub fn to_line(&self) -> Vec<u8> {
        self.fields.join(&FIELD_SEP)
    }
}

/// Encode records into the NUL-delimited picker format
///
/// # Errors
///
/// Returns [`CodecError::SeparatorInField`] if any field contains `\n` or
/// NUL, and [`CodecError::EmptyRecord`] if a record would encode to nothing.
pub fn encode_records(records: &[Record]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    for (i, record) in records.iter().enumerate() {
        for (j, field) in record.fields.iter().enumerate() {
            if field.iter().any(|b| *b == FIELD_SEP || *b == RECORD_SEP) {
                return Err(CodecError::SeparatorInField {
                    record: i,
                    field: j,
                });
            }
        }
        let line = record.to_line();
        if line.is_empty() {
            return Err(CodecError::EmptyRecord { record: i });
        }
        if i > 0 {
            out.push(RECORD_SEP);
        }
        out.extend_from_slice(&line);
    }
    Ok(out)
}

/// Decode NUL-delimited picker output into records
///
/// Leading and trailing record separators are ignored, so empty input yields
/// no records and a trailing separator never produces an empty record.
#[must_use]
pub fn decode_records(data: &[u8]) -> Vec<Record> {
    let start = data.iter().position(|b| *b != RECORD_SEP);
    let Some(start) = start else {
        return Vec::new();
    };
    let end = data
        .iter()
        .rposition(|b| *b != RECORD_SEP)
        .map_or(data.len(), |i| i + 1);

    data[start..end]
        .split(|b| *b == RECORD_SEP)
        .map(|line| Record {
            fields: line.split(|b| *b == FIELD_SEP).map(<[u8]>::to_vec).collect(),
        })
        .collect()
}

/// Encode an argument vector for the callback environment variable
#[must_use]
pub fn encode_argv<I, S>(argv: I) -> OsString
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let parts: Vec<Vec<u8>> = argv
        .into_iter()
        .map(|arg| arg.as_ref().as_bytes().to_vec())
        .collect();
    OsString::from_vec(parts.join(&ARGV_SEP))
}

/// Decode an argument vector produced by [`encode_argv`]
///
/// An empty value decodes to an empty vector.
#[must_use]
pub fn decode_argv(encoded: &OsStr) -> Vec<OsString> {
    let bytes = encoded.as_bytes();
    if bytes.is_empty() {
        return Vec::new();
    }
    bytes
        .split(|b| *b == ARGV_SEP)
        .map(|part| OsString::from_vec(part.to_vec()))
        .collect()
}
