// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Parsers for git's machine-readable listings
//!
//! Listings are requested with a leading `%x00` in the pretty format (or with
//! `-z`), so every entry starts after a NUL and may carry git's trailing
//! newline.

use std::borrow::Cow;

use gitfz_picker::Record;

use crate::error::GitError;

const NUL: u8 = b'\0';
const ESC: char = '\x1b';

/// Split a NUL-separated listing into non-empty entries
///
/// Surrounding newlines of each entry are dropped.
#[must_use]
pub fn split_entries(data: &[u8]) -> Vec<&[u8]> {
    data.split(|b| *b == NUL)
        .map(trim_newlines)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// One single-field record per listing entry
#[must_use]
pub fn listing(data: &[u8]) -> Vec<Record> {
    split_entries(data).into_iter().map(Record::single).collect()
}

fn trim_newlines(mut entry: &[u8]) -> &[u8] {
    while let [b'\n', rest @ ..] = entry {
        entry = rest;
    }
    while let [rest @ .., b'\n'] = entry {
        entry = rest;
    }
    entry
}

/// Remove ANSI escape sequences
///
/// Handles CSI sequences (`ESC [ ... <letter>`); any other escape drops only
/// the ESC itself.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains(ESC) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            result.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        }
    }
    Cow::Owned(result)
}

/// First whitespace-separated token of a picker line, without colours
#[must_use]
pub fn first_token(line: &str) -> Option<String> {
    strip_ansi(line)
        .split_whitespace()
        .next()
        .map(ToString::to_string)
}

/// One entry of `git diff --name-status -z`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameStatus {
    /// Status letter (`A`, `M`, `D`, `R`, `C`, ...)
    pub status: char,
    /// Similarity score for renames and copies
    pub score: Option<u8>,
    /// Source path of a rename or copy
    pub from: Option<Vec<u8>>,
    /// Path in the newer tree
    pub path: Vec<u8>,
}

/// Parse `git diff --name-status -z`
///
/// # Errors
///
/// Returns `GitError::Parse` for an unknown status token or a missing path.
pub fn parse_name_status(data: &[u8]) -> Result<Vec<NameStatus>, GitError> {
    let mut tokens = data.split(|b| *b == NUL).filter(|t| !t.is_empty());
    let mut entries = Vec::new();

    while let Some(token) = tokens.next() {
        let text = String::from_utf8_lossy(token);
        let mut letters = text.chars();
        let status = letters
            .next()
            .filter(char::is_ascii_uppercase)
            .ok_or_else(|| parse_error("name-status", &text))?;
        let digits = letters.as_str();
        let score = if digits.is_empty() {
            None
        } else {
            Some(
                digits
                    .parse::<u8>()
                    .map_err(|_| parse_error("name-status", &text))?,
            )
        };

        let mut next_path = || {
            tokens
                .next()
                .map(<[u8]>::to_vec)
                .ok_or_else(|| parse_error("name-status", &text))
        };
        let (from, path) = if matches!(status, 'R' | 'C') {
            let from = next_path()?;
            (Some(from), next_path()?)
        } else {
            (None, next_path()?)
        };

        entries.push(NameStatus {
            status,
            score,
            from,
            path,
        });
    }
    Ok(entries)
}

/// A file deleted by some commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadFile {
    /// Parent of the deleting commit (`<sha>~`), where the file still exists
    pub rev: String,
    /// Human-readable date of the deleting commit
    pub date: String,
    /// Path of the deleted file
    pub path: Vec<u8>,
}

impl DeadFile {
    /// Picker record: `rev`, `date`, `path`
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::new([
            self.rev.clone().into_bytes(),
            self.date.clone().into_bytes(),
            self.path.clone(),
        ])
    }
}

/// Parse `git log -z --diff-filter=D --name-only --pretty=format:%x00%h %ad`
///
/// With `-z` git stops C-quoting paths: each commit is an empty token, a
/// `<sha> <date>\n<first path>` token and one token per further path.
/// Only the header line is split on `\n`, so paths keep every byte.
#[must_use]
pub fn parse_dead_files(data: &[u8]) -> Vec<DeadFile> {
    let mut dead = Vec::new();
    let mut header: Option<(String, String)> = None;
    let mut at_header = true;

    for token in data.split(|b| *b == NUL) {
        if token.is_empty() {
            at_header = true;
            continue;
        }
        let path = if at_header {
            at_header = false;
            let (line, rest) = match token.iter().position(|b| *b == b'\n') {
                Some(i) => (&token[..i], &token[i + 1..]),
                None => (token, &b""[..]),
            };
            let line = String::from_utf8_lossy(line);
            let line = strip_ansi(&line);
            let (sha, date) = line.split_once(' ').unwrap_or((line.as_ref(), ""));
            header = Some((format!("{sha}~"), date.to_string()));
            rest
        } else {
            token
        };

        let Some((rev, date)) = &header else {
            continue;
        };
        if !path.is_empty() {
            dead.push(DeadFile {
                rev: rev.clone(),
                date: date.clone(),
                path: path.to_vec(),
            });
        }
    }
    dead
}

/// A reflog selector such as `HEAD@{3}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogRef {
    /// Ref name (`HEAD`, `main`, `refs/stash`, ...)
    pub name: String,
    /// Position in the reflog, newest first
    pub index: usize,
}

impl ReflogRef {
    /// Parse `<name>@{<n>}`
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` for anything else.
    pub fn parse(selector: &str) -> Result<Self, GitError> {
        let invalid = || GitError::InvalidReference {
            reference: selector.to_string(),
        };
        let (name, rest) = selector.rsplit_once("@{").ok_or_else(invalid)?;
        let digits = rest.strip_suffix('}').ok_or_else(invalid)?;
        if name.is_empty() || name.contains('@') || digits.is_empty() {
            return Err(invalid());
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = digits.parse().map_err(|_| invalid())?;
        Ok(Self {
            name: name.to_string(),
            index,
        })
    }

    /// The entry one step further back in the reflog
    #[must_use]
    pub fn older(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index + 1,
        }
    }
}

impl std::fmt::Display for ReflogRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{{{}}}", self.name, self.index)
    }
}

fn parse_error(what: &'static str, input: &str) -> GitError {
    GitError::Parse {
        what,
        input: input.to_string(),
    }
}
