// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Picker tools, one per subcommand
//!
//! Each tool only knows how to list its records, render the highlighted one
//! and act on the confirmed selection; the session machinery lives in
//! `gitfz_picker::session`.

mod blame;
mod commits;
mod dead;
mod diff;
mod reflog;
mod show_commit;
mod time_machine;

use std::path::PathBuf;

use gitfz_git::parse::first_token;
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};
use tracing::warn;

use crate::config::{Command, Search};

pub use blame::Blame;
pub use commits::{CommitLog, CommitQuery};
pub use dead::LsDead;
pub use diff::Diff;
pub use reflog::{Reflog, ReflogPreview};
pub use show_commit::ShowCommit;
pub use time_machine::TimeMachine;

/// A tool whose handlers fail with [`GitError`]
pub type GitTool = Box<dyn Tool<Error = GitError>>;

/// Commit listing shared by the log-based tools
///
/// The leading NUL separates entries; the first token is the abbreviated SHA
/// (or reflog selector for `reflog`).
pub(crate) const COMMIT_FORMAT: &str = "--pretty=format:%x00%Cgreen%h%Creset %Cblue%ad%Creset %s";

/// Build the tool for `command`
#[must_use]
pub fn build(command: &Command, ctx: GitContext) -> GitTool {
    match command.clone() {
        Command::LsCommits { unified, paths } => Box::new(CommitLog::new(
            ctx,
            unified.unified,
            CommitQuery::Paths(paths),
        )),
        Command::Dig { unified, search } => Box::new(CommitLog::new(
            ctx,
            unified.unified,
            CommitQuery::Message(search),
        )),
        Command::Pickaxe { unified, search } => Box::new(CommitLog::new(
            ctx,
            unified.unified,
            CommitQuery::Content(search),
        )),
        Command::Diff {
            unified,
            lhs,
            rhs,
            paths,
        } => Box::new(Diff::new(ctx, unified.unified, lhs, rhs, paths)),
        Command::ShowCommit { commit } => Box::new(ShowCommit::new(ctx, commit)),
        Command::Blame => Box::new(Blame::new(ctx)),
        Command::LsDead => Box::new(LsDead::new(ctx)),
        Command::Reflog {
            diff,
            unified,
            path,
            regex,
            search,
        } => Box::new(Reflog::new(
            ctx,
            ReflogPreview {
                diff,
                unified: unified.unified,
                path,
            },
            Search {
                regex,
                terms: search,
            },
        )),
        Command::TimeMachine { unified, path } => {
            Box::new(TimeMachine::new(ctx, unified.unified, path))
        }
    }
}

/// First token of field 0 of every record, skipping blank lines
pub(crate) fn leading_tokens(selection: &[Record]) -> Vec<String> {
    selection
        .iter()
        .filter_map(|record| {
            let token = record.field_str(0).and_then(|line| first_token(&line));
            if token.is_none() {
                warn!(?record, "skipping blank selection line");
            }
            token
        })
        .collect()
}

/// Field `index` of every record as a path
pub(crate) fn field_paths(selection: &[Record], index: usize) -> Vec<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    selection
        .iter()
        .filter_map(|record| record.field(index))
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
        .collect()
}

/// `git log` matching flags for `search`
pub(crate) fn match_mode(search: &Search) -> &'static str {
    if search.regex {
        "--perl-regexp"
    } else {
        "--fixed-strings"
    }
}
