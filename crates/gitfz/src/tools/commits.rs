// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Commit pickers: `ls-commits`, `dig` and `pickaxe`

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use gitfz_git::parse::listing;
use gitfz_git::pretty::{pretty_commit, print_argv};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};
use tracing::debug;

use super::{COMMIT_FORMAT, leading_tokens, match_mode};
use crate::config::Search;

/// Which commits to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitQuery {
    /// Commits on HEAD touching any of the paths (all when empty)
    Paths(Vec<PathBuf>),
    /// Commits on any ref whose message matches every term
    Message(Search),
    /// Commits whose diff changes the number of matches of the search
    Content(Search),
}

impl CommitQuery {
    /// Arguments for `git log` after the pretty format
    fn log_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        match self {
            Self::Paths(paths) => {
                args.push("--".into());
                args.extend(paths.iter().map(|p| p.clone().into_os_string()));
            }
            Self::Message(search) => {
                args.push("--all".into());
                args.push("--relative".into());
                args.push(match_mode(search).into());
                for term in &search.terms {
                    args.push("--grep".into());
                    args.push(term.into());
                }
            }
            Self::Content(search) => {
                // git keeps only the last -S/-G, so the terms form one needle
                let flag = if search.regex { "-G" } else { "-S" };
                args.push(flag.into());
                args.push(search.terms.join(" ").into());
            }
        }
        args
    }
}

/// Pick commits, preview them, print their SHAs
#[derive(Debug)]
pub struct CommitLog {
    ctx: GitContext,
    unified: i32,
    query: CommitQuery,
}

impl CommitLog {
    /// A commit picker over `query`
    #[must_use]
    pub fn new(ctx: GitContext, unified: i32, query: CommitQuery) -> Self {
        Self {
            ctx,
            unified,
            query,
        }
    }
}

#[async_trait]
impl Tool for CommitLog {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        debug!(query = ?self.query, "listing commits");
        let out = self
            .ctx
            .git()
            .args(["log", "--color", COMMIT_FORMAT])
            .args(self.query.log_args())
            .run()
            .await?;
        Ok(listing(&out.stdout))
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(sha) = leading_tokens(&selection[..1]).into_iter().next() else {
            return Ok(());
        };
        pretty_commit(&self.ctx, self.unified, &sha).await
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let shas = leading_tokens(selection);
        if shas.is_empty() {
            return Ok(());
        }
        print_argv(&shas, true)
    }
}
