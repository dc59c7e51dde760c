// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `reflog`: walk reflog entries
//!
//! Lines start with the reflog selector (`HEAD@{n}`). Confirming a line
//! prints the selector of the entry before it, which is what `git reset`
//! wants to undo that step.

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use gitfz_git::parse::{ReflogRef, listing};
use gitfz_git::pretty::{pretty_commit, pretty_diff, pretty_file, print_argv};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};
use tracing::warn;

use super::{leading_tokens, match_mode};
use crate::config::Search;

const REFLOG_FORMAT: &str = "--pretty=format:%x00%Cgreen%gD%Creset %Cblue%ad%Creset %s";

/// What the preview pane shows for an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogPreview {
    /// Diff `path` against the previous entry instead of showing it
    pub diff: bool,
    /// Context lines in diffs
    pub unified: i32,
    /// Show only this file
    pub path: Option<PathBuf>,
}

/// Pick reflog entries
#[derive(Debug)]
pub struct Reflog {
    ctx: GitContext,
    preview: ReflogPreview,
    search: Search,
}

impl Reflog {
    #[must_use]
    pub fn new(ctx: GitContext, preview: ReflogPreview, search: Search) -> Self {
        Self {
            ctx,
            preview,
            search,
        }
    }

    fn log_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "log".into(),
            "--walk-reflogs".into(),
            "--color".into(),
            "--remove-empty".into(),
            REFLOG_FORMAT.into(),
            match_mode(&self.search).into(),
        ];
        for term in &self.search.terms {
            args.push("--grep-reflog".into());
            args.push(term.into());
        }
        args.push("--".into());
        args.extend(self.preview.path.iter().map(|p| p.clone().into_os_string()));
        args
    }
}

#[async_trait]
impl Tool for Reflog {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self.ctx.git().args(self.log_args()).run().await?;
        Ok(listing(&out.stdout))
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(selector) = leading_tokens(&selection[..1]).into_iter().next() else {
            return Ok(());
        };
        let entry = ReflogRef::parse(&selector)?;

        match (&self.preview.path, self.preview.diff) {
            (Some(path), true) => {
                let out = self
                    .ctx
                    .git()
                    .arg("diff")
                    .arg(format!("--unified={}", self.preview.unified.max(0)))
                    .arg(entry.to_string())
                    .arg(entry.older().to_string())
                    .arg("--")
                    .arg(path)
                    .run()
                    .await?;
                pretty_diff(&out.stdout, Some(path)).await
            }
            (Some(path), false) => pretty_file(&self.ctx, &entry.to_string(), path).await,
            (None, _) => pretty_commit(&self.ctx, self.preview.unified, &entry.to_string()).await,
        }
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let mut previous = Vec::new();
        for selector in leading_tokens(selection) {
            match ReflogRef::parse(&selector) {
                Ok(entry) => previous.push(entry.older().to_string()),
                Err(err) => warn!(%err, "skipping selection line"),
            }
        }
        if previous.is_empty() {
            return Ok(());
        }
        print_argv(&previous, true)
    }
}
