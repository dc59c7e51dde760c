// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `time-machine`: the history of one file

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use gitfz_git::parse::listing;
use gitfz_git::pretty::{pretty_diff, pretty_file, print_argv};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};

use super::{COMMIT_FORMAT, leading_tokens};

/// Pick commits touching `path`
///
/// The preview is the change to `path` in that commit, or the whole file at
/// that commit when `unified` is negative.
#[derive(Debug)]
pub struct TimeMachine {
    ctx: GitContext,
    unified: i32,
    path: PathBuf,
}

impl TimeMachine {
    #[must_use]
    pub fn new(ctx: GitContext, unified: i32, path: PathBuf) -> Self {
        Self { ctx, unified, path }
    }
}

#[async_trait]
impl Tool for TimeMachine {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self
            .ctx
            .git()
            .args(["log", "--relative-date", "--color", COMMIT_FORMAT, "--"])
            .arg(&self.path)
            .run()
            .await?;
        Ok(listing(&out.stdout))
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(sha) = leading_tokens(&selection[..1]).into_iter().next() else {
            return Ok(());
        };
        if self.unified < 0 {
            return pretty_file(&self.ctx, &sha, &self.path).await;
        }

        let out = self
            .ctx
            .git()
            .args(["show", "--pretty=format:"])
            .arg(format!("--unified={}", self.unified))
            .arg(&sha)
            .arg("--")
            .arg(&self.path)
            .run()
            .await?;
        pretty_diff(&out.stdout, Some(&self.path)).await
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let mut args: Vec<OsString> = leading_tokens(selection)
            .into_iter()
            .map(OsString::from)
            .collect();
        if args.is_empty() {
            return Ok(());
        }
        args.push(self.path.clone().into_os_string());
        print_argv(&args, true)
    }
}
