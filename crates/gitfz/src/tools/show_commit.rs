// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `show-commit`: files touched by one commit

use async_trait::async_trait;
use gitfz_git::parse::listing;
use gitfz_git::pretty::{pretty_diff, print_argv};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};

use super::field_paths;

/// Pick files of `commit`, preview their change, print their paths
#[derive(Debug)]
pub struct ShowCommit {
    ctx: GitContext,
    commit: String,
}

impl ShowCommit {
    #[must_use]
    pub fn new(ctx: GitContext, commit: String) -> Self {
        Self { ctx, commit }
    }
}

#[async_trait]
impl Tool for ShowCommit {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self
            .ctx
            .git()
            .args(["show", "--name-only", "--relative", "--pretty=format:", "-z"])
            .arg(&self.commit)
            .arg("--")
            .run()
            .await?;
        Ok(listing(&out.stdout))
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(path) = field_paths(&selection[..1], 0).into_iter().next() else {
            return Ok(());
        };
        let out = self
            .ctx
            .git()
            .args(["show", "--relative"])
            .arg(&self.commit)
            .arg("--")
            .arg(&path)
            .run()
            .await?;
        pretty_diff(&out.stdout, Some(&path)).await
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let paths = field_paths(selection, 0);
        if paths.is_empty() {
            return Ok(());
        }
        print_argv(&paths, true)
    }
}
