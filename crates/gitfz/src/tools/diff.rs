// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `diff`: files changed between two revisions

use std::path::PathBuf;

use async_trait::async_trait;
use gitfz_git::parse::parse_name_status;
use gitfz_git::pretty::{pretty_diff, print_argv};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};

use super::field_paths;

/// Pick changed files, preview their diff, print their paths
#[derive(Debug)]
pub struct Diff {
    ctx: GitContext,
    unified: i32,
    lhs: String,
    rhs: Vec<String>,
    paths: Vec<PathBuf>,
}

impl Diff {
    /// Compare `lhs` with `rhs`, or with the working tree when `rhs` is
    /// empty, limited to `paths` when given
    #[must_use]
    pub fn new(
        ctx: GitContext,
        unified: i32,
        lhs: String,
        rhs: Vec<String>,
        paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            ctx,
            unified,
            lhs,
            rhs,
            paths,
        }
    }

    fn revisions(&self) -> Vec<&str> {
        std::iter::once(self.lhs.as_str())
            .chain(self.rhs.iter().map(String::as_str))
            .collect()
    }
}

#[async_trait]
impl Tool for Diff {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self
            .ctx
            .git()
            .args(["diff", "--relative", "--name-status", "-z"])
            .args(self.revisions())
            .arg("--")
            .args(&self.paths)
            .run()
            .await?;

        let records = parse_name_status(&out.stdout)?
            .into_iter()
            .map(|entry| {
                let mut status = entry.status.to_string();
                if let Some(score) = entry.score {
                    status.push_str(&score.to_string());
                }
                Record::new([status.into_bytes(), entry.path])
            })
            .collect();
        Ok(records)
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(path) = field_paths(&selection[..1], 1).into_iter().next() else {
            return Ok(());
        };
        let out = self
            .ctx
            .git()
            .args(["diff", "--relative"])
            .arg(format!("--unified={}", self.unified.max(0)))
            .args(self.revisions())
            .arg("--")
            .arg(&path)
            .run()
            .await?;
        pretty_diff(&out.stdout, Some(&path)).await
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let paths = field_paths(selection, 1);
        if paths.is_empty() {
            return Ok(());
        }
        print_argv(&paths, true)
    }
}
