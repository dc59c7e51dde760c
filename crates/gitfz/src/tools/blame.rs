// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `blame`: tracked files with their blame as preview

use async_trait::async_trait;
use gitfz_git::parse::listing;
use gitfz_git::pretty::{print_argv, write_stdout};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Call, Record, Tool};
use tracing::debug;

use super::field_paths;

/// Pick tracked files, preview `git blame`, print their paths
#[derive(Debug)]
pub struct Blame {
    ctx: GitContext,
}

impl Blame {
    #[must_use]
    pub fn new(ctx: GitContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for Blame {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self.ctx.git().args(["ls-files", "-z"]).run().await?;
        Ok(listing(&out.stdout))
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some(path) = field_paths(&selection[..1], 0).into_iter().next() else {
            return Ok(());
        };
        let blame = self
            .ctx
            .git()
            .args(["blame", "-w", "--"])
            .arg(&path)
            .run()
            .await?;

        match which::which("delta") {
            Ok(delta) => {
                Call::new(delta)
                    .stdin_bytes(blame.stdout)
                    .passthrough()
                    .run()
                    .await?;
                Ok(())
            }
            Err(_) => {
                debug!("delta not found, printing plain blame");
                write_stdout(&blame.stdout)
            }
        }
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let paths = field_paths(selection, 0);
        if paths.is_empty() {
            return Ok(());
        }
        print_argv(&paths, true)
    }
}
