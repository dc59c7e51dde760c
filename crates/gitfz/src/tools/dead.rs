// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! `ls-dead`: deleted files, restorable into a scratch directory

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use gitfz_git::parse::parse_dead_files;
use gitfz_git::pretty::{pretty_file, print_argv, show_blob};
use gitfz_git::{GitContext, GitError};
use gitfz_picker::{Record, Tool};
use tracing::{info, warn};

/// Pick deleted files, preview their last content, restore them
///
/// Records have three fields: the parent of the deleting commit, its date
/// and the path.
#[derive(Debug)]
pub struct LsDead {
    ctx: GitContext,
}

impl LsDead {
    #[must_use]
    pub fn new(ctx: GitContext) -> Self {
        Self { ctx }
    }
}

/// Revision and path of a selected record
fn rev_and_path(record: &Record) -> Option<(String, PathBuf)> {
    let rev = record.field_str(0)?.trim().to_string();
    let path = PathBuf::from(record.field_os(2)?);
    if rev.is_empty() || path.as_os_str().is_empty() {
        return None;
    }
    Some((rev, path))
}

/// Whether `path` stays inside the directory it is joined onto
fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[async_trait]
impl Tool for LsDead {
    type Error = GitError;

    async fn fetch(&self) -> Result<Vec<Record>, GitError> {
        let out = self
            .ctx
            .git()
            .args([
                "log",
                "-z",
                "--diff-filter=D",
                "--name-only",
                "--relative",
                "--color",
                "--pretty=format:%x00%Cgreen%h%Creset %Cblue%ad%Creset",
            ])
            .run()
            .await?;
        Ok(parse_dead_files(&out.stdout)
            .iter()
            .map(|dead| dead.to_record())
            .collect())
    }

    async fn preview(&self, selection: &[Record]) -> Result<(), GitError> {
        let Some((rev, path)) = rev_and_path(&selection[0]) else {
            warn!(record = ?selection[0], "not a deleted-file record");
            return Ok(());
        };
        pretty_file(&self.ctx, &rev, &path).await
    }

    async fn execute(&self, selection: &[Record]) -> Result<(), GitError> {
        let dir = tempfile::Builder::new()
            .prefix("gitfz-dead-")
            .tempdir()?
            .keep();

        for record in selection {
            let Some((rev, path)) = rev_and_path(record) else {
                warn!(?record, "skipping malformed selection line");
                continue;
            };
            if !is_contained(&path) {
                warn!(path = %path.display(), "skipping path outside the restore directory");
                continue;
            }

            let content = show_blob(&self.ctx, &rev, &path).await?;
            let target = dir.join(&path);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&target, content).await?;
            info!(%rev, path = %path.display(), "restored");
        }

        print_argv(&[OsStr::new("cd"), dir.as_os_str()], true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_rev_and_path() {
        let record = Record::new(["abc1234~", "3 weeks ago", "src/old.rs"]);
        assert_eq!(
            rev_and_path(&record),
            Some(("abc1234~".to_string(), PathBuf::from("src/old.rs")))
        );
        assert_eq!(rev_and_path(&Record::single("abc1234~")), None);
        assert_eq!(rev_and_path(&Record::new(["", "", "x"])), None);
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(Path::new("src/old.rs")));
        assert!(!is_contained(Path::new("../escape")));
        assert!(!is_contained(Path::new("/etc/passwd")));
        assert!(!is_contained(Path::new("a/../../b")));
    }
}
