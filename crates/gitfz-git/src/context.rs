// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Working-tree context shared by one tool run

use std::path::{Path, PathBuf};

use git2::Repository;
use gitfz_picker::Call;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::GitError;

/// Where git commands run, plus the lazily discovered repository root
#[derive(Debug)]
pub struct GitContext {
    cwd: PathBuf,
    root: OnceCell<PathBuf>,
}

impl GitContext {
    /// Context rooted at `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            root: OnceCell::new(),
        }
    }

    /// Context for the process's current directory
    ///
    /// # Errors
    ///
    /// Returns `GitError::Io` if the current directory is unavailable.
    pub fn current() -> Result<Self, GitError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Directory git commands run in
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// A `git` invocation pinned to this directory and the C locale
    ///
    /// git's own pager is disabled; rendering goes through [`crate::pretty`].
    #[must_use]
    pub fn git(&self) -> Call {
        Call::new("git")
            .arg("--no-pager")
            .env("LC_ALL", "C")
            .current_dir(&self.cwd)
    }

    /// Top-level directory of the working tree, discovered once
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` outside a repository or in a
    /// bare one.
    pub async fn root(&self) -> Result<&Path, GitError> {
        let root = self
            .root
            .get_or_try_init(|| discover_root(self.cwd.clone()))
            .await?;
        Ok(root.as_path())
    }

    /// `path` (relative to the working directory) relative to the root
    ///
    /// # Errors
    ///
    /// Fails when the root cannot be discovered or `path` lies outside it.
    pub async fn relative_to_root(&self, path: &Path) -> Result<PathBuf, GitError> {
        let root = self.root().await?;
        let absolute = normalize(&self.cwd.canonicalize()?.join(path));
        absolute
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::InvalidReference {
                reference: path.display().to_string(),
            })
    }
}

async fn discover_root(cwd: PathBuf) -> Result<PathBuf, GitError> {
    let found = tokio::task::spawn_blocking(move || {
        let repo = Repository::discover(&cwd).map_err(|_| GitError::RepositoryNotFound {
            path: cwd.display().to_string(),
        })?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::RepositoryNotFound {
                path: cwd.display().to_string(),
            })?;
        Ok::<_, GitError>(workdir.canonicalize()?)
    })
    .await
    .map_err(std::io::Error::other)??;

    debug!(root = %found.display(), "discovered repository root");
    Ok(found)
}

/// Resolve `.` and `..` lexically; the file may not exist any more
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for part in path.components() {
        match part {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
