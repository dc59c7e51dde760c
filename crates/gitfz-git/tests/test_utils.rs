// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Test utilities: scratch git repositories built with the git CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// A temporary git repository for testing
///
/// Commands run with a fixed identity and signing disabled so the user's
/// global git configuration does not leak in.
pub struct TestGitRepo {
    dir: TempDir,
}

impl TestGitRepo {
    /// Create and initialize a new repository
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("gitfz-test-")
            .tempdir()
            .expect("Failed to create temp test directory");
        let repo = Self { dir };
        repo.git(&["init", "--quiet", "--initial-branch=main"]);
        repo
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and stage it
    pub fn create_file(&self, relative_path: &str, content: &str) -> &Self {
        let file_path = self.path().join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        self.git(&["add", relative_path]);
        self
    }

    /// Remove a tracked file
    pub fn remove_file(&self, relative_path: &str) -> &Self {
        self.git(&["rm", "--quiet", relative_path]);
        self
    }

    /// Create a commit with the given message, returning its SHA
    pub fn commit(&self, message: &str) -> String {
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message]);
        self.head_sha()
    }

    /// Create a file and commit it in one step
    pub fn create_and_commit(&self, relative_path: &str, content: &str, message: &str) -> String {
        self.create_file(relative_path, content);
        self.commit(message)
    }

    /// Get the SHA of HEAD
    pub fn head_sha(&self) -> String {
        String::from_utf8_lossy(&self.git(&["rev-parse", "HEAD"]))
            .trim()
            .to_string()
    }

    /// Run git in the repository, returning stdout
    pub fn git(&self, args: &[&str]) -> Vec<u8> {
        let output = Command::new("git")
            .current_dir(self.path())
            .args([
                "-c",
                "user.email=test@example.com",
                "-c",
                "user.name=Test Author",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .expect("Failed to run git command");

        if !output.status.success() {
            panic!(
                "Git command failed: git {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        output.stdout
    }
}
