// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Fixtures for running the `gitfz` binary: scratch repositories and
//! scripted pickers

#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs::Permissions;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Confirms line `@PICK@` (1-based) and exits with the enter binding's status
const FAKE_FZF: &str = r#"#!/bin/sh
pick=@PICK@
bind=""
for arg in "$@"; do
  case "$arg" in
    --bind=enter:become\(*\)) bind="$arg" ;;
  esac
done
tmp=$(mktemp)
tr '\n\000' '\036\n' | sed -n "${pick}p" | tr -d '\n' | tr '\036' '\n' > "$tmp"
printf '\000' >> "$tmp"
cmd=${bind#"--bind=enter:become("}
cmd=${cmd%")"}
cmd=$(printf '%s' "$cmd" | sed "s|{+f}|$tmp|")
"$SHELL" -c "$cmd"
status=$?
rm -f "$tmp"
exit $status
"#;

/// Confirms the records stored in `@PAYLOAD@`, whatever it was fed
const REPLAY_FZF: &str = r#"#!/bin/sh
bind=""
for arg in "$@"; do
  case "$arg" in
    --bind=enter:become\(*\)) bind="$arg" ;;
  esac
done
cat >/dev/null
cmd=${bind#"--bind=enter:become("}
cmd=${cmd%")"}
cmd=$(printf '%s' "$cmd" | sed "s|{+f}|@PAYLOAD@|")
exec "$SHELL" -c "$cmd"
"#;

/// Aborts immediately, like pressing Esc
pub const CANCEL_FZF: &str = "#!/bin/sh\ncat >/dev/null\nexit 130\n";

/// Exits with fzf's error code
pub const BROKEN_FZF: &str = "#!/bin/sh\ncat >/dev/null\nexit 2\n";

/// A scratch repository plus a directory for scripts
pub struct Sandbox {
    repo: TempDir,
    bin: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let repo = tempfile::Builder::new()
            .prefix("gitfz-e2e-")
            .tempdir()
            .expect("Failed to create repo directory");
        let bin = tempfile::tempdir().expect("Failed to create script directory");
        let sandbox = Self { repo, bin };
        sandbox.git(&["init", "--quiet", "--initial-branch=main"]);
        sandbox
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Write, stage and commit `files`
    pub fn commit(&self, files: &[(&str, &str)], message: &str) -> String {
        for (name, content) in files {
            let path = self.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent");
            }
            std::fs::write(&path, content).expect("Failed to write file");
            self.git(&["add", name]);
        }
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message]);
        self.head_sha()
    }

    /// Commit one file whose name is arbitrary bytes
    pub fn commit_raw(&self, name: &[u8], content: &str, message: &str) -> String {
        std::fs::write(self.path().join(OsStr::from_bytes(name)), content)
            .expect("Failed to write file");
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
        self.head_sha()
    }

    /// Delete `name` in a new commit
    pub fn delete(&self, name: &str, message: &str) -> String {
        self.git(&["rm", "--quiet", name]);
        self.git(&["commit", "--quiet", "-m", message]);
        self.head_sha()
    }

    pub fn head_sha(&self) -> String {
        String::from_utf8_lossy(&self.git(&["rev-parse", "HEAD"]))
            .trim()
            .to_string()
    }

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
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        output.stdout
    }

    /// A picker that confirms line `pick`
    pub fn picking(&self, pick: usize) -> PathBuf {
        self.script("fzf-pick", &FAKE_FZF.replace("@PICK@", &pick.to_string()))
    }

    /// A picker that confirms the records in `payload`
    pub fn replaying(&self, payload: &Path) -> PathBuf {
        let body = REPLAY_FZF.replace("@PAYLOAD@", &payload.display().to_string());
        self.script("fzf-replay", &body)
    }

    /// Write an executable script next to the repository
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin.path().join(name);
        std::fs::write(&path, body).expect("Failed to write script");
        std::fs::set_permissions(&path, Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Write a payload file the way `fzf --print0` does
    pub fn payload(&self, lines: &[&str]) -> PathBuf {
        let path = self.bin.path().join("payload");
        let mut data = lines.join("\0");
        data.push('\0');
        std::fs::write(&path, data).expect("Failed to write payload");
        path
    }

    /// A `gitfz` command running inside the repository
    pub fn gitfz(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("gitfz").expect("gitfz binary");
        cmd.current_dir(self.path())
            .env_remove("__GITFZ_ARGV__")
            .env_remove("GITFZ_FZF")
            .env_remove("GIT_PAGER")
            .env_remove("RUST_LOG")
            .env_remove("FZF_PREVIEW_COLUMNS")
            .env("LC_ALL", "C");
        cmd
    }
}
