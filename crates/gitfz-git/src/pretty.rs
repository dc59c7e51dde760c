// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Rendering into the preview pane
//!
//! Every helper writes to stdout, either directly or by handing the terminal
//! to an external pager. Optional tools (`bat`, `delta`, `$GIT_PAGER`) are
//! looked up per call and skipped when missing.

use std::ffi::OsStr;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use gitfz_picker::Call;
use tracing::debug;

use crate::context::GitContext;
use crate::error::GitError;

const DEFAULT_WIDTH: usize = 80;

/// Horizontal rule as wide as the preview pane
#[must_use]
pub fn hr() -> String {
    "─".repeat(terminal_width())
}

/// Width of the pane, from fzf's preview size or `$COLUMNS`
fn terminal_width() -> usize {
    ["FZF_PREVIEW_COLUMNS", "COLUMNS"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|value| value.trim().parse::<usize>().ok().filter(|w| *w > 0))
        .unwrap_or(DEFAULT_WIDTH)
}

/// Multi-part extension of `path`, e.g. `.tar.gz`
fn suffix_of(path: &Path) -> String {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return String::new();
    };
    let stem = name.trim_start_matches('.');
    stem.find('.')
        .map(|i| stem[i..].to_string())
        .unwrap_or_default()
}

/// Write raw bytes to stdout and flush
///
/// # Errors
///
/// Returns `GitError::Io`; a closed pipe surfaces as `BrokenPipe`.
pub fn write_stdout(bytes: &[u8]) -> Result<(), GitError> {
    let mut out = std::io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

/// Print `args` as one line, shell-quoted when `escape` is set
///
/// Arguments are written byte for byte, so paths that are not UTF-8 still
/// name the real file.
///
/// # Errors
///
/// Returns `GitError::Io` on write failure and `GitError::Parse` for an
/// argument that cannot be quoted (one containing NUL).
pub fn print_argv<S: AsRef<OsStr>>(args: &[S], escape: bool) -> Result<(), GitError> {
    write_stdout(&argv_line(args, escape)?)
}

fn argv_line<S: AsRef<OsStr>>(args: &[S], escape: bool) -> Result<Vec<u8>, GitError> {
    let mut line = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref().as_bytes();
        if i > 0 {
            line.push(b' ');
        }
        if escape {
            let quoted = shlex::bytes::try_quote(arg).map_err(|_| GitError::Parse {
                what: "argument",
                input: String::from_utf8_lossy(arg).into_owned(),
            })?;
            line.extend_from_slice(&quoted);
        } else {
            line.extend_from_slice(arg);
        }
    }
    line.push(b'\n');
    Ok(line)
}

/// Show file content, highlighted by `bat` when available
///
/// `path` only picks the syntax; the content comes from `content`.
///
/// # Errors
///
/// Fails when the temp file cannot be written or `bat` fails.
pub async fn pprn(content: &[u8], path: Option<&Path>) -> Result<(), GitError> {
    let Some(path) = path else {
        return write_stdout(content);
    };
    let Ok(bat) = which::which("bat") else {
        debug!("bat not found, printing plain content");
        return write_stdout(content);
    };

    let mut file = tempfile::Builder::new()
        .prefix("gitfz-")
        .suffix(&suffix_of(path))
        .tempfile()?;
    file.write_all(content)?;
    file.flush()?;

    Call::new(bat)
        .arg("--color=always")
        .arg("--")
        .arg(file.path())
        .passthrough()
        .run()
        .await?;
    Ok(())
}

/// Page a diff through `$GIT_PAGER`, then `delta`, then plain output
///
/// # Errors
///
/// Fails when the chosen pager fails.
pub async fn pretty_diff(diff: &[u8], path: Option<&Path>) -> Result<(), GitError> {
    let pager = std::env::var("GIT_PAGER")
        .ok()
        .and_then(|value| shlex::split(&value))
        .filter(|argv| !argv.is_empty());

    if let Some(argv) = pager {
        debug!(pager = ?argv, "paging diff through GIT_PAGER");
        Call::new(&argv[0])
            .args(&argv[1..])
            .stdin_bytes(diff)
            .passthrough()
            .run()
            .await?;
    } else if let Ok(delta) = which::which("delta") {
        Call::new(delta)
            .stdin_bytes(diff)
            .passthrough()
            .run()
            .await?;
    } else {
        pprn(diff, path).await?;
    }
    Ok(())
}

/// Show `path` as of `rev`
///
/// `path` is relative to the context's working directory.
///
/// # Errors
///
/// Fails when the path is outside the repository or `git show` fails.
pub async fn pretty_file(ctx: &GitContext, rev: &str, path: &Path) -> Result<(), GitError> {
    let content = show_blob(ctx, rev, path).await?;
    pprn(&content, Some(path)).await
}

/// Content of `path` (relative to the working directory) at `rev`
///
/// # Errors
///
/// Fails when the path is outside the repository or `git show` fails.
pub async fn show_blob(ctx: &GitContext, rev: &str, path: &Path) -> Result<Vec<u8>, GitError> {
    let rel = ctx.relative_to_root(path).await?;
    let mut spec = format!("{rev}:").into_bytes();
    spec.extend_from_slice(rel.as_os_str().as_bytes());

    let out = ctx
        .git()
        .arg("show")
        .arg(OsStr::from_bytes(&spec))
        .run()
        .await?;
    Ok(out.stdout)
}

/// Commit header with changed files, a rule, then the diff
///
/// The header and the diff are produced concurrently.
///
/// # Errors
///
/// Fails when either git command fails or stdout is closed.
pub async fn pretty_commit(ctx: &GitContext, unified: i32, rev: &str) -> Result<(), GitError> {
    let header = ctx
        .git()
        .args(["log", "--max-count=1", "--color", "--name-status", "--relative", rev])
        .passthrough()
        .run();
    let diff = ctx
        .git()
        .args(["show", "--submodule", "--relative", "--pretty=format:"])
        .arg(format!("--unified={}", unified.max(0)))
        .arg(rev)
        .run();

    let (_, diff) = tokio::try_join!(header, diff)?;

    write_stdout(format!("\n{}\n", hr()).as_bytes())?;
    pretty_diff(&diff.stdout, None).await
}
