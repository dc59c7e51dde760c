// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! gitfz-git: git plumbing for gitfz
//!
//! This library crate runs `git` for the picker tools, parses its
//! NUL-delimited listings and renders commits, files and diffs into the
//! preview pane.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitfz_git::{GitContext, parse, pretty};
//!
//! # async fn demo() -> Result<(), gitfz_git::GitError> {
//! let ctx = GitContext::current()?;
//! let out = ctx.git().args(["ls-files", "-z"]).run().await?;
//! let records = parse::listing(&out.stdout);
//! println!("{} tracked files", records.len());
//!
//! pretty::pretty_commit(&ctx, 3, "HEAD").await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod parse;
pub mod pretty;

pub use context::GitContext;
pub use error::GitError;
pub use parse::{DeadFile, NameStatus, ReflogRef};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::context::GitContext;
    pub use crate::error::GitError;
    pub use crate::parse::{DeadFile, NameStatus, ReflogRef, first_token, listing};
    pub use crate::pretty::{pretty_commit, pretty_diff, pretty_file, print_argv};
}
