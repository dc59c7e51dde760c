// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Command-line configuration for gitfz
//!
//! The same `Config` is parsed twice per picker session: once from the real
//! argv, and again inside every preview/execute callback from the argv the
//! driver passed through the environment.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gitfz_picker::picker::DEFAULT_PREVIEW_WINDOW;
use gitfz_picker::{Mode, PickerOptions};

/// Browse git history with fzf
#[derive(Parser, Debug, Clone)]
#[command(name = "gitfz")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Tool to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with printed selections.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long, global = true, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Picker binary to run
    #[arg(long, global = true, env = "GITFZ_FZF", default_value = "fzf")]
    pub fzf: OsString,

    /// fzf `--preview-window` layout
    #[arg(long, global = true, env = "GITFZ_PREVIEW_WINDOW", default_value = DEFAULT_PREVIEW_WINDOW)]
    pub preview_window: String,
}

/// Context lines shown in diffs
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unified {
    /// Number of context lines in diffs
    #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
    pub unified: i32,
}

/// How search terms are matched
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Search {
    /// Treat search terms as Perl-compatible regular expressions
    #[arg(short, long, default_value = "false")]
    pub regex: bool,

    /// Search terms (all must match)
    #[arg(required = true)]
    pub terms: Vec<String>,
}

/// Available tools
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick commits, optionally only those touching PATHS
    LsCommits {
        #[command(flatten)]
        unified: Unified,

        /// Limit to commits touching these paths
        paths: Vec<PathBuf>,
    },

    /// Pick commits across all refs whose message matches
    Dig {
        #[command(flatten)]
        unified: Unified,

        #[command(flatten)]
        search: Search,
    },

    /// Pick commits whose diff adds or removes a match
    Pickaxe {
        #[command(flatten)]
        unified: Unified,

        #[command(flatten)]
        search: Search,
    },

    /// Pick files changed between two revisions
    ///
    /// Without RHS the working tree is compared against LHS.
    Diff {
        #[command(flatten)]
        unified: Unified,

        /// Older revision
        lhs: String,

        /// Further revisions, passed to `git diff` as given
        rhs: Vec<String>,

        /// Only list these paths (after `--`)
        #[arg(last = true)]
        paths: Vec<PathBuf>,
    },

    /// Pick files touched by one commit
    ShowCommit {
        /// Commit to inspect
        commit: String,
    },

    /// Pick tracked files and preview their blame
    Blame,

    /// Pick deleted files and restore them into a scratch directory
    LsDead,

    /// Pick reflog entries
    Reflog {
        /// Preview the diff of PATH against the previous entry
        #[arg(short, long, default_value = "false", requires = "path")]
        diff: bool,

        #[command(flatten)]
        unified: Unified,

        /// Preview this file instead of the whole commit
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Treat search terms as Perl-compatible regular expressions
        #[arg(short, long, default_value = "false")]
        regex: bool,

        /// Only entries whose reflog message matches
        search: Vec<String>,
    },

    /// Step through the history of one file
    ///
    /// A negative --unified previews the whole file instead of the diff.
    TimeMachine {
        #[command(flatten)]
        unified: Unified,

        /// File to follow
        path: PathBuf,
    },
}

impl Command {
    /// Subcommand name as typed on the command line
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LsCommits { .. } => "ls-commits",
            Self::Dig { .. } => "dig",
            Self::Pickaxe { .. } => "pickaxe",
            Self::Diff { .. } => "diff",
            Self::ShowCommit { .. } => "show-commit",
            Self::Blame => "blame",
            Self::LsDead => "ls-dead",
            Self::Reflog { .. } => "reflog",
            Self::TimeMachine { .. } => "time-machine",
        }
    }
}

impl Config {
    /// Picker settings from the global flags
    #[must_use]
    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions::default()
            .with_program(self.fzf.clone())
            .with_preview_window(self.preview_window.clone())
    }

    /// Log level for a run in `mode`
    ///
    /// Callbacks render into the preview pane, so they stay at WARN unless
    /// --verbose asks otherwise.
    #[must_use]
    pub fn log_level(&self, mode: Mode) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet || mode.is_callback() {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(args).expect("parse should succeed")
    }

    #[test]
    fn test_log_level_default() {
        let config = parse(&["gitfz", "blame"]);
        assert_eq!(config.log_level(Mode::Normal), tracing::Level::INFO);
        assert_eq!(config.log_level(Mode::Preview), tracing::Level::WARN);
    }

    #[test]
    fn test_log_level_verbose_wins_in_callbacks() {
        let config = parse(&["gitfz", "-v", "blame"]);
        assert_eq!(config.log_level(Mode::Execute), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = parse(&["gitfz", "blame", "--quiet"]);
        assert_eq!(config.log_level(Mode::Normal), tracing::Level::WARN);
    }

    #[test]
    fn test_picker_options() {
        let config = parse(&[
            "gitfz",
            "--fzf",
            "/opt/bin/sk",
            "--preview-window",
            "down:40%",
            "ls-dead",
        ]);
        let options = config.picker_options();
        assert_eq!(options.program, OsString::from("/opt/bin/sk"));
        assert_eq!(options.preview_window, "down:40%");
        assert!(options.multi);
    }

    #[test]
    fn test_command_names_match_subcommands() {
        use clap::CommandFactory;
        let cli = Config::command();
        for args in [
            &["gitfz", "ls-commits"][..],
            &["gitfz", "dig", "x"],
            &["gitfz", "pickaxe", "x"],
            &["gitfz", "diff", "HEAD"],
            &["gitfz", "show-commit", "HEAD"],
            &["gitfz", "blame"],
            &["gitfz", "ls-dead"],
            &["gitfz", "reflog"],
            &["gitfz", "time-machine", "README.md"],
        ] {
            let name = parse(args).command.name();
            assert_eq!(name, args[1]);
            assert!(cli.find_subcommand(name).is_some(), "{name}");
        }
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
