// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Command-line parsing tests

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use gitfz::config::{Command, Config, Search, Unified};
use gitfz_picker::picker::DEFAULT_PREVIEW_WINDOW;
use similar_asserts::assert_eq;

fn parse(args: &[&str]) -> Config {
    Config::try_parse_from(args).expect("parse should succeed")
}

fn unified(n: i32) -> Unified {
    Unified { unified: n }
}

fn search(regex: bool, terms: &[&str]) -> Search {
    Search {
        regex,
        terms: terms.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn test_ls_commits_defaults() {
    let config = parse(&["gitfz", "ls-commits"]);
    assert_eq!(
        config.command,
        Command::LsCommits {
            unified: unified(3),
            paths: Vec::new(),
        }
    );
    assert!(!config.verbose);
    assert!(!config.quiet);
}

#[test]
fn test_ls_commits_with_paths() {
    let config = parse(&["gitfz", "ls-commits", "-u", "10", "src", "Cargo.toml"]);
    assert_eq!(
        config.command,
        Command::LsCommits {
            unified: unified(10),
            paths: vec![PathBuf::from("src"), PathBuf::from("Cargo.toml")],
        }
    );
}

#[test]
fn test_dig_and_pickaxe() {
    let config = parse(&["gitfz", "dig", "-r", "^fix", "parser"]);
    assert_eq!(
        config.command,
        Command::Dig {
            unified: unified(3),
            search: search(true, &["^fix", "parser"]),
        }
    );

    let config = parse(&["gitfz", "pickaxe", "--unified", "0", "unwrap"]);
    assert_eq!(
        config.command,
        Command::Pickaxe {
            unified: unified(0),
            search: search(false, &["unwrap"]),
        }
    );
}

#[test]
fn test_search_terms_required() {
    assert!(Config::try_parse_from(["gitfz", "dig"]).is_err());
    assert!(Config::try_parse_from(["gitfz", "pickaxe", "-r"]).is_err());
}

#[test]
fn test_diff() {
    let config = parse(&["gitfz", "diff", "main"]);
    assert_eq!(
        config.command,
        Command::Diff {
            unified: unified(3),
            lhs: "main".to_string(),
            rhs: vec![],
            paths: vec![],
        }
    );

    let config = parse(&["gitfz", "diff", "-u", "1", "v1.0", "HEAD"]);
    assert_eq!(
        config.command,
        Command::Diff {
            unified: unified(1),
            lhs: "v1.0".to_string(),
            rhs: vec!["HEAD".to_string()],
            paths: vec![],
        }
    );
}

#[test]
fn test_diff_passes_every_revision_and_pathspec() {
    let config = parse(&["gitfz", "diff", "A", "B", "C", "--", "src", "docs/x.md"]);
    assert_eq!(
        config.command,
        Command::Diff {
            unified: unified(3),
            lhs: "A".to_string(),
            rhs: vec!["B".to_string(), "C".to_string()],
            paths: vec![PathBuf::from("src"), PathBuf::from("docs/x.md")],
        }
    );

    let config = parse(&["gitfz", "diff", "HEAD~3", "--", "README.md"]);
    assert_eq!(
        config.command,
        Command::Diff {
            unified: unified(3),
            lhs: "HEAD~3".to_string(),
            rhs: vec![],
            paths: vec![PathBuf::from("README.md")],
        }
    );
}

#[test]
fn test_show_commit_blame_ls_dead() {
    assert_eq!(
        parse(&["gitfz", "show-commit", "HEAD~1"]).command,
        Command::ShowCommit {
            commit: "HEAD~1".to_string()
        }
    );
    assert_eq!(parse(&["gitfz", "blame"]).command, Command::Blame);
    assert_eq!(parse(&["gitfz", "ls-dead"]).command, Command::LsDead);
    assert!(Config::try_parse_from(["gitfz", "show-commit"]).is_err());
}

#[test]
fn test_reflog() {
    assert_eq!(
        parse(&["gitfz", "reflog"]).command,
        Command::Reflog {
            diff: false,
            unified: unified(3),
            path: None,
            regex: false,
            search: Vec::new(),
        }
    );

    assert_eq!(
        parse(&["gitfz", "reflog", "-d", "-p", "src/lib.rs", "-r", "checkout"]).command,
        Command::Reflog {
            diff: true,
            unified: unified(3),
            path: Some(PathBuf::from("src/lib.rs")),
            regex: true,
            search: vec!["checkout".to_string()],
        }
    );
}

#[test]
fn test_reflog_diff_requires_path() {
    assert!(Config::try_parse_from(["gitfz", "reflog", "--diff"]).is_err());
}

#[test]
fn test_time_machine_negative_unified() {
    assert_eq!(
        parse(&["gitfz", "time-machine", "-u", "-1", "README.md"]).command,
        Command::TimeMachine {
            unified: unified(-1),
            path: PathBuf::from("README.md"),
        }
    );
    assert!(Config::try_parse_from(["gitfz", "time-machine"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let config = parse(&[
        "gitfz",
        "blame",
        "--verbose",
        "--fzf",
        "sk",
        "--preview-window",
        "up:50%",
    ]);
    assert!(config.verbose);
    assert_eq!(config.fzf, OsString::from("sk"));
    assert_eq!(config.preview_window, "up:50%");
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    assert!(Config::try_parse_from(["gitfz", "-v", "-q", "blame"]).is_err());
}

#[test]
fn test_picker_defaults() {
    // Only meaningful when the environment does not override them
    if std::env::var_os("GITFZ_FZF").is_some() || std::env::var_os("GITFZ_PREVIEW_WINDOW").is_some()
    {
        return;
    }
    let config = parse(&["gitfz", "blame"]);
    assert_eq!(config.fzf, OsString::from("fzf"));
    assert_eq!(config.preview_window, DEFAULT_PREVIEW_WINDOW);
}

#[test]
fn test_unknown_subcommand() {
    assert!(Config::try_parse_from(["gitfz", "frobnicate"]).is_err());
    assert!(Config::try_parse_from(["gitfz"]).is_err());
}
