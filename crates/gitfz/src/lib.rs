// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! gitfz library
//!
//! This module exports the tools and configuration of the `gitfz` binary for
//! use in integration tests and as a library.

pub mod config;
pub mod exit;
pub mod tools;

use anyhow::Context;
use gitfz_git::GitContext;
use gitfz_picker::{Invocation, Outcome, session};
use tracing::debug;

use crate::config::Config;

/// Run the tool selected by `config` for one classified invocation
///
/// # Errors
///
/// Returns the tool's error with the subcommand as context.
pub async fn run(config: &Config, invocation: &Invocation) -> anyhow::Result<Outcome> {
    let ctx = GitContext::current().context("resolving the working directory")?;
    let tool = tools::build(&config.command, ctx);
    debug!(mode = ?invocation.mode(), command = ?config.command, "dispatching");

    let outcome = session::run(tool.as_ref(), invocation, &config.picker_options())
        .await
        .with_context(|| format!("{} failed", config.command.name()))?;
    Ok(outcome)
}
