// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! gitfz: browse git history with fzf
//!
//! The same binary is the picker driver and the fzf callback: fzf runs it
//! through `$SHELL -c` for every preview and for the final selection.

use clap::Parser;
use gitfz::config::Config;
use gitfz::exit::{EXIT_OK, EXIT_SIGINT, exit_code_in};
use gitfz_picker::{Invocation, Outcome, PickerExit};
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let invocation = Invocation::from_env();
    let config = match Config::try_parse_from(invocation.argv()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    // Logs go to stderr; stdout carries selections and previews
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level(invocation.mode()).into()),
        )
        .init();

    if invocation.mode().is_callback() {
        debug!(
            mode = ?invocation.mode(),
            lines = invocation.selection().len(),
            "picker callback"
        );
    }

    let exit_code = run(&config, &invocation).await;
    std::process::exit(exit_code);
}

async fn run(config: &Config, invocation: &Invocation) -> i32 {
    tokio::select! {
        biased;

        _ = tokio::signal::ctrl_c() => EXIT_SIGINT,
        result = gitfz::run(config, invocation) => match result {
            Ok(outcome) => {
                match outcome {
                    Outcome::Picked(PickerExit::Cancelled) => info!("cancelled"),
                    Outcome::Picked(PickerExit::NoMatch) => info!("no match"),
                    other => debug!(?other, "done"),
                }
                EXIT_OK
            }
            Err(err) => {
                eprintln!("gitfz: {err:#}");
                exit_code_in(invocation.mode(), &err)
            }
        },
    }
}
