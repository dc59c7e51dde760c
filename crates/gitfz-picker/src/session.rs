// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! Mode dispatch
//!
//! A [`Tool`] only knows how to list its records, render one of them and act
//! on a confirmed selection. [`run`] decides which of the three applies to
//! the current process.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::codec::Record;
use crate::error::PickerError;
use crate::mode::{Invocation, Mode};
use crate::picker::{PickerExit, PickerOptions, PickerRequest};

/// A picker-driven tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Error type of the tool's handlers
    type Error: From<PickerError> + Send;

    /// Produce the records shown in the picker
    async fn fetch(&self) -> Result<Vec<Record>, Self::Error>;

    /// Render the highlighted record into the preview pane
    ///
    /// `selection` holds the highlighted line first; it is never empty.
    async fn preview(&self, selection: &[Record]) -> Result<(), Self::Error>;

    /// Act on every confirmed record; `selection` is never empty
    async fn execute(&self, selection: &[Record]) -> Result<(), Self::Error>;
}

/// What one process did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A picker session ran and ended this way
    Picked(PickerExit),
    /// The tool had nothing to show, so no picker was started
    Empty,
    /// A preview callback was handled
    Previewed,
    /// An execute callback was handled
    Executed,
    /// A callback arrived with an empty selection and was ignored
    Skipped,
}

/// Dispatch `invocation` to the matching handler of `tool`
///
/// # Errors
///
/// Propagates handler errors and picker failures converted into the tool's
/// error type.
pub async fn run<T>(
    tool: &T,
    invocation: &Invocation,
    options: &PickerOptions,
) -> Result<Outcome, T::Error>
where
    T: Tool + ?Sized,
{
    let selection = invocation.selection();
    match invocation.mode() {
        Mode::Normal => {
            let records = tool.fetch().await?;
            if records.is_empty() {
                info!("nothing to pick from");
                return Ok(Outcome::Empty);
            }
            let request = PickerRequest::new(records, invocation.argv());
            let exit = request.run(options).await?;
            Ok(Outcome::Picked(exit))
        }
        Mode::Preview | Mode::Execute if selection.is_empty() => {
            debug!(mode = ?invocation.mode(), "callback with empty selection");
            Ok(Outcome::Skipped)
        }
        Mode::Preview => {
            tool.preview(selection).await?;
            Ok(Outcome::Previewed)
        }
        Mode::Execute => {
            tool.execute(selection).await?;
            Ok(Outcome::Executed)
        }
    }
}
