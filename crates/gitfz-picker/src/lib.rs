// Copyright (c) 2026 - present gitfz contributors
// SPDX-License-Identifier: MIT

//! gitfz-picker: fzf self-reinvocation protocol
//!
//! A tool built on this crate is a single executable that plays three roles.
//! Started by the user it lists records and launches fzf; fzf then calls the
//! same executable back to render previews and to act on the final
//! selection.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use gitfz_picker::prelude::*;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Tool for Echo {
//!     type Error = PickerError;
//!
//!     async fn fetch(&self) -> Result<Vec<Record>, PickerError> {
//!         Ok(vec![Record::single("hello"), Record::single("world")])
//!     }
//!
//!     async fn preview(&self, selection: &[Record]) -> Result<(), PickerError> {
//!         println!("{:?}", selection[0].field_str(0));
//!         Ok(())
//!     }
//!
//!     async fn execute(&self, selection: &[Record]) -> Result<(), PickerError> {
//!         println!("picked {}", selection.len());
//!         Ok(())
//!     }
//! }
//!
//! # async fn demo() -> Result<(), PickerError> {
//! let invocation = Invocation::from_env();
//! session::run(&Echo, &invocation, &PickerOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod invoke;
pub mod mode;
pub mod picker;
pub mod session;

pub use codec::Record;
pub use error::{CallbackError, CodecError, PickerError};
pub use invoke::{Call, Completed};
pub use mode::{Invocation, Mode};
pub use picker::{PickerExit, PickerOptions, PickerRequest};
pub use session::{Outcome, Tool};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::codec::Record;
    pub use crate::error::PickerError;
    pub use crate::invoke::Call;
    pub use crate::mode::{Invocation, Mode};
    pub use crate::picker::{PickerExit, PickerOptions};
    pub use crate::session::{self, Outcome, Tool};
}
