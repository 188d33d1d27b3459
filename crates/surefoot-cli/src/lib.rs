//! Surefoot CLI Library
//!
//! Command-line access to the frame search, page-load wait and alert
//! helpers against a live WebDriver session.

#![warn(missing_docs)]

mod commands;
mod error;
pub mod handlers;

pub use commands::{AlertArgs, Cli, Commands, FrameArgs, WaitLoadArgs};
pub use error::{CliError, CliResult};
pub use handlers::Outcome;
