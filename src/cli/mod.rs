//! CLI module for folio.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Session and portfolio commands

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, USAGE};
pub use commands::run_command;
pub use version::{handle_version_command, VERSION};
