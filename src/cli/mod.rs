//! CLI module
//!
//! Command-line interface for the IDR service.
//!
//! # Commands
//!
//! - `reserve` - Reserve one or more CVE IDs
//! - `show` - Show a single CVE ID record
//! - `list` - List CVE IDs, following pagination
//! - `quota` - Show the organization's ID quota
//! - `ping` - Check that the service is reachable

mod commands;
mod runner;

pub use commands::{parse_datetime, Cli, Commands, CveState, OutputFormat};
pub use runner::Runner;
