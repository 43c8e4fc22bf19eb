//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`fetch`] - Download a bounding box into an MBTiles archive
//! - [`init`] - Configuration initialization

pub mod common;
pub mod fetch;
pub mod init;
