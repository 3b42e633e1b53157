//! CLI command handlers for `nutrinet`.
//!
//! Each command is implemented in its own submodule. Drawing the network is
//! what runs when no subcommand is given.

pub mod config;
pub mod render;
pub mod summary;
