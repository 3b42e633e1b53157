//! Shared library for `nutrinet`
//! Contains the dataset, layout, rendering and output pipeline used by the CLI

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `nutrinet` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
