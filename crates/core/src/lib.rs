//! trapview-core
//!
//! Core library for locating compiler-inserted bounds-check traps and rendering
//! source-correlated disassembly listings.
//!
//! The pipeline is: listing text -> `listing::parse_listing` (blocks + address
//! index) -> `Listing::resolve_targets` -> `Listing::retain_file` ->
//! `analysis::TrapDetector` -> one of the `render` views.
//!
//! All substantive logic lives here so it is testable without a Go toolchain;
//! the CLI is a thin wrapper.

pub mod analysis;
pub mod config;
pub mod listing;
pub mod model;
pub mod render;
pub mod sources;
pub mod toolchain;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
