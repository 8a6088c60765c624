//! # hc-core
//!
//! Core types, error definitions, and configuration for holiday-cn.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – the error enum with its `ensure!` /
//! `fail!` macros, the export settings, and small literal parsers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Export configuration (output directory, calendar metadata, timezone).
pub mod settings;

/// Miscellaneous utilities.
pub mod utilities;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::ExportSettings;
