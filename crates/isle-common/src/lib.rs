//! Common utilities for the Isle selection engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Diagnostics** - per-computation warnings with optional colored terminal output

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
