//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Structural diagnostics and their formatting
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, Diagnostic, DiagnosticLevel, TableReport};
pub use error::{TableError, TableResult};
