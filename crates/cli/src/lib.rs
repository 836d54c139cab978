//! CLI utilities for GlassCart search tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Terminal rendering of search results

#![warn(missing_docs)]

pub mod output;
pub mod results;

pub use results::ResultsPrinter;
