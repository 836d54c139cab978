//! Configuration loading and schema definitions
//!
//! Settings shared by every GlassCart search front end.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
