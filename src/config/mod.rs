//! Configuration for the texatlas command-line tool
//!
//! Provides types and loading for the optional `texatlas.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
