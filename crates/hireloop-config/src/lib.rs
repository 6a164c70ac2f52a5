//! # Hireloop Config
//!
//! Configuration management for Hireloop.
//! Settings are layered from TOML files and `HIRELOOP__*` environment
//! variables, then validated before the server starts.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
