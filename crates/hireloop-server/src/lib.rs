//! # Hireloop Server Library
//!
//! Wiring for the server binary: component assembly, logging setup and
//! startup output.

pub mod app;
pub mod startup;
pub mod telemetry;
