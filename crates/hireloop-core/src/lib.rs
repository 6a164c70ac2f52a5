//! # Hireloop Core
//!
//! Core types, traits, and error definitions for Hireloop.
//! Every other crate in the workspace builds on the error type, the
//! pagination and filter primitives, and the domain enums defined here.

pub mod domain;
pub mod error;
pub mod filter;
pub mod id;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use filter::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
