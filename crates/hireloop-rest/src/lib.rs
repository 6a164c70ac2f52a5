//! # Hireloop REST
//!
//! HTTP surface of Hireloop: the axum router, one controller per resource,
//! request extractors, middleware and the response envelope every route
//! answers with.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
