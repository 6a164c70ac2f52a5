//! # Hireloop Service
//!
//! Business logic for users, job postings and applications, plus the
//! cache-aside layer that fronts the cached list endpoints.
//!
//! Services are plain structs over `Arc<dyn Repository>` handles and a
//! shared [`ListCache`]; the binary wires them, tests swap in doubles.

pub mod application_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod job_service;
pub mod user_service;

pub use application_service::*;
pub use cache::*;
pub use dto::*;
pub use job_service::*;
pub use r#impl::*;
pub use user_service::*;
