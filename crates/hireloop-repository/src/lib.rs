//! # Hireloop Repository
//!
//! Data access for users, jobs and applications.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn JobRepository>     (domain interface, traits.rs)
//! PgJobRepository                 (postgres/)
//!   ↓  ListSpec                   (list_query.rs: COUNT + paged SELECT)
//! PostgreSQL
//! ```
//!
//! Every list query is built from a fixed per-entity [`ListSpec`]: filter
//! names map through an allowlist to columns and all values are bound.

pub mod list_query;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use list_query::ListSpec;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
