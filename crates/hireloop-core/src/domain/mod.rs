//! # Hireloop Domain
//!
//! Entities, list projections, and value objects of the job board.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
