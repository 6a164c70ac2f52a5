//! # Hireloop Security
//!
//! JWT issuing and verification. Identity is established elsewhere; this
//! crate only proves who a bearer token belongs to so ownership checks
//! have a subject.

pub mod jwt;

pub use jwt::*;
