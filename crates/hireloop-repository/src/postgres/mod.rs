//! PostgreSQL implementations of the repository traits.

mod application_repository;
mod job_repository;
mod user_repository;

pub use application_repository::PgApplicationRepository;
pub use job_repository::PgJobRepository;
pub use user_repository::PgUserRepository;

use hireloop_core::HireloopError;
use std::str::FromStr;

/// Parses a text enum column, treating unknown values as corrupt data.
fn parse_column<T>(value: &str, column: &'static str) -> Result<T, HireloopError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| HireloopError::Internal(format!("Invalid {column} in database: {e}")))
}
