//! Domain entities and the reduced projections used by list endpoints.

mod application;
mod job;
mod summaries;
mod user;

pub use application::Application;
pub use job::Job;
pub use summaries::*;
pub use user::User;
