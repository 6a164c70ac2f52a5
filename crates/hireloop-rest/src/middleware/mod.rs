//! HTTP middleware.

mod auth;
mod error_detail;
mod logging;

pub use auth::*;
pub use error_detail::*;
pub use logging::*;
