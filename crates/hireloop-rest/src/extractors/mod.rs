//! Custom Axum extractors.

mod claims;
mod list_params;
mod validated;

pub use claims::*;
pub use list_params::*;
pub use validated::*;
