//! Test infrastructure for endpoint integration tests
//!
//! Provides TestRegistryCtx, which writes a fixture gem repository into a
//! temporary directory and builds the app around it, along with fluent
//! builders for making HTTP requests.

mod ctx;
mod request;
mod response;

pub use ctx::*;
pub use request::*;
pub use response::*;
