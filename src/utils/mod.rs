//! Utility functions and types for the sentiment service.

pub mod error;
mod logging;
pub mod types;

pub use error::Error;
pub use logging::init_logging;
#[cfg(test)]
pub(crate) use logging::init_test_logging;
pub use types::*;
