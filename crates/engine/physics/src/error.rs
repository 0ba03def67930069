//! Error types for the push controller

use thiserror::Error;

/// Result type for push controller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a push controller
///
/// Stepping never fails; every runtime input is a valid reading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
