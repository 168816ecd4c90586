//! Common error types for GameWire

use thiserror::Error;

/// Common result type for GameWire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across GameWire crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file exists but is not valid TOML
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
