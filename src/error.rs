//! Centralized error handling for ofwscan

use std::fmt;
use std::io;

/// Custom error type for ofwscan operations
#[derive(Debug)]
pub enum OfwscanError {
    /// I/O errors (property and config file reading)
    Io(io::Error),
    /// Parsing errors (invalid data format)
    Parse(String),
    /// Configuration errors
    Config(String),
    /// Device tree detection errors
    Detection(String),
}

impl fmt::Display for OfwscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfwscanError::Io(err) => write!(f, "I/O error: {}", err),
            OfwscanError::Parse(msg) => write!(f, "Parse error: {}", msg),
            OfwscanError::Config(msg) => write!(f, "Config error: {}", msg),
            OfwscanError::Detection(msg) => write!(f, "Detection error: {}", msg),
        }
    }
}

impl std::error::Error for OfwscanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OfwscanError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for OfwscanError {
    fn from(error: io::Error) -> Self {
        OfwscanError::Io(error)
    }
}

impl From<toml::de::Error> for OfwscanError {
    fn from(error: toml::de::Error) -> Self {
        OfwscanError::Parse(error.to_string())
    }
}

/// Type alias for Results in ofwscan
pub type Result<T> = std::result::Result<T, OfwscanError>;
