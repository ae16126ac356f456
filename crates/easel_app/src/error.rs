//! Sketch runner error types

use easel_core::GraphicsError;
use thiserror::Error;

/// Errors surfaced to the code driving a sketch
#[derive(Error, Debug)]
pub enum EaselError {
    /// The configuration file is not valid TOML for `SketchConfig`
    #[error("Failed to parse sketch config: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be written out
    #[error("Failed to serialize sketch config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Parsed fine but cannot be run
    #[error("Invalid sketch config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unrecoverable device error
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),

    /// The global tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for sketch runner operations
pub type Result<T> = std::result::Result<T, EaselError>;
