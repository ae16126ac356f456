//! Graphics error types

use thiserror::Error;

/// Misuse of the begin/vertex/end geometry protocol
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A geometry call arrived outside of a begin/end pair
    #[error("shape is not being built; call begin first")]
    NotBuilding,

    /// Begin was called while a build was already in progress
    #[error("shape is already being built")]
    AlreadyBuilding,

    /// Fill mode or segment flags changed in the middle of a build
    #[error("shape settings are locked while building")]
    BuildingLocked,
}

/// Errors reported by the native graphics device and the paint layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// The device failed to create a native resource
    #[error("failed to create {resource}: {reason}")]
    ResourceCreation {
        resource: &'static str,
        reason: String,
    },

    /// No device has been set up, or it was cleaned up
    #[error("graphics device is not set up")]
    NoDevice,

    /// The device lost its render target; the frame must be abandoned
    #[error("graphics device lost")]
    DeviceLost,

    /// The geometry sink refused to close
    #[error("failed to close geometry: {0}")]
    GeometryClose(String),

    /// Geometry protocol violation
    #[error("shape protocol violation: {0}")]
    Protocol(#[from] ShapeError),
}

impl GraphicsError {
    pub fn creation(resource: &'static str, reason: impl Into<String>) -> Self {
        GraphicsError::ResourceCreation {
            resource,
            reason: reason.into(),
        }
    }
}

/// Result type for graphics operations
pub type Result<T> = std::result::Result<T, GraphicsError>;
