//! # Scatter Error Types
//!
//! Errors raised while building the inputs of a placement run. The run
//! itself never fails: budget exhaustion is reported through
//! [`PlacementStatus`](crate::PlacementStatus).

use std::path::PathBuf;

use parallax_shared::Vec3;
use thiserror::Error;

/// Errors that can occur while setting up a placement run.
#[derive(Error, Debug)]
pub enum ScatterError {
    /// Domain half-extents must be positive and finite.
    #[error("invalid domain: center {center:?}, half extents {half_extents:?}")]
    InvalidDomain {
        /// Requested center.
        center: Vec3,
        /// Requested half-extents.
        half_extents: Vec3,
    },

    /// Camera pose cannot be inverted into a world-to-view transform.
    #[error("camera pose is not invertible")]
    SingularPose,

    /// Projection parameters are out of range.
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// Placement or scene configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scene file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for scatter setup operations.
pub type ScatterResult<T> = Result<T, ScatterError>;
