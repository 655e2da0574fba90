//! Error types for world construction.

use thiserror::Error;

/// Errors that can occur while building the physics world.
#[derive(Error, Debug)]
pub enum WorldError {
    /// Failed to create a convex hull collision shape.
    #[error("failed to build convex hull from {points} points")]
    ConvexHull {
        /// Number of input points.
        points: usize,
    },

    /// A demo spec referenced a body index that does not exist.
    #[error("demo references body index {0} out of range")]
    UnknownBody(usize),

    /// A demo spec designated a non-kinematic body as the kinematic driver.
    #[error("body index {0} is not kinematic and cannot be pointer-driven")]
    NotKinematic(usize),
}
