//! Error types for projection queries.

use thiserror::Error;

/// Errors produced by projection queries over a sphere mesh.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The mesh holds no faces, no edges, and no singular spheres, so
    /// there is no surface to project onto.
    #[error("mesh has no primitives to project onto")]
    NoPrimitives,
}

/// Convenience alias for projection results.
pub type ProjectResult<T> = Result<T, ProjectError>;
