//! Error types for sphere-mesh operations.

use crate::ElementKind;
use thiserror::Error;

/// Result type for sphere-mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when accessing or mutating a sphere mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A handle referred past the end of its element array.
    ///
    /// This is usually a stale handle held across `garbage_collection()`,
    /// or connectivity loaded from a file that references vertices the
    /// file never defined.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Element kind that was accessed.
        kind: ElementKind,
        /// The offending index.
        index: u32,
        /// Current element count for the kind.
        len: usize,
    },

    /// A property with this name is already registered for the kind.
    #[error("{kind} property {name:?} already exists")]
    PropertyExists {
        /// Element kind the property belongs to.
        kind: ElementKind,
        /// The duplicate property name.
        name: String,
    },

    /// No property with this name is registered for the kind.
    #[error("{kind} property {name:?} does not exist")]
    PropertyMissing {
        /// Element kind the property was looked up on.
        kind: ElementKind,
        /// The missing property name.
        name: String,
    },

    /// A property exists under this name but stores a different type.
    #[error("{kind} property {name:?} stores {actual}, not {expected}")]
    PropertyTypeMismatch {
        /// Element kind the property belongs to.
        kind: ElementKind,
        /// The property name.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type actually stored.
        actual: &'static str,
    },
}
