//! Typed element handles.
//!
//! Every element kind of a [`SphereMesh`](crate::SphereMesh) is addressed
//! by its own handle type, a thin wrapper over a `u32` index into that
//! kind's dense array. Handles are plain values with no lifetime tie to
//! the mesh: a handle is only meaningful for the mesh that produced it,
//! and `garbage_collection()` invalidates every previously held handle.
//!
//! There is no sentinel "invalid" index; index 0 is an ordinary first
//! element. Staleness is caught by the mesh's bounds-checked accessors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names an element kind, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementKind {
    /// A vertex (sphere center + radius).
    Vertex,
    /// A singular-sphere primitive.
    Sphere,
    /// An edge (pill) primitive.
    Edge,
    /// A face (wedge) primitive.
    Face,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vertex => "vertex",
            Self::Sphere => "sphere",
            Self::Edge => "edge",
            Self::Face => "face",
        };
        f.write_str(name)
    }
}

macro_rules! handle_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            ///
            /// The index is not checked against any mesh; accessors on
            /// [`SphereMesh`](crate::SphereMesh) perform bounds checking.
            #[inline]
            #[must_use]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// The raw index of this handle.
            #[inline]
            #[must_use]
            pub const fn index(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) const fn idx(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

handle_type! {
    /// Handle to a vertex: a sphere center with a radius.
    VertexHandle
}

handle_type! {
    /// Handle to a singular-sphere primitive (one vertex).
    SphereHandle
}

handle_type! {
    /// Handle to an edge primitive: a pill connecting two vertices.
    EdgeHandle
}

handle_type! {
    /// Handle to a face primitive: a wedge blending three vertices.
    FaceHandle
}
