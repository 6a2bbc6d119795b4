//! Sphere-mesh toolkit: geometry from unions of swept spheres.
//!
//! A sphere mesh is an indexed collection of 4-component vertices
//! (center plus radius) connected into three primitive kinds: singular
//! spheres, pills (two-sphere hulls), and wedges (three-sphere hulls).
//! This umbrella crate re-exports the whole workspace under one roof.
//!
//! # Quick Start
//!
//! ```
//! use smesh::prelude::*;
//!
//! let mut mesh = SphereMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
//! let b = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
//! mesh.add_edge(a, b);
//!
//! let proj = project_point(Point3::new(2.0, 5.0, 0.0), &mesh).unwrap();
//! assert!((proj.distance - 4.0).abs() < 1e-12);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `SphereMesh`, handles, properties, garbage collection
//! - [`project`] - closed-form nearest-point projection and queries
//! - [`io`] - the `.smo` line-oriented text format
//! - [`gpu`] - instance buffer production for renderers

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

/// Core data structures: `SphereMesh`, handles, properties.
pub use smesh_types as types;

/// Closed-form projection onto spheres, pills, and wedges.
pub use smesh_project as project;

/// `.smo` file reading and writing.
pub use smesh_io as io;

/// GPU-ready instance buffers.
pub use smesh_gpu as gpu;

/// Common imports for sphere-mesh processing.
///
/// # Usage
///
/// ```
/// use smesh::prelude::*;
/// ```
pub mod prelude {
    pub use smesh_types::{
        EdgeHandle, FaceHandle, MeshError, Point3, Sphere, SphereHandle, SphereMesh, Vector3,
        VertexHandle,
    };

    pub use smesh_project::{
        pill_project, project_point, project_points, sphere_project, wedge_project, ProjectError,
        Projection,
    };

    pub use smesh_io::{load_smo, parse_smo, save_smo, write_smo};

    pub use smesh_gpu::InstanceBuffers;
}
