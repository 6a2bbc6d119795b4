//! Core sphere-mesh data structures.
//!
//! A sphere mesh generalizes an indexed triangle mesh: every vertex is a
//! full sphere `(x, y, z, r)`, and connectivity comes in three primitive
//! kinds instead of one:
//!
//! - **singular spheres**: one vertex, an isolated ball;
//! - **edges ("pills")**: two vertices, the convex hull of two spheres;
//! - **faces ("wedges")**: three vertices, the smooth blend surface of
//!   three spheres, bounded by three implicit pills.
//!
//! This crate provides:
//!
//! - [`Sphere`] - The `(center, radius)` value type
//! - [`SphereMesh`] - The indexed container with typed handles
//! - Per-element property storage, deletion marking and garbage collection
//!
//! The closed-form projection math over these primitives lives in
//! `smesh-project`; file I/O in `smesh-io`; GPU buffer production in
//! `smesh-gpu`.
//!
//! # Handles
//!
//! Elements are addressed by plain index handles ([`VertexHandle`],
//! [`SphereHandle`], [`EdgeHandle`], [`FaceHandle`]). Handles are stable
//! across additions and deletions, but **not** across
//! [`SphereMesh::garbage_collection`]. All accessors are bounds-checked;
//! a stale handle yields [`MeshError::IndexOutOfRange`], never undefined
//! behavior.
//!
//! # Example
//!
//! ```
//! use smesh_types::{Point3, SphereMesh};
//!
//! let mut mesh = SphereMesh::new();
//! let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
//! let v1 = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
//! let v2 = mesh.add_vertex(Point3::new(2.0, 3.0, 0.0), 0.5);
//! mesh.add_face(v0, v1, v2);
//!
//! assert_eq!(mesh.n_faces(), 1);
//! ```
//!
//! # Concurrency
//!
//! `SphereMesh` is a plain owned value: single-writer, multi-reader
//! discipline is the caller's responsibility, as with any `&`/`&mut`
//! borrow.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Tests may unwrap; library code must propagate errors.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod handle;
mod mesh;
mod property;
mod sphere;

pub use error::{MeshError, MeshResult};
pub use handle::{EdgeHandle, ElementKind, FaceHandle, SphereHandle, VertexHandle};
pub use mesh::SphereMesh;
pub use sphere::Sphere;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
