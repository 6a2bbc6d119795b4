//! Closed-form projection onto sphere-mesh surfaces.
//!
//! A sphere mesh describes a volume as the union of swept spheres:
//! singular spheres, pills (the convex hull of two spheres), and wedges
//! (the convex hull of three). Each primitive admits an exact
//! closed-form nearest-point projection, and this crate provides those
//! routines plus a whole-mesh query driver that scans every live
//! primitive and keeps the closest surface point.
//!
//! # Example
//!
//! ```
//! use smesh_project::{pill_project, Projection};
//! use smesh_types::Sphere;
//!
//! let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
//! let s1 = Sphere::from_coords(4.0, 0.0, 0.0, 1.0);
//! let proj = pill_project([2.0, 5.0, 0.0].into(), s0, s1);
//! assert!((proj.distance - 4.0).abs() < 1e-12);
//! ```
//!
//! Signed distances are negative inside a primitive, while the driver
//! ranks candidates by the Euclidean gap between the query and the
//! projected surface point. Non-finite intermediate values saturate to
//! zero instead of poisoning downstream arithmetic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod primitive;
mod query;

pub use error::{ProjectError, ProjectResult};
pub use primitive::{
    barycentric, finite_or_zero, pill_project, sphere_project, wedge_normal, wedge_normal_flipped,
    wedge_normal_toward, wedge_project, Projection,
};
pub use query::{project_point, project_points};
