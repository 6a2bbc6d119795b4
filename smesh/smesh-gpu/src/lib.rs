//! GPU-ready attribute buffers for sphere-mesh rendering.
//!
//! Sphere meshes draw as instanced spheres, instanced pill cones, and
//! plain tangent triangles for wedge patches. This crate turns a
//! [`smesh_types::SphereMesh`] into tightly packed `repr(C)` arrays a
//! renderer can upload as-is; devices, shaders, and draw calls stay on
//! the renderer's side of the fence.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod buffers;

pub use buffers::{InstanceBuffers, PillInstance, SphereInstance, WedgeVertex};
