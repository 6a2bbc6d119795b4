//! GPU instance buffer types for sphere-mesh rendering.
//!
//! A sphere mesh renders as three primitive families: instanced unit
//! spheres (scaled and offset per instance), instanced pill cones, and
//! plain tangent triangles for the wedge patches. This module produces
//! the per-instance attribute arrays for all three; the renderer only
//! has to upload the byte slices.
//!
//! # Memory Layout
//!
//! All types are `repr(C)` with vec4-aligned fields:
//! - [`SphereInstance`]: 16 bytes (1 x vec4)
//! - [`PillInstance`]: 32 bytes (2 x vec4)
//! - [`WedgeVertex`]: 32 bytes (2 x vec4)

use bytemuck::{Pod, Zeroable};

use smesh_project::wedge_normal_flipped;
use smesh_types::{Sphere, SphereMesh, VertexHandle};

/// Packs a sphere into the `(x, y, z, r)` vec4 the shaders consume.
#[allow(clippy::cast_possible_truncation)] // GPU attributes are f32 by contract
fn pack(s: Sphere) -> [f32; 4] {
    [
        s.center.x as f32,
        s.center.y as f32,
        s.center.z as f32,
        s.radius as f32,
    ]
}

/// One instanced sphere: center in xyz, radius in w.
///
/// # Example
///
/// ```
/// use smesh_gpu::SphereInstance;
///
/// let inst = SphereInstance::new([1.0, 2.0, 3.0], 0.5);
/// assert_eq!(std::mem::size_of::<SphereInstance>(), 16);
/// assert_eq!(inst.sphere[3], 0.5);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    /// Sphere center (xyz) and radius (w).
    pub sphere: [f32; 4],
}

impl SphereInstance {
    /// Create a sphere instance from center and radius.
    #[must_use]
    pub const fn new(center: [f32; 3], radius: f32) -> Self {
        Self {
            sphere: [center[0], center[1], center[2], radius],
        }
    }
}

/// One instanced pill: the two cap spheres as `(x, y, z, r)` vec4s.
///
/// ```
/// use smesh_gpu::PillInstance;
///
/// assert_eq!(std::mem::size_of::<PillInstance>(), 32);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PillInstance {
    /// First cap sphere, center (xyz) and radius (w).
    pub s0: [f32; 4],
    /// Second cap sphere, center (xyz) and radius (w).
    pub s1: [f32; 4],
}

/// One corner of a wedge tangent triangle.
///
/// The fourth components are padding for vec4 alignment.
///
/// ```
/// use smesh_gpu::WedgeVertex;
///
/// assert_eq!(std::mem::size_of::<WedgeVertex>(), 32);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct WedgeVertex {
    /// Tangent point position (xyz) + padding.
    pub position: [f32; 4],
    /// Patch normal (xyz) + padding.
    pub normal: [f32; 4],
}

/// All attribute arrays a renderer needs for one sphere mesh.
///
/// Built from live elements only; primitives with dangling connectivity
/// are skipped. Joint spheres are emitted at every pill and wedge
/// vertex, boundary pills along every wedge side, and two tangent
/// triangles (front and back patch) per wedge.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuffers {
    /// Instanced spheres: singular records plus pill/wedge joints.
    pub spheres: Vec<SphereInstance>,
    /// Instanced pills: edges plus the three boundary pills per face.
    pub pills: Vec<PillInstance>,
    /// Tangent-triangle corners, six per face.
    pub wedge_vertices: Vec<WedgeVertex>,
    /// Triangle list over `wedge_vertices`.
    pub wedge_indices: Vec<u32>,
}

impl InstanceBuffers {
    /// Builds the attribute arrays from every live primitive of `mesh`.
    ///
    /// ```
    /// use smesh_gpu::InstanceBuffers;
    /// use smesh_types::{Point3, SphereMesh};
    ///
    /// let mut mesh = SphereMesh::new();
    /// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
    /// let b = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
    /// mesh.add_edge(a, b);
    ///
    /// let buffers = InstanceBuffers::from_mesh(&mesh);
    /// assert_eq!(buffers.pills.len(), 1);
    /// assert_eq!(buffers.spheres.len(), 2); // joint spheres
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // wedge vertex count fits u32
    pub fn from_mesh(mesh: &SphereMesh) -> Self {
        let mut out = Self::default();
        let resolve = |v: VertexHandle| mesh.vertex_sphere(v).ok();

        for s in mesh.spheres() {
            let Some(sphere) = mesh.sphere_vertex(s).ok().and_then(resolve) else {
                continue;
            };
            out.spheres.push(SphereInstance { sphere: pack(sphere) });
        }

        for e in mesh.edges() {
            let Ok([v0, v1]) = mesh.edge_vertices(e) else {
                continue;
            };
            let (Some(s0), Some(s1)) = (resolve(v0), resolve(v1)) else {
                continue;
            };
            out.spheres.push(SphereInstance { sphere: pack(s0) });
            out.spheres.push(SphereInstance { sphere: pack(s1) });
            out.pills.push(PillInstance {
                s0: pack(s0),
                s1: pack(s1),
            });
        }

        for f in mesh.faces() {
            let Ok([v0, v1, v2]) = mesh.face_vertices(f) else {
                continue;
            };
            let (Some(s0), Some(s1), Some(s2)) = (resolve(v0), resolve(v1), resolve(v2)) else {
                continue;
            };
            for s in [s0, s1, s2] {
                out.spheres.push(SphereInstance { sphere: pack(s) });
            }
            for (a, b) in [(s0, s1), (s1, s2), (s2, s0)] {
                out.pills.push(PillInstance {
                    s0: pack(a),
                    s1: pack(b),
                });
            }
            for flipped in [false, true] {
                let n = wedge_normal_flipped(s0, s1, s2, flipped);
                let base = out.wedge_vertices.len() as u32;
                let normal = [n.x as f32, n.y as f32, n.z as f32, 0.0];
                for s in [s0, s1, s2] {
                    let tangent = s.center + n * s.radius;
                    out.wedge_vertices.push(WedgeVertex {
                        position: [tangent.x as f32, tangent.y as f32, tangent.z as f32, 1.0],
                        normal,
                    });
                }
                // Reverse winding on the back patch so both faces stay
                // outward-oriented.
                if flipped {
                    out.wedge_indices.extend([base, base + 2, base + 1]);
                } else {
                    out.wedge_indices.extend([base, base + 1, base + 2]);
                }
            }
        }

        out
    }

    /// `true` when no primitive produced any attribute data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.pills.is_empty() && self.wedge_vertices.is_empty()
    }

    /// Raw bytes of the sphere instance array.
    #[must_use]
    pub fn sphere_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spheres)
    }

    /// Raw bytes of the pill instance array.
    #[must_use]
    pub fn pill_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pills)
    }

    /// Raw bytes of the wedge vertex array.
    #[must_use]
    pub fn wedge_vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.wedge_vertices)
    }

    /// Raw bytes of the wedge index list.
    #[must_use]
    pub fn wedge_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.wedge_indices)
    }
}
