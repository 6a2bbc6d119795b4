//! Nearest-point queries against a whole sphere mesh.
//!
//! The driver scans every live primitive, projects the query point onto
//! each with the closed-form routines from [`crate::primitive`], and
//! keeps the candidate whose surface point lies closest to the query in
//! Euclidean terms. Faces are scanned first, then edges, then singular
//! spheres, so ties resolve in favour of the richest primitive.

use nalgebra::Point3;
use rayon::prelude::*;
use smesh_types::{Sphere, SphereMesh, VertexHandle};

use crate::error::{ProjectError, ProjectResult};
use crate::primitive::{pill_project, sphere_project, wedge_project, Projection};

/// Resolves a stored vertex reference to its sphere, skipping dangling
/// connectivity left behind by deletions that have not been collected.
fn resolve(mesh: &SphereMesh, v: VertexHandle) -> Option<Sphere> {
    mesh.vertex_sphere(v).ok()
}

/// Projects `p` onto the nearest point of the mesh surface.
///
/// Every live face, edge, and singular sphere is considered; primitives
/// whose connectivity dangles are skipped. Returns
/// [`ProjectError::NoPrimitives`] when the mesh has nothing to project
/// onto.
///
/// ```
/// use smesh_project::project_point;
/// use smesh_types::{Point3, SphereMesh};
///
/// let mut mesh = SphereMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
/// let b = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
/// mesh.add_edge(a, b);
///
/// let proj = project_point(Point3::new(2.0, 5.0, 0.0), &mesh).unwrap();
/// assert!((proj.distance - 4.0).abs() < 1e-12);
/// ```
pub fn project_point(p: Point3<f64>, mesh: &SphereMesh) -> ProjectResult<Projection> {
    let mut best: Option<Projection> = None;
    let mut consider = |candidate: Projection| {
        let gap = (candidate.point - p).norm();
        // A NaN incumbent (query at a sphere center) loses to any
        // candidate; a NaN candidate never wins over a finite one.
        let closer = best.as_ref().is_none_or(|b| {
            let incumbent = (b.point - p).norm();
            incumbent.is_nan() || gap < incumbent
        });
        if closer {
            best = Some(candidate);
        }
    };

    for f in mesh.faces() {
        let Ok([v0, v1, v2]) = mesh.face_vertices(f) else {
            continue;
        };
        let (Some(s0), Some(s1), Some(s2)) =
            (resolve(mesh, v0), resolve(mesh, v1), resolve(mesh, v2))
        else {
            continue;
        };
        consider(wedge_project(p, s0, s1, s2));
    }

    for e in mesh.edges() {
        let Ok([v0, v1]) = mesh.edge_vertices(e) else {
            continue;
        };
        let (Some(s0), Some(s1)) = (resolve(mesh, v0), resolve(mesh, v1)) else {
            continue;
        };
        consider(pill_project(p, s0, s1));
    }

    for s in mesh.spheres() {
        let Some(sphere) = mesh.sphere_vertex(s).ok().and_then(|v| resolve(mesh, v)) else {
            continue;
        };
        consider(sphere_project(p, sphere));
    }

    best.ok_or(ProjectError::NoPrimitives)
}

/// Projects a batch of points in parallel.
///
/// The output order matches the input order. Fails up front with
/// [`ProjectError::NoPrimitives`] when the mesh has no live primitives,
/// so the per-point scans themselves cannot fail.
pub fn project_points(points: &[Point3<f64>], mesh: &SphereMesh) -> ProjectResult<Vec<Projection>> {
    let probe = Point3::origin();
    project_point(probe, mesh)?;
    let projected = points
        .par_iter()
        .map(|&p| match project_point(p, mesh) {
            Ok(proj) => proj,
            // Unreachable after the probe above; keep the probe result
            // shape without panicking in release builds.
            Err(ProjectError::NoPrimitives) => Projection {
                point: p,
                distance: 0.0,
            },
        })
        .collect();
    Ok(projected)
}
