//! API Regression Tests for the Sphere-Mesh Crate Ecosystem
//!
//! These tests serve as a regression suite to ensure the public API
//! remains stable and consistent across the smesh crates. They are
//! organized in 4 tiers of increasing complexity:
//!
//! - Tier 1: Foundation (smesh-types, spheres, handles, properties)
//! - Tier 2: Lifecycle (deletion, garbage collection, .smo I/O)
//! - Tier 3: Queries (smesh-project, closed-form projection)
//! - Tier 4: Rendering Data (smesh-gpu instance buffers)
//!
//! If any of these tests fail after API changes, it indicates a
//! breaking change that needs documentation and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use smesh::prelude::*;
use smesh::{gpu, io, project, types};

// =============================================================================
// TIER 1: Foundation - Spheres, Handles, Container, Properties
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn sphere_construction_and_conversion() {
        let s = Sphere::from_coords(1.0, 2.0, 3.0, 0.5);
        assert_relative_eq!(s.center.x, 1.0);
        assert_relative_eq!(s.radius, 0.5);

        let quad: [f64; 4] = s.into();
        assert_eq!(quad, [1.0, 2.0, 3.0, 0.5]);
        let back = Sphere::from(quad);
        assert_relative_eq!((back.center - s.center).norm(), 0.0);

        let mid = Sphere::lerp(
            Sphere::from_coords(0.0, 0.0, 0.0, 1.0),
            Sphere::from_coords(2.0, 0.0, 0.0, 3.0),
            0.5,
        );
        assert_relative_eq!(mid.center.x, 1.0);
        assert_relative_eq!(mid.radius, 2.0);
    }

    #[test]
    fn handles_are_plain_indices() {
        let v = VertexHandle::new(7);
        assert_eq!(v.index(), 7);
        assert_eq!(v, VertexHandle::new(7));
        // Distinct kinds are distinct types; equal indices are fine.
        let s = SphereHandle::new(7);
        assert_eq!(s.index(), v.index());
    }

    #[test]
    fn mesh_construction_and_checked_access() {
        let mut mesh = SphereMesh::new();
        assert_eq!(mesh.n_vertices(), 0);

        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 0.5);
        let e = mesh.add_edge(a, b);
        let s = mesh.add_sphere(a);

        assert!(mesh.is_valid_vertex(a));
        assert!(mesh.is_valid_edge(e));
        assert!(mesh.is_valid_sphere(s));
        assert_eq!(mesh.edge_vertices(e).unwrap(), [a, b]);
        assert_eq!(mesh.sphere_vertex(s).unwrap(), a);

        // Stale handles error instead of panicking.
        let err = mesh.vertex_sphere(VertexHandle::new(99)).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { .. }));
    }

    #[test]
    fn vertex_geometry_can_be_rewritten() {
        let mut mesh = SphereMesh::new();
        let a = mesh.add_vertex(Point3::origin(), 1.0);
        mesh.set_vertex_sphere(a, Sphere::from_coords(5.0, 0.0, 0.0, 2.0))
            .unwrap();
        let s = mesh.vertex_sphere(a).unwrap();
        assert_relative_eq!(s.center.x, 5.0);
        assert_relative_eq!(s.radius, 2.0);
    }

    #[test]
    fn typed_properties_across_all_kinds() {
        let mut mesh = SphereMesh::new();
        let a = mesh.add_vertex(Point3::origin(), 1.0);
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), 1.0);
        mesh.add_edge(a, b);

        mesh.add_vertex_property::<f64>("weight", 1.0).unwrap();
        mesh.add_edge_property::<i32>("label", -1).unwrap();

        mesh.vertex_property_mut::<f64>("weight").unwrap()[0] = 2.5;
        assert_relative_eq!(mesh.vertex_property::<f64>("weight").unwrap()[0], 2.5);
        assert_eq!(mesh.edge_property::<i32>("label").unwrap(), &[-1]);

        // Registering twice and reading with the wrong type both fail
        // loudly.
        assert!(matches!(
            mesh.add_vertex_property::<f64>("weight", 0.0),
            Err(MeshError::PropertyExists { .. })
        ));
        assert!(matches!(
            mesh.vertex_property::<u8>("weight"),
            Err(MeshError::PropertyTypeMismatch { .. })
        ));
        assert!(matches!(
            mesh.vertex_property::<f64>("missing"),
            Err(MeshError::PropertyMissing { .. })
        ));

        assert!(mesh.remove_vertex_property("weight"));
        assert!(!mesh.remove_vertex_property("weight"));
    }

    #[test]
    fn new_elements_receive_property_defaults() {
        let mut mesh = SphereMesh::new();
        mesh.add_vertex_property::<u32>("tag", 9).unwrap();
        mesh.add_vertex(Point3::origin(), 1.0);
        assert_eq!(mesh.vertex_property::<u32>("tag").unwrap(), &[9]);
    }
}

// =============================================================================
// TIER 2: Lifecycle - Deletion, Garbage Collection, .smo I/O
// =============================================================================

mod tier2_lifecycle {
    use super::*;

    fn wedge_mesh() -> (SphereMesh, [VertexHandle; 3]) {
        let mut mesh = SphereMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = mesh.add_vertex(Point3::new(2.0, 0.0, 0.0), 1.0);
        let c = mesh.add_vertex(Point3::new(1.0, 2.0, 0.0), 1.0);
        mesh.add_face(a, b, c);
        mesh.add_edge(a, b);
        mesh.add_sphere(c);
        (mesh, [a, b, c])
    }

    #[test]
    fn vertex_deletion_cascades_into_primitives() {
        let (mut mesh, [a, ..]) = wedge_mesh();
        mesh.delete_vertex(a).unwrap();

        assert!(mesh.is_deleted_vertex(a).unwrap());
        assert_eq!(mesh.n_faces(), 0);
        assert_eq!(mesh.n_edges(), 0);
        // The singular sphere at c does not reference a and survives.
        assert_eq!(mesh.n_spheres(), 1);
        assert!(mesh.garbage());
    }

    #[test]
    fn garbage_collection_compacts_and_remaps() {
        let (mut mesh, [a, _, c]) = wedge_mesh();
        let keep = mesh.vertex_sphere(c).unwrap();
        mesh.delete_vertex(a).unwrap();
        mesh.garbage_collection();

        assert!(!mesh.garbage());
        assert_eq!(mesh.n_vertices(), 2);
        assert_eq!(mesh.vertices_len(), 2);

        // The surviving singular sphere still resolves to c's geometry.
        let s = mesh.spheres().next().unwrap();
        let v = mesh.sphere_vertex(s).unwrap();
        let got = mesh.vertex_sphere(v).unwrap();
        assert_relative_eq!((got.center - keep.center).norm(), 0.0);
    }

    #[test]
    fn smo_round_trip_through_text() {
        let (mesh, _) = wedge_mesh();
        let text = io::write_smo(&mesh);
        let back = io::parse_smo(&text);

        assert_eq!(back.n_vertices(), mesh.n_vertices());
        assert_eq!(back.n_spheres(), mesh.n_spheres());
        assert_eq!(back.n_edges(), mesh.n_edges());
        assert_eq!(back.n_faces(), mesh.n_faces());
    }

    #[test]
    fn smo_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wedge.smo");
        let (mesh, _) = wedge_mesh();

        save_smo(&mesh, &path).unwrap();
        let back = load_smo(&path).unwrap();
        assert_eq!(back.n_faces(), 1);

        let missing = load_smo(dir.path().join("absent.smo")).unwrap_err();
        assert!(matches!(missing, io::SmoError::FileNotFound { .. }));
    }

    #[test]
    fn clear_preserves_property_registration() {
        let mut mesh = SphereMesh::new();
        mesh.add_vertex_property::<f64>("weight", 0.0).unwrap();
        mesh.add_vertex(Point3::origin(), 1.0);
        mesh.clear();

        assert_eq!(mesh.n_vertices(), 0);
        mesh.add_vertex(Point3::origin(), 2.0);
        assert_eq!(mesh.vertex_property::<f64>("weight").unwrap().len(), 1);
    }
}

// =============================================================================
// TIER 3: Queries - Closed-Form Projection
// =============================================================================

mod tier3_queries {
    use super::*;

    #[test]
    fn primitive_projections_agree_on_shared_geometry() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(4.0, 0.0, 0.0, 1.0);
        let p = Point3::new(-3.0, 0.0, 0.0);

        // Beyond the s0 cap, the pill degenerates to the sphere.
        let cap = sphere_project(p, s0);
        let pill = pill_project(p, s0, s1);
        assert_relative_eq!(cap.distance, pill.distance, epsilon = 1e-12);
        assert_relative_eq!(cap.distance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_distance_is_negative_inside() {
        let s = Sphere::from_coords(0.0, 0.0, 0.0, 2.0);
        let proj = sphere_project(Point3::new(0.5, 0.0, 0.0), s);
        assert!(proj.distance < 0.0);
        assert_relative_eq!(proj.distance, -1.5, epsilon = 1e-12);
    }

    #[test]
    fn mesh_query_scans_all_primitive_kinds() {
        let mut mesh = SphereMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
        let c = mesh.add_vertex(Point3::new(2.0, 3.0, 0.0), 1.0);
        mesh.add_face(a, b, c);
        mesh.add_edge(a, b);
        mesh.add_sphere(c);

        let proj = project_point(Point3::new(2.0, -5.0, 0.0), &mesh).unwrap();
        assert_relative_eq!((Point3::new(2.0, -5.0, 0.0) - proj.point).norm(), proj.distance, epsilon = 1e-9);
        assert_relative_eq!(proj.distance, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_mesh_reports_no_primitives() {
        let mesh = SphereMesh::new();
        assert!(matches!(
            project_point(Point3::origin(), &mesh),
            Err(ProjectError::NoPrimitives)
        ));
    }

    #[test]
    fn batch_projection_preserves_order() {
        let mut mesh = SphereMesh::new();
        let v = mesh.add_vertex(Point3::origin(), 1.0);
        mesh.add_sphere(v);

        let points = vec![Point3::new(3.0, 0.0, 0.0), Point3::new(0.0, 5.0, 0.0)];
        let batch = project_points(&points, &mesh).unwrap();
        assert_relative_eq!(batch[0].distance, 2.0, epsilon = 1e-12);
        assert_relative_eq!(batch[1].distance, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn wedge_normals_come_in_mirrored_pairs() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 1.0);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 1.0);

        let front = project::wedge_normal_flipped(s0, s1, s2, false);
        let back = project::wedge_normal_flipped(s0, s1, s2, true);
        // Equal radii: the tangent planes mirror through the center
        // plane.
        assert_relative_eq!((front + back).norm(), 0.0, epsilon = 1e-9);
    }
}

// =============================================================================
// TIER 4: Rendering Data - Instance Buffers
// =============================================================================

mod tier4_rendering {
    use super::*;

    #[test]
    fn instance_buffers_cover_every_primitive_family() {
        let mut mesh = SphereMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = mesh.add_vertex(Point3::new(2.0, 0.0, 0.0), 1.0);
        let c = mesh.add_vertex(Point3::new(1.0, 2.0, 0.0), 1.0);
        mesh.add_face(a, b, c);
        mesh.add_edge(a, b);
        mesh.add_sphere(c);

        let buffers = InstanceBuffers::from_mesh(&mesh);
        // 1 singular + 2 edge joints + 3 face joints.
        assert_eq!(buffers.spheres.len(), 6);
        // 1 edge + 3 face boundary pills.
        assert_eq!(buffers.pills.len(), 4);
        // Two tangent triangles per face.
        assert_eq!(buffers.wedge_vertices.len(), 6);
        assert_eq!(buffers.wedge_indices.len(), 6);
        assert!(!buffers.is_empty());
    }

    #[test]
    fn byte_views_are_pod_casts() {
        let mut mesh = SphereMesh::new();
        let v = mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), 0.5);
        mesh.add_sphere(v);

        let buffers = InstanceBuffers::from_mesh(&mesh);
        let bytes = buffers.sphere_bytes();
        assert_eq!(bytes.len(), 16);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_relative_eq!(floats[3], 0.5);
    }

    #[test]
    fn gpu_types_are_reachable_through_the_umbrella() {
        let inst = gpu::SphereInstance::new([0.0, 0.0, 0.0], 1.0);
        assert_relative_eq!(inst.sphere[3], 1.0);
        let _: &dyn std::fmt::Debug = &types::SphereMesh::new();
    }
}
