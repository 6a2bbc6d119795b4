//! The sphere-mesh container.

use nalgebra::Point3;
use tracing::debug;

use crate::property::PropertySet;
use crate::{
    EdgeHandle, ElementKind, FaceHandle, MeshError, MeshResult, Sphere, SphereHandle, VertexHandle,
};

/// An indexed sphere mesh.
///
/// Vertices are spheres (center + radius). Three primitive tables
/// reference them by index: singular spheres (one vertex), edges (pills,
/// two vertices) and faces (wedges, three vertices in cyclic order).
///
/// # Deletion and garbage
///
/// `delete_*` only marks elements; they stay in the arrays until
/// [`garbage_collection`](Self::garbage_collection) compacts storage and
/// remaps connectivity. Deleting a vertex cascades to every primitive
/// that references it. No handle survives a garbage collection pass.
///
/// # Properties
///
/// Arbitrary named, typed per-element data can be registered per kind;
/// columns are kept length-locked with their element arrays through
/// additions and garbage collection.
///
/// # Example
///
/// ```
/// use smesh_types::{Point3, SphereMesh};
///
/// let mut mesh = SphereMesh::new();
/// let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), 1.0);
/// let v1 = mesh.add_vertex(Point3::new(4.0, 0.0, 0.0), 1.0);
/// let pill = mesh.add_edge(v0, v1);
///
/// assert_eq!(mesh.n_vertices(), 2);
/// assert_eq!(mesh.edge_vertices(pill).unwrap(), [v0, v1]);
/// ```
#[derive(Debug, Clone)]
pub struct SphereMesh {
    vertices: Vec<Sphere>,
    sphere_conn: Vec<u32>,
    edge_conn: Vec<[u32; 2]>,
    face_conn: Vec<[u32; 3]>,

    vertex_deleted: Vec<bool>,
    sphere_deleted: Vec<bool>,
    edge_deleted: Vec<bool>,
    face_deleted: Vec<bool>,

    deleted_vertices: usize,
    deleted_spheres: usize,
    deleted_edges: usize,
    deleted_faces: usize,
    has_garbage: bool,

    vprops: PropertySet,
    sprops: PropertySet,
    eprops: PropertySet,
    fprops: PropertySet,
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::new()
    }
}

fn check(kind: ElementKind, index: u32, len: usize) -> MeshResult<usize> {
    let idx = index as usize;
    if idx < len {
        Ok(idx)
    } else {
        Err(MeshError::IndexOutOfRange { kind, index, len })
    }
}

/// Swap-to-end partition: moves deleted slots to the tail and returns the
/// number of live slots. `swap` must mirror every swap into the other
/// arrays of the same element kind.
fn partition_deleted(deleted: &mut [bool], mut swap: impl FnMut(usize, usize)) -> usize {
    let n = deleted.len();
    if n == 0 {
        return 0;
    }
    let mut i0 = 0;
    let mut i1 = n - 1;
    loop {
        while i0 < i1 && !deleted[i0] {
            i0 += 1;
        }
        while i0 < i1 && deleted[i1] {
            i1 -= 1;
        }
        if i0 >= i1 {
            break;
        }
        deleted.swap(i0, i1);
        swap(i0, i1);
    }
    if deleted[i0] {
        i0
    } else {
        i0 + 1
    }
}

impl SphereMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            sphere_conn: Vec::new(),
            edge_conn: Vec::new(),
            face_conn: Vec::new(),
            vertex_deleted: Vec::new(),
            sphere_deleted: Vec::new(),
            edge_deleted: Vec::new(),
            face_deleted: Vec::new(),
            deleted_vertices: 0,
            deleted_spheres: 0,
            deleted_edges: 0,
            deleted_faces: 0,
            has_garbage: false,
            vprops: PropertySet::new(ElementKind::Vertex),
            sprops: PropertySet::new(ElementKind::Sphere),
            eprops: PropertySet::new(ElementKind::Edge),
            fprops: PropertySet::new(ElementKind::Face),
        }
    }

    /// Reserve capacity per element kind (mainly used by file readers).
    pub fn reserve(&mut self, nv: usize, ns: usize, ne: usize, nf: usize) {
        self.vertices.reserve(nv);
        self.vertex_deleted.reserve(nv);
        self.sphere_conn.reserve(ns);
        self.sphere_deleted.reserve(ns);
        self.edge_conn.reserve(ne);
        self.edge_deleted.reserve(ne);
        self.face_conn.reserve(nf);
        self.face_deleted.reserve(nf);
    }

    /// Remove all elements. Registered properties survive with zero slots.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.sphere_conn.clear();
        self.edge_conn.clear();
        self.face_conn.clear();
        self.vertex_deleted.clear();
        self.sphere_deleted.clear();
        self.edge_deleted.clear();
        self.face_deleted.clear();
        self.deleted_vertices = 0;
        self.deleted_spheres = 0;
        self.deleted_edges = 0;
        self.deleted_faces = 0;
        self.has_garbage = false;
        self.vprops.clear_values();
        self.sprops.clear_values();
        self.eprops.clear_values();
        self.fprops.clear_values();
    }

    // =========================================================================
    // Element addition
    // =========================================================================

    /// Add a vertex with position `center` and radius `radius`.
    pub fn add_vertex(&mut self, center: Point3<f64>, radius: f64) -> VertexHandle {
        self.add_vertex_sphere(Sphere::new(center, radius))
    }

    /// Add a vertex described by a [`Sphere`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex_sphere(&mut self, sphere: Sphere) -> VertexHandle {
        self.vertices.push(sphere);
        self.vertex_deleted.push(false);
        self.vprops.push_default();
        VertexHandle::new(self.vertices.len() as u32 - 1)
    }

    /// Add a singular-sphere primitive at vertex `v`.
    ///
    /// The vertex handle is stored as-is and not validated (file loading
    /// may legitimately create forward or dangling references); accessors
    /// report dangling connectivity as [`MeshError::IndexOutOfRange`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_sphere(&mut self, v: VertexHandle) -> SphereHandle {
        self.sphere_conn.push(v.index());
        self.sphere_deleted.push(false);
        self.sprops.push_default();
        SphereHandle::new(self.sphere_conn.len() as u32 - 1)
    }

    /// Add an edge (pill) between vertices `v0` and `v1`.
    ///
    /// Handles are stored unvalidated; see [`add_sphere`](Self::add_sphere).
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_edge(&mut self, v0: VertexHandle, v1: VertexHandle) -> EdgeHandle {
        self.edge_conn.push([v0.index(), v1.index()]);
        self.edge_deleted.push(false);
        self.eprops.push_default();
        EdgeHandle::new(self.edge_conn.len() as u32 - 1)
    }

    /// Add a face (wedge) between vertices `v0`, `v1` and `v2`.
    ///
    /// Handles are stored unvalidated; see [`add_sphere`](Self::add_sphere).
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_face(&mut self, v0: VertexHandle, v1: VertexHandle, v2: VertexHandle) -> FaceHandle {
        self.face_conn.push([v0.index(), v1.index(), v2.index()]);
        self.face_deleted.push(false);
        self.fprops.push_default();
        FaceHandle::new(self.face_conn.len() as u32 - 1)
    }

    // =========================================================================
    // Checked accessors
    // =========================================================================

    /// Get the sphere stored at vertex `v`.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `v` is stale or dangling.
    pub fn vertex_sphere(&self, v: VertexHandle) -> MeshResult<Sphere> {
        let idx = check(ElementKind::Vertex, v.index(), self.vertices.len())?;
        Ok(self.vertices[idx])
    }

    /// Overwrite the sphere stored at vertex `v`.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `v` is stale or dangling.
    pub fn set_vertex_sphere(&mut self, v: VertexHandle, sphere: Sphere) -> MeshResult<()> {
        let idx = check(ElementKind::Vertex, v.index(), self.vertices.len())?;
        self.vertices[idx] = sphere;
        Ok(())
    }

    /// Get the vertex referenced by singular sphere `s`.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `s` is stale.
    pub fn sphere_vertex(&self, s: SphereHandle) -> MeshResult<VertexHandle> {
        let idx = check(ElementKind::Sphere, s.index(), self.sphere_conn.len())?;
        Ok(VertexHandle::new(self.sphere_conn[idx]))
    }

    /// Get the two vertices of edge `e`.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `e` is stale.
    pub fn edge_vertices(&self, e: EdgeHandle) -> MeshResult<[VertexHandle; 2]> {
        let idx = check(ElementKind::Edge, e.index(), self.edge_conn.len())?;
        Ok(self.edge_conn[idx].map(VertexHandle::new))
    }

    /// Get the three vertices of face `f` in cyclic order.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `f` is stale.
    pub fn face_vertices(&self, f: FaceHandle) -> MeshResult<[VertexHandle; 3]> {
        let idx = check(ElementKind::Face, f.index(), self.face_conn.len())?;
        Ok(self.face_conn[idx].map(VertexHandle::new))
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Mark vertex `v` deleted, cascading to every primitive referencing it.
    ///
    /// Linear scan over all primitive tables; deletion is assumed rare and
    /// batched before a [`garbage_collection`](Self::garbage_collection).
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `v` is stale.
    pub fn delete_vertex(&mut self, v: VertexHandle) -> MeshResult<()> {
        let idx = check(ElementKind::Vertex, v.index(), self.vertices.len())?;
        if self.vertex_deleted[idx] {
            return Ok(());
        }

        let target = v.index();
        for i in 0..self.sphere_conn.len() {
            if !self.sphere_deleted[i] && self.sphere_conn[i] == target {
                self.sphere_deleted[i] = true;
                self.deleted_spheres += 1;
            }
        }
        for i in 0..self.edge_conn.len() {
            if !self.edge_deleted[i] && self.edge_conn[i].contains(&target) {
                self.edge_deleted[i] = true;
                self.deleted_edges += 1;
            }
        }
        for i in 0..self.face_conn.len() {
            if !self.face_deleted[i] && self.face_conn[i].contains(&target) {
                self.face_deleted[i] = true;
                self.deleted_faces += 1;
            }
        }

        self.vertex_deleted[idx] = true;
        self.deleted_vertices += 1;
        self.has_garbage = true;
        Ok(())
    }

    /// Mark singular sphere `s` deleted. Idempotent.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `s` is stale.
    pub fn delete_sphere(&mut self, s: SphereHandle) -> MeshResult<()> {
        let idx = check(ElementKind::Sphere, s.index(), self.sphere_conn.len())?;
        if !self.sphere_deleted[idx] {
            self.sphere_deleted[idx] = true;
            self.deleted_spheres += 1;
            self.has_garbage = true;
        }
        Ok(())
    }

    /// Mark edge `e` deleted. Idempotent.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `e` is stale.
    pub fn delete_edge(&mut self, e: EdgeHandle) -> MeshResult<()> {
        let idx = check(ElementKind::Edge, e.index(), self.edge_conn.len())?;
        if !self.edge_deleted[idx] {
            self.edge_deleted[idx] = true;
            self.deleted_edges += 1;
            self.has_garbage = true;
        }
        Ok(())
    }

    /// Mark face `f` deleted. Idempotent.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `f` is stale.
    pub fn delete_face(&mut self, f: FaceHandle) -> MeshResult<()> {
        let idx = check(ElementKind::Face, f.index(), self.face_conn.len())?;
        if !self.face_deleted[idx] {
            self.face_deleted[idx] = true;
            self.deleted_faces += 1;
            self.has_garbage = true;
        }
        Ok(())
    }

    // =========================================================================
    // Counts, validity, iteration
    // =========================================================================

    /// Number of vertices, deleted included.
    #[must_use]
    pub fn vertices_len(&self) -> usize {
        self.vertices.len()
    }

    /// Number of singular spheres, deleted included.
    #[must_use]
    pub fn spheres_len(&self) -> usize {
        self.sphere_conn.len()
    }

    /// Number of edges, deleted included.
    #[must_use]
    pub fn edges_len(&self) -> usize {
        self.edge_conn.len()
    }

    /// Number of faces, deleted included.
    #[must_use]
    pub fn faces_len(&self) -> usize {
        self.face_conn.len()
    }

    /// Number of live vertices.
    #[must_use]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len() - self.deleted_vertices
    }

    /// Number of live singular spheres.
    #[must_use]
    pub fn n_spheres(&self) -> usize {
        self.sphere_conn.len() - self.deleted_spheres
    }

    /// Number of live edges.
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.edge_conn.len() - self.deleted_edges
    }

    /// Number of live faces.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.face_conn.len() - self.deleted_faces
    }

    /// Whether the mesh has no live primitives at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_spheres() == 0 && self.n_edges() == 0 && self.n_faces() == 0
    }

    /// Whether `v` is within bounds for this mesh.
    #[must_use]
    pub fn is_valid_vertex(&self, v: VertexHandle) -> bool {
        v.idx() < self.vertices.len()
    }

    /// Whether `s` is within bounds for this mesh.
    #[must_use]
    pub fn is_valid_sphere(&self, s: SphereHandle) -> bool {
        s.idx() < self.sphere_conn.len()
    }

    /// Whether `e` is within bounds for this mesh.
    #[must_use]
    pub fn is_valid_edge(&self, e: EdgeHandle) -> bool {
        e.idx() < self.edge_conn.len()
    }

    /// Whether `f` is within bounds for this mesh.
    #[must_use]
    pub fn is_valid_face(&self, f: FaceHandle) -> bool {
        f.idx() < self.face_conn.len()
    }

    /// Whether vertex `v` is marked deleted.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `v` is stale.
    pub fn is_deleted_vertex(&self, v: VertexHandle) -> MeshResult<bool> {
        let idx = check(ElementKind::Vertex, v.index(), self.vertices.len())?;
        Ok(self.vertex_deleted[idx])
    }

    /// Whether singular sphere `s` is marked deleted.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `s` is stale.
    pub fn is_deleted_sphere(&self, s: SphereHandle) -> MeshResult<bool> {
        let idx = check(ElementKind::Sphere, s.index(), self.sphere_conn.len())?;
        Ok(self.sphere_deleted[idx])
    }

    /// Whether edge `e` is marked deleted.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `e` is stale.
    pub fn is_deleted_edge(&self, e: EdgeHandle) -> MeshResult<bool> {
        let idx = check(ElementKind::Edge, e.index(), self.edge_conn.len())?;
        Ok(self.edge_deleted[idx])
    }

    /// Whether face `f` is marked deleted.
    ///
    /// # Errors
    ///
    /// [`MeshError::IndexOutOfRange`] if `f` is stale.
    pub fn is_deleted_face(&self, f: FaceHandle) -> MeshResult<bool> {
        let idx = check(ElementKind::Face, f.index(), self.face_conn.len())?;
        Ok(self.face_deleted[idx])
    }

    /// Iterate over all live vertex handles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertex_deleted
            .iter()
            .enumerate()
            .filter(|(_, &deleted)| !deleted)
            .map(|(i, _)| VertexHandle::new(i as u32))
    }

    /// Iterate over all live singular-sphere handles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn spheres(&self) -> impl Iterator<Item = SphereHandle> + '_ {
        self.sphere_deleted
            .iter()
            .enumerate()
            .filter(|(_, &deleted)| !deleted)
            .map(|(i, _)| SphereHandle::new(i as u32))
    }

    /// Iterate over all live edge handles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.edge_deleted
            .iter()
            .enumerate()
            .filter(|(_, &deleted)| !deleted)
            .map(|(i, _)| EdgeHandle::new(i as u32))
    }

    /// Iterate over all live face handles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.face_deleted
            .iter()
            .enumerate()
            .filter(|(_, &deleted)| !deleted)
            .map(|(i, _)| FaceHandle::new(i as u32))
    }

    // =========================================================================
    // Garbage collection
    // =========================================================================

    /// Whether any element is marked deleted.
    #[must_use]
    pub fn garbage(&self) -> bool {
        self.has_garbage
    }

    /// Compact all element arrays and remap connectivity.
    ///
    /// Deleted elements are removed by swap-to-end partition and truncate;
    /// surviving sphere/edge/face connectivity is rewritten through the
    /// vertex old-to-new index map. Property columns are permuted and
    /// truncated in lock-step.
    ///
    /// Invalidates every previously held handle. Connectivity that was
    /// dangling before collection (indices past the vertex array) stays
    /// dangling afterwards, mapped to `u32::MAX`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn garbage_collection(&mut self) {
        let before = (
            self.vertices.len(),
            self.sphere_conn.len(),
            self.edge_conn.len(),
            self.face_conn.len(),
        );

        // Vertices: partition while recording where each old slot went.
        let n = self.vertices.len();
        let mut old_of: Vec<u32> = (0..n as u32).collect();
        let nv = {
            let Self {
                ref mut vertices,
                ref mut vertex_deleted,
                ref mut vprops,
                ..
            } = *self;
            partition_deleted(vertex_deleted, |a, b| {
                vertices.swap(a, b);
                vprops.swap(a, b);
                old_of.swap(a, b);
            })
        };

        let mut vmap = vec![u32::MAX; n];
        for (new, &old) in old_of.iter().take(nv).enumerate() {
            vmap[old as usize] = new as u32;
        }

        self.vertices.truncate(nv);
        self.vertex_deleted.truncate(nv);
        self.vprops.truncate(nv);

        // Singular spheres.
        let ns = {
            let Self {
                ref mut sphere_conn,
                ref mut sphere_deleted,
                ref mut sprops,
                ..
            } = *self;
            partition_deleted(sphere_deleted, |a, b| {
                sphere_conn.swap(a, b);
                sprops.swap(a, b);
            })
        };
        self.sphere_conn.truncate(ns);
        self.sphere_deleted.truncate(ns);
        self.sprops.truncate(ns);

        // Edges.
        let ne = {
            let Self {
                ref mut edge_conn,
                ref mut edge_deleted,
                ref mut eprops,
                ..
            } = *self;
            partition_deleted(edge_deleted, |a, b| {
                edge_conn.swap(a, b);
                eprops.swap(a, b);
            })
        };
        self.edge_conn.truncate(ne);
        self.edge_deleted.truncate(ne);
        self.eprops.truncate(ne);

        // Faces.
        let nf = {
            let Self {
                ref mut face_conn,
                ref mut face_deleted,
                ref mut fprops,
                ..
            } = *self;
            partition_deleted(face_deleted, |a, b| {
                face_conn.swap(a, b);
                fprops.swap(a, b);
            })
        };
        self.face_conn.truncate(nf);
        self.face_deleted.truncate(nf);
        self.fprops.truncate(nf);

        // Remap surviving connectivity through the vertex map.
        let remap = |old: u32| vmap.get(old as usize).copied().unwrap_or(u32::MAX);
        for conn in &mut self.sphere_conn {
            *conn = remap(*conn);
        }
        for conn in &mut self.edge_conn {
            *conn = conn.map(remap);
        }
        for conn in &mut self.face_conn {
            *conn = conn.map(remap);
        }

        self.deleted_vertices = 0;
        self.deleted_spheres = 0;
        self.deleted_edges = 0;
        self.deleted_faces = 0;
        self.has_garbage = false;

        debug!(
            removed_vertices = before.0 - nv,
            removed_spheres = before.1 - ns,
            removed_edges = before.2 - ne,
            removed_faces = before.3 - nf,
            "garbage collection"
        );
    }
}

// Per-kind property APIs. The four kinds are identical in shape; the
// macro keeps their method sets in sync.
macro_rules! property_api {
    ($field:ident, $kind:literal, $add:ident, $get:ident, $get_mut:ident, $remove:ident, $len:ident) => {
        #[doc = concat!("Register a new ", $kind, " property.")]
        ///
        /// Existing elements receive `default`; future elements are
        /// appended with it automatically.
        ///
        /// # Errors
        ///
        /// [`MeshError::PropertyExists`] if the name is taken.
        pub fn $add<T: Clone + Send + Sync + 'static>(
            &mut self,
            name: &str,
            default: T,
        ) -> MeshResult<()> {
            let len = self.$len();
            self.$field.add(name, default, len)
        }

        #[doc = concat!("Get a ", $kind, " property column, indexed by handle index.")]
        ///
        /// # Errors
        ///
        /// [`MeshError::PropertyMissing`] for an unknown name,
        /// [`MeshError::PropertyTypeMismatch`] if `T` is not the stored type.
        pub fn $get<T: Clone + Send + Sync + 'static>(&self, name: &str) -> MeshResult<&[T]> {
            self.$field.get(name)
        }

        #[doc = concat!("Get a mutable ", $kind, " property column.")]
        ///
        /// # Errors
        ///
        /// [`MeshError::PropertyMissing`] for an unknown name,
        /// [`MeshError::PropertyTypeMismatch`] if `T` is not the stored type.
        pub fn $get_mut<T: Clone + Send + Sync + 'static>(
            &mut self,
            name: &str,
        ) -> MeshResult<&mut [T]> {
            self.$field.get_mut(name)
        }

        #[doc = concat!("Remove a ", $kind, " property. Returns whether it existed.")]
        pub fn $remove(&mut self, name: &str) -> bool {
            self.$field.remove(name)
        }
    };
}

impl SphereMesh {
    property_api!(
        vprops,
        "vertex",
        add_vertex_property,
        vertex_property,
        vertex_property_mut,
        remove_vertex_property,
        vertices_len
    );
    property_api!(
        sprops,
        "sphere",
        add_sphere_property,
        sphere_property,
        sphere_property_mut,
        remove_sphere_property,
        spheres_len
    );
    property_api!(
        eprops,
        "edge",
        add_edge_property,
        edge_property,
        edge_property_mut,
        remove_edge_property,
        edges_len
    );
    property_api!(
        fprops,
        "face",
        add_face_property,
        face_property,
        face_property_mut,
        remove_face_property,
        faces_len
    );
}
