//! The `.smo` line-oriented sphere-mesh text format.
//!
//! A `.smo` file is a sequence of records, one per line:
//!
//! ```text
//! v x y z r    # vertex: sphere center and radius
//! s i          # singular sphere at vertex i
//! p i j        # pill over vertices i and j
//! w i j k      # wedge over vertices i, j and k
//! ```
//!
//! Parsing is deliberately lenient: the text is scanned per record kind
//! (`v` first, then `s`, `p`, `w`), so comments, blank lines, and
//! unknown records are ignored rather than rejected, and a matched
//! record whose numbers fail to convert is skipped. Vertex indices are
//! stored as-is without validation; the checked accessors on
//! [`SphereMesh`] surface dangling references later.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use regex::Regex;
use smesh_types::{EdgeHandle, FaceHandle, Point3, SphereHandle, SphereMesh, VertexHandle};
use tracing::debug;

use crate::error::{SmoError, SmoResult};

/// Numeric atom for vertex records. Wider than strictly valid floats;
/// conversion failures are skipped per the lenient policy.
const FLOAT: &str = r"[0-9eE\+\-\.]+";

fn pattern(re: &str) -> Regex {
    // Record patterns are constants; compilation cannot fail at runtime.
    #[allow(clippy::expect_used)]
    Regex::new(re).expect("constant record pattern")
}

/// Parses `.smo` text into a mesh. Never fails; see the module docs
/// for the lenient policy.
///
/// ```
/// use smesh_io::parse_smo;
///
/// let mesh = parse_smo("v 0 0 0 1\nv 4 0 0 1\np 0 1\n");
/// assert_eq!(mesh.n_vertices(), 2);
/// assert_eq!(mesh.n_edges(), 1);
/// ```
#[must_use]
pub fn parse_smo(text: &str) -> SphereMesh {
    let mut mesh = SphereMesh::new();

    let v_re = pattern(&format!(
        r"(?m)^\s*v\s+({FLOAT})\s+({FLOAT})\s+({FLOAT})\s+({FLOAT})\s*$"
    ));
    for cap in v_re.captures_iter(text) {
        let mut nums = [0.0f64; 4];
        let mut ok = true;
        for (slot, group) in nums.iter_mut().zip(1..=4) {
            match cap[group].parse::<f64>() {
                Ok(x) => *slot = x,
                Err(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            mesh.add_vertex(Point3::new(nums[0], nums[1], nums[2]), nums[3]);
        }
    }

    let s_re = pattern(r"(?m)^\s*s\s+(\d+)\s*$");
    for cap in s_re.captures_iter(text) {
        if let Ok(i) = cap[1].parse::<u32>() {
            mesh.add_sphere(VertexHandle::new(i));
        }
    }

    let p_re = pattern(r"(?m)^\s*p\s+(\d+)\s+(\d+)\s*$");
    for cap in p_re.captures_iter(text) {
        if let (Ok(i), Ok(j)) = (cap[1].parse::<u32>(), cap[2].parse::<u32>()) {
            mesh.add_edge(VertexHandle::new(i), VertexHandle::new(j));
        }
    }

    let w_re = pattern(r"(?m)^\s*w\s+(\d+)\s+(\d+)\s+(\d+)\s*$");
    for cap in w_re.captures_iter(text) {
        if let (Ok(i), Ok(j), Ok(k)) = (
            cap[1].parse::<u32>(),
            cap[2].parse::<u32>(),
            cap[3].parse::<u32>(),
        ) {
            mesh.add_face(VertexHandle::new(i), VertexHandle::new(j), VertexHandle::new(k));
        }
    }

    mesh
}

/// Serializes a mesh to `.smo` text: vertices, spheres, pills, wedges,
/// in that order, one record per line.
///
/// Every recorded element is written, including soft-deleted ones; call
/// [`SphereMesh::garbage_collection`] first to drop those. Floats use
/// default formatting, so round-trips are approximate, not bit-exact.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // element counts fit u32 by construction
pub fn write_smo(mesh: &SphereMesh) -> String {
    let mut out = String::new();
    for i in 0..mesh.vertices_len() {
        if let Ok(s) = mesh.vertex_sphere(VertexHandle::new(i as u32)) {
            let c = s.center;
            let _ = writeln!(out, "v {} {} {} {}", c.x, c.y, c.z, s.radius);
        }
    }
    for i in 0..mesh.spheres_len() {
        if let Ok(v) = mesh.sphere_vertex(SphereHandle::new(i as u32)) {
            let _ = writeln!(out, "s {}", v.index());
        }
    }
    for i in 0..mesh.edges_len() {
        if let Ok([a, b]) = mesh.edge_vertices(EdgeHandle::new(i as u32)) {
            let _ = writeln!(out, "p {} {}", a.index(), b.index());
        }
    }
    for i in 0..mesh.faces_len() {
        if let Ok([a, b, c]) = mesh.face_vertices(FaceHandle::new(i as u32)) {
            let _ = writeln!(out, "w {} {} {}", a.index(), b.index(), c.index());
        }
    }
    out
}

/// Loads a `.smo` file.
///
/// # Errors
///
/// [`SmoError::FileNotFound`] if the path does not exist, [`SmoError::Io`]
/// for any other filesystem failure.
pub fn load_smo<P: AsRef<Path>>(path: P) -> SmoResult<SphereMesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SmoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SmoError::Io(e)
        }
    })?;
    let mesh = parse_smo(&text);
    debug!(
        path = %path.display(),
        vertices = mesh.n_vertices(),
        spheres = mesh.n_spheres(),
        edges = mesh.n_edges(),
        faces = mesh.n_faces(),
        "loaded .smo file"
    );
    Ok(mesh)
}

/// Saves a mesh as a `.smo` file, creating or truncating `path`.
///
/// # Errors
///
/// [`SmoError::Io`] if the file cannot be written.
pub fn save_smo<P: AsRef<Path>>(mesh: &SphereMesh, path: P) -> SmoResult<()> {
    let path = path.as_ref();
    fs::write(path, write_smo(mesh))?;
    debug!(
        path = %path.display(),
        vertices = mesh.n_vertices(),
        spheres = mesh.n_spheres(),
        edges = mesh.n_edges(),
        faces = mesh.n_faces(),
        "saved .smo file"
    );
    Ok(())
}
