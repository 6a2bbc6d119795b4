//! Closed-form projection onto the three sphere-mesh primitives.
//!
//! All functions are pure and operate on [`Sphere`] values and query
//! points; none touch a mesh. The pill and wedge routines build on the
//! bitangent-cone construction: the surface between two spheres of
//! different radii is swept by the cone tangent to both, not by a
//! linearly interpolated cylinder, so the axial projection has to be
//! slant-corrected by the cone half-angle before interpolating.
//!
//! # Degenerate inputs
//!
//! The formulas divide by inter-center distances and take `asin` of
//! radius-difference ratios. A query at a sphere center, a zero-length
//! pill axis, or a radius difference exceeding the center distance all
//! produce non-finite intermediates. The crate-wide policy is
//! *saturation*: [`finite_or_zero`] maps NaN and infinity to `0.0` at the
//! points where the original formulas would otherwise propagate them
//! (the pill parameter, the barycentric inverse area, the wedge normal).
//! See the crate docs for what that means geometrically in each case.

use nalgebra::{Point3, Vector3};
use smesh_types::Sphere;

/// A projection result: the closest surface point and the signed
/// distance from the query to the surface (negative inside).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest point on the primitive's surface.
    pub point: Point3<f64>,
    /// Signed distance from the query point to the surface.
    pub distance: f64,
}

/// Saturating guard for non-finite intermediates: NaN and infinity
/// collapse to `0.0`, everything else passes through.
#[inline]
#[must_use]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Project `p` onto the surface of sphere `s`.
///
/// The projected point is `c + r * (p - c) / |p - c|`; the signed
/// distance is `|p - c| - r`, negative when `p` is inside.
///
/// A query exactly at the center has no well-defined direction and
/// yields a NaN point; mesh-level callers never compare NaN distances as
/// smaller, so such candidates lose against any finite one.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use smesh_types::Sphere;
/// use smesh_project::sphere_project;
///
/// let s = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
/// let proj = sphere_project(Point3::new(3.0, 0.0, 0.0), s);
/// assert!((proj.point.x - 1.0).abs() < 1e-12);
/// assert!((proj.distance - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn sphere_project(p: Point3<f64>, s: Sphere) -> Projection {
    let d = p - s.center;
    let dist = d.norm();
    Projection {
        point: s.center + d * (s.radius / dist),
        distance: dist - s.radius,
    }
}

/// Project `p` onto the pill (tapered capsule) spanned by `s0` and `s1`.
///
/// The pill surface is the bitangent cone between the two end spheres,
/// capped by the spheres themselves. The axial parameter is found by
/// projecting `p` onto the axis and correcting for the cone slant
/// (`tan` of the bitangent half-angle times the radial offset); it is
/// then clamped to `[0, 1]`, so queries beyond either cap degrade to
/// plain sphere projection at that endpoint. The final answer is the
/// sphere projection onto the sphere interpolated at the parameter.
///
/// A radius difference larger than the axis length has no bitangent
/// cone; the half-angle goes NaN and the saturation policy lands the
/// parameter at `t = 0`, i.e. the `s0` cap.
#[must_use]
pub fn pill_project(p: Point3<f64>, s0: Sphere, s1: Sphere) -> Projection {
    let axis = s1.center - s0.center;
    let l = axis.norm();
    let an = axis / l;

    // Radial component of the query offset.
    let d = p - s0.center;
    let radial = d - an * d.dot(&an);

    // Half-angle of the bitangent cone; NaN when |r1 - r0| > l.
    let beta = ((s1.radius - s0.radius) / l).asin();

    // Slant correction along the axis.
    let offset = an * (radial.norm() * beta.tan());

    let t = an.dot(&(p + radial + offset - s0.center)) / l;
    let t = finite_or_zero(t).clamp(0.0, 1.0);

    sphere_project(p, Sphere::lerp(s0, s1, t))
}

/// Barycentric coordinates of `p` with respect to triangle `(v0, v1, v2)`,
/// by the cross-product area formula.
///
/// For `p` off the triangle plane the result is the barycentric
/// coordinate of its in-plane projection. A degenerate (zero-area)
/// triangle yields the zero vector via the saturation policy, which
/// callers detect through the coordinates not summing to one.
#[must_use]
pub fn barycentric(
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
    p: Point3<f64>,
) -> Vector3<f64> {
    let a0 = (v1 - v0).cross(&(v2 - v0));
    let a1 = (v2 - v1).cross(&(v0 - v1));
    let a2 = (v0 - v2).cross(&(v1 - v2));
    let l0 = v0 - p;
    let l1 = v1 - p;
    let l2 = v2 - p;
    let inv_area = finite_or_zero(1.0 / a0.norm_squared());
    Vector3::new(
        l1.cross(&l2).dot(&a0),
        l2.cross(&l0).dot(&a1),
        l0.cross(&l1).dot(&a2),
    ) * inv_area
}

/// Shared tail of the wedge-normal construction, given the (possibly
/// sign-flipped) unit triangle normal.
fn wedge_normal_with(s0: Sphere, s1: Sphere, s2: Sphere, n_tri: Vector3<f64>) -> Vector3<f64> {
    let c0c1 = s1.center - s0.center;
    let c0c2 = s2.center - s0.center;

    // Tangent-cone angle between spheres 0 and 2.
    let beta = ((s2.radius - s0.radius) / c0c2.norm()).asin();

    let a = -c0c2.normalize();
    let b = a.cross(&n_tri);

    let (sb, cb) = beta.sin_cos();

    // Tangent-cone angle between spheres 0 and 1, solved in the rotated
    // basis (a, b, n_tri).
    let alpha = ((s0.radius - s1.radius - sb * c0c1.dot(&a)) / (cb * c0c1.dot(&b))).asin();
    let (sa, ca) = alpha.sin_cos();

    a * sb + (n_tri * ca + b * sa) * cb
}

/// Unit normal of the common tangent plane touching all three spheres,
/// on the side given by the triangle winding.
///
/// Returns NaN components when no common tangent plane exists (one
/// sphere swallowed by the others, or a degenerate center triangle);
/// [`wedge_project`] saturates those before use.
#[must_use]
pub fn wedge_normal(s0: Sphere, s1: Sphere, s2: Sphere) -> Vector3<f64> {
    let c0c1 = s1.center - s0.center;
    let c0c2 = s2.center - s0.center;
    let n_tri = c0c1.cross(&c0c2).normalize();
    wedge_normal_with(s0, s1, s2, n_tri)
}

/// [`wedge_normal`], but with the triangle normal flipped to face the
/// query point `p`, so the tangent plane is the one on `p`'s side.
#[must_use]
pub fn wedge_normal_toward(s0: Sphere, s1: Sphere, s2: Sphere, p: Point3<f64>) -> Vector3<f64> {
    let c0c1 = s1.center - s0.center;
    let c0c2 = s2.center - s0.center;
    let mut n_tri = c0c1.cross(&c0c2).normalize();
    n_tri *= 1.0f64.copysign(n_tri.dot(&(p - s0.center)));
    wedge_normal_with(s0, s1, s2, n_tri)
}

/// [`wedge_normal`] for an oriented wedge: `flipped` selects the back
/// patch by reflecting the front normal across the center-triangle
/// plane (a Householder reflection).
#[must_use]
pub fn wedge_normal_flipped(s0: Sphere, s1: Sphere, s2: Sphere, flipped: bool) -> Vector3<f64> {
    let normal = wedge_normal(s0, s1, s2);
    if flipped {
        let c0c1 = s1.center - s0.center;
        let c0c2 = s2.center - s0.center;
        let n_tri = c0c1.cross(&c0c2);
        normal - n_tri * (2.0 * n_tri.dot(&normal) / n_tri.norm_squared())
    } else {
        normal
    }
}

/// Project `p` onto the wedge blending `s0`, `s1` and `s2`.
///
/// The interior candidate comes from the tangent patch facing `p`:
/// project `p` along the tangent-plane normal, take barycentric
/// coordinates among the three tangent points, and sphere-project onto
/// the barycentric blend of the three spheres. When the coordinates do
/// not sum to one within `1e-3` (query outside the patch, or degenerate
/// normal), the blend collapses to vertex 0 as an explicit policy.
///
/// The returned projection is the minimum-signed-distance winner among
/// the interior candidate and the three boundary pills, which makes the
/// result well defined everywhere in space: outside the tangent region
/// the wedge degrades gracefully to its boundary capsules.
#[must_use]
pub fn wedge_project(p: Point3<f64>, s0: Sphere, s1: Sphere, s2: Sphere) -> Projection {
    let n = wedge_normal_toward(s0, s1, s2, p);
    let n = Vector3::new(
        finite_or_zero(n.x),
        finite_or_zero(n.y),
        finite_or_zero(n.z),
    );

    let tt0 = s0.center + n * s0.radius;
    let tt1 = s1.center + n * s1.radius;
    let tt2 = s2.center + n * s2.radius;
    let ttp = p - n * (p - tt0).dot(&n);

    let bary = barycentric(tt0, tt1, tt2, ttp).abs();
    let weights = if (bary.sum() - 1.0).abs() > 1e-3 {
        [1.0, 0.0, 0.0]
    } else {
        [bary.x, bary.y, bary.z]
    };

    let blended = Sphere::blend([s0, s1, s2], weights);
    let mut best = sphere_project(p, blended);

    for candidate in [
        pill_project(p, s0, s1),
        pill_project(p, s1, s2),
        pill_project(p, s2, s0),
    ] {
        if candidate.distance < best.distance {
            best = candidate;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_at(x: f64) -> Sphere {
        Sphere::from_coords(x, 0.0, 0.0, 1.0)
    }

    #[test]
    fn sphere_projection_lies_on_surface() {
        let s = Sphere::from_coords(1.0, -2.0, 0.5, 1.5);
        let p = Point3::new(10.0, 4.0, -3.0);

        let proj = sphere_project(p, s);
        assert_relative_eq!((proj.point - s.center).norm(), s.radius, epsilon = 1e-12);

        // The projected point lies on the segment from the center through p.
        let dir = (p - s.center).normalize();
        let along = (proj.point - s.center).normalize();
        assert_relative_eq!(dir.dot(&along), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn sphere_signed_distance_inside() {
        let s = Sphere::from_coords(0.0, 0.0, 0.0, 2.0);
        let proj = sphere_project(Point3::new(1.0, 0.0, 0.0), s);
        assert_relative_eq!(proj.distance, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pill_equal_radii_is_a_cylinder() {
        // Two unit spheres at x=0 and x=4; above the middle of the axis
        // the surface is the cylinder of radius 1.
        let proj = pill_project(Point3::new(2.0, 5.0, 0.0), unit_at(0.0), unit_at(4.0));

        assert_relative_eq!(proj.point.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(proj.point.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(proj.point.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(proj.distance, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn pill_degenerates_to_end_spheres() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(4.0, 0.0, 0.0, 0.5);

        // Far beyond either cap the pill is just the end sphere.
        let beyond0 = Point3::new(-7.0, 0.5, 0.0);
        let got = pill_project(beyond0, s0, s1);
        let want = sphere_project(beyond0, s0);
        assert_relative_eq!((got.point - want.point).norm(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(got.distance, want.distance, epsilon = 1e-9);

        let beyond1 = Point3::new(12.0, -0.5, 0.0);
        let got = pill_project(beyond1, s0, s1);
        let want = sphere_project(beyond1, s1);
        assert_relative_eq!((got.point - want.point).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn pill_is_symmetric_in_its_endpoints() {
        let s0 = Sphere::from_coords(-1.0, 2.0, 0.0, 0.75);
        let s1 = Sphere::from_coords(3.0, -1.0, 1.0, 1.5);

        for p in [
            Point3::new(1.0, 4.0, 0.0),
            Point3::new(-5.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, -6.0),
            Point3::new(0.5, 0.5, 0.5),
        ] {
            let fwd = pill_project(p, s0, s1);
            let rev = pill_project(p, s1, s0);
            assert_relative_eq!((fwd.point - rev.point).norm(), 0.0, epsilon = 1e-9);
            assert_relative_eq!(fwd.distance, rev.distance, epsilon = 1e-9);
        }
    }

    #[test]
    fn pill_tapered_slant_is_not_a_naive_lerp() {
        // With different end radii the surface is the bitangent cone.
        // Above the axis midpoint, the naive interpolation would give a
        // virtual radius of 0.75; the slant correction shifts the
        // tangent parameter toward the bigger end.
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(4.0, 0.0, 0.0, 0.5);
        let p = Point3::new(2.0, 3.0, 0.0);

        let proj = pill_project(p, s0, s1);

        // The cone slopes downward from s0 to s1, so the contact point
        // sits before the midpoint.
        assert!(proj.point.x < 2.0);

        // The contact point must lie on the bitangent line in the xz=0
        // plane: y = cos(beta) * (r0 + x * (r1 - r0) / l) rearranged via
        // the tangent construction. Check tangency instead: the surface
        // point is at distance lerp(r0, r1, t) from the lerped center.
        let axis_t = proj.point.x / 4.0;
        // Not exact (the contact parameter differs from the foot of the
        // point), so verify through the signed distance being consistent
        // with an exterior query.
        assert!(axis_t > 0.0 && axis_t < 1.0);
        assert!(proj.distance > 0.0);
        assert_relative_eq!((p - proj.point).norm(), proj.distance, epsilon = 1e-9);
    }

    #[test]
    fn pill_swallowed_sphere_saturates_to_first_cap() {
        // Radius difference exceeds the axis length: no bitangent cone
        // exists, and the policy parks the parameter at t = 0.
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 5.0);
        let s1 = Sphere::from_coords(1.0, 0.0, 0.0, 0.1);
        let p = Point3::new(0.5, 8.0, 0.0);

        let got = pill_project(p, s0, s1);
        let want = sphere_project(p, s0);
        assert_relative_eq!((got.point - want.point).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn barycentric_interior_and_vertices() {
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(2.0, 0.0, 0.0);
        let v2 = Point3::new(0.0, 2.0, 0.0);

        let at_v1 = barycentric(v0, v1, v2, v1);
        assert_relative_eq!(at_v1.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(at_v1.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(at_v1.z, 0.0, epsilon = 1e-12);

        let centroid = Point3::new(2.0 / 3.0, 2.0 / 3.0, 0.0);
        let at_c = barycentric(v0, v1, v2, centroid);
        assert_relative_eq!(at_c.sum(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(at_c.x, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn barycentric_degenerate_triangle_is_zero() {
        let v = Point3::new(1.0, 1.0, 1.0);
        let b = barycentric(v, v, v, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b, Vector3::zeros());
    }

    #[test]
    fn wedge_normal_is_tangent_to_all_three() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 0.5);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 0.5);

        let n = wedge_normal(s0, s1, s2);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-9);

        // The plane through c_i + n*r_i with normal n must touch all
        // three spheres: every tangent point has equal plane offset.
        let o0 = n.dot(&(s0.center.coords + n * s0.radius));
        let o1 = n.dot(&(s1.center.coords + n * s1.radius));
        let o2 = n.dot(&(s2.center.coords + n * s2.radius));
        assert_relative_eq!(o0, o1, epsilon = 1e-9);
        assert_relative_eq!(o0, o2, epsilon = 1e-9);
    }

    #[test]
    fn wedge_normal_equal_radii_is_plane_normal() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(3.0, 0.0, 0.0, 1.0);
        let s2 = Sphere::from_coords(0.0, 3.0, 0.0, 1.0);

        let n = wedge_normal(s0, s1, s2);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(n.z.abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn wedge_normal_toward_faces_the_query() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 0.5);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 0.5);

        let above = wedge_normal_toward(s0, s1, s2, Point3::new(1.0, 1.0, 5.0));
        let below = wedge_normal_toward(s0, s1, s2, Point3::new(1.0, 1.0, -5.0));
        assert!(above.z > 0.0);
        assert!(below.z < 0.0);
    }

    #[test]
    fn wedge_normal_flip_reflects_across_center_plane() {
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 0.5);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 0.75);

        let front = wedge_normal_flipped(s0, s1, s2, false);
        let back = wedge_normal_flipped(s0, s1, s2, true);

        // In-plane components agree, out-of-plane component negates.
        assert_relative_eq!(front.x, back.x, epsilon = 1e-9);
        assert_relative_eq!(front.y, back.y, epsilon = 1e-9);
        assert_relative_eq!(front.z, -back.z, epsilon = 1e-9);
        assert_relative_eq!(back.norm(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn wedge_interior_blend() {
        // Query displaced from the center-triangle centroid along the
        // tangent normal; the answer comes from the interior patch and
        // its barycentric weights are exactly one third each.
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 0.5);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 0.5);

        let centroid = Point3::new(1.0, 2.0 / 3.0, 0.0);
        let n0 = wedge_normal_toward(s0, s1, s2, centroid + Vector3::z());
        let p = centroid + n0 * 2.0;

        let n = wedge_normal_toward(s0, s1, s2, p);
        let tt = [
            s0.center + n * s0.radius,
            s1.center + n * s1.radius,
            s2.center + n * s2.radius,
        ];
        let ttp = p - n * (p - tt[0]).dot(&n);
        let bary = barycentric(tt[0], tt[1], tt[2], ttp);
        assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(bary.x, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(bary.y, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(bary.z, 1.0 / 3.0, epsilon = 1e-6);

        // The interior candidate wins over the boundary pills and the
        // projection lands strictly between the tangent points.
        let proj = wedge_project(p, s0, s1, s2);
        assert!(proj.distance > 0.0);
        assert_relative_eq!((p - proj.point).norm(), proj.distance, epsilon = 1e-9);
        let blended = Sphere::blend([s0, s1, s2], [1.0 / 3.0; 3]);
        let want = sphere_project(p, blended);
        assert_relative_eq!((proj.point - want.point).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn wedge_degrades_to_boundary_pill() {
        // A query hovering past an edge of the center triangle, outside
        // the interior tangent region, must land on that edge's pill.
        let s0 = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
        let s1 = Sphere::from_coords(2.0, 0.0, 0.0, 0.5);
        let s2 = Sphere::from_coords(1.0, 2.0, 0.0, 0.5);

        // Beyond the s0-s1 edge, away from s2.
        let p = Point3::new(1.0, -6.0, 0.0);

        let got = wedge_project(p, s0, s1, s2);
        let want = pill_project(p, s0, s1);
        assert_relative_eq!((got.point - want.point).norm(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(got.distance, want.distance, epsilon = 1e-9);
    }

    #[test]
    fn finite_or_zero_policy() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
        assert_eq!(finite_or_zero(-1.25), -1.25);
    }
}
