//! The sphere value type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sphere in 3D space: a center point and a radius.
///
/// This is the `(x, y, z, r)` 4-vector that every sphere-mesh vertex
/// carries. A radius of zero is a plain point; negative radii are not
/// rejected at construction but produce inside-out projection results.
///
/// # Example
///
/// ```
/// use smesh_types::{Point3, Sphere};
///
/// let s = Sphere::from_coords(1.0, 2.0, 3.0, 0.5);
/// assert_eq!(s.center, Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(s.radius, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3<f64>,
    /// Radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from a center point and radius.
    #[inline]
    #[must_use]
    pub const fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Create a sphere from raw coordinates and a radius.
    ///
    /// # Example
    ///
    /// ```
    /// use smesh_types::Sphere;
    ///
    /// let s = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
    /// assert_eq!(s.radius, 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self::new(Point3::new(x, y, z), r)
    }

    /// A zero-radius sphere at the origin.
    #[inline]
    #[must_use]
    pub fn origin() -> Self {
        Self::from_coords(0.0, 0.0, 0.0, 0.0)
    }

    /// Affine blend of two spheres.
    ///
    /// Interpolates both center and radius; `t = 0` gives `a`, `t = 1`
    /// gives `b`. `t` is not clamped.
    ///
    /// # Example
    ///
    /// ```
    /// use smesh_types::Sphere;
    ///
    /// let a = Sphere::from_coords(0.0, 0.0, 0.0, 1.0);
    /// let b = Sphere::from_coords(2.0, 0.0, 0.0, 3.0);
    /// let mid = Sphere::lerp(a, b, 0.5);
    /// assert_eq!(mid.center.x, 1.0);
    /// assert_eq!(mid.radius, 2.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            center: a.center + (b.center - a.center) * t,
            radius: a.radius + (b.radius - a.radius) * t,
        }
    }

    /// Barycentric combination of three spheres.
    ///
    /// Weights are taken as given; callers that need an affine result are
    /// responsible for weights summing to one.
    #[must_use]
    pub fn blend(spheres: [Self; 3], weights: [f64; 3]) -> Self {
        let mut center = Vector3::zeros();
        let mut radius = 0.0;
        for (s, w) in spheres.iter().zip(weights) {
            center += s.center.coords * w;
            radius += s.radius * w;
        }
        Self {
            center: Point3::from(center),
            radius,
        }
    }
}

impl From<[f64; 4]> for Sphere {
    fn from([x, y, z, r]: [f64; 4]) -> Self {
        Self::from_coords(x, y, z, r)
    }
}

impl From<Sphere> for [f64; 4] {
    fn from(s: Sphere) -> Self {
        [s.center.x, s.center.y, s.center.z, s.radius]
    }
}
