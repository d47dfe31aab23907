//! Thin wrapper around `glam::DVec3` shared across engine modules.
//!
//! The helpers keep the facet geometry used by normals, projection and ray
//! casting in one place.

pub use glam::DVec3 as Vec3;

/// Unnormalized normal of the plane through three points.
///
/// The length is twice the triangle area; the direction follows the
/// right-hand rule on `a → b → c`.
///
/// # Examples
/// ```
/// use surface_proximity::Vec3;
/// use surface_proximity::core::vec3::plane_normal;
/// let n = plane_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
/// assert_eq!(n, Vec3::Z);
/// ```
#[inline]
pub fn plane_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Unit normal of a facet from its first three corners.
///
/// Returns zero for degenerate facets.
///
/// # Examples
/// ```
/// use surface_proximity::Vec3;
/// use surface_proximity::core::vec3::facet_normal;
/// let quad = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.0, 2.0, 0.0)];
/// assert_eq!(facet_normal(&quad), Vec3::Z);
/// assert_eq!(facet_normal(&[Vec3::ZERO, Vec3::ZERO, Vec3::X]), Vec3::ZERO);
/// ```
pub fn facet_normal(corners: &[Vec3]) -> Vec3 {
    match corners {
        [a, b, c, ..] => plane_normal(*a, *b, *c).normalize_or_zero(),
        _ => Vec3::ZERO,
    }
}
