//! Triangle projection and ray intersection.
//!
//! Natural coordinates `(r, s)` satisfy `q = a + r (b - a) + s (c - a)`; the
//! triangle is `r >= 0, s >= 0, r + s <= 1`.

use config::constants::EPSILON;

use super::Ray;
use crate::core::vec3::{plane_normal, Vec3};

/// Natural coordinates of in-plane point `q`, or `None` for a degenerate
/// triangle.
fn natural_coords([a, b, c]: [Vec3; 3], q: Vec3) -> Option<(f64, f64)> {
    let e1 = b - a;
    let e2 = c - a;
    let a00 = e1.dot(e1);
    let a01 = e1.dot(e2);
    let a11 = e2.dot(e2);
    let det = a00 * a11 - a01 * a01;
    if det <= EPSILON * a00 * a11 {
        return None;
    }

    // Dual basis of (e1, e2) inside the plane
    let g1 = (e1 * a11 - e2 * a01) / det;
    let g2 = (e2 * a00 - e1 * a01) / det;
    let w = q - a;
    Some((w.dot(g1), w.dot(g2)))
}

#[inline]
fn inside(r: f64, s: f64, tol: f64) -> bool {
    r >= -tol && s >= -tol && r + s <= 1.0 + tol
}

/// Foot of the perpendicular from `p` onto the triangle plane, if it lies
/// inside the triangle.
pub(super) fn project(tri: [Vec3; 3], p: Vec3, tol: f64) -> Option<Vec3> {
    let [a, b, c] = tri;
    let n = plane_normal(a, b, c);
    let nn = n.length_squared();
    if nn <= EPSILON * (b - a).length_squared() * (c - a).length_squared() {
        return None;
    }

    let q = p - n * ((p - a).dot(n) / nn);
    let (r, s) = natural_coords(tri, q)?;
    inside(r, s, tol).then_some(q)
}

/// Point where `ray`'s supporting line crosses the triangle, if inside.
///
/// Both sides of the origin are reported; callers filter by distance.
pub(super) fn intersect(ray: &Ray, tri: [Vec3; 3], tol: f64) -> Option<Vec3> {
    let [a, b, c] = tri;
    let n = plane_normal(a, b, c);
    let denom = n.dot(ray.direction);
    if denom.abs() <= EPSILON * n.length() {
        return None;
    }

    let t = n.dot(a - ray.origin) / denom;
    let q = ray.at(t);
    let (r, s) = natural_coords(tri, q)?;
    inside(r, s, tol).then_some(q)
}
