//! Quadrilateral projection and ray intersection.
//!
//! Quads are bilinear patches `x(r, s) = Σ Hᵢ(r, s) yᵢ` over `[-1, 1]²`
//! with corners at `(-1,-1), (1,-1), (1,1), (-1,1)`.

use config::constants::EPSILON;

use super::{triangle, Ray};
use crate::config::ProximityConfig;
use crate::core::vec3::Vec3;

const GR: [f64; 4] = [-1.0, 1.0, 1.0, -1.0];
const GS: [f64; 4] = [-1.0, -1.0, 1.0, 1.0];

/// Position and first derivatives of the patch at `(r, s)`.
fn evaluate(y: &[Vec3; 4], r: f64, s: f64) -> (Vec3, Vec3, Vec3) {
    let mut x = Vec3::ZERO;
    let mut xr = Vec3::ZERO;
    let mut xs = Vec3::ZERO;
    for i in 0..4 {
        let h = 0.25 * (1.0 + GR[i] * r) * (1.0 + GS[i] * s);
        let hr = 0.25 * GR[i] * (1.0 + GS[i] * s);
        let hs = 0.25 * GS[i] * (1.0 + GR[i] * r);
        x += y[i] * h;
        xr += y[i] * hr;
        xs += y[i] * hs;
    }
    (x, xr, xs)
}

/// Closest point on the patch to `p`, by Newton iteration on
/// `½|x(r, s) - p|²`.
///
/// Accepted when the iteration converges within the budget and the
/// coordinates lie in `[-1 - tol, 1 + tol]`.
pub(super) fn project(y: [Vec3; 4], p: Vec3, config: &ProximityConfig) -> Option<Vec3> {
    // Mixed derivative is constant on a bilinear patch
    let xrs = (y[0] - y[1] + y[2] - y[3]) * 0.25;

    let (mut r, mut s) = (0.0, 0.0);
    let mut converged = false;
    for _ in 0..config.max_iterations {
        let (x, xr, xs) = evaluate(&y, r, s);
        let d = x - p;
        let g0 = d.dot(xr);
        let g1 = d.dot(xs);

        let h00 = xr.dot(xr);
        let h11 = xs.dot(xs);
        let h01 = xr.dot(xs) + d.dot(xrs);
        let det = h00 * h11 - h01 * h01;
        if det.abs() <= EPSILON * h00 * h11 {
            return None;
        }

        let dr = (h01 * g1 - h11 * g0) / det;
        let ds = (h01 * g0 - h00 * g1) / det;
        r += dr;
        s += ds;

        if (dr * dr + ds * ds).sqrt() < config.convergence {
            converged = true;
            break;
        }
    }

    let limit = 1.0 + config.projection_tolerance;
    (converged && r.abs() <= limit && s.abs() <= limit).then(|| evaluate(&y, r, s).0)
}

/// Ray crossing of the quad, tested as the triangles `(0, 1, 2)` and
/// `(2, 3, 0)`.
pub(super) fn intersect(ray: &Ray, y: [Vec3; 4], tol: f64) -> Option<Vec3> {
    triangle::intersect(ray, [y[0], y[1], y[2]], tol)
        .or_else(|| triangle::intersect(ray, [y[2], y[3], y[0]], tol))
}
