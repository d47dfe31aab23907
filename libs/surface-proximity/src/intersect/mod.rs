//! # Facet Primitives
//!
//! Point-to-facet projection and ray-to-facet intersection for triangles and
//! quadrilaterals.
//!
//! ## Acceptance
//!
//! Both primitives accept a result whose natural coordinates lie slightly
//! outside the facet (by the configured tolerance), so a point landing on a
//! shared edge registers on either neighbour instead of falling into a seam.
//!
//! Ray hits additionally pass through a [`RayFilter`] that rejects grazing
//! hits and, unless allowed, hits behind the ray origin.

mod quad;
mod triangle;

use config::constants::{
    validate_angle_threshold, validate_search_radius, ConfigError, DEFAULT_ANGLE_THRESHOLD,
    DEFAULT_BACK_SEARCH_RADIUS,
};
use serde::{Deserialize, Serialize};

use crate::config::ProximityConfig;
use crate::core::vec3::Vec3;

/// A half-line from `origin` along unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction (zero for a degenerate ray, which hits nothing)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use surface_proximity::{Ray, Vec3};
    ///
    /// let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0));
    /// assert_eq!(ray.direction, Vec3::Z);
    /// ```
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at signed distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A qualifying ray/facet hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Hit position
    pub position: Vec3,
    /// Unit normal of the hit facet
    pub normal: Vec3,
    /// Facet index of the hit facet within its surface view
    pub facet: usize,
    /// Signed distance along the ray (negative behind the origin)
    pub distance: f64,
}

/// Acceptance rules for ray hits.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{RayFilter, Vec3};
///
/// let filter = RayFilter::new(60.0, false, 0.0).unwrap();
/// // Head-on hit: ray and facet normal are opposed (180 degrees)
/// assert!(filter.accepts(Vec3::Z, -Vec3::Z, 1.0));
/// // Same-facing hit: 0 degrees
/// assert!(!filter.accepts(Vec3::Z, Vec3::Z, 1.0));
/// // Behind the origin
/// assert!(!filter.accepts(Vec3::Z, -Vec3::Z, -1.0));
///
/// // A threshold past 90 degrees drops grazing hits
/// let strict = RayFilter::new(100.0, false, 0.0).unwrap();
/// assert!(filter.accepts(Vec3::Z, Vec3::X, 1.0));
/// assert!(!strict.accepts(Vec3::Z, Vec3::X, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayFilter {
    /// Angle in degrees the ray/facet-normal angle must exceed
    pub angle_threshold: f64,
    /// Accept hits behind the ray origin
    pub allow_back: bool,
    /// Farthest accepted back hit; zero means unlimited
    pub back_search_radius: f64,
}

impl Default for RayFilter {
    fn default() -> Self {
        Self {
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            allow_back: false,
            back_search_radius: DEFAULT_BACK_SEARCH_RADIUS,
        }
    }
}

impl RayFilter {
    /// Creates a filter, validating the angle (degrees, `[0, 180]`) and the
    /// radius (non-negative).
    pub fn new(
        angle_threshold: f64,
        allow_back: bool,
        back_search_radius: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            angle_threshold: validate_angle_threshold(angle_threshold)?,
            allow_back,
            back_search_radius: validate_search_radius(back_search_radius)?,
        })
    }

    /// Whether a hit at signed ray distance `distance` on a facet with unit
    /// normal `normal` qualifies for a ray along `direction`.
    pub fn accepts(&self, direction: Vec3, normal: Vec3, distance: f64) -> bool {
        // angle > threshold  <=>  cos(angle) < cos(threshold) on [0, 180];
        // a zero vector gives NaN and is rejected
        let cos_angle =
            direction.dot(normal) / (direction.length_squared() * normal.length_squared()).sqrt();
        if !(cos_angle < self.angle_threshold.to_radians().cos()) {
            return false;
        }
        if distance < 0.0 {
            if !self.allow_back {
                return false;
            }
            if self.back_search_radius > 0.0 && -distance > self.back_search_radius {
                return false;
            }
        }
        true
    }
}

/// Projects `point` onto a facet with the given corners.
///
/// Returns the foot point when it lies on the facet (within tolerance), or
/// `None` for points projecting outside, degenerate facets and quadrilateral
/// inversions that fail to converge.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{ProximityConfig, Vec3};
/// use surface_proximity::intersect::project_point_to_facet;
///
/// let tri = [Vec3::ZERO, Vec3::X, Vec3::Y];
/// let cfg = ProximityConfig::default();
/// let q = project_point_to_facet(Vec3::new(0.25, 0.25, 2.0), &tri, &cfg);
/// assert_eq!(q, Some(Vec3::new(0.25, 0.25, 0.0)));
/// assert!(project_point_to_facet(Vec3::new(2.0, 2.0, 1.0), &tri, &cfg).is_none());
/// ```
pub fn project_point_to_facet(
    point: Vec3,
    corners: &[Vec3],
    config: &ProximityConfig,
) -> Option<Vec3> {
    match *corners {
        [a, b, c] => triangle::project([a, b, c], point, config.projection_tolerance),
        [a, b, c, d] => quad::project([a, b, c, d], point, config),
        _ => None,
    }
}

/// Intersects `ray` with a facet and applies `filter`.
///
/// `normal` is the facet's unit normal used for the angle test and reported
/// in the result; `facet` is stored as the hit facet index.
pub fn intersect_ray(
    ray: &Ray,
    corners: &[Vec3],
    normal: Vec3,
    facet: usize,
    filter: &RayFilter,
    config: &ProximityConfig,
) -> Option<Intersection> {
    let position = match *corners {
        [a, b, c] => triangle::intersect(ray, [a, b, c], config.ray_tolerance),
        [a, b, c, d] => quad::intersect(ray, [a, b, c, d], config.ray_tolerance),
        _ => None,
    }?;

    let distance = ray.direction.dot(position - ray.origin);
    filter
        .accepts(ray.direction, normal, distance)
        .then_some(Intersection {
            position,
            normal,
            facet,
            distance,
        })
}
