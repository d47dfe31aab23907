//! # Configuration Constants
//!
//! Centralized constants for the surface proximity engine. Projection
//! tolerances, Newton iteration limits and ray casting defaults are defined
//! here.
//!
//! ## Categories
//!
//! - **Precision**: Degenerate-geometry epsilon
//! - **Projection**: Point-to-facet and ray-to-facet acceptance slack
//! - **Topology**: Facet corner counts
//! - **Ray Casting**: Coverage defaults (angle threshold, back search radius)

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for degenerate-geometry guards.
///
/// Determinants, squared lengths and ray/plane denominators whose magnitude
/// falls below this value are treated as zero.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn is_degenerate(det: f64) -> bool {
///     det.abs() < EPSILON
/// }
///
/// assert!(is_degenerate(1e-15));
/// assert!(!is_degenerate(1e-3));
/// ```
pub const EPSILON: f64 = 1e-12;

// =============================================================================
// PROJECTION CONSTANTS
// =============================================================================

/// Acceptance slack for point-to-facet projection.
///
/// A projected point is accepted when its barycentric (triangle) or bilinear
/// (quadrilateral) coordinates lie within `[-tol, 1 + tol]`. The slack lets a
/// point that lands a hair outside a shared edge still register on one of the
/// facets meeting there, so projections never fall into a seam.
///
/// # Example
///
/// ```rust
/// use config::constants::PROJECTION_TOLERANCE;
///
/// let (r, s) = (1.005, -0.004);
/// let inside = r >= -PROJECTION_TOLERANCE
///     && s >= -PROJECTION_TOLERANCE
///     && r + s <= 1.0 + PROJECTION_TOLERANCE;
/// assert!(inside);
/// ```
pub const PROJECTION_TOLERANCE: f64 = 0.01;

/// Acceptance slack for ray-to-facet intersection.
///
/// Same discipline as [`PROJECTION_TOLERANCE`], applied to the natural
/// coordinates of a ray/plane hit point.
pub const RAY_TOLERANCE: f64 = 0.01;

/// Maximum Newton iterations used when inverting a bilinear quadrilateral.
///
/// # Example
///
/// ```rust
/// use config::constants::NEWTON_MAX_ITERATIONS;
///
/// assert!(NEWTON_MAX_ITERATIONS >= 5);
/// ```
pub const NEWTON_MAX_ITERATIONS: u32 = 10;

/// Newton step norm below which a bilinear inversion is considered converged.
pub const NEWTON_CONVERGENCE: f64 = 1e-7;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Minimum number of corners of a facet (triangle).
pub const MIN_FACET_CORNERS: usize = 3;

/// Maximum number of corners of a facet (quadrilateral).
///
/// Per-facet corner tables are stored inline with this capacity.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_FACET_CORNERS, MIN_FACET_CORNERS};
///
/// let corners = 4;
/// assert!((MIN_FACET_CORNERS..=MAX_FACET_CORNERS).contains(&corners));
/// ```
pub const MAX_FACET_CORNERS: usize = 4;

// =============================================================================
// RAY CASTING CONSTANTS
// =============================================================================

/// Default angle threshold (degrees) between a ray and a hit facet normal.
///
/// Hits are accepted only when the angle exceeds the threshold. Zero accepts
/// every hit that is not exactly aligned with the facet normal.
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 0.0;

/// Largest meaningful angle threshold in degrees.
pub const MAX_ANGLE_THRESHOLD: f64 = 180.0;

/// Default back search radius.
///
/// Zero means back-side hits (when allowed) are accepted at any distance.
pub const DEFAULT_BACK_SEARCH_RADIUS: f64 = 0.0;

// =============================================================================
// GLOBAL CONFIG SNAPSHOT
// =============================================================================

/// Immutable snapshot of the numeric settings shared by the projection code.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Acceptance slack for projection and intersection coordinates.
    pub tolerance: f64,
    /// Iteration budget for bilinear inversion.
    pub max_iterations: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and iteration budget.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(0.05, 20).expect("valid config");
    /// assert_eq!(cfg.max_iterations, 20);
    /// ```
    pub fn new(tolerance: f64, max_iterations: u32) -> Result<Self, ConfigError> {
        let tolerance = validate_tolerance(tolerance)?;
        if max_iterations == 0 {
            return Err(ConfigError::InvalidIterations(max_iterations));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: PROJECTION_TOLERANCE,
            max_iterations: NEWTON_MAX_ITERATIONS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the iteration budget is zero.
    InvalidIterations(u32),
    /// Raised when an angle threshold lies outside `[0, 180]` degrees.
    InvalidAngle(f64),
    /// Raised when a search radius is negative or not finite.
    InvalidRadius(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be finite and non-negative: {value}")
            }
            ConfigError::InvalidIterations(value) => {
                write!(f, "max_iterations must be >= 1: {value}")
            }
            ConfigError::InvalidAngle(value) => {
                write!(f, "angle threshold must lie in [0, {MAX_ANGLE_THRESHOLD}] degrees: {value}")
            }
            ConfigError::InvalidRadius(value) => {
                write!(f, "search radius must be finite and non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Validates an angle threshold given in degrees.
///
/// # Example
///
/// ```rust
/// use config::constants::validate_angle_threshold;
///
/// assert_eq!(validate_angle_threshold(30.0), Ok(30.0));
/// assert!(validate_angle_threshold(190.0).is_err());
/// ```
pub fn validate_angle_threshold(degrees: f64) -> Result<f64, ConfigError> {
    if (0.0..=MAX_ANGLE_THRESHOLD).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(ConfigError::InvalidAngle(degrees))
    }
}

/// Validates an acceptance tolerance (finite, non-negative).
pub fn validate_tolerance(tolerance: f64) -> Result<f64, ConfigError> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(ConfigError::InvalidTolerance(tolerance))
    }
}

/// Validates a back search radius.
///
/// # Example
///
/// ```rust
/// use config::constants::validate_search_radius;
///
/// assert_eq!(validate_search_radius(0.0), Ok(0.0));
/// assert!(validate_search_radius(-1.0).is_err());
/// ```
pub fn validate_search_radius(radius: f64) -> Result<f64, ConfigError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(ConfigError::InvalidRadius(radius))
    }
}
