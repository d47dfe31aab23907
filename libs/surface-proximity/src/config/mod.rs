//! Engine-level configuration helpers building on the shared `config` crate.
//!
//! The module wraps the workspace configuration so projection and ray
//! casting code can stay decoupled from literal constants.

use config::constants::{
    ConfigError, GlobalConfig, NEWTON_CONVERGENCE, NEWTON_MAX_ITERATIONS, PROJECTION_TOLERANCE,
    RAY_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Numeric configuration for projection and intersection primitives.
///
/// # Examples
/// ```
/// use surface_proximity::ProximityConfig;
/// let cfg = ProximityConfig::default();
/// assert!(cfg.projection_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Slack on barycentric/bilinear coordinates when projecting points.
    pub projection_tolerance: f64,
    /// Slack on natural coordinates when intersecting rays.
    pub ray_tolerance: f64,
    /// Newton iteration budget for quadrilateral inversion.
    pub max_iterations: u32,
    /// Newton step norm treated as converged.
    pub convergence: f64,
}

impl ProximityConfig {
    /// Creates a configuration from explicit values.
    ///
    /// The same tolerance is used for projections and ray hits.
    ///
    /// # Examples
    /// ```
    /// use surface_proximity::ProximityConfig;
    /// let cfg = ProximityConfig::new(0.02, 16).unwrap();
    /// assert_eq!(cfg.max_iterations, 16);
    /// assert!(ProximityConfig::new(-1.0, 16).is_err());
    /// ```
    pub fn new(tolerance: f64, max_iterations: u32) -> Result<Self, ConfigError> {
        GlobalConfig::new(tolerance, max_iterations).map(|cfg| Self {
            projection_tolerance: cfg.tolerance,
            ray_tolerance: cfg.tolerance,
            max_iterations: cfg.max_iterations,
            convergence: NEWTON_CONVERGENCE,
        })
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            projection_tolerance: PROJECTION_TOLERANCE,
            ray_tolerance: RAY_TOLERANCE,
            max_iterations: NEWTON_MAX_ITERATIONS,
            convergence: NEWTON_CONVERGENCE,
        }
    }
}
