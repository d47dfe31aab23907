//! # Config Crate
//!
//! Centralized configuration constants for the surface proximity engine.
//! Every tolerance, iteration limit and default used by the projection and
//! ray casting code is defined here so the numeric behavior of the engine
//! can be audited in one place.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{validate_tolerance, PROJECTION_TOLERANCE, MAX_FACET_CORNERS};
//!
//! // Barycentric coordinates slightly outside [0, 1] still count as inside
//! let r = -0.5 * PROJECTION_TOLERANCE;
//! assert!(r >= -PROJECTION_TOLERANCE);
//!
//! // Facets are triangles or quadrilaterals
//! assert_eq!(MAX_FACET_CORNERS, 4);
//! assert!(validate_tolerance(-PROJECTION_TOLERANCE).is_err());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: `GlobalConfig` can only be built from sane values
//! - **Host Compatible**: Defaults match the values the host application used

pub mod constants;
