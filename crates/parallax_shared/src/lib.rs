//! # PARALLAX Shared
//!
//! Math primitives and default tuning values used by the placement engine
//! and the command-line driver.
//!
//! ## Conventions
//!
//! - Right-handed world space.
//! - Matrices are column-major (`cols[c][r]`), applied to column vectors.
//! - Clip space follows the OpenGL convention: `x, y, z` in `[-1, 1]` after
//!   the perspective divide.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_ASPECT, DEFAULT_ATTEMPT_BUDGET, DEFAULT_FAR, DEFAULT_LENS_MM, DEFAULT_MARKER_RADIUS,
    DEFAULT_NEAR, DEFAULT_SENSOR_WIDTH_MM, DEFAULT_STEP, DEFAULT_TARGET_COUNT,
};
pub use math::{Mat4, Vec2, Vec3, Vec4};
