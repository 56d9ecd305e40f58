//! # Default Tuning
//!
//! Values used when a scene file leaves a field out.

// =============================================================================
// PLACEMENT
// =============================================================================

/// Number of markers a run tries to commit.
pub const DEFAULT_TARGET_COUNT: usize = 100;

/// Conflict-resolution attempts allowed between two commits.
pub const DEFAULT_ATTEMPT_BUDGET: u32 = 1000;

/// Distance a conflicting candidate is pushed per attempt (world units).
pub const DEFAULT_STEP: f32 = 0.1;

/// Base radius of every marker sphere (world units).
pub const DEFAULT_MARKER_RADIUS: f32 = 0.1;

// =============================================================================
// CAMERA
// =============================================================================

/// Focal length in millimetres.
pub const DEFAULT_LENS_MM: f32 = 50.0;

/// Sensor width in millimetres (full-frame).
pub const DEFAULT_SENSOR_WIDTH_MM: f32 = 36.0;

/// Image aspect ratio, width over height (1920x1080).
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Near clip distance.
pub const DEFAULT_NEAR: f32 = 0.1;

/// Far clip distance.
pub const DEFAULT_FAR: f32 = 100.0;
