//! Camera projection into normalized view space.
//!
//! A [`Camera`] folds its inverted world pose and its projection into one
//! world-to-clip matrix at construction. Projecting a point is then one
//! matrix-vector product, a perspective divide, and a remap of `[-1, 1]`
//! to `[0, 1]`.
//!
//! Projected radii use two points offset along the camera's local `X` (the
//! screen-right axis) on either side of the sphere center. Half their
//! projected distance is the footprint radius, which shrinks with distance
//! to the camera the same way the rendered sphere does. The axis is
//! perpendicular to the view direction, so it never collapses onto one
//! screen point.

use parallax_shared::{Mat4, Vec2, Vec3};
use thiserror::Error;

use crate::error::{ScatterError, ScatterResult};
use crate::overlap::Footprint;

/// Why a point has no defined projection.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// The point lies on or behind the camera plane (`w <= 0`), or the
    /// projection produced non-finite coordinates.
    #[error("degenerate projection (clip w = {w})")]
    Degenerate {
        /// Homogeneous `w` of the clip-space point.
        w: f32,
    },
}

/// View-to-clip transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    matrix: Mat4,
}

impl Projection {
    /// Right-handed perspective projection.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidProjection`] unless
    /// `0 < fov_y < PI`, `aspect > 0` and `0 < near < far`.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> ScatterResult<Self> {
        if !fov_y.is_finite() || fov_y <= 0.0 || fov_y >= std::f32::consts::PI {
            return Err(ScatterError::InvalidProjection(format!(
                "vertical field of view {fov_y} rad is outside (0, PI)"
            )));
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ScatterError::InvalidProjection(format!(
                "aspect ratio {aspect} must be positive"
            )));
        }
        if !far.is_finite() || near.is_nan() || near <= 0.0 || far <= near {
            return Err(ScatterError::InvalidProjection(format!(
                "clip range [{near}, {far}] must satisfy 0 < near < far"
            )));
        }
        Ok(Self {
            matrix: Mat4::perspective_rh_gl(fov_y, aspect, near, far),
        })
    }

    /// Perspective projection from a physical lens.
    ///
    /// The sensor width spans the larger image dimension, so a landscape
    /// image gets a horizontal field of view of `2 * atan(sensor / 2 lens)`
    /// and a portrait image gets that as its vertical field of view.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidProjection`] for non-positive lens or
    /// sensor sizes, or when [`Projection::perspective`] rejects the result.
    pub fn from_lens(
        lens_mm: f32,
        sensor_width_mm: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> ScatterResult<Self> {
        if !lens_mm.is_finite()
            || !sensor_width_mm.is_finite()
            || lens_mm <= 0.0
            || sensor_width_mm <= 0.0
        {
            return Err(ScatterError::InvalidProjection(format!(
                "lens {lens_mm}mm and sensor {sensor_width_mm}mm must be positive"
            )));
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ScatterError::InvalidProjection(format!(
                "aspect ratio {aspect} must be positive"
            )));
        }
        let half_tan = sensor_width_mm / (2.0 * lens_mm);
        let fov_y = if aspect >= 1.0 {
            2.0 * (half_tan / aspect).atan()
        } else {
            2.0 * half_tan.atan()
        };
        Self::perspective(fov_y, aspect, near, far)
    }

    /// Wraps an arbitrary projection matrix supplied by a host application.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidProjection`] if any element is not
    /// finite.
    pub fn from_matrix(matrix: Mat4) -> ScatterResult<Self> {
        if !matrix.is_finite() {
            return Err(ScatterError::InvalidProjection(
                "matrix has non-finite elements".to_string(),
            ));
        }
        Ok(Self { matrix })
    }

    /// The view-to-clip matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

/// A camera: world pose plus projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    world_from_camera: Mat4,
    clip_from_world: Mat4,
}

impl Camera {
    /// Creates a camera from its camera-to-world pose.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::SingularPose`] if the pose is not an
    /// invertible affine transform.
    pub fn new(world_from_camera: Mat4, projection: Projection) -> ScatterResult<Self> {
        let view_from_world = world_from_camera
            .inverse_affine()
            .ok_or(ScatterError::SingularPose)?;
        Ok(Self {
            world_from_camera,
            clip_from_world: projection.matrix().mul_mat4(&view_from_world),
        })
    }

    /// Camera at `eye` looking at `target`, local `-Z` forward, local `+Y`
    /// towards `up`.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::SingularPose`] when `eye == target` or `up`
    /// is parallel to the viewing direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, projection: Projection) -> ScatterResult<Self> {
        let pose = Mat4::look_at_pose(eye, target, up).ok_or(ScatterError::SingularPose)?;
        Self::new(pose, projection)
    }

    /// World-space position of the camera.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.world_from_camera.col(3).truncate()
    }

    /// Unit screen-right axis in world space.
    fn right(&self) -> Vec3 {
        self.world_from_camera
            .col(0)
            .truncate()
            .normalized()
            .unwrap_or(Vec3::X)
    }

    /// Projects a world point to normalized view coordinates.
    ///
    /// On-screen points land in `[0, 1] x [0, 1]`; `(0.5, 0.5)` is the
    /// principal axis.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Degenerate`] for points on or behind the
    /// camera plane.
    pub fn project_point(&self, point: Vec3) -> Result<Vec2, ProjectionError> {
        let clip = self.clip_from_world.mul_vec4(point.extend(1.0));
        if !clip.w.is_finite() || clip.w <= 0.0 {
            return Err(ProjectionError::Degenerate { w: clip.w });
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        if !(ndc_x.is_finite() && ndc_y.is_finite()) {
            return Err(ProjectionError::Degenerate { w: clip.w });
        }
        Ok(Vec2::new((ndc_x + 1.0) * 0.5, (ndc_y + 1.0) * 0.5))
    }

    /// Projects a sphere to its 2D footprint.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Degenerate`] if the center or either
    /// radius point cannot be projected.
    pub fn project(&self, center: Vec3, radius: f32) -> Result<Footprint, ProjectionError> {
        let offset = self.right() * radius;
        let projected_center = self.project_point(center)?;
        let a = self.project_point(center - offset)?;
        let b = self.project_point(center + offset)?;
        Ok(Footprint::new(projected_center, a.distance(b) * 0.5))
    }
}
