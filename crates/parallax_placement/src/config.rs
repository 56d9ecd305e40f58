//! # Scene Files
//!
//! A scene file describes one placement run in TOML: the seed, the domain
//! box, the camera and the placement tuning. Every field has a default, so
//! an empty file is a valid scene.
//!
//! ```toml
//! seed = 42
//!
//! [domain]
//! center = [0.0, 0.0, 0.0]
//! half_extents = [0.5, 0.5, 0.5]
//!
//! [camera]
//! eye = [3.0, 0.0, 0.0]
//! target = [0.0, 0.0, 0.0]
//! up = [0.0, 0.0, 1.0]
//! lens_mm = 50.0
//!
//! [placement]
//! target_count = 100
//! attempt_budget = 1000
//! exhaustion = { discard_candidate = { max_abandoned = 50 } }
//! ```

use std::path::Path;

use parallax_shared::{
    Vec3, DEFAULT_ASPECT, DEFAULT_FAR, DEFAULT_LENS_MM, DEFAULT_NEAR, DEFAULT_SENSOR_WIDTH_MM,
};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection};
use crate::domain::Domain;
use crate::error::{ScatterError, ScatterResult};
use crate::placement::{PlacementConfig, PlacementEngine};
use crate::seed::ScatterSeed;

/// Domain box section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    /// Box center.
    pub center: Vec3,
    /// Box half-extents (a host object's scale, taken literally).
    pub half_extents: Vec3,
}

impl Default for DomainConfig {
    fn default() -> Self {
        // A unit cube.
        Self {
            center: Vec3::ZERO,
            half_extents: Vec3::new(0.5, 0.5, 0.5),
        }
    }
}

impl DomainConfig {
    /// Builds the domain.
    ///
    /// # Errors
    ///
    /// See [`Domain::new`].
    pub fn build(&self) -> ScatterResult<Domain> {
        Domain::from_scale(self.center, self.half_extents)
    }
}

/// Camera section: a look-at pose and a physical lens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Camera position.
    pub eye: Vec3,
    /// Point the camera tracks.
    pub target: Vec3,
    /// World up hint.
    pub up: Vec3,
    /// Focal length in millimetres.
    pub lens_mm: f32,
    /// Sensor width in millimetres.
    pub sensor_width_mm: f32,
    /// Image width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        // On a radius-3 ring around the origin, Z up.
        Self {
            eye: Vec3::new(3.0, 0.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            lens_mm: DEFAULT_LENS_MM,
            sensor_width_mm: DEFAULT_SENSOR_WIDTH_MM,
            aspect: DEFAULT_ASPECT,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl CameraConfig {
    /// Builds the camera.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidProjection`] for bad lens or clip
    /// values and [`ScatterError::SingularPose`] for a degenerate look-at.
    pub fn build(&self) -> ScatterResult<Camera> {
        let projection = Projection::from_lens(
            self.lens_mm,
            self.sensor_width_mm,
            self.aspect,
            self.near,
            self.far,
        )?;
        Camera::look_at(self.eye, self.target, self.up, projection)
    }
}

/// A complete placement scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScatterConfig {
    /// Random seed.
    pub seed: u64,
    /// Domain box.
    pub domain: DomainConfig,
    /// Camera.
    pub camera: CameraConfig,
    /// Placement tuning.
    pub placement: PlacementConfig,
}

impl ScatterConfig {
    /// Parses a scene from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidConfig`] on malformed TOML, unknown
    /// keys or wrong value types.
    pub fn from_toml_str(text: &str) -> ScatterResult<Self> {
        toml::from_str(text).map_err(|e| ScatterError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a scene file.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::Io`] if the file cannot be read, otherwise
    /// as [`ScatterConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ScatterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScatterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Seed as a [`ScatterSeed`].
    #[must_use]
    pub const fn seed(&self) -> ScatterSeed {
        ScatterSeed::new(self.seed)
    }

    /// Builds the engine this scene describes.
    ///
    /// # Errors
    ///
    /// Any error from building the domain, the camera, or validating the
    /// placement section.
    pub fn build_engine(&self) -> ScatterResult<PlacementEngine> {
        let domain = self.domain.build()?;
        let camera = self.camera.build()?;
        PlacementEngine::new(camera, domain, self.placement.clone())
    }
}
