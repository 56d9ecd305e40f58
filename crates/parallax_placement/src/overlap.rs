//! Screen-space overlap between projected markers.
//!
//! Two markers overlap when their projected circles intersect. Depth plays
//! no part: a marker far behind another still conflicts with it.

use parallax_shared::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::marker::Marker;

/// A marker's projected 2D center and radius in normalized view space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Projected center. `[0, 1] x [0, 1]` covers the image.
    pub center: Vec2,
    /// Projected radius in the same units.
    pub radius: f32,
}

impl Footprint {
    /// Creates a footprint.
    #[inline]
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict circle intersection: touching circles do not overlap.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }

    /// True when the circle touches the unit image rectangle.
    #[must_use]
    pub fn is_on_screen(&self) -> bool {
        let nearest = Vec2::new(self.center.x.clamp(0.0, 1.0), self.center.y.clamp(0.0, 1.0));
        self.center.distance(nearest) <= self.radius
    }
}

/// Decides whether two markers overlap as seen through `camera`.
///
/// A marker whose projection is degenerate (behind the camera) is treated
/// as out of view and overlaps nothing.
#[must_use]
pub fn overlaps(camera: &Camera, a: &Marker, b: &Marker) -> bool {
    match (
        camera.project(a.position, a.effective_radius()),
        camera.project(b.position, b.effective_radius()),
    ) {
        (Ok(fa), Ok(fb)) => fa.overlaps(&fb),
        _ => false,
    }
}
