//! The placement domain: an axis-aligned box and its uniform sampler.

use parallax_shared::Vec3;
use rand::Rng;

use crate::error::{ScatterError, ScatterResult};

/// Axis-aligned box markers are placed in.
///
/// Bounds are inclusive: a point exactly on a face is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    center: Vec3,
    half_extents: Vec3,
    min: Vec3,
    max: Vec3,
}

impl Domain {
    /// Creates a domain from its center and half-extents.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterError::InvalidDomain`] unless every half-extent is
    /// positive and finite, the center is finite, and the full box extent
    /// still fits in an `f32`.
    pub fn new(center: Vec3, half_extents: Vec3) -> ScatterResult<Self> {
        let invalid = ScatterError::InvalidDomain {
            center,
            half_extents,
        };
        let positive = half_extents.x > 0.0 && half_extents.y > 0.0 && half_extents.z > 0.0;
        if !positive || !half_extents.is_finite() || !center.is_finite() {
            return Err(invalid);
        }
        let min = center - half_extents;
        let max = center + half_extents;
        // The sampler divides the width `2h` by a factor just below one, so
        // keep a factor of two of headroom above it.
        if !(half_extents * 4.0).is_finite() || !(max - min).is_finite() {
            return Err(invalid);
        }
        Ok(Self {
            center,
            half_extents,
            min,
            max,
        })
    }

    /// Creates a domain from a host object's location and scale.
    ///
    /// The scale vector is taken literally as the half-extent vector.
    ///
    /// # Errors
    ///
    /// Same as [`Domain::new`].
    pub fn from_scale(location: Vec3, scale: Vec3) -> ScatterResult<Self> {
        Self::new(location, scale)
    }

    /// Center of the box.
    #[must_use]
    pub const fn center(&self) -> Vec3 {
        self.center
    }

    /// Half-extents of the box.
    #[must_use]
    pub const fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Minimum corner.
    #[must_use]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    #[must_use]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Inclusive containment test.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Draws a uniform point inside the box, one independent draw per axis.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let h = self.half_extents;
        let offset = Vec3::new(
            rng.gen_range(-h.x..=h.x),
            rng.gen_range(-h.y..=h.y),
            rng.gen_range(-h.z..=h.z),
        );
        // Keep the center + offset rounding inside the inclusive bounds.
        let p = self.center + offset;
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::ScatterSeed;

    #[test]
    fn test_boundary_is_inside() {
        let domain = Domain::new(Vec3::ZERO, Vec3::new(0.5, 1.0, 2.0)).unwrap();
        assert!(domain.contains(Vec3::new(0.5, 0.0, 0.0)));
        assert!(domain.contains(Vec3::new(-0.5, -1.0, 2.0)));
        assert!(!domain.contains(Vec3::new(0.500_1, 0.0, 0.0)));
        assert!(!domain.contains(Vec3::new(0.0, 0.0, -2.1)));
    }

    #[test]
    fn test_samples_stay_inside_offset_box() {
        let domain = Domain::new(Vec3::new(10.0, -3.0, 0.25), Vec3::new(0.1, 2.0, 0.5)).unwrap();
        let mut rng = ScatterSeed::new(99).rng();
        for _ in 0..10_000 {
            assert!(domain.contains(domain.sample(&mut rng)));
        }
    }

    #[test]
    fn test_samples_cover_each_axis() {
        let domain = Domain::new(Vec3::ZERO, Vec3::ONE).unwrap();
        let mut rng = ScatterSeed::new(3).rng();
        let (mut lo, mut hi) = (Vec3::ONE, -Vec3::ONE);
        for _ in 0..5_000 {
            let p = domain.sample(&mut rng);
            lo = Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z));
            hi = Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z));
        }
        for v in lo.to_array() {
            assert!(v < -0.9);
        }
        for v in hi.to_array() {
            assert!(v > 0.9);
        }
    }

    #[test]
    fn test_invalid_extents_rejected() {
        assert!(Domain::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0)).is_err());
        assert!(Domain::new(Vec3::ZERO, Vec3::new(1.0, -1.0, 1.0)).is_err());
        assert!(Domain::new(Vec3::ZERO, Vec3::new(1.0, 1.0, f32::INFINITY)).is_err());
        assert!(Domain::from_scale(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE).is_err());
    }

    #[test]
    fn test_overflowing_extent_rejected() {
        // Finite half-extents whose full width overflows would make the
        // sampler panic.
        let huge = Vec3::new(f32::MAX, 1.0, 1.0);
        assert!(matches!(
            Domain::new(Vec3::ZERO, huge),
            Err(ScatterError::InvalidDomain { .. })
        ));
        assert!(Domain::new(Vec3::ZERO, Vec3::new(f32::MAX * 0.5, 1.0, 1.0)).is_err());
        let far_center = Vec3::new(f32::MAX, 0.0, 0.0);
        assert!(Domain::new(far_center, Vec3::new(f32::MAX * 0.25, 1.0, 1.0)).is_err());

        let wide = Domain::new(Vec3::ZERO, Vec3::new(f32::MAX * 0.25, 1.0, 1.0)).unwrap();
        let mut rng = ScatterSeed::new(3).rng();
        assert!(wide.contains(wide.sample(&mut rng)));
    }

    #[test]
    fn test_from_scale_is_half_extents() {
        let domain = Domain::from_scale(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 3.0, 4.0)).unwrap();
        assert_eq!(domain.min(), Vec3::new(-1.0, -3.0, -4.0));
        assert_eq!(domain.max(), Vec3::new(3.0, 3.0, 4.0));
    }
}
