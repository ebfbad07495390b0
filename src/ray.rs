//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Intersection sequences are
//! ordered by this parameter `t`, and shadow rays rely on the direction being left
//! unnormalized so that `t = 1` lands exactly on the light.

use glam::Vec3A;

/// Minimal ray parameter distance accepted as a real intersection.
///
/// Secondary rays start exactly on a surface; hits closer than this are the
/// surface itself.
pub const RAY_EPSILON: f32 = 1.0e-4;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, a surface point for reflected,
    /// refracted and shadow rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Shadow rays use the full vector from the
    /// surface to the light source.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_follows_unnormalized_direction() {
        let ray = Ray::new(Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(0.0, 2.0, 0.0));
        assert_eq!(ray.at(0.0), Vec3A::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(0.5), Vec3A::new(1.0, 1.0, 0.0));
        assert_eq!(ray.at(1.0), Vec3A::new(1.0, 2.0, 0.0));
    }
}
