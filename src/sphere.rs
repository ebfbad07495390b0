//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection using an optimized quadratic formula.
//! Both roots are reported, so a fog sphere yields its entry and its exit.

use glam::{Vec2, Vec3A};

use crate::interval::Interval;
use crate::ray::Ray;
use crate::solid::Shape;

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0), // Ensure radius is non-negative
        }
    }
}

impl Shape for Sphere {
    fn roots(&self, r: &Ray, ray_t: Interval, roots: &mut Vec<f32>) {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return;
        }

        let sqrtd = discriminant.sqrt();
        for root in [(h - sqrtd) / a, (h + sqrtd) / a] {
            if ray_t.surrounds(root) {
                roots.push(root);
            }
        }
    }

    fn normal_at(&self, point: Vec3A) -> Vec3A {
        (point - self.center).normalize_or_zero()
    }

    fn texture_coord(&self, point: Vec3A) -> Vec2 {
        let d = self.normal_at(point);
        let u = 0.5 + d.z.atan2(d.x) / std::f32::consts::TAU;
        let v = d.y.clamp(-1.0, 1.0).acos() / std::f32::consts::PI;
        Vec2::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_entry_and_exit() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, 5.0), 1.0);
        let mut roots = Vec::new();
        sphere.roots(&Ray::new(Vec3A::ZERO, Vec3A::Z), Interval::FORWARD, &mut roots);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 4.0).abs() < 1.0e-5);
        assert!((roots[1] - 6.0).abs() < 1.0e-5);
    }

    #[test]
    fn from_inside_only_the_exit_is_in_front() {
        let sphere = Sphere::new(Vec3A::ZERO, 2.0);
        let mut roots = Vec::new();
        sphere.roots(&Ray::new(Vec3A::ZERO, Vec3A::X), Interval::FORWARD, &mut roots);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 2.0).abs() < 1.0e-5);
    }

    #[test]
    fn negative_radius_is_clamped() {
        let sphere = Sphere::new(Vec3A::ZERO, -3.0);
        assert_eq!(sphere.radius, 0.0);
    }

    #[test]
    fn normal_points_outward() {
        let sphere = Sphere::new(Vec3A::new(1.0, 1.0, 1.0), 2.0);
        assert_eq!(sphere.normal_at(Vec3A::new(1.0, 3.0, 1.0)), Vec3A::Y);
    }
}
