//! Infinite plane primitive.

use glam::{Vec2, Vec3A};

use crate::interval::Interval;
use crate::ray::Ray;
use crate::solid::Shape;

/// Infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Unit normal on the lit side.
    pub normal: Vec3A,
    u_axis: Vec3A,
    v_axis: Vec3A,
}

impl Plane {
    /// Create a plane. The normal is normalized.
    pub fn new(point: Vec3A, normal: Vec3A) -> Self {
        let normal = normal.normalize();
        let (u_axis, v_axis) = normal.any_orthonormal_pair();
        Self {
            point,
            normal,
            u_axis,
            v_axis,
        }
    }

    /// Horizontal ground plane at height `y`, facing up. Texture
    /// coordinates follow world X and Z.
    pub fn ground(y: f32) -> Self {
        Self {
            point: Vec3A::new(0.0, y, 0.0),
            normal: Vec3A::Y,
            u_axis: Vec3A::X,
            v_axis: Vec3A::Z,
        }
    }
}

impl Shape for Plane {
    fn roots(&self, ray: &Ray, ray_t: Interval, roots: &mut Vec<f32>) {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < 1.0e-8 {
            return;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if ray_t.surrounds(t) {
            roots.push(t);
        }
    }

    fn normal_at(&self, _point: Vec3A) -> Vec3A {
        self.normal
    }

    fn texture_coord(&self, point: Vec3A) -> Vec2 {
        let local = point - self.point;
        Vec2::new(local.dot(self.u_axis), local.dot(self.v_axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_from_above() {
        let plane = Plane::ground(-1.0);
        let mut roots = Vec::new();
        plane.roots(
            &Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 1.0)),
            Interval::FORWARD,
            &mut roots,
        );
        assert_eq!(roots, vec![2.0]);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::ground(0.0);
        let mut roots = Vec::new();
        plane.roots(&Ray::new(Vec3A::Y, Vec3A::X), Interval::FORWARD, &mut roots);
        assert!(roots.is_empty());
    }

    #[test]
    fn texture_coord_lies_in_plane() {
        let plane = Plane::ground(-1.0);
        let uv = plane.texture_coord(Vec3A::new(2.5, -1.0, -0.5));
        assert_eq!(uv, Vec2::new(2.5, -0.5));
    }
}
