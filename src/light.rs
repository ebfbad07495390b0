//! Light sources.

use glam::Vec3A;

use crate::intersection::Intersection;
use crate::material::Color;

/// Light arriving at a surface point from one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Intensity per band.
    pub intensity: Color,
    /// Vector from the surface point toward the source.
    ///
    /// Zero for ambient light. For positional sources it spans the full
    /// distance, so ray parameter 1 along it is the source itself.
    pub direction: Vec3A,
}

/// Source of direct illumination.
pub trait LightSource: Send + Sync {
    /// Light reaching `hit`, or `None` when this source does not apply.
    fn intensity(&self, hit: &Intersection<'_>) -> Option<LightSample>;
}

/// Light arriving equally from every direction.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    /// Intensity per band.
    pub intensity: Color,
}

impl AmbientLight {
    /// White ambient light of the given strength.
    pub fn new(intensity: f32) -> Self {
        Self {
            intensity: Color::splat(intensity),
        }
    }
}

impl LightSource for AmbientLight {
    fn intensity(&self, _hit: &Intersection<'_>) -> Option<LightSample> {
        Some(LightSample {
            intensity: self.intensity,
            direction: Vec3A::ZERO,
        })
    }
}

/// Point light without distance falloff.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    /// Position in world coordinates.
    pub position: Vec3A,
    /// Intensity per band.
    pub intensity: Color,
}

impl PointLight {
    /// White point light of the given strength.
    pub fn new(position: Vec3A, intensity: f32) -> Self {
        Self {
            position,
            intensity: Color::splat(intensity),
        }
    }
}

impl LightSource for PointLight {
    fn intensity(&self, hit: &Intersection<'_>) -> Option<LightSample> {
        Some(LightSample {
            intensity: self.intensity,
            direction: self.position - hit.coord_world,
        })
    }
}

/// Contribution of the light at `index` in the scene list to the sampling signature.
pub fn light_signature(index: usize) -> i64 {
    (index as i64).wrapping_mul(0x2545_f491).wrapping_add(0x3c6e_f372)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PhongMaterial;
    use crate::solid::{Solid, SolidId};
    use crate::sphere::Sphere;

    #[test]
    fn ambient_has_no_direction() {
        let solid = Solid::new(Box::new(Sphere::new(Vec3A::ZERO, 1.0)), PhongMaterial::default());
        let hit = Intersection::new(SolidId(0), &solid, Vec3A::Y, 1.0);
        let sample = AmbientLight::new(0.8).intensity(&hit).unwrap();
        assert_eq!(sample.direction, Vec3A::ZERO);
        assert_eq!(sample.intensity, Color::splat(0.8));
    }

    #[test]
    fn point_light_direction_reaches_the_source() {
        let solid = Solid::new(Box::new(Sphere::new(Vec3A::ZERO, 1.0)), PhongMaterial::default());
        let hit = Intersection::new(SolidId(0), &solid, Vec3A::Y, 1.0);
        let light = PointLight::new(Vec3A::new(-5.0, 4.0, -3.0), 1.2);
        let sample = light.intensity(&hit).unwrap();
        assert_eq!(hit.coord_world + sample.direction, light.position);
        assert_eq!(sample.intensity, Color::splat(1.2));
    }

    #[test]
    fn signatures_differ_per_light() {
        assert_ne!(light_signature(0), light_signature(1));
    }
}
