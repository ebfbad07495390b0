//! Procedural override of the default Whitted lighting.
//!
//! A solid may carry a [`RecursionFunction`]. When recursion is enabled the
//! shader asks it first; if it returns a [`RayRecursion`], that result fully
//! replaces the light-source loop and the reflected/refracted rays for the hit.

use glam::Vec3A;

use crate::intersection::Intersection;
use crate::material::Color;

/// Scalar applied to every band, or one value per band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spectrum {
    /// Same value in every band.
    Uniform(f32),
    /// One value per band.
    PerBand(Color),
}

impl Spectrum {
    /// Expand to a per-band color.
    pub fn to_color(self) -> Color {
        match self {
            Spectrum::Uniform(value) => Color::splat(value),
            Spectrum::PerBand(color) => color,
        }
    }
}

/// An extra ray requested by a recursion function.
#[derive(Debug, Clone, Copy)]
pub struct RayContribution {
    /// Ray origin.
    pub origin: Vec3A,
    /// Ray direction.
    pub direction: Vec3A,
    /// Importance the ray is traced with.
    pub importance: f32,
    /// Weight of the traced color; `None` adds it unweighted.
    pub coefficient: Option<Spectrum>,
}

impl RayContribution {
    /// Weight applied to the color this ray brings back.
    pub fn weight(&self) -> Color {
        self.coefficient.map_or(Color::ONE, Spectrum::to_color)
    }
}

/// Result of a procedural recursion function.
#[derive(Debug, Clone, Default)]
pub struct RayRecursion {
    /// Color added directly, without tracing anything.
    pub direct: Option<Spectrum>,
    /// Rays to trace and combine.
    pub rays: Vec<RayContribution>,
}

/// Per-solid procedural shading hook.
pub trait RecursionFunction: Send + Sync {
    /// Called with the completed hit, the viewing direction and the ray's
    /// importance. Returns a signature contribution and, when it takes over
    /// shading, the recursion result.
    fn recurse(
        &self,
        hit: &Intersection<'_>,
        view: Vec3A,
        importance: f32,
    ) -> (i64, Option<RayRecursion>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coefficient_means_unit_weight() {
        let ray = RayContribution {
            origin: Vec3A::ZERO,
            direction: Vec3A::Z,
            importance: 1.0,
            coefficient: None,
        };
        assert_eq!(ray.weight(), Color::ONE);
    }

    #[test]
    fn uniform_and_per_band_weights() {
        let mut ray = RayContribution {
            origin: Vec3A::ZERO,
            direction: Vec3A::Z,
            importance: 1.0,
            coefficient: Some(Spectrum::Uniform(0.25)),
        };
        assert_eq!(ray.weight(), Color::splat(0.25));
        ray.coefficient = Some(Spectrum::PerBand(Color::new(0.1, 0.2, 0.3)));
        assert_eq!(ray.weight(), Color::new(0.1, 0.2, 0.3));
    }
}
