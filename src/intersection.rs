//! Ray-object intersection records.
//!
//! The scene's root [`Intersectable`] returns every hit along a ray as an
//! [`Intersections`] sequence sorted by ray parameter. Each [`Intersection`] is
//! cheap when created and only resolves its normal, material and texture
//! coordinates when [`Intersection::complete`] is called, so hits the shader
//! never looks at cost nothing beyond their distance.

use glam::{Vec2, Vec3A};

use crate::material::{Color, Material, ReflectanceModel};
use crate::ray::RAY_EPSILON;
use crate::solid::{Solid, SolidId};

/// One ray-surface hit.
#[derive(Clone)]
pub struct Intersection<'a> {
    /// Ray parameter of the hit.
    pub t: f32,
    /// Hit point in world coordinates.
    pub coord_world: Vec3A,
    /// Outward unit surface normal. Valid after completion.
    pub normal: Vec3A,
    /// Surface parametrization used by textures. Valid after completion.
    pub texture_coord: Vec2,
    /// Private copy of the solid's material. Valid after completion.
    pub material: Material,
    /// Color textures have produced so far. Valid after completion.
    pub surface_color: Color,
    /// Identity of the solid, folded into the sampling signature.
    pub solid_id: SolidId,
    /// The solid that was hit.
    pub solid: &'a Solid,
    /// Whether the lazy fields have been resolved.
    pub completed: bool,
}

impl<'a> Intersection<'a> {
    /// Create an incomplete hit record.
    pub fn new(solid_id: SolidId, solid: &'a Solid, coord_world: Vec3A, t: f32) -> Self {
        Self {
            t,
            coord_world,
            normal: Vec3A::ZERO,
            texture_coord: Vec2::ZERO,
            material: solid.material,
            surface_color: Color::ZERO,
            solid_id,
            solid,
            completed: false,
        }
    }

    /// Resolve normal, material and texture coordinates. Idempotent.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.normal = self.solid.shape.normal_at(self.coord_world);
        self.texture_coord = self.solid.shape.texture_coord(self.coord_world);
        self.material = self.solid.material;
        self.surface_color = self.material.color();
        self.completed = true;
    }

    /// Reflectance model of the hit solid.
    pub fn reflectance(&self) -> &'a dyn ReflectanceModel {
        self.solid.reflectance.as_ref()
    }

    /// True unless the hit lies strictly before `limit` along `direction` by
    /// more than [`RAY_EPSILON`] in world distance.
    ///
    /// Shadow rays use `limit = 1` with the unnormalized vector to the light, so a
    /// blocker sitting on the light itself does not count.
    pub fn is_far(&self, limit: f32, direction: Vec3A) -> bool {
        (self.t - limit) * direction.length() > -RAY_EPSILON
    }
}

impl std::fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("t", &self.t)
            .field("coord_world", &self.coord_world)
            .field("solid_id", &self.solid_id)
            .field("material", &self.material)
            .field("completed", &self.completed)
            .finish()
    }
}

/// Hits along one ray, ascending by ray parameter.
#[derive(Debug, Default)]
pub struct Intersections<'a> {
    hits: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Sort the given hits by ray parameter.
    pub fn from_unsorted(mut hits: Vec<Intersection<'a>>) -> Self {
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { hits }
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when the ray hits nothing.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether a hit follows `index`.
    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.hits.len()
    }

    /// Complete the hit at `index` in place and return it.
    pub fn complete_at(&mut self, index: usize) -> Option<&Intersection<'a>> {
        let hit = self.hits.get_mut(index)?;
        hit.complete();
        Some(hit)
    }

    /// Move the hit at `index` out of the sequence, dropping the rest.
    pub fn into_nth(self, index: usize) -> Option<Intersection<'a>> {
        self.hits.into_iter().nth(index)
    }

    /// First hit, if any.
    pub fn first(&self) -> Option<&Intersection<'a>> {
        self.hits.first()
    }

    /// Iterate in ray order.
    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.hits.iter()
    }
}

/// Trait for scene roots that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) for parallel rendering.
pub trait Intersectable: Sync + Send {
    /// Every hit in front of `origin` along `direction`, sorted by ray parameter.
    fn intersect(&self, origin: Vec3A, direction: Vec3A) -> Intersections<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{PhongMaterial, UniformFog};
    use crate::sphere::Sphere;

    #[test]
    fn complete_is_lazy_and_idempotent() {
        let solid = Solid::new(
            Box::new(Sphere::new(Vec3A::ZERO, 2.0)),
            PhongMaterial::new(Color::new(0.2, 0.4, 0.6), 0.1, 0.5, 0.2, 8.0),
        );
        let mut hit = Intersection::new(SolidId(3), &solid, Vec3A::new(0.0, 0.0, -2.0), 3.0);
        assert!(!hit.completed);
        assert_eq!(hit.normal, Vec3A::ZERO);

        hit.complete();
        assert!(hit.completed);
        assert_eq!(hit.normal, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(hit.surface_color, Color::new(0.2, 0.4, 0.6));

        hit.surface_color = Color::ONE;
        hit.complete();
        assert_eq!(hit.surface_color, Color::ONE);
    }

    #[test]
    fn sequence_is_sorted_and_indexable() {
        let fog = Solid::new(Box::new(Sphere::new(Vec3A::ZERO, 1.0)), UniformFog::default());
        let hits = vec![
            Intersection::new(SolidId(0), &fog, Vec3A::ZERO, 4.0),
            Intersection::new(SolidId(0), &fog, Vec3A::ZERO, 1.0),
            Intersection::new(SolidId(0), &fog, Vec3A::ZERO, 2.5),
        ];
        let sequence = Intersections::from_unsorted(hits);
        let ts: Vec<f32> = sequence.iter().map(|hit| hit.t).collect();
        assert_eq!(ts, vec![1.0, 2.5, 4.0]);
        assert!(sequence.has_next(1));
        assert!(!sequence.has_next(2));
        assert_eq!(sequence.into_nth(2).map(|hit| hit.t), Some(4.0));
    }

    #[test]
    fn far_test_tolerates_hits_on_the_limit() {
        let solid = Solid::new(Box::new(Sphere::new(Vec3A::ZERO, 1.0)), PhongMaterial::default());
        let direction = Vec3A::new(0.0, 0.0, 4.0);
        let near = Intersection::new(SolidId(0), &solid, Vec3A::ZERO, 0.5);
        let on_light = Intersection::new(SolidId(0), &solid, Vec3A::ZERO, 1.0 - 1.0e-6);
        let beyond = Intersection::new(SolidId(0), &solid, Vec3A::ZERO, 1.2);
        assert!(!near.is_far(1.0, direction));
        assert!(on_light.is_far(1.0, direction));
        assert!(beyond.is_far(1.0, direction));
    }
}
