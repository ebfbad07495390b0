//! Solids and the scene root that intersects them.
//!
//! A [`Solid`] couples a geometric [`Shape`] with everything the shader needs
//! once the shape is hit: material, reflectance model, texture operators and an
//! optional procedural recursion function. [`SolidList`] owns all solids of a
//! scene and merges their hits into one sorted sequence.

use glam::{Vec2, Vec3A};

use crate::interval::Interval;
use crate::intersection::{Intersectable, Intersection, Intersections};
use crate::material::{Material, PhongModel, ReflectanceModel};
use crate::ray::Ray;
use crate::recursion::RecursionFunction;
use crate::texture::Texture;

/// Index of a solid inside its [`SolidList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidId(pub u32);

impl SolidId {
    /// Contribution of this solid to the sampling signature.
    pub fn signature(self) -> i64 {
        let mut value = self.0.wrapping_add(0x9e37_79b9);
        value ^= value >> 16;
        value = value.wrapping_mul(0x7feb_352d);
        value ^= value >> 15;
        value = value.wrapping_mul(0x846c_a68b);
        value ^= value >> 16;
        i64::from(value)
    }
}

/// Geometric primitive.
///
/// Must be thread-safe (Sync + Send) for parallel rendering.
pub trait Shape: Sync + Send {
    /// Push every ray parameter in `ray_t` where the ray crosses the surface.
    fn roots(&self, ray: &Ray, ray_t: Interval, roots: &mut Vec<f32>);

    /// Outward unit normal at a surface point.
    fn normal_at(&self, point: Vec3A) -> Vec3A;

    /// 2D surface parametrization of a surface point.
    fn texture_coord(&self, point: Vec3A) -> Vec2;
}

/// Shape plus shading attributes.
pub struct Solid {
    /// Geometry.
    pub shape: Box<dyn Shape>,
    /// Material copied into every hit.
    pub material: Material,
    /// Reflectance model, Phong unless replaced.
    pub reflectance: Box<dyn ReflectanceModel>,
    /// Texture operators applied in order.
    pub textures: Vec<Box<dyn Texture>>,
    /// Optional procedural override of the default lighting.
    pub recursion: Option<Box<dyn RecursionFunction>>,
}

impl Solid {
    /// Create a solid with the Phong reflectance model and no textures.
    pub fn new(shape: Box<dyn Shape>, material: impl Into<Material>) -> Self {
        Self {
            shape,
            material: material.into(),
            reflectance: Box::new(PhongModel),
            textures: Vec::new(),
            recursion: None,
        }
    }

    /// Append a texture operator.
    pub fn with_texture(mut self, texture: impl Texture + 'static) -> Self {
        self.textures.push(Box::new(texture));
        self
    }

    /// Attach a procedural recursion function.
    pub fn with_recursion(mut self, recursion: impl RecursionFunction + 'static) -> Self {
        self.recursion = Some(Box::new(recursion));
        self
    }
}

/// Collection of solids forming a scene root.
///
/// Uses linear search for intersection testing.
#[derive(Default)]
pub struct SolidList {
    /// Solids in insertion order; the position is the [`SolidId`].
    pub solids: Vec<Solid>,
}

impl SolidList {
    /// Create a new empty scene root.
    pub fn new() -> Self {
        Self { solids: Vec::new() }
    }

    /// Add a solid and return its identity.
    pub fn add(&mut self, solid: Solid) -> SolidId {
        let id = SolidId(self.solids.len() as u32);
        self.solids.push(solid);
        id
    }
}

impl Intersectable for SolidList {
    fn intersect(&self, origin: Vec3A, direction: Vec3A) -> Intersections<'_> {
        let ray = Ray::new(origin, direction);
        let mut roots = Vec::new();
        let mut hits = Vec::new();

        for (index, solid) in self.solids.iter().enumerate() {
            roots.clear();
            solid.shape.roots(&ray, Interval::FORWARD, &mut roots);
            let id = SolidId(index as u32);
            hits.extend(
                roots
                    .iter()
                    .map(|&t| Intersection::new(id, solid, ray.at(t), t)),
            );
        }

        Intersections::from_unsorted(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{PhongMaterial, UniformFog};
    use crate::sphere::Sphere;

    #[test]
    fn merges_hits_of_all_solids_in_order() {
        let mut list = SolidList::new();
        let far = list.add(Solid::new(
            Box::new(Sphere::new(Vec3A::new(0.0, 0.0, 10.0), 1.0)),
            PhongMaterial::default(),
        ));
        let fog = list.add(Solid::new(
            Box::new(Sphere::new(Vec3A::new(0.0, 0.0, 5.0), 2.0)),
            UniformFog::default(),
        ));

        let hits = list.intersect(Vec3A::ZERO, Vec3A::Z);
        let order: Vec<(SolidId, f32)> = hits.iter().map(|hit| (hit.solid_id, hit.t)).collect();
        assert_eq!(order.len(), 4);
        assert_eq!(order[0].0, fog);
        assert!((order[0].1 - 3.0).abs() < 1.0e-5);
        assert_eq!(order[1].0, fog);
        assert!((order[1].1 - 7.0).abs() < 1.0e-5);
        assert_eq!(order[2].0, far);
        assert_eq!(order[3].0, far);
    }

    #[test]
    fn misses_return_an_empty_sequence() {
        let mut list = SolidList::new();
        list.add(Solid::new(
            Box::new(Sphere::new(Vec3A::new(0.0, 0.0, 10.0), 1.0)),
            PhongMaterial::default(),
        ));
        assert!(list.intersect(Vec3A::ZERO, -Vec3A::Z).is_empty());
    }

    #[test]
    fn signatures_differ_between_solids() {
        assert_ne!(SolidId(0).signature(), SolidId(1).signature());
        assert_eq!(SolidId(7).signature(), SolidId(7).signature());
    }
}
