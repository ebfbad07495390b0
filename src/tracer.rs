//! Recursive Whitted shading with uniform fog.
//!
//! [`RayTracer::shade`] computes the color seen along one ray: direct light from
//! every source (with optional shadow rays), fog composited over the first
//! surface hit, then mirror reflection and refraction traced recursively. Next
//! to the color it returns a signature hash of the solids, textures, lights and
//! secondary rays that contributed; a renderer compares neighbouring signatures
//! to decide where to supersample.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use glam::Vec3A;
use log::{debug, trace};
use serde::Deserialize;

use crate::fog::{resolve_fog, FogResolution};
use crate::interval::Interval;
use crate::intersection::Intersection;
use crate::light::light_signature;
use crate::material::{specular_reflection, specular_refraction, Color, ReflectionComponent};
use crate::recursion::{RayRecursion, Spectrum};
use crate::scene::Scene;

/// Signature multiplier for texture contributions.
pub const HASH_TEXTURE: i64 = 7;
/// Signature multiplier for light source contributions.
pub const HASH_LIGHT: i64 = 101;
/// Signature multiplier for reflected and procedural rays.
pub const HASH_REFLECT: i64 = 1011;
/// Signature multiplier for refracted rays.
pub const HASH_REFRACT: i64 = 1031;
/// Signature multiplier for recursion function results.
pub const HASH_RECURSION: i64 = 1047;

/// Switches and limits of the recursive shader.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TracerSettings {
    /// Maximum number of nested shading levels, primary ray included.
    pub max_level: u32,
    /// Secondary rays carrying less importance are not traced.
    pub min_importance: f32,
    /// Trace shadow rays toward positional lights.
    pub do_shadows: bool,
    /// Trace mirror reflections.
    pub do_reflections: bool,
    /// Trace refractions.
    pub do_refractions: bool,
    /// Honor per-solid recursion functions.
    pub do_recursion: bool,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_level: 12,
            min_importance: 0.05,
            do_shadows: true,
            do_reflections: true,
            do_refractions: true,
            do_recursion: true,
        }
    }
}

impl TracerSettings {
    /// Check the limits once, before any ray is traced.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_level == 0 {
            return Err("maxLevel must be at least 1".into());
        }
        if !Interval::new(0.0, 1.0).contains(self.min_importance) {
            return Err(format!(
                "minImportance must lie in [0, 1], got {}",
                self.min_importance
            ));
        }
        Ok(())
    }
}

/// Ray counters shared by every thread tracing with one [`RayTracer`].
#[derive(Debug, Default)]
pub struct Statistics {
    primary_rays: AtomicU64,
    all_rays: AtomicU64,
    deepest_level: AtomicU32,
}

impl Statistics {
    fn record_ray(&self, depth: u32) {
        if depth == 0 {
            self.primary_rays.fetch_add(1, Ordering::Relaxed);
        }
        self.all_rays.fetch_add(1, Ordering::Relaxed);
        self.deepest_level.fetch_max(depth, Ordering::Relaxed);
    }

    fn record_shadow_ray(&self) {
        self.all_rays.fetch_add(1, Ordering::Relaxed);
    }

    /// Rays shot at depth 0.
    pub fn primary_rays(&self) -> u64 {
        self.primary_rays.load(Ordering::Relaxed)
    }

    /// All rays, shadow rays included.
    pub fn all_rays(&self) -> u64 {
        self.all_rays.load(Ordering::Relaxed)
    }

    /// Deepest shading level entered so far.
    pub fn deepest_level(&self) -> u32 {
        self.deepest_level.load(Ordering::Relaxed)
    }
}

/// Whitted ray tracer over one scene.
///
/// `shade` only takes `&self`, so one tracer can be shared by all render
/// threads.
pub struct RayTracer<'s> {
    scene: &'s Scene,
    settings: TracerSettings,
    statistics: Statistics,
}

impl<'s> RayTracer<'s> {
    /// Create a tracer for `scene`.
    pub fn new(scene: &'s Scene, settings: TracerSettings) -> Self {
        debug!(
            "Tracer settings: {:?}, {} light source(s)",
            settings,
            scene.lights.len()
        );
        Self {
            scene,
            settings,
            statistics: Statistics::default(),
        }
    }

    /// Ray counters.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Color seen from `origin` along `direction`, written to `color`.
    ///
    /// `depth` is the current recursion level (0 for primary rays) and
    /// `importance` the share of the pixel this ray still stands for. Once a
    /// surface is found `direction` is overwritten with the normalized viewing
    /// vector pointing back toward `origin`.
    ///
    /// Returns the sampling signature of the ray.
    pub fn shade(
        &self,
        depth: u32,
        importance: f32,
        origin: Vec3A,
        direction: &mut Vec3A,
        color: &mut Color,
    ) -> i64 {
        let hits = self.scene.intersectable.intersect(origin, *direction);
        self.statistics.record_ray(depth);
        trace!("depth {depth}: {} hit(s)", hits.len());

        let (mut hit, fog) = match resolve_fog(hits, origin) {
            None => {
                let (background, hash) = self.scene.background.color(*direction);
                *color = background;
                return hash;
            }
            Some(FogResolution::Background(span) | FogResolution::Unbounded(span)) => {
                let (background, hash) = self.scene.background.color(*direction);
                *color = span.apply(background);
                return hash;
            }
            Some(FogResolution::Clear(hit)) => (hit, None),
            Some(FogResolution::Fogged { hit, span }) => {
                trace!("depth {depth}: fog alpha {} in front of t={}", span.alpha, hit.t);
                (hit, Some(span))
            }
        };

        hit.complete();
        let solid = hit.solid;
        let mut hash = hit.solid_id.signature();
        for texture in &solid.textures {
            hash = hash
                .wrapping_mul(HASH_TEXTURE)
                .wrapping_add(texture.apply(&mut hit));
        }

        *color = Color::ZERO;
        let view = (-*direction).normalize();

        if self.settings.do_recursion {
            if let Some(function) = &solid.recursion {
                let (function_hash, recursion) = function.recurse(&hit, view, importance);
                hash = hash.wrapping_add(HASH_RECURSION.wrapping_mul(function_hash));
                if let Some(recursion) = recursion {
                    return self.apply_recursion(depth, recursion, hash, color);
                }
            }
        }

        *direction = view;

        if self.scene.lights.is_empty() {
            *color += hit.surface_color;
        } else {
            hit.material.set_color(hit.surface_color);
            let reflectance = hit.reflectance();
            for (index, light) in self.scene.lights.iter().enumerate() {
                let Some(sample) = light.intensity(&hit) else {
                    continue;
                };
                if self.settings.do_shadows
                    && sample.direction != Vec3A::ZERO
                    && self.occluded(&hit, sample.direction)
                {
                    continue;
                }
                if let Some(reflection) =
                    reflectance.color_reflection(&hit, sample.direction, view, ReflectionComponent::All)
                {
                    *color += sample.intensity * reflection;
                    hash = hash
                        .wrapping_mul(HASH_LIGHT)
                        .wrapping_add(light_signature(index));
                }
            }
        }

        if let Some(span) = fog {
            *color = span.apply(*color);
        }

        let depth = depth + 1;
        if depth >= self.settings.max_level
            || (!self.settings.do_reflections && !self.settings.do_refractions)
            || hit.material.is_fog()
        {
            return hash;
        }

        if self.settings.do_reflections {
            let mut reflected = specular_reflection(hit.normal, view);
            if let Some(ks) = hit.reflectance().color_reflection(
                &hit,
                view,
                reflected,
                ReflectionComponent::SpecularReflection,
            ) {
                let new_importance = importance * ks.max_element();
                if new_importance >= self.settings.min_importance {
                    let mut reflected_color = Color::ZERO;
                    let sub_hash = self.shade(
                        depth,
                        new_importance,
                        hit.coord_world,
                        &mut reflected,
                        &mut reflected_color,
                    );
                    hash = hash.wrapping_add(HASH_REFLECT.wrapping_mul(sub_hash));
                    *color += reflected_color * ks;
                }
            }
        }

        if self.settings.do_refractions {
            let max_k = hit.material.kt();
            let new_importance = importance * max_k;
            if new_importance < self.settings.min_importance {
                return hash;
            }
            let Some(mut refracted) = specular_refraction(hit.normal, hit.material.n(), view) else {
                return hash;
            };
            let mut refracted_color = Color::ZERO;
            let sub_hash = self.shade(
                depth,
                new_importance,
                hit.coord_world,
                &mut refracted,
                &mut refracted_color,
            );
            hash = hash.wrapping_add(HASH_REFRACT.wrapping_mul(sub_hash));
            *color += refracted_color * max_k;
        }

        hash
    }

    /// Combine a procedural recursion result into `color`.
    ///
    /// The result stands for the whole hit: no fog span is composited over it.
    fn apply_recursion(
        &self,
        depth: u32,
        recursion: RayRecursion,
        mut hash: i64,
        color: &mut Color,
    ) -> i64 {
        match recursion.direct {
            Some(Spectrum::Uniform(value)) => *color += Color::splat(value),
            Some(Spectrum::PerBand(direct)) => *color += direct,
            None => {}
        }

        let depth = depth + 1;
        if depth >= self.settings.max_level {
            return hash;
        }
        for ray in &recursion.rays {
            let mut direction = ray.direction;
            let mut ray_color = Color::ZERO;
            let sub_hash = self.shade(depth, ray.importance, ray.origin, &mut direction, &mut ray_color);
            hash = hash.wrapping_add(HASH_REFLECT.wrapping_mul(sub_hash));
            *color += ray_color * ray.weight();
        }
        hash
    }

    /// Whether something solid sits strictly between `hit` and the end of `to_light`.
    fn occluded(&self, hit: &Intersection<'_>, to_light: Vec3A) -> bool {
        let blockers = self.scene.intersectable.intersect(hit.coord_world, to_light);
        self.statistics.record_shadow_ray();
        blockers
            .first()
            .is_some_and(|blocker| !blocker.is_far(1.0, to_light))
    }
}
