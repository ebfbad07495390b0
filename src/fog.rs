//! Uniform fog compositing.
//!
//! Fog volumes are ordinary solids with a [`Material::Fog`] material. A ray
//! that enters one first hits its boundary, then either its exit boundary or a
//! solid sitting inside it. The span between those two hits is the optical
//! depth; the color behind the span is blended toward the fog color with
//!
//! ```text
//! alpha = 1 - kt ^ depth
//! color = behind * (1 - alpha) + fog * alpha
//! ```
//!
//! Only the first fog span along a ray is resolved per shading call. Two fog
//! boundaries in a row are taken as entry and exit of one volume, even when
//! they belong to overlapping volumes.

use glam::Vec3A;
use log::trace;

use crate::intersection::{Intersection, Intersections};
use crate::material::{Color, Material, UniformFog};

/// Opacity of a fog span of length `optical_depth` with unit transmittance `kt`.
pub fn fog_alpha(kt: f32, optical_depth: f32) -> f32 {
    1.0 - kt.powf(optical_depth)
}

/// Blend `behind` toward `fog_color` over `optical_depth`.
///
/// Depth 0 returns `behind` unchanged.
pub fn composite(behind: Color, fog_color: Color, optical_depth: f32, kt: f32) -> Color {
    FogSpan::new(fog_color, fog_alpha(kt, optical_depth)).apply(behind)
}

/// Fog color and opacity recorded for one span along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogSpan {
    /// Fog color.
    pub color: Color,
    /// Opacity in [0, 1].
    pub alpha: f32,
}

impl FogSpan {
    /// Span with a known opacity.
    pub fn new(color: Color, alpha: f32) -> Self {
        Self { color, alpha }
    }

    /// Span of `fog` between two boundary points.
    pub fn between(fog: &UniformFog, start: Vec3A, end: Vec3A) -> Self {
        Self::new(fog.color, fog_alpha(fog.kt, start.distance(end)))
    }

    /// Blend `behind` with the fog color.
    pub fn apply(&self, behind: Color) -> Color {
        behind * (1.0 - self.alpha) + self.color * self.alpha
    }
}

/// What the front of an intersection sequence means once fog is accounted for.
#[derive(Debug)]
pub enum FogResolution<'a> {
    /// First hit is a regular surface.
    Clear(Intersection<'a>),
    /// A fog span lies in front of `hit`.
    Fogged {
        /// Surface to shade.
        hit: Intersection<'a>,
        /// Fog to composite over its color.
        span: FogSpan,
    },
    /// A fog span with nothing behind it.
    Background(FogSpan),
    /// A lone fog boundary; the span runs from the ray origin to it.
    Unbounded(FogSpan),
}

/// Interpret the first hits of `hits`, cast from `origin`.
///
/// Returns `None` for an empty sequence. The hits used to measure the span
/// are completed; a surface found behind a fog exit is left for the caller.
pub fn resolve_fog(mut hits: Intersections<'_>, origin: Vec3A) -> Option<FogResolution<'_>> {
    let (material, entry) = {
        let first = hits.complete_at(0)?;
        (first.material, first.coord_world)
    };
    let Material::Fog(fog) = material else {
        return hits.into_nth(0).map(FogResolution::Clear);
    };

    if !hits.has_next(0) {
        trace!("fog boundary at {entry} has no exit, measuring from {origin}");
        return Some(FogResolution::Unbounded(FogSpan::between(&fog, origin, entry)));
    }
    let (next_is_fog, exit) = {
        let next = hits.complete_at(1)?;
        (next.material.is_fog(), next.coord_world)
    };
    let span = FogSpan::between(&fog, entry, exit);

    if !next_is_fog {
        return hits
            .into_nth(1)
            .map(|hit| FogResolution::Fogged { hit, span });
    }

    // Entry and exit of the same volume: shade whatever lies behind the exit
    if !hits.has_next(1) {
        return Some(FogResolution::Background(span));
    }
    hits.into_nth(2)
        .map(|hit| FogResolution::Fogged { hit, span })
}
