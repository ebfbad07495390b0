//! Texture operators.
//!
//! A texture rewrites the surface color of a completed intersection and returns
//! a small value that the shader folds into the sampling signature, so two
//! neighbouring samples landing on different checker cells are told apart.

use glam::Vec2;

use crate::intersection::Intersection;
use crate::material::Color;

/// Operator modifying the surface color of a hit.
pub trait Texture: Send + Sync {
    /// Apply to a completed hit; returns the signature contribution.
    fn apply(&self, hit: &mut Intersection<'_>) -> i64;
}

/// Checkerboard over the texture coordinates.
///
/// Odd cells get `color`, even cells keep the surface color.
#[derive(Debug, Clone, Copy)]
pub struct CheckerTexture {
    /// Cell size along u and v.
    pub cell: Vec2,
    /// Color of the odd cells.
    pub color: Color,
}

impl CheckerTexture {
    /// Create a checker with the given cell size and odd-cell color.
    pub fn new(cell_u: f32, cell_v: f32, color: Color) -> Self {
        Self {
            cell: Vec2::new(cell_u, cell_v),
            color,
        }
    }
}

impl Texture for CheckerTexture {
    fn apply(&self, hit: &mut Intersection<'_>) -> i64 {
        let cell = (hit.texture_coord / self.cell).floor();
        let parity = (cell.x as i64 + cell.y as i64).rem_euclid(2);
        if parity == 1 {
            hit.surface_color = self.color;
        }
        parity + 1
    }
}
