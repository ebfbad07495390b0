//! Backgrounds seen by rays that hit nothing.

use glam::Vec3A;

use crate::material::Color;

/// Color function for rays leaving the scene.
pub trait Background: Send + Sync {
    /// Color seen along `direction` and its sampling signature.
    fn color(&self, direction: Vec3A) -> (Color, i64);
}

/// Constant background color.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBackground {
    /// The color.
    pub color: Color,
}

impl ConstantBackground {
    /// Create a constant background.
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Background for ConstantBackground {
    fn color(&self, _direction: Vec3A) -> (Color, i64) {
        (self.color, 1)
    }
}

/// Vertical gradient between a horizon and a zenith color.
#[derive(Debug, Clone, Copy)]
pub struct SkyGradient {
    /// Color looking straight down.
    pub horizon: Color,
    /// Color looking straight up.
    pub zenith: Color,
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            horizon: Color::new(1.0, 1.0, 1.0),
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl Background for SkyGradient {
    fn color(&self, direction: Vec3A) -> (Color, i64) {
        let unit_direction = direction.normalize_or_zero();
        // Y = -1 (down) gives a = 0, Y = 1 (up) gives a = 1
        let a = 0.5 * (unit_direction.y + 1.0);
        ((1.0 - a) * self.horizon + a * self.zenith, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_direction() {
        let background = ConstantBackground::new(Color::new(0.0, 0.01, 0.03));
        assert_eq!(background.color(Vec3A::X), background.color(-Vec3A::Y));
    }

    #[test]
    fn gradient_blends_by_elevation() {
        let sky = SkyGradient::default();
        assert_eq!(sky.color(Vec3A::Y).0, sky.zenith);
        assert_eq!(sky.color(-Vec3A::Y).0, sky.horizon);
        let side = sky.color(Vec3A::X).0;
        assert!((side - (sky.horizon + sky.zenith) * 0.5).abs().max_element() < 1.0e-6);
    }
}
