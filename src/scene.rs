//! Scene snapshot consumed by the tracer.

use crate::background::Background;
use crate::camera::Camera;
use crate::intersection::Intersectable;
use crate::light::LightSource;

/// Everything a frame needs. Read-only while rays are traced.
pub struct Scene {
    /// Root of the scene geometry.
    pub intersectable: Box<dyn Intersectable>,
    /// Color for rays that leave the scene.
    pub background: Box<dyn Background>,
    /// Viewpoint for primary rays.
    pub camera: Camera,
    /// Light sources in evaluation order.
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create a scene with no lights.
    pub fn new(
        intersectable: impl Intersectable + 'static,
        background: impl Background + 'static,
        camera: Camera,
    ) -> Self {
        Self {
            intersectable: Box::new(intersectable),
            background: Box::new(background),
            camera,
            lights: Vec::new(),
        }
    }

    /// Append a light source.
    pub fn add_light(&mut self, light: impl LightSource + 'static) {
        self.lights.push(Box::new(light));
    }
}
