//! Built-in demo scenes.

use glam::Vec3A;
use log::debug;

use crate::background::ConstantBackground;
use crate::camera::Camera;
use crate::light::{AmbientLight, PointLight};
use crate::material::{Color, PhongMaterial, UniformFog};
use crate::plane::Plane;
use crate::scene::Scene;
use crate::solid::{Solid, SolidList};
use crate::sphere::Sphere;
use crate::texture::CheckerTexture;

/// Two orange spheres, one partly sunk into a fog ball, over a checkered floor.
pub fn two_spheres_and_fog(fog: UniformFog) -> Scene {
    let orange = PhongMaterial::new(Color::new(1.0, 0.7, 0.1), 0.1, 0.7, 0.3, 128.0);

    let mut world = SolidList::new();
    world.add(Solid::new(
        Box::new(Sphere::new(Vec3A::new(0.0, 1.0, 3.0), 2.0)),
        fog,
    ));
    world.add(Solid::new(
        Box::new(Sphere::new(Vec3A::new(1.0, 0.5, 3.0), 1.2)),
        orange,
    ));
    world.add(Solid::new(
        Box::new(Sphere::new(Vec3A::new(-2.0, 1.5, 8.0), 1.2)),
        orange,
    ));

    // Dark red floor, white on odd cells
    let floor = PhongMaterial::new(Color::new(0.3, 0.0, 0.0), 0.1, 0.7, 0.3, 128.0);
    world.add(
        Solid::new(Box::new(Plane::ground(-1.0)), floor)
            .with_texture(CheckerTexture::new(0.6, 0.6, Color::ONE)),
    );

    let lookfrom = Vec3A::new(0.0, 0.5, -5.0);
    let camera = Camera::new(lookfrom, lookfrom + Vec3A::new(0.0, -0.18, 1.0), 70.0);

    let mut scene = Scene::new(
        world,
        ConstantBackground::new(Color::new(0.0, 0.01, 0.03)),
        camera,
    );
    scene.add_light(AmbientLight::new(0.8));
    scene.add_light(PointLight::new(Vec3A::new(-5.0, 4.0, -3.0), 1.2));

    debug!(
        "Scene 'two spheres and fog': fog color {}, kt {}",
        fog.color, fog.kt
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::{RayTracer, TracerSettings};

    #[test]
    fn camera_ray_through_the_fog_ball_is_tinted() {
        let fog = UniformFog::new(Color::new(0.5, 0.5, 0.5), 0.6);
        let scene = two_spheres_and_fog(fog);
        let tracer = RayTracer::new(&scene, TracerSettings::default());

        let mut direction = Vec3A::new(0.0, 0.5, 8.0) - scene.camera.lookfrom;
        let mut color = Color::ZERO;
        tracer.shade(0, 1.0, scene.camera.lookfrom, &mut direction, &mut color);
        // Fog dominates over the dark background
        assert!(color.min_element() > 0.1);
        assert_eq!(scene.lights.len(), 2);
    }
}
