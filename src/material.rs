//! Material and reflectance system.
//!
//! A surface is described by a [`Material`] value (color, transparency,
//! refraction index) and shaded by a [`ReflectanceModel`]. Fog volumes use the
//! [`Material::Fog`] variant, which carries no reflectance at all: the shader
//! composites it over whatever lies behind instead of lighting it.

use glam::Vec3A;

use crate::intersection::Intersection;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Phong surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    /// Base surface color.
    pub color: Color,
    /// Ambient coefficient.
    pub ka: f32,
    /// Diffuse coefficient.
    pub kd: f32,
    /// Specular coefficient.
    pub ks: f32,
    /// Specular exponent (shininess).
    pub h: f32,
    /// Coefficient of transparency.
    pub kt: f32,
    /// Absolute index of refraction.
    pub n: f32,
}

impl PhongMaterial {
    /// Create an opaque Phong material.
    pub fn new(color: Color, ka: f32, kd: f32, ks: f32, h: f32) -> Self {
        Self {
            color,
            ka,
            kd,
            ks,
            h,
            kt: 0.0,
            n: 1.0,
        }
    }

    /// Make the material transparent with the given refraction index.
    pub fn with_transparency(mut self, kt: f32, n: f32) -> Self {
        self.kt = kt;
        self.n = n;
        self
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::new(Color::new(1.0, 0.9, 0.4), 0.2, 0.5, 0.3, 16.0)
    }
}

/// Homogeneous participating medium.
///
/// `kt` is the transmittance over a unit distance: light crossing a span of
/// length `d` keeps `kt^d` of its energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFog {
    /// Fog color.
    pub color: Color,
    /// Transparency over a unit distance, in [0, 1].
    pub kt: f32,
}

impl UniformFog {
    /// Create a fog medium.
    pub fn new(color: Color, kt: f32) -> Self {
        Self { color, kt }
    }
}

impl Default for UniformFog {
    fn default() -> Self {
        Self::new(Color::splat(0.5), 0.6)
    }
}

/// Material attached to a solid.
///
/// `Copy`, so the shader can take a private copy per intersection and
/// overwrite its color without touching the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Opaque or transparent surface lit by the Phong model.
    Phong(PhongMaterial),
    /// Fog volume boundary.
    Fog(UniformFog),
}

impl Material {
    /// Base color.
    pub fn color(&self) -> Color {
        match self {
            Material::Phong(phong) => phong.color,
            Material::Fog(fog) => fog.color,
        }
    }

    /// Replace the base color.
    pub fn set_color(&mut self, color: Color) {
        match self {
            Material::Phong(phong) => phong.color = color,
            Material::Fog(fog) => fog.color = color,
        }
    }

    /// Coefficient of transparency.
    pub fn kt(&self) -> f32 {
        match self {
            Material::Phong(phong) => phong.kt,
            Material::Fog(fog) => fog.kt,
        }
    }

    /// Absolute index of refraction. Fog is not refractive and reports 0.
    pub fn n(&self) -> f32 {
        match self {
            Material::Phong(phong) => phong.n,
            Material::Fog(_) => 0.0,
        }
    }

    /// True for fog volumes.
    pub fn is_fog(&self) -> bool {
        matches!(self, Material::Fog(_))
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Phong(PhongMaterial::default())
    }
}

impl From<PhongMaterial> for Material {
    fn from(material: PhongMaterial) -> Self {
        Material::Phong(material)
    }
}

impl From<UniformFog> for Material {
    fn from(fog: UniformFog) -> Self {
        Material::Fog(fog)
    }
}

/// Which part of the reflected light a reflectance query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionComponent {
    /// Diffuse term only.
    Diffuse,
    /// Mirror-like specular reflection only.
    SpecularReflection,
    /// Specular transmission only.
    SpecularRefraction,
    /// Everything.
    All,
}

impl ReflectionComponent {
    fn diffuse(self) -> bool {
        matches!(self, Self::Diffuse | Self::All)
    }

    fn specular_reflection(self) -> bool {
        matches!(self, Self::SpecularReflection | Self::All)
    }

    fn specular_refraction(self) -> bool {
        matches!(self, Self::SpecularRefraction | Self::All)
    }
}

/// Reflectance capability of a surface.
pub trait ReflectanceModel: Send + Sync {
    /// Light reflected from `input` (direction toward the source, zero for
    /// ambient light) into `output` (direction toward the viewer), per band.
    ///
    /// Returns `None` when the surface does not reflect at all.
    fn color_reflection(
        &self,
        hit: &Intersection<'_>,
        input: Vec3A,
        output: Vec3A,
        component: ReflectionComponent,
    ) -> Option<Color>;
}

/// Classic Phong reflectance over [`PhongMaterial`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PhongModel;

impl ReflectanceModel for PhongModel {
    fn color_reflection(
        &self,
        hit: &Intersection<'_>,
        input: Vec3A,
        output: Vec3A,
        component: ReflectionComponent,
    ) -> Option<Color> {
        let Material::Phong(material) = hit.material else {
            return None;
        };
        let normal = hit.normal;
        let view_out = output.dot(normal) > 0.0;

        if input == Vec3A::ZERO {
            // Ambient term, dimmed when the viewer is inside the solid
            let coef = if view_out {
                material.ka
            } else {
                material.ka * material.kt
            };
            return Some(material.color * coef);
        }

        let input = input.normalize();
        let cos_alpha = input.dot(normal);
        let light_out = cos_alpha > 0.0;

        let mut diffuse = 0.0;
        let mut lobe = None;
        let mut ks = material.ks;
        if view_out == light_out {
            if component.diffuse() {
                diffuse = material.kd * cos_alpha.abs();
            }
            if component.specular_reflection() {
                lobe = Some(specular_reflection(normal, input));
            }
        } else {
            if component.specular_refraction() {
                lobe = specular_refraction(normal, material.n, input);
            }
            ks = material.kt;
        }

        let specular = match lobe {
            Some(r) => {
                let cos_beta = r.dot(output);
                if cos_beta > 0.0 {
                    ks * cos_beta.powf(material.h)
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        Some(material.color * diffuse + Vec3A::splat(specular))
    }
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Mirror direction of `input` (pointing away from the surface) about `normal`.
pub fn specular_reflection(normal: Vec3A, input: Vec3A) -> Vec3A {
    -reflect(input, normal)
}

/// Refract `input` (pointing away from the surface, toward the viewer) through
/// an interface with absolute index `n` using Snell's law.
///
/// The side of the surface is taken from the sign of `input · normal`: the
/// viewer outside means the refracted ray enters the solid. Returns `None` on
/// total internal reflection.
pub fn specular_refraction(normal: Vec3A, n: f32, input: Vec3A) -> Option<Vec3A> {
    let mut normal = normal.normalize();
    let input = input.normalize();
    let mut cos_i = normal.dot(input);
    let eta = if cos_i < 0.0 {
        cos_i = -cos_i;
        normal = -normal;
        n
    } else {
        1.0 / n
    };

    let cos2_t = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if cos2_t <= 0.0 {
        return None;
    }
    let along_normal = eta * cos_i - cos2_t.sqrt();
    Some(normal * along_normal - input * eta)
}
