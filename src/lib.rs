//! FogPath Whitted ray tracer
//!
//! Recursive Phong shading with shadows, mirror reflection, refraction and
//! uniform fog volumes. Every shaded ray also yields a signature hash that the
//! renderer uses to supersample only where the image structure changes.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod background;
pub mod camera;
pub mod fog;
pub mod intersection;
pub mod interval;
pub mod light;
pub mod material;
pub mod plane;
pub mod random;
pub mod ray;
pub mod recursion;
pub mod scene;
pub mod scenes;
pub mod solid;
pub mod sphere;
pub mod texture;
pub mod tracer;
