//! Camera for ray generation and adaptive frame rendering

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::material::Color;
use crate::random;
use crate::ray::Ray;
use crate::tracer::RayTracer;

/// Pinhole camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for Camera {
    /// Camera at the origin looking down -Z with a 90° field of view.
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::Y,
            vfov: 90.0,
        }
    }
}

/// Output resolution and sampling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    /// Rendered image width in pixel count
    pub width: u32,
    /// Rendered image height in pixel count
    pub height: u32,
    /// Extra jittered samples shot into pixels the signature marks as edges
    pub samples_per_pixel: u32,
}

/// Camera frame resolved for one image resolution.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
}

impl Viewport {
    /// Ray through image position (`x`, `y`) in pixel units; integer
    /// coordinates are pixel centers.
    pub fn get_ray(&self, x: f32, y: f32) -> Ray {
        let pixel_sample = self.pixel00_loc + (x * self.pixel_delta_u) + (y * self.pixel_delta_v);
        Ray::new(self.center, pixel_sample - self.center)
    }
}

impl Camera {
    /// Camera at `lookfrom` looking at `lookat` with +Y up.
    pub fn new(lookfrom: Vec3A, lookat: Vec3A, vfov: f32) -> Self {
        Self {
            lookfrom,
            lookat,
            vup: Vec3A::Y,
            vfov,
        }
    }

    /// Set up the camera coordinate system for a `width` x `height` image.
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let width = width.max(1);
        let height = height.max(1);

        // Determine viewport dimensions at unit focus distance
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (width as f32 / height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (self.lookfrom - self.lookat).normalize(); // Points opposite view direction
        let u = self.vup.cross(w).normalize(); // Points to camera right
        let v = w.cross(u); // Points to camera up

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / width as f32;
        let pixel_delta_v = viewport_v / height as f32;

        let viewport_upper_left = self.lookfrom - w - viewport_u / 2.0 - viewport_v / 2.0;
        Viewport {
            center: self.lookfrom,
            pixel00_loc: viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v),
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Renders the scene of `tracer` with adaptive supersampling.
    ///
    /// The first pass shades one ray through every pixel center and keeps its
    /// signature. The second pass adds `samples_per_pixel` jittered rays to the
    /// pixels whose signature differs from a 4-neighbour, i.e. along silhouettes,
    /// shadow boundaries, texture edges and fog outlines.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(
        &self,
        tracer: &RayTracer<'_>,
        settings: &ImageSettings,
    ) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let width = settings.width.max(1);
        let height = settings.height.max(1);
        let viewport = self.viewport(width, height);
        let row = width as usize;

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let generation_start = std::time::Instant::now();

        let mut samples = vec![(Color::ZERO, 0_i64); row * height as usize];
        samples.par_chunks_mut(row).enumerate().for_each(|(y, line)| {
            for (x, slot) in line.iter_mut().enumerate() {
                *slot = trace_pixel(tracer, &viewport, x as f32, y as f32);
            }
        });
        info!("Primary pass done in {:.2?}", generation_start.elapsed());

        let hashes: Vec<i64> = samples.iter().map(|&(_, hash)| hash).collect();
        let edges: Vec<usize> = (0..hashes.len())
            .filter(|&index| needs_supersampling(&hashes, width, height, index))
            .collect();
        info!(
            "Supersampling {} of {} pixels with {} extra samples",
            edges.len(),
            hashes.len(),
            settings.samples_per_pixel
        );

        let pb = ProgressBar::new(edges.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
            pb.set_style(style);
        }
        let refined: Vec<(usize, Color)> = edges
            .par_iter()
            .map(|&index| {
                let x = (index % row) as f32;
                let y = (index / row) as f32;
                let mut pixel_color = samples[index].0;
                for _sample in 0..settings.samples_per_pixel {
                    let (color, _) = trace_pixel(
                        tracer,
                        &viewport,
                        x + random::random_f32_range(-0.5, 0.5),
                        y + random::random_f32_range(-0.5, 0.5),
                    );
                    pixel_color += color;
                }
                pb.inc(1);
                (index, pixel_color / (settings.samples_per_pixel + 1) as f32)
            })
            .collect();
        pb.finish();

        for (index, color) in refined {
            samples[index].0 = color;
        }

        let image = ImageBuffer::from_fn(width, height, |x, y| {
            let (color, _) = samples[y as usize * row + x as usize];
            Rgb([color.x, color.y, color.z])
        });

        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}

/// Shade one primary ray through image position (`x`, `y`).
fn trace_pixel(tracer: &RayTracer<'_>, viewport: &Viewport, x: f32, y: f32) -> (Color, i64) {
    let ray = viewport.get_ray(x, y);
    let mut direction = ray.direction;
    let mut color = Color::ZERO;
    let hash = tracer.shade(0, 1.0, ray.origin, &mut direction, &mut color);
    (color, hash)
}

/// Whether the pixel at `index` has a 4-neighbour with a different signature.
pub fn needs_supersampling(hashes: &[i64], width: u32, height: u32, index: usize) -> bool {
    let width = width as usize;
    let height = height as usize;
    let (x, y) = (index % width, index / width);
    let hash = hashes[index];

    let left = x > 0 && hashes[index - 1] != hash;
    let right = x + 1 < width && hashes[index + 1] != hash;
    let up = y > 0 && hashes[index - width] != hash;
    let down = y + 1 < height && hashes[index + width] != hash;
    left || right || up || down
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_looks_at_target() {
        let camera = Camera::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 5.0), 60.0);
        let viewport = camera.viewport(101, 101);
        let ray = viewport.get_ray(50.0, 50.0);
        assert!((ray.direction.normalize() - Vec3A::Z).length() < 1.0e-5);
    }

    #[test]
    fn image_rows_go_down() {
        let camera = Camera::default();
        let viewport = camera.viewport(10, 10);
        let top = viewport.get_ray(5.0, 0.0);
        let bottom = viewport.get_ray(5.0, 9.0);
        assert!(top.direction.y > bottom.direction.y);
    }

    #[test]
    fn uniform_region_is_not_supersampled() {
        let hashes = vec![4_i64; 9];
        assert!((0..9).all(|index| !needs_supersampling(&hashes, 3, 3, index)));
    }

    #[test]
    fn signature_edge_marks_both_sides() {
        // Left column differs from the rest
        let hashes = vec![1, 2, 2, 1, 2, 2, 1, 2, 2];
        let marked: Vec<usize> = (0..9)
            .filter(|&index| needs_supersampling(&hashes, 3, 3, index))
            .collect();
        assert_eq!(marked, vec![0, 1, 3, 4, 6, 7]);
    }
}
