//! CPU ray-marched rendering module
//!
//! The whole frame is a signed distance field: paddle, ball, bricks and the
//! backdrop are traced per pixel from an immutable snapshot of the world.

pub mod framebuffer;
pub mod march;
pub mod scene;
pub mod sdf;
pub mod shading;
pub mod snapshot;

use glam::Vec3;
use rayon::prelude::*;

pub use framebuffer::{Framebuffer, Rgba8};
pub use march::{Camera, MarchOutcome, estimate_normal, raymarch};
pub use scene::{BrickMask, HitResult, ObjectKind};
pub use snapshot::SceneSnapshot;

use crate::error::Result;
use crate::sim::World;

pub struct SdfRenderer {
    camera: Camera,
    framebuffer: Framebuffer,
    /// Skip bricks whose bounding sphere a ray misses
    brick_culling: bool,
}

impl SdfRenderer {
    pub fn new(width: u32, height: u32, brick_culling: bool) -> Result<Self> {
        let framebuffer = Framebuffer::new(width, height)?;
        log::info!(
            "SDF renderer {}x{} (brick culling {})",
            width,
            height,
            if brick_culling { "on" } else { "off" }
        );
        Ok(Self {
            camera: Camera::new(width, height),
            framebuffer,
            brick_culling,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<()> {
        self.framebuffer = Framebuffer::new(new_width, new_height)?;
        self.camera = Camera::new(new_width, new_height);
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Capture the world and render it.
    ///
    /// `timestamp_ms` is the display clock in milliseconds and drives every
    /// animation.
    pub fn render(&mut self, world: &World, timestamp_ms: f64) -> &Framebuffer {
        let snapshot = SceneSnapshot::capture(world, timestamp_ms);
        self.render_snapshot(&snapshot)
    }

    /// Render a prepared snapshot, one rayon task per row
    pub fn render_snapshot(&mut self, snapshot: &SceneSnapshot) -> &Framebuffer {
        let camera = self.camera;
        let culling = self.brick_culling;
        let width = self.framebuffer.width() as usize;
        let light = shading::light_direction(snapshot.time);

        self.framebuffer
            .pixels_mut()
            .par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let color = trace_pixel(snapshot, &camera, x as u32, y as u32, light, culling);
                    *pixel = Rgba8::from_linear(color);
                }
            });

        &self.framebuffer
    }
}

/// Full per-pixel pipeline: ray, march, normal, shade
pub fn trace_pixel(
    snapshot: &SceneSnapshot,
    camera: &Camera,
    x: u32,
    y: u32,
    light: Vec3,
    brick_culling: bool,
) -> Vec3 {
    let dir = camera.ray_direction(x, y);
    let mask = if brick_culling {
        BrickMask::for_ray(snapshot, camera.position, dir)
    } else {
        BrickMask::all()
    };

    let outcome = raymarch(snapshot, camera.position, dir, &mask);
    let normal = estimate_normal(snapshot, &outcome.hit);
    shading::shade(snapshot, &outcome.hit, normal, dir, light)
}
