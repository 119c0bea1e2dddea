//! Sphere tracing and normal estimation

use glam::Vec3;

use super::scene::{BrickMask, HitResult, ObjectKind, scene, sd_bricks};
use super::sdf::{sd_ball, sd_paddle, sd_walls};
use super::snapshot::SceneSnapshot;

pub const MAX_STEPS: u32 = 80;
pub const MAX_DISTANCE: f32 = 10.0;
/// Distance under which a step counts as a hit; also the normal tap offset
pub const HIT_EPSILON: f32 = 0.003;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.0);
pub const FOCAL_LENGTH: f32 = 1.65;

/// Pinhole camera looking down -Z
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub focal_length: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: CAMERA_POSITION,
            focal_length: FOCAL_LENGTH,
            width,
            height,
        }
    }

    /// Map a pixel center to uv in [-1, 1], Y up, X scaled by the aspect ratio
    pub fn uv(&self, x: u32, y: u32) -> (f32, f32) {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        let u = ((x as f32 + 0.5) / w * 2.0 - 1.0) * (w / h);
        let v = 1.0 - (y as f32 + 0.5) / h * 2.0;
        (u, v)
    }

    pub fn ray_direction(&self, x: u32, y: u32) -> Vec3 {
        let (u, v) = self.uv(x, y);
        Vec3::new(u, v, -self.focal_length).normalize_or_zero()
    }
}

/// Hit plus how many field evaluations it took
#[derive(Debug, Clone, Copy)]
pub struct MarchOutcome {
    pub hit: HitResult,
    pub steps: u32,
}

/// Sphere-trace any distance query from `origin` along unit `dir`.
///
/// Stops on the first sample closer than `HIT_EPSILON`. Running out of steps
/// or distance is a miss carrying the last sample point and the distance
/// traveled.
pub fn march<F>(origin: Vec3, dir: Vec3, mut query: F) -> MarchOutcome
where
    F: FnMut(Vec3) -> HitResult,
{
    let mut traveled = 0.0;
    let mut last = origin;
    let mut steps = 0;

    for i in 0..MAX_STEPS {
        let p = origin + dir * traveled;
        let sample = query(p);
        last = p;
        steps = i + 1;

        if sample.distance < HIT_EPSILON {
            return MarchOutcome { hit: sample, steps };
        }
        traveled += sample.distance;

        if traveled > MAX_DISTANCE {
            break;
        }
    }

    MarchOutcome {
        hit: HitResult::miss(last, traveled),
        steps,
    }
}

/// March the full scene, restricted to the bricks in `mask`
pub fn raymarch(
    snapshot: &SceneSnapshot,
    origin: Vec3,
    dir: Vec3,
    mask: &BrickMask,
) -> MarchOutcome {
    march(origin, dir, |p| scene(snapshot, p, mask))
}

/// Gradient of a distance field from four tetrahedral taps
pub fn tetrahedron_gradient<F>(p: Vec3, sdf: F) -> Vec3
where
    F: Fn(Vec3) -> f32,
{
    const TAPS: [Vec3; 4] = [
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ];

    TAPS.iter()
        .map(|&k| k * sdf(p + k * HIT_EPSILON))
        .sum::<Vec3>()
        .normalize_or_zero()
}

/// Surface normal at a hit, sampled on the hit object's own field.
///
/// Bricks use the blended field of every slot so normals stay continuous
/// across neighbours regardless of culling.
pub fn estimate_normal(snapshot: &SceneSnapshot, hit: &HitResult) -> Vec3 {
    let p = hit.position;
    match hit.kind {
        ObjectKind::None => Vec3::Y,
        ObjectKind::Paddle => tetrahedron_gradient(p, |q| sd_paddle(&snapshot.paddle, q)),
        ObjectKind::Ball => tetrahedron_gradient(p, |q| sd_ball(&snapshot.ball, q)),
        ObjectKind::Wall => tetrahedron_gradient(p, |q| sd_walls(q, snapshot.time)),
        ObjectKind::Brick => {
            let all = BrickMask::all();
            tetrahedron_gradient(p, |q| sd_bricks(snapshot, q, &all).0)
        }
    }
}
