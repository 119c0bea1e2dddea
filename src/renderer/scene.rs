//! Scene composition: which object is closest to a point, and how far
//!
//! Bricks are folded into one blended field. The closest brick by raw
//! distance names the hit, the smooth union gives the distance the marcher
//! steps by.

use glam::Vec3;

use super::sdf::{
    BRICK_ROUNDING, PULSE_AMPLITUDE, sd_ball, sd_brick, sd_paddle, sd_walls, smooth_union,
};
use super::snapshot::{BrickSnapshot, SceneSnapshot};
use crate::consts::BRICK_SLOTS;

/// Blend radius between neighbouring bricks
pub const BRICK_BLEND: f32 = 0.04;
/// Distance reported when no brick is visible
pub const EMPTY: f32 = 1e20;

/// Peak of the ease-out-back curve driving the lifecycle scale
const MAX_LIFECYCLE_SCALE: f32 = 1.1;
const BOUNDS_MARGIN: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectKind {
    #[default]
    None,
    Paddle,
    Ball,
    Brick,
    Wall,
}

/// Result of a scene query or a full march
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub kind: ObjectKind,
    pub position: Vec3,
    pub distance: f32,
    /// Slot of the hit brick, -1 for anything else
    pub brick_index: i32,
}

impl HitResult {
    pub fn miss(position: Vec3, traveled: f32) -> Self {
        Self {
            kind: ObjectKind::None,
            position,
            distance: traveled,
            brick_index: -1,
        }
    }

    fn object(kind: ObjectKind, position: Vec3, distance: f32) -> Self {
        Self {
            kind,
            position,
            distance,
            brick_index: -1,
        }
    }

    /// The brick slot, if this is a brick hit with a valid index
    pub fn brick_slot(&self) -> Option<usize> {
        if self.kind != ObjectKind::Brick {
            return None;
        }
        usize::try_from(self.brick_index)
            .ok()
            .filter(|&i| i < BRICK_SLOTS)
    }
}

/// Which brick slots take part in a ray's scene queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickMask([bool; BRICK_SLOTS]);

impl BrickMask {
    pub fn all() -> Self {
        Self([true; BRICK_SLOTS])
    }

    pub fn none() -> Self {
        Self([false; BRICK_SLOTS])
    }

    /// Slots whose bounding sphere the ray passes through
    pub fn for_ray(snapshot: &SceneSnapshot, origin: Vec3, dir: Vec3) -> Self {
        Self(std::array::from_fn(|i| {
            let brick = &snapshot.bricks[i];
            ray_sphere_intersect(
                origin,
                dir,
                brick.position.extend(0.0),
                brick_bounding_radius(brick),
            )
        }))
    }

    #[inline]
    pub fn is_visible(&self, slot: usize) -> bool {
        self.0.get(slot).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&v| v).count()
    }
}

/// Radius of a sphere around the brick center that contains every surface
/// the brick can render at any point of its lifecycle, padded by the blend
/// radius so culled bricks never reach into a neighbour's smooth union
pub fn brick_bounding_radius(brick: &BrickSnapshot) -> f32 {
    let half = Vec3::new(
        brick.size.x * MAX_LIFECYCLE_SCALE / 2.0,
        brick.size.y * MAX_LIFECYCLE_SCALE / 2.0,
        brick.size.z / 2.0,
    ) + Vec3::splat(PULSE_AMPLITUDE);

    half.length() + BRICK_ROUNDING + BRICK_BLEND + BOUNDS_MARGIN
}

/// Whether the infinite line through `origin` along `dir` meets the sphere.
/// `dir` must be unit length.
#[inline]
pub fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> bool {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    b * b - c >= 0.0
}

/// Blended distance over the visible bricks and the closest slot.
///
/// Returns `(EMPTY, -1)` when no slot is visible.
pub fn sd_bricks(snapshot: &SceneSnapshot, p: Vec3, mask: &BrickMask) -> (f32, i32) {
    sd_bricks_blended(snapshot, p, mask, BRICK_BLEND)
}

pub fn sd_bricks_blended(
    snapshot: &SceneSnapshot,
    p: Vec3,
    mask: &BrickMask,
    blend: f32,
) -> (f32, i32) {
    let mut distance = EMPTY;
    let mut closest = EMPTY;
    let mut index = -1;

    for (i, brick) in snapshot.bricks.iter().enumerate() {
        if !mask.is_visible(i) {
            continue;
        }
        let raw = sd_brick(p, brick.position, brick.scaled_size(), snapshot.time);
        if raw < closest {
            closest = raw;
            index = i as i32;
        }
        distance = smooth_union(distance, raw, blend);
    }

    (distance, index)
}

/// Closest object at `p`
pub fn scene(snapshot: &SceneSnapshot, p: Vec3, mask: &BrickMask) -> HitResult {
    let paddle = sd_paddle(&snapshot.paddle, p);
    let ball = sd_ball(&snapshot.ball, p);
    let (bricks, brick_index) = sd_bricks(snapshot, p, mask);
    let walls = sd_walls(p, snapshot.time);

    nearest(p, paddle, ball, walls, (bricks, brick_index))
}

/// Pick the smallest distance. Ties resolve paddle, ball, wall, brick in
/// that order, so a brick only wins when strictly closer than the rest.
fn nearest(p: Vec3, paddle: f32, ball: f32, walls: f32, bricks: (f32, i32)) -> HitResult {
    let (bricks, brick_index) = bricks;

    if paddle <= ball && paddle <= bricks && paddle <= walls {
        return HitResult::object(ObjectKind::Paddle, p, paddle);
    }
    if ball <= bricks && ball <= walls {
        return HitResult::object(ObjectKind::Ball, p, ball);
    }
    if walls <= bricks {
        return HitResult::object(ObjectKind::Wall, p, walls);
    }

    HitResult {
        kind: ObjectKind::Brick,
        position: p,
        distance: bricks,
        brick_index,
    }
}
