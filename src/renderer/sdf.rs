//! Signed distance primitives
//!
//! Every function returns a signed distance: negative inside, zero on the
//! surface, positive outside. The ray marcher steps by these values directly,
//! so they must not overestimate the true distance.

use glam::{Vec2, Vec3};

use super::snapshot::{BallSnapshot, PaddleSnapshot};

/// How far the paddle capsule's end caps are pulled in from the collision box
pub const PADDLE_INSET: f32 = 0.02;

/// Upper bound on the amount a brick's half extents are pulled in before rounding
pub const BRICK_SHRINK: f32 = 0.04;
/// Upper bound on a brick's rounding radius
pub const BRICK_ROUNDING: f32 = 0.06;
/// Largest growth of a brick's half extents from the pulse ripple
pub const PULSE_AMPLITUDE: f32 = 0.01;

/// Wall lattice spacing and sphere radius
const WALL_CELL: f32 = 0.25;
const WALL_SPHERE_RADIUS: f32 = 0.18;
/// Units per second the wall pattern scrolls away from the camera
const WALL_SCROLL_SPEED: f32 = 0.1;
/// Half extents of the box carved out of the lattice for the play area
const PLAY_AREA: Vec3 = Vec3::new(1.0, 1.0, 10.0);
/// Gutter carve: ellipsoid squashed along Z, centered under the paddle line
const GUTTER_SQUASH: f32 = 4.5;
const GUTTER_RADIUS: f32 = 0.8;

// ============================================================================
// GENERIC SHAPES AND OPERATORS
// ============================================================================

#[inline]
pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Axis-aligned box centered at the origin
#[inline]
pub fn sd_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
}

/// Line segment `a`-`b` thickened by `radius`
#[inline]
pub fn sd_capsule(p: Vec3, a: Vec3, b: Vec3, radius: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let denom = ba.dot(ba);
    // Degenerate segment collapses to a sphere
    let h = if denom > 0.0 {
        (pa.dot(ba) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (pa - ba * h).length() - radius
}

/// Polynomial smooth minimum with blend radius `k`
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    let k = k.max(1e-10);
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.min(b) - h * h * k * 0.25
}

/// Polynomial smooth maximum with blend radius `k`
#[inline]
pub fn smooth_max(a: f32, b: f32, k: f32) -> f32 {
    let k = k.max(1e-10);
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.max(b) + h * h * k * 0.25
}

#[inline]
pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    smooth_min(d1, d2, k)
}

/// Smoothly carve `d2` out of `d1`
#[inline]
pub fn smooth_difference(d1: f32, d2: f32, k: f32) -> f32 {
    smooth_max(d1, -d2, k)
}

// ============================================================================
// SCENE OBJECTS
// ============================================================================

/// Paddle: a capsule along X, radius half the thickness
pub fn sd_paddle(paddle: &PaddleSnapshot, p: Vec3) -> f32 {
    let center = paddle.position.extend(0.0);
    let half_length = (paddle.size.x / 2.0 - PADDLE_INSET).max(0.0);
    let offset = Vec3::new(half_length, 0.0, 0.0);
    sd_capsule(p, center - offset, center + offset, paddle.size.y / 2.0)
}

#[inline]
pub fn sd_ball(ball: &BallSnapshot, p: Vec3) -> f32 {
    sd_sphere(p - ball.position.extend(0.0), ball.radius)
}

/// Decorative ripple travelling diagonally across the brick grid
#[inline]
pub fn brick_pulse(position: Vec2, time: f32) -> f32 {
    ((-position.x + position.y + time * 2.0).sin().clamp(0.9, 1.0) - 0.9) * 0.1
}

/// Rounded brick centered at `position` with (already scaled) `size`
pub fn sd_brick(p: Vec3, position: Vec2, size: Vec3, time: f32) -> f32 {
    let smallest = size.x.min(size.y);
    let shrinkage = BRICK_SHRINK.min(smallest / 2.0);
    let expansion = BRICK_ROUNDING.min(smallest);
    let pulse = brick_pulse(position, time);

    let half_extents = size / 2.0 + Vec3::splat(pulse - shrinkage);
    sd_box(p - position.extend(0.0), half_extents) - expansion
}

/// Backdrop: a scrolling lattice of spheres with the play area and the
/// gutter below the paddle carved out
pub fn sd_walls(p: Vec3, time: f32) -> f32 {
    let mut q = p;
    q.z -= time * WALL_SCROLL_SPEED;
    q.x -= WALL_CELL / 2.0;
    q.y -= WALL_CELL / 2.0;

    let repeated = q - (q / WALL_CELL).round() * WALL_CELL;
    let lattice = sd_sphere(repeated, WALL_SPHERE_RADIUS);

    let carved = smooth_difference(lattice, sd_box(p, PLAY_AREA), 0.05);

    let squash = Vec3::new(1.0, 1.0, GUTTER_SQUASH);
    let gutter = sd_sphere(p * squash - Vec3::new(0.0, -1.0, 0.0), GUTTER_RADIUS) / GUTTER_SQUASH;
    smooth_difference(carved, gutter, 0.15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> PaddleSnapshot {
        PaddleSnapshot {
            position: Vec2::new(0.0, -0.9),
            size: Vec2::new(0.5, 0.06),
        }
    }

    #[test]
    fn test_sphere_surface_is_zero() {
        let ball = BallSnapshot {
            position: Vec2::new(0.3, -0.2),
            radius: 0.06,
        };
        let dir = Vec3::new(1.0, 2.0, -0.5).normalize();
        let on_surface = ball.position.extend(0.0) + dir * ball.radius;
        assert!(sd_ball(&ball, on_surface).abs() < 1e-6);
    }

    #[test]
    fn test_box_surface_and_center() {
        let half = Vec3::new(1.0, 0.5, 0.25);
        assert!((sd_box(Vec3::ZERO, half) + 0.25).abs() < 1e-6);
        assert!(sd_box(Vec3::new(1.0, 0.0, 0.0), half).abs() < 1e-6);
        assert!((sd_box(Vec3::new(2.0, 0.0, 0.0), half) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_surface() {
        let paddle = paddle();
        // Directly above the middle of the segment, one radius up
        let top = Vec3::new(0.0, -0.9 + 0.03, 0.0);
        assert!(sd_paddle(&paddle, top).abs() < 1e-6);
        // End cap: inset from the box edge
        let cap = Vec3::new(0.25 - PADDLE_INSET + 0.03, -0.9, 0.0);
        assert!(sd_paddle(&paddle, cap).abs() < 1e-6);
        assert!(sd_paddle(&paddle, Vec3::new(0.0, -0.9, 0.0)) < 0.0);
    }

    #[test]
    fn test_brick_face_with_rounding() {
        // size.y = 0.0625: shrink 0.03125, rounding 0.06 -> face at 0.06 above center
        let position = Vec2::new(0.0, 0.5);
        let size = Vec3::new(0.25, 0.0625, 0.1);
        // time chosen so the pulse is zero (sin term below 0.9)
        let time = 0.0;
        assert_eq!(brick_pulse(position, time), 0.0);
        let face = Vec3::new(0.0, 0.5 + 0.06, 0.0);
        assert!(sd_brick(face, position, size, time).abs() < 1e-5);
        assert!(sd_brick(position.extend(0.0), position, size, time) < 0.0);
    }

    #[test]
    fn test_pulse_is_bounded() {
        for i in 0..200 {
            let t = i as f32 * 0.05;
            let pulse = brick_pulse(Vec2::new(0.3, 0.7), t);
            assert!((0.0..=PULSE_AMPLITUDE + 1e-6).contains(&pulse));
        }
    }

    #[test]
    fn test_walls_clear_inside_play_area() {
        assert!(sd_walls(Vec3::ZERO, 0.0) > 0.5);
        assert!(sd_walls(Vec3::new(0.5, 0.5, -3.0), 1.0) > 0.2);
    }

    #[test]
    fn test_walls_solid_at_lattice_center() {
        // A lattice sphere center outside the play area and away from the gutter
        let d = sd_walls(Vec3::new(1.625, 0.125, -5.0), 0.0);
        assert!((d + WALL_SPHERE_RADIUS).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn test_smooth_min_limit() {
        let (a, b) = (0.3, 0.31);
        let mut prev_err = f32::MAX;
        for k in [0.1, 0.04, 0.01, 0.001, 0.0] {
            let err = (smooth_min(a, b, k) - a.min(b)).abs();
            assert!(err <= prev_err + 1e-7);
            prev_err = err;
        }
        assert!(prev_err < 1e-6);
    }

    #[test]
    fn test_smooth_difference_carves() {
        // Point inside both shapes ends up outside after carving
        assert!(smooth_difference(-0.5, -0.5, 0.05) > 0.0);
        // Point far from the carved shape keeps its distance
        assert!((smooth_difference(-0.2, 3.0, 0.05) + 0.2).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_sphere_sign(x in -2.0f32..2.0, y in -2.0f32..2.0, z in -2.0f32..2.0, r in 0.05f32..1.0) {
            let p = Vec3::new(x, y, z);
            let d = sd_sphere(p, r);
            let len = p.length();
            if len > r + 1e-4 { prop_assert!(d > 0.0); }
            if len < r - 1e-4 { prop_assert!(d < 0.0); }
        }

        #[test]
        fn prop_box_sign(x in -2.0f32..2.0, y in -2.0f32..2.0, z in -2.0f32..2.0) {
            let half = Vec3::new(0.5, 0.25, 0.75);
            let p = Vec3::new(x, y, z);
            let d = sd_box(p, half);
            let outside = p.abs().cmpgt(half + Vec3::splat(1e-4)).any();
            let inside = p.abs().cmplt(half - Vec3::splat(1e-4)).all();
            if outside { prop_assert!(d > 0.0); }
            if inside { prop_assert!(d < 0.0); }
        }

        #[test]
        fn prop_capsule_sign(x in -1.0f32..1.0, y in -1.0f32..1.0, z in -0.5f32..0.5) {
            let paddle = paddle();
            let p = Vec3::new(x, y, z);
            let d = sd_paddle(&paddle, p);
            // Points beyond the collision box plus a margin are always outside
            let outside = x.abs() > 0.26 || (y + 0.9).abs() > 0.031 || z.abs() > 0.031;
            if outside { prop_assert!(d > 0.0); }
        }

        #[test]
        fn prop_smooth_min_converges(a in -1.0f32..1.0, b in -1.0f32..1.0) {
            let k = 1e-4;
            prop_assert!((smooth_min(a, b, k) - a.min(b)).abs() <= k * 0.25 + 1e-6);
            prop_assert!(smooth_min(a, b, 0.04) <= a.min(b));
        }
    }
}
