//! Per-object materials
//!
//! Colors are linear and unclamped except where noted; the framebuffer
//! clamps when it quantizes.

use std::f32::consts::TAU;

use glam::Vec3;

use super::scene::{BrickMask, HitResult, ObjectKind, sd_bricks};
use super::snapshot::SceneSnapshot;
use crate::color::hsl_to_rgb;
use crate::sim::BrickState;
use crate::{ease_in_sine, remap};

/// Flat background for rays that hit nothing, and the far fade target
pub const BACKGROUND_GRAY: f32 = 0.35;

/// Slowly orbiting key light
pub fn light_direction(time: f32) -> Vec3 {
    Vec3::new((time * 0.5).sin(), (time * 0.5).cos(), 3.0).normalize()
}

/// Diffuse term blending from `color * ambient` in shadow to full `color`
#[inline]
pub fn lighting(color: Vec3, normal: Vec3, light: Vec3, ambient: f32) -> Vec3 {
    (color * ambient).lerp(color, normal.dot(light).max(0.0))
}

/// Half-vector highlight. `view` points from the surface toward the eye.
#[inline]
pub fn specular(normal: Vec3, view: Vec3, light: Vec3, shininess: f32) -> f32 {
    (view + light)
        .normalize_or_zero()
        .dot(normal)
        .max(0.0)
        .powf(shininess)
}

/// Color of a marched hit
pub fn shade(
    snapshot: &SceneSnapshot,
    hit: &HitResult,
    normal: Vec3,
    ray_dir: Vec3,
    light_dir: Vec3,
) -> Vec3 {
    let view = -ray_dir;
    match hit.kind {
        ObjectKind::Paddle => shade_paddle(snapshot, hit.position, normal, view, light_dir),
        ObjectKind::Ball => shade_ball(snapshot.time, normal, ray_dir),
        ObjectKind::Brick => shade_brick(snapshot, hit, normal, view, light_dir),
        ObjectKind::Wall => shade_wall(snapshot, hit.position, normal, light_dir),
        ObjectKind::None => Vec3::splat(BACKGROUND_GRAY),
    }
}

fn shade_paddle(
    snapshot: &SceneSnapshot,
    p: Vec3,
    normal: Vec3,
    view: Vec3,
    light: Vec3,
) -> Vec3 {
    let paddle = &snapshot.paddle;
    let mut color = lighting(Vec3::splat(0.2), normal, light, 0.6)
        + Vec3::splat(specular(normal, view, light, 4.0));

    // Glowing stripe along the paddle's length
    let uv = (p.truncate() - paddle.position) / paddle.size * 2.0;
    let line = ease_in_sine((1.0 - uv.y.abs()).clamp(0.0, 1.0));
    let hue = (snapshot.time * 0.2 - uv.x.abs() * 0.3).rem_euclid(1.0);
    color += hsl_to_rgb(Vec3::new(hue, 1.0, line));

    color.clamp(Vec3::ZERO, Vec3::ONE)
}

fn shade_ball(time: f32, normal: Vec3, ray_dir: Vec3) -> Vec3 {
    let hue = (normal.y.atan2(normal.x) / TAU + time * 0.2).rem_euclid(1.0);
    let color = hsl_to_rgb(Vec3::new(hue, 1.0, 0.7));
    let grazing = 1.0 - normal.dot(ray_dir).abs();
    color.lerp(Vec3::ONE, grazing.clamp(0.0, 1.0))
}

fn shade_brick(
    snapshot: &SceneSnapshot,
    hit: &HitResult,
    normal: Vec3,
    view: Vec3,
    light: Vec3,
) -> Vec3 {
    let Some(slot) = hit.brick_slot() else {
        return Vec3::ZERO;
    };
    let brick = &snapshot.bricks[slot];

    let (color, ambient) = match brick.state {
        BrickState::Dying => (
            Vec3::ONE.lerp(brick.color, brick.state_progress.clamp(0.0, 1.0)),
            0.8,
        ),
        _ => (brick.color, 0.5),
    };

    lighting(color, normal, light, ambient) + Vec3::splat(specular(normal, view, light, 2.0))
}

fn shade_wall(snapshot: &SceneSnapshot, p: Vec3, normal: Vec3, light: Vec3) -> Vec3 {
    let t = snapshot.time;
    let hue = (((p.x + t * 0.2).sin() + (p.y + t * 0.2).cos()) * 0.2 + t * 0.2).rem_euclid(1.0);
    let mut color = lighting(hsl_to_rgb(Vec3::new(hue, 1.0, 0.75)), normal, light, 0.5);

    // Spot under the ball
    let ball = snapshot.ball.position.extend(0.0);
    color += Vec3::splat((1.0 - (p - ball).length()).clamp(0.0, 1.0).powi(3));

    // Bricks darken the wall close behind them
    let (bricks, _) = sd_bricks(snapshot, p, &BrickMask::all());
    let shadow = (1.0 - remap(bricks, 0.0, 0.2, 0.0, 1.0)).clamp(0.0, 1.0).powi(3) * 0.4;
    color -= Vec3::splat(shadow);

    let depth_fade = remap(p.z, 0.0, -10.0, 1.0, 0.0).clamp(0.0, 1.0).powi(5);
    let gutter_fade = remap(p.y, -1.0, -1.25, 1.0, 0.0).clamp(0.0, 1.0);
    Vec3::splat(BACKGROUND_GRAY).lerp(color, depth_fade * gutter_fade)
}
