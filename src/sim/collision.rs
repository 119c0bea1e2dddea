//! Collision detection and response for the axis-aligned arena
//!
//! Everything here works on the 2-D gameplay shapes (boxes and a circle).
//! The rounded, pulsing silhouettes the renderer draws are decorative.

use glam::Vec2;

use super::bricks::Brick;
use super::state::{Ball, Paddle};
use crate::consts::WORLD_EXTENT;

/// Reflect the ball off the four arena walls.
///
/// The overshoot past a wall is mirrored back inside. Returns true if any
/// wall was hit.
pub fn bounce_off_walls(ball: &mut Ball) -> bool {
    let limit = WORLD_EXTENT - ball.radius;
    let mut hit = false;

    if ball.position.x > limit && ball.velocity.x > 0.0 {
        ball.position.x = 2.0 * limit - ball.position.x;
        ball.velocity.x = -ball.velocity.x;
        hit = true;
    }
    if ball.position.x < -limit && ball.velocity.x < 0.0 {
        ball.position.x = -2.0 * limit - ball.position.x;
        ball.velocity.x = -ball.velocity.x;
        hit = true;
    }
    if ball.position.y > limit && ball.velocity.y > 0.0 {
        ball.position.y = 2.0 * limit - ball.position.y;
        ball.velocity.y = -ball.velocity.y;
        hit = true;
    }
    if ball.position.y < -limit && ball.velocity.y < 0.0 {
        ball.position.y = -2.0 * limit - ball.position.y;
        ball.velocity.y = -ball.velocity.y;
        hit = true;
    }

    hit
}

/// Bounce a descending ball off the paddle's upper face. Returns true on hit.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.velocity.y >= 0.0 {
        return false;
    }

    let top = paddle.top();
    let bottom = ball.position.y - ball.radius;
    if bottom > top || ball.position.y < paddle.position.y {
        return false;
    }

    let half_width = paddle.size.x / 2.0;
    if (ball.position.x - paddle.position.x).abs() > half_width {
        return false;
    }

    ball.velocity.y = -ball.velocity.y;
    ball.position.y = top + ball.radius;
    true
}

/// Whether the ball's bounding box overlaps a brick's box
pub fn ball_overlaps_brick(ball_pos: Vec2, ball_radius: f32, brick: &Brick) -> bool {
    let half = brick.size.truncate() / 2.0;
    let delta = (ball_pos - brick.position).abs();
    delta.x <= half.x + ball_radius && delta.y <= half.y + ball_radius
}
