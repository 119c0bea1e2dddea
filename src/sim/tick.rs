//! Simulation step
//!
//! Advances the world by one frame's elapsed time: paddle, ball, collisions,
//! then the brick lifecycle.

use super::bricks::advance_bricks;
use super::collision::{ball_overlaps_brick, bounce_off_paddle, bounce_off_walls};
use super::state::World;

/// Input for a single step, captured by the frame loop
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer X in world units (-1..1), if the pointer is over the arena
    pub pointer_x: Option<f32>,
    /// Idle/demo mode - paddle follows the ball
    pub idle_mode: bool,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    world.ticks += 1;

    // Paddle
    let target_x = if input.idle_mode {
        Some(world.ball.position.x)
    } else {
        input.pointer_x
    };
    if let Some(x) = target_x {
        world.paddle.move_to(x);
    }

    // Ball
    if world.ball.in_play() {
        let ball = &mut world.ball;
        ball.position += ball.velocity * dt;

        bounce_off_walls(ball);
        bounce_off_paddle(ball, &world.paddle);

        // A single reflection per step even if several bricks are touched
        let mut struck = false;
        for (i, brick) in world.bricks.iter_mut().enumerate() {
            if !brick.is_solid() || !ball_overlaps_brick(ball.position, ball.radius, brick) {
                continue;
            }
            if brick.destroy() {
                log::debug!("Brick {} struck at tick {}", i, world.ticks);
                struck = true;
            }
        }
        if struck {
            ball.velocity.y = -ball.velocity.y;
        }
    } else {
        world.ball.serve_timer -= dt;
        if world.ball.serve_timer <= 0.0 {
            let (ball, rng) = world.ball_and_rng();
            ball.serve(rng);
        }
    }

    // Brick lifecycle
    let (bricks, rng) = world.bricks_and_rng();
    advance_bricks(bricks, rng, dt);
}
