//! World state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bricks::{Brick, spawn_bricks};
use crate::consts::*;

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center of the paddle
    pub position: Vec2,
    /// Width, thickness
    pub size: Vec2,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, PADDLE_START_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_THICKNESS),
        }
    }
}

impl Paddle {
    /// Y coordinate of the paddle's upper face
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y / 2.0
    }

    /// Move horizontally toward `x`, keeping the paddle inside the arena
    pub fn move_to(&mut self, x: f32) {
        let half = self.size.x / 2.0;
        self.position.x = x.clamp(-WORLD_EXTENT + half, WORLD_EXTENT - half);
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Seconds left before the ball is served (0 = in play)
    pub serve_timer: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, -0.5),
            velocity: Vec2::ZERO,
            radius: BALL_RADIUS,
            serve_timer: SERVE_DELAY,
        }
    }
}

impl Ball {
    /// Whether the ball is moving
    #[inline]
    pub fn in_play(&self) -> bool {
        self.serve_timer <= 0.0
    }

    /// Launch upward with a random horizontal component
    pub fn serve(&mut self, rng: &mut Pcg32) {
        let x: f32 = rng.random::<f32>() * 2.0 - 1.0;
        let y: f32 = rng.random::<f32>() + 0.2;

        self.position = Vec2::new(0.0, -0.5);
        self.velocity = Vec2::new(x, y).normalize_or_zero() * BALL_SPEED;
        self.serve_timer = 0.0;
        log::debug!("Ball served with velocity ({:.3}, {:.3})", self.velocity.x, self.velocity.y);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the world was created with
    pub seed: u64,
    /// Simulation steps taken
    pub ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Fixed set of brick slots, shared layout with the renderer snapshot
    pub bricks: [Brick; BRICK_SLOTS],
    rng: Pcg32,
}

impl World {
    /// Create a world with bricks on distinct random cells
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = spawn_bricks(&mut rng);

        Self {
            seed,
            ticks: 0,
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks,
            rng,
        }
    }

    /// Split borrow of the bricks and the RNG (for lifecycle updates)
    pub fn bricks_and_rng(&mut self) -> (&mut [Brick; BRICK_SLOTS], &mut Pcg32) {
        (&mut self.bricks, &mut self.rng)
    }

    /// Split borrow of the ball and the RNG (for serving)
    pub fn ball_and_rng(&mut self) -> (&mut Ball, &mut Pcg32) {
        (&mut self.ball, &mut self.rng)
    }
}
