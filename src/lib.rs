//! SDF Breakout - paddle, ball and bricks drawn by a ray marcher
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, brick lifecycle)
//! - `renderer`: Signed distance field scene, ray marching and shading
//! - `game`: Per-frame orchestration (simulate, then render)
//! - `settings`: Render/run configuration

pub mod color;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::{QualityPreset, Settings};

/// Configuration constants shared by the simulation and the renderer.
///
/// The renderer's snapshot layout depends on `BRICK_SLOTS`, so both sides
/// must agree on every value here.
pub mod consts {
    /// Number of brick slots kept in the world and in every snapshot
    pub const BRICK_SLOTS: usize = 10;

    /// Brick grid
    pub const COLS: u32 = 8;
    pub const ROWS: u32 = 4;
    /// Fraction of the upper half of the arena covered by the grid
    pub const GRID_HEIGHT: f32 = 0.5;
    /// Nominal brick depth (Z extent), jittered on respawn
    pub const BRICK_DEPTH: f32 = 0.1;

    /// World bounds (the arena spans -WORLD_EXTENT..WORLD_EXTENT on X and Y)
    pub const WORLD_EXTENT: f32 = 1.0;

    /// Paddle defaults
    pub const PADDLE_START_Y: f32 = -0.9;
    pub const PADDLE_WIDTH: f32 = 0.5;
    pub const PADDLE_THICKNESS: f32 = 0.06;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.06;
    pub const BALL_SPEED: f32 = 0.4;
    /// Seconds the ball waits before being served
    pub const SERVE_DELAY: f32 = 1.0;

    /// Largest elapsed time fed to a single simulation step
    pub const MAX_FRAME_DT: f32 = 0.1;

    const _: () = assert!(BRICK_SLOTS < (COLS * ROWS) as usize);
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]` (unclamped)
#[inline]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Ease-out with overshoot: `1 + c3 (x-1)^3 + c1 (x-1)^2`
#[inline]
pub fn ease_out_back(x: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let t = x - 1.0;
    1.0 + C3 * t * t * t + C1 * t * t
}

/// Ease-in on a quarter sine wave
#[inline]
pub fn ease_in_sine(x: f32) -> f32 {
    1.0 - (x * std::f32::consts::FRAC_PI_2).cos()
}
