//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Input arrives as an explicit `TickInput`, never read ambiently
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickState, advance_bricks, cell_position, lifecycle_scale};
pub use collision::{ball_overlaps_brick, bounce_off_paddle, bounce_off_walls};
pub use state::{Ball, Paddle, World};
pub use tick::{TickInput, tick};
