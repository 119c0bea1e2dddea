//! Brick lifecycle state machine
//!
//! Each slot cycles BIRTH -> ALIVE -> DYING -> BIRTH. Birth and death are
//! animated by `state_progress`, which the renderer turns into a scale on the
//! brick's width and height. A finished death respawns the slot on a free grid
//! cell with a new color.

use glam::{UVec2, Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::hsl_to_rgb;
use crate::consts::*;
use crate::ease_out_back;

/// Progress gained per second while animating (a transition takes 0.5 s)
pub const PROGRESS_RATE: f32 = 2.0;

/// Lifecycle phase of a brick slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickState {
    /// Growing in after a spawn
    #[default]
    Birth,
    /// Solid, can be struck by the ball
    Alive,
    /// Shrinking away after being struck
    Dying,
}

/// Scale applied to a brick's width/height for a given phase and progress
#[inline]
pub fn lifecycle_scale(state: BrickState, progress: f32) -> f32 {
    match state {
        BrickState::Birth => ease_out_back(progress),
        BrickState::Alive => 1.0,
        BrickState::Dying => ease_out_back(1.0 - progress),
    }
}

/// World-space center of a grid cell
pub fn cell_position(cell: UVec2) -> Vec2 {
    let cols = COLS as f32;
    let rows = ROWS as f32;
    Vec2::new(
        (cell.x as f32 / cols) * 2.0 - 1.0 + 1.0 / cols,
        1.0 - (cell.y as f32 / rows + 1.0 / rows) * GRID_HEIGHT,
    )
}

/// Pick a random grid cell not present in `occupied`
pub fn random_free_cell(occupied: &[UVec2], rng: &mut Pcg32) -> Option<UVec2> {
    let free: Vec<UVec2> = (0..ROWS)
        .flat_map(|y| (0..COLS).map(move |x| UVec2::new(x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

/// A brick slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Grid cell the brick occupies
    pub cell: UVec2,
    pub position: Vec2,
    /// Width, height, depth
    pub size: Vec3,
    pub color: Vec3,
    pub state: BrickState,
    pub state_progress: f32,
}

impl Brick {
    /// Create a brick at `cell` in BIRTH with a random color and depth
    pub fn spawn(cell: UVec2, rng: &mut Pcg32) -> Self {
        let mut brick = Self {
            cell,
            position: Vec2::ZERO,
            size: Vec3::ZERO,
            color: Vec3::ONE,
            state: BrickState::Birth,
            state_progress: 0.0,
        };
        brick.respawn(cell, rng);
        brick
    }

    /// Move to `cell` and restart the birth animation
    fn respawn(&mut self, cell: UVec2, rng: &mut Pcg32) {
        let depth_jitter: f32 = rng.random_range(0.85..1.15);
        let hue: f32 = rng.random();

        self.cell = cell;
        self.position = cell_position(cell);
        self.size = Vec3::new(
            2.0 / COLS as f32,
            GRID_HEIGHT / ROWS as f32,
            BRICK_DEPTH * depth_jitter,
        );
        self.color = hsl_to_rgb(Vec3::new(hue, 0.75, 0.55));
        self.state = BrickState::Birth;
        self.state_progress = 0.0;
    }

    /// Whether the ball collides with this brick
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.state == BrickState::Alive
    }

    /// Request ALIVE -> DYING. Returns false (and does nothing) in any other state.
    pub fn destroy(&mut self) -> bool {
        if self.state != BrickState::Alive {
            return false;
        }
        self.state = BrickState::Dying;
        self.state_progress = 0.0;
        true
    }

    /// Advance the animation. Returns true when a death has finished and the
    /// slot must respawn.
    fn advance(&mut self, dt: f32) -> bool {
        match self.state {
            BrickState::Alive => false,
            BrickState::Birth => {
                self.state_progress += PROGRESS_RATE * dt;
                if self.state_progress > 1.0 {
                    self.state = BrickState::Alive;
                    self.state_progress = 0.0;
                }
                false
            }
            BrickState::Dying => {
                self.state_progress += PROGRESS_RATE * dt;
                self.state_progress > 1.0
            }
        }
    }
}

/// Fill every slot with a brick on a distinct random cell
pub fn spawn_bricks(rng: &mut Pcg32) -> [Brick; BRICK_SLOTS] {
    let mut occupied: Vec<UVec2> = Vec::with_capacity(BRICK_SLOTS);
    std::array::from_fn(|_| {
        // BRICK_SLOTS < COLS * ROWS, so a free cell always exists
        let cell = random_free_cell(&occupied, rng).unwrap_or(UVec2::ZERO);
        occupied.push(cell);
        Brick::spawn(cell, rng)
    })
}

/// Advance every brick slot by `dt` seconds, respawning finished deaths
pub fn advance_bricks(bricks: &mut [Brick; BRICK_SLOTS], rng: &mut Pcg32, dt: f32) {
    for i in 0..bricks.len() {
        if !bricks[i].advance(dt) {
            continue;
        }

        // Own cell is in the list too, so the respawn always moves
        let occupied: Vec<UVec2> = bricks.iter().map(|b| b.cell).collect();
        let cell = random_free_cell(&occupied, rng).unwrap_or(bricks[i].cell);
        log::debug!("Brick {} respawning at cell ({}, {})", i, cell.x, cell.y);
        bricks[i].respawn(cell, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_birth_becomes_alive_after_crossing_one() {
        let mut rng = rng(7);
        let mut bricks = spawn_bricks(&mut rng);
        assert!(bricks.iter().all(|b| b.state == BrickState::Birth));

        advance_bricks(&mut bricks, &mut rng, 0.25);
        assert_eq!(bricks[0].state, BrickState::Birth);
        assert!((bricks[0].state_progress - 0.5).abs() < 1e-6);

        // Exactly 1.0 is not past the threshold
        advance_bricks(&mut bricks, &mut rng, 0.25);
        assert_eq!(bricks[0].state, BrickState::Birth);

        advance_bricks(&mut bricks, &mut rng, 0.01);
        for brick in &bricks {
            assert_eq!(brick.state, BrickState::Alive);
            assert_eq!(brick.state_progress, 0.0);
        }
    }

    #[test]
    fn test_alive_is_static() {
        let mut rng = rng(3);
        let mut bricks = spawn_bricks(&mut rng);
        advance_bricks(&mut bricks, &mut rng, 0.6);
        let before: Vec<UVec2> = bricks.iter().map(|b| b.cell).collect();

        advance_bricks(&mut bricks, &mut rng, 10.0);
        for (brick, cell) in bricks.iter().zip(before) {
            assert_eq!(brick.state, BrickState::Alive);
            assert_eq!(brick.state_progress, 0.0);
            assert_eq!(brick.cell, cell);
        }
    }

    #[test]
    fn test_destroy_only_from_alive() {
        let mut rng = rng(11);
        let mut brick = Brick::spawn(UVec2::new(2, 1), &mut rng);
        assert!(!brick.destroy(), "BIRTH ignores destroy requests");

        brick.state = BrickState::Alive;
        assert!(brick.destroy());
        assert_eq!(brick.state, BrickState::Dying);
        assert_eq!(brick.state_progress, 0.0);
        assert!(!brick.destroy(), "DYING ignores destroy requests");
    }

    #[test]
    fn test_dying_respawns_on_free_cell() {
        for seed in 0..50 {
            let mut rng = rng(seed);
            let mut bricks = spawn_bricks(&mut rng);
            advance_bricks(&mut bricks, &mut rng, 0.6);

            let old_cell = bricks[4].cell;
            assert!(bricks[4].destroy());
            advance_bricks(&mut bricks, &mut rng, 0.3);
            assert_eq!(bricks[4].state, BrickState::Dying);

            advance_bricks(&mut bricks, &mut rng, 0.3);
            let brick = &bricks[4];
            assert_eq!(brick.state, BrickState::Birth);
            assert_eq!(brick.state_progress, 0.0);
            assert_ne!(brick.cell, old_cell);
            assert_eq!(brick.position, cell_position(brick.cell));
            for (j, other) in bricks.iter().enumerate() {
                if j != 4 {
                    assert_ne!(other.cell, brick.cell, "seed {seed}: overlap with slot {j}");
                }
            }
        }
    }

    #[test]
    fn test_spawned_cells_are_distinct() {
        let mut rng = rng(99);
        let bricks = spawn_bricks(&mut rng);
        for i in 0..bricks.len() {
            for j in (i + 1)..bricks.len() {
                assert_ne!(bricks[i].cell, bricks[j].cell);
            }
        }
    }

    #[test]
    fn test_lifecycle_scale() {
        assert!(lifecycle_scale(BrickState::Birth, 0.0).abs() < 1e-6);
        assert!((lifecycle_scale(BrickState::Birth, 1.0) - 1.0).abs() < 1e-6);
        assert_eq!(lifecycle_scale(BrickState::Alive, 0.3), 1.0);
        assert!((lifecycle_scale(BrickState::Dying, 0.0) - 1.0).abs() < 1e-6);
        assert!(lifecycle_scale(BrickState::Dying, 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_position_corners() {
        let top_left = cell_position(UVec2::new(0, 0));
        assert!((top_left.x - (-0.875)).abs() < 1e-6);
        assert!((top_left.y - 0.875).abs() < 1e-6);

        let bottom_right = cell_position(UVec2::new(COLS - 1, ROWS - 1));
        assert!((bottom_right.x - 0.875).abs() < 1e-6);
        assert!((bottom_right.y - 0.5).abs() < 1e-6);
    }
}
