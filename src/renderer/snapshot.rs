//! Immutable per-frame view of the world consumed by the render pass

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::BRICK_SLOTS;
use crate::error::{Error, Result};
use crate::sim::{Brick, BrickState, World, lifecycle_scale};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleSnapshot {
    pub position: Vec2,
    /// Width, thickness
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickSnapshot {
    pub position: Vec2,
    /// Width, height, depth (unscaled)
    pub size: Vec3,
    pub color: Vec3,
    pub state: BrickState,
    pub state_progress: f32,
}

impl BrickSnapshot {
    /// Lifecycle scale applied to width and height
    #[inline]
    pub fn scale(&self) -> f32 {
        lifecycle_scale(self.state, self.state_progress)
    }

    /// Size with the lifecycle scale applied to the first two axes
    #[inline]
    pub fn scaled_size(&self) -> Vec3 {
        let s = self.scale();
        Vec3::new(self.size.x * s, self.size.y * s, self.size.z)
    }
}

impl From<&Brick> for BrickSnapshot {
    fn from(brick: &Brick) -> Self {
        Self {
            position: brick.position,
            size: brick.size,
            color: brick.color,
            state: brick.state,
            state_progress: brick.state_progress,
        }
    }
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Seconds, drives every animation
    pub time: f32,
    pub paddle: PaddleSnapshot,
    pub ball: BallSnapshot,
    pub bricks: [BrickSnapshot; BRICK_SLOTS],
}

impl SceneSnapshot {
    /// Capture the world at `timestamp_ms` (display clock, milliseconds)
    pub fn capture(world: &World, timestamp_ms: f64) -> Self {
        Self {
            time: (timestamp_ms / 1000.0) as f32,
            paddle: PaddleSnapshot {
                position: world.paddle.position,
                size: world.paddle.size,
            },
            ball: BallSnapshot {
                position: world.ball.position,
                radius: world.ball.radius,
            },
            bricks: std::array::from_fn(|i| BrickSnapshot::from(&world.bricks[i])),
        }
    }

    /// Build a snapshot from loose parts.
    ///
    /// Fails if `bricks` does not hold exactly `BRICK_SLOTS` entries.
    pub fn from_parts(
        time: f32,
        paddle: PaddleSnapshot,
        ball: BallSnapshot,
        bricks: &[BrickSnapshot],
    ) -> Result<Self> {
        let bricks: [BrickSnapshot; BRICK_SLOTS] =
            bricks.try_into().map_err(|_| Error::BrickCount {
                expected: BRICK_SLOTS,
                actual: bricks.len(),
            })?;

        Ok(Self {
            time,
            paddle,
            ball,
            bricks,
        })
    }

    /// Write the snapshot as pretty JSON (debug dumps)
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> BrickSnapshot {
        BrickSnapshot {
            position: Vec2::ZERO,
            size: Vec3::new(0.25, 0.0625, 0.1),
            color: Vec3::X,
            state: BrickState::Alive,
            state_progress: 0.0,
        }
    }

    fn paddle() -> PaddleSnapshot {
        PaddleSnapshot {
            position: Vec2::new(0.0, -0.9),
            size: Vec2::new(0.5, 0.06),
        }
    }

    fn ball() -> BallSnapshot {
        BallSnapshot {
            position: Vec2::ZERO,
            radius: 0.06,
        }
    }

    #[test]
    fn test_from_parts_rejects_wrong_length() {
        let bricks = vec![brick(); BRICK_SLOTS - 1];
        let err = SceneSnapshot::from_parts(0.0, paddle(), ball(), &bricks).unwrap_err();
        assert!(matches!(
            err,
            Error::BrickCount { expected: BRICK_SLOTS, actual } if actual == BRICK_SLOTS - 1
        ));

        let bricks = vec![brick(); BRICK_SLOTS];
        assert!(SceneSnapshot::from_parts(0.0, paddle(), ball(), &bricks).is_ok());
    }

    #[test]
    fn test_capture_converts_time_and_copies_world() {
        let world = World::new(4);
        let snapshot = SceneSnapshot::capture(&world, 2500.0);
        assert!((snapshot.time - 2.5).abs() < 1e-6);
        assert_eq!(snapshot.paddle.position, world.paddle.position);
        for (snap, brick) in snapshot.bricks.iter().zip(world.bricks.iter()) {
            assert_eq!(snap.position, brick.position);
            assert_eq!(snap.state, brick.state);
        }
    }

    #[test]
    fn test_scaled_size_keeps_depth() {
        let mut b = brick();
        b.state = BrickState::Dying;
        b.state_progress = 1.0;
        let size = b.scaled_size();
        assert!(size.x.abs() < 1e-6 && size.y.abs() < 1e-6);
        assert_eq!(size.z, b.size.z);
    }

    #[test]
    fn test_json_round_trip_preserves_state() {
        let world = World::new(8);
        let snapshot = SceneSnapshot::capture(&world, 16.0);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bricks, snapshot.bricks);
    }
}
