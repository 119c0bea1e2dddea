//! Per-frame orchestration: simulate, then render

use crate::consts::MAX_FRAME_DT;
use crate::error::Result;
use crate::renderer::{Framebuffer, SceneSnapshot, SdfRenderer};
use crate::settings::Settings;
use crate::sim::{TickInput, World, tick};

/// Frames kept for the rolling FPS estimate
const FPS_WINDOW: usize = 60;

/// Game instance holding the world, the renderer and the pending input
pub struct Game {
    world: World,
    renderer: SdfRenderer,
    input: TickInput,
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Game {
    pub fn new(settings: &Settings) -> Result<Self> {
        let (width, height) = settings.resolution();
        let renderer = SdfRenderer::new(width, height, settings.brick_culling)?;
        Ok(Self {
            world: World::new(settings.seed),
            renderer,
            input: TickInput {
                pointer_x: None,
                idle_mode: settings.idle_mode,
            },
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
            fps: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.renderer.framebuffer()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Pointer X in world units, `None` when the pointer leaves the arena
    pub fn set_pointer(&mut self, x: Option<f32>) {
        self.input.pointer_x = x;
    }

    /// Restart with a fresh world, keeping the renderer
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {}", seed);
        self.world = World::new(seed);
        self.last_time = None;
    }

    /// Snapshot of the current world at `timestamp_ms`
    pub fn snapshot(&self, timestamp_ms: f64) -> SceneSnapshot {
        SceneSnapshot::capture(&self.world, timestamp_ms)
    }

    /// Advance by the time since the previous frame and render.
    ///
    /// The first frame after construction or restart simulates nothing.
    pub fn frame(&mut self, timestamp_ms: f64) -> &Framebuffer {
        let dt = self.elapsed(timestamp_ms);
        self.last_time = Some(timestamp_ms);

        tick(&mut self.world, &self.input, dt);
        self.track_fps(timestamp_ms);

        self.renderer.render(&self.world, timestamp_ms)
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`
    fn elapsed(&self, timestamp_ms: f64) -> f32 {
        match self.last_time {
            Some(last) => (((timestamp_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        }
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames += 1;

        // Oldest entry is only meaningful once the window has filled
        if self.frames >= FPS_WINDOW as u64 {
            let elapsed = time - self.frame_times[self.frame_index];
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        if self.frames % FPS_WINDOW as u64 == 0 {
            log::debug!("frame {} at {:.0} ms, {} fps", self.frames, time, self.fps);
        }
    }
}
