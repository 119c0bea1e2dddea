//! SDF Breakout entry point
//!
//! Runs the game headless and writes rendered frames as PNGs. Outside idle
//! mode a scripted pointer sweeps the paddle across the arena.
//!
//! Usage: `sdf-breakout [settings.json] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is usable directly from wasm
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use sdf_breakout::{Game, QualityPreset, Result, Settings};

    /// Pointer sweep speed (radians per second) when not in idle mode
    const POINTER_SWEEP: f64 = 0.8;

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let mut settings = match args.next() {
            Some(path) => Settings::load(Path::new(&path))?,
            None => Settings::default(),
        };
        if let Some(name) = args.next() {
            settings.quality = name.parse::<QualityPreset>()?;
        }
        let (width, height) = settings.resolution();
        log::info!(
            "SDF Breakout starting: {}x{} ({}), {} frames at {} fps, seed {}",
            width,
            height,
            settings.quality.as_str(),
            settings.frames,
            settings.frame_rate,
            settings.seed
        );

        std::fs::create_dir_all(&settings.output_dir)?;
        // Effective settings, stored next to the frames
        settings.save(&settings.output_dir.join("settings.json"))?;

        let mut game = Game::new(&settings)?;
        let interval = settings.frame_interval_ms();
        let started = Instant::now();
        let mut written = 0;
        let mut last_timestamp = 0.0;

        for index in 0..settings.frames {
            let timestamp = index as f64 * interval;
            last_timestamp = timestamp;

            if !settings.idle_mode {
                // Scripted pointer sweeping the arena
                let x = (timestamp / 1000.0 * POINTER_SWEEP).sin() * 0.9;
                game.set_pointer(Some(x as f32));
            }

            let frame_start = Instant::now();
            let framebuffer = game.frame(timestamp);
            log::debug!(
                "frame {} rendered in {:.1} ms",
                index,
                frame_start.elapsed().as_secs_f64() * 1000.0
            );

            if settings.should_capture(index) {
                let path = frame_path(&settings.output_dir, index);
                framebuffer.save_png(&path)?;
                written += 1;
            }
        }

        let total = started.elapsed().as_secs_f64();
        log::info!(
            "Rendered {} frames in {:.2} s ({:.1} fps), wrote {} to {}",
            settings.frames,
            total,
            settings.frames as f64 / total.max(f64::EPSILON),
            written,
            settings.output_dir.display()
        );

        if settings.dump_snapshot {
            let path = settings.output_dir.join("snapshot.json");
            game.snapshot(last_timestamp).save_json(&path)?;
            log::info!("Snapshot written to {}", path.display());
        }

        Ok(())
    }

    fn frame_path(dir: &Path, index: u32) -> PathBuf {
        dir.join(format!("frame_{:04}.png", index))
    }
}
