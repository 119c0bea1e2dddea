//! Render and run settings
//!
//! Loaded from an optional JSON file by the native binary.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Square output resolution for this preset
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            QualityPreset::Low => (160, 160),
            QualityPreset::Medium => (320, 320),
            QualityPreset::High => (500, 500),
        }
    }
}

impl FromStr for QualityPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(Error::UnknownQuality(s.to_string())),
        }
    }
}

/// Run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explicit output width (overrides the preset)
    pub width: Option<u32>,
    /// Explicit output height (overrides the preset)
    pub height: Option<u32>,

    // === Simulation ===
    /// World RNG seed
    pub seed: u64,
    /// Number of frames to simulate and render
    pub frames: u32,
    /// Simulated display refresh rate (frames per second)
    pub frame_rate: f32,
    /// Let the paddle follow the ball instead of a pointer
    pub idle_mode: bool,

    // === Renderer ===
    /// Skip bricks whose bounding sphere the camera ray misses
    pub brick_culling: bool,

    // === Output ===
    /// Directory frames are written to
    pub output_dir: PathBuf,
    /// Write every Nth frame (0 = only the last one)
    pub capture_every: u32,
    /// Also write the last frame's scene snapshot as JSON
    pub dump_snapshot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            width: None,
            height: None,

            seed: 1,
            frames: 120,
            frame_rate: 60.0,
            idle_mode: true,

            brick_culling: true,

            output_dir: PathBuf::from("frames"),
            capture_every: 0,
            dump_snapshot: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective output resolution (explicit size wins over the preset)
    pub fn resolution(&self) -> (u32, u32) {
        let (w, h) = self.quality.resolution();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Milliseconds between two simulated display refreshes
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate.max(1.0) as f64
    }

    /// Whether frame `index` (0-based) of `self.frames` should be written out
    pub fn should_capture(&self, index: u32) -> bool {
        let last = index + 1 == self.frames;
        last || (self.capture_every > 0 && index % self.capture_every == 0)
    }

    /// Load settings from a JSON file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_size_overrides_preset() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.resolution(), (160, 160));
        settings.width = Some(64);
        assert_eq!(settings.resolution(), (64, 160));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "High", "frames": 3 }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.frames, 3);
        assert_eq!(settings.seed, Settings::default().seed);
        assert!(settings.brick_culling);
    }

    #[test]
    fn test_should_capture() {
        let settings = Settings {
            frames: 10,
            capture_every: 4,
            ..Settings::default()
        };
        let captured: Vec<u32> = (0..10).filter(|&i| settings.should_capture(i)).collect();
        assert_eq!(captured, vec![0, 4, 8, 9]);

        let last_only = Settings {
            frames: 5,
            capture_every: 0,
            ..Settings::default()
        };
        assert!(!last_only.should_capture(0));
        assert!(last_only.should_capture(4));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("MED".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
        assert_eq!("low".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(Error::UnknownQuality(name)) if name == "ultra"
        ));
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("sdf-breakout-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 42,
            capture_every: 7,
            ..Settings::from_preset(QualityPreset::High)
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.quality, QualityPreset::High);
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.capture_every, 7);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(settings.frames, Settings::default().frames);
    }
}
