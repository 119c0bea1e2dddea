//! Hue/saturation/lightness to linear RGB
//!
//! Shared by the shading pipeline (procedural hues) and the brick lifecycle
//! (respawn colors).

use glam::Vec3;

fn hue_to_channel(f1: f32, f2: f32, mut hue: f32) -> f32 {
    if hue < 0.0 {
        hue += 1.0;
    } else if hue > 1.0 {
        hue -= 1.0;
    }

    if 6.0 * hue < 1.0 {
        f1 + (f2 - f1) * 6.0 * hue
    } else if 2.0 * hue < 1.0 {
        f2
    } else if 3.0 * hue < 2.0 {
        f1 + (f2 - f1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        f1
    }
}

/// Convert `(hue, saturation, lightness)` to RGB.
///
/// Hue is expected in `[0, 1)`; callers wrap it with `fract`/`rem_euclid`.
/// Zero saturation returns the lightness on every channel.
pub fn hsl_to_rgb(hsl: Vec3) -> Vec3 {
    let (hue, sat, light) = (hsl.x, hsl.y, hsl.z);

    if sat == 0.0 {
        return Vec3::splat(light);
    }

    let f2 = if light < 0.5 {
        light * (1.0 + sat)
    } else {
        light + sat - sat * light
    };
    let f1 = 2.0 * light - f2;

    Vec3::new(
        hue_to_channel(f1, f2, hue + 1.0 / 3.0),
        hue_to_channel(f1, f2, hue),
        hue_to_channel(f1, f2, hue - 1.0 / 3.0),
    )
}
