//! Minimal frame consumer: rasterize a recording to a PNG sequence
//!
//! Pure consumer of a [`Recording`]: each captured frame becomes one image
//! with the particles drawn as filled circles on a dark background. World
//! y is up; image y is down, so the vertical axis is flipped. Encoding the
//! sequence to video is left to external tools.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::simulation::states::Recording;

const BACKGROUND: Rgba<u8> = Rgba([23, 23, 23, 255]);

/// Write every `every`-th frame of `rec` as `frame_NNNNN.png` under `dir`.
/// `scale` is pixels per world unit.
pub fn write_frames(
    rec: &Recording,
    world_w: f64,
    world_h: f64,
    scale: u32,
    dir: &Path,
    every: usize,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let img_w = (world_w * scale as f64).ceil() as u32;
    let img_h = (world_h * scale as f64).ceil() as u32;
    let every = every.max(1);

    for (n, frame) in rec.frames.iter().step_by(every).enumerate() {
        let mut img = RgbaImage::from_pixel(img_w, img_h, BACKGROUND);

        for &(slot, pos) in &frame.positions {
            let color = rec.colors[slot];
            let rgba = Rgba([
                (color[0] * 255.0) as u8,
                (color[1] * 255.0) as u8,
                (color[2] * 255.0) as u8,
                255,
            ]);
            let cx = pos.x * scale as f64;
            let cy = (world_h - pos.y) * scale as f64; // flip to image coords
            let r = rec.radii[slot] * scale as f64;
            fill_circle(&mut img, cx, cy, r, rgba);
        }

        img.save(dir.join(format!("frame_{n:05}.png")))?;
    }
    Ok(())
}

/// Scanline fill of one circle, clipped to the image.
fn fill_circle(img: &mut RgbaImage, cx: f64, cy: f64, r: f64, color: Rgba<u8>) {
    let x_min = (cx - r).floor().max(0.0) as u32;
    let x_max = ((cx + r).ceil() as i64).clamp(0, img.width() as i64) as u32;
    let y_min = (cy - r).floor().max(0.0) as u32;
    let y_max = ((cy + r).ceil() as i64).clamp(0, img.height() as i64) as u32;

    for y in y_min..y_max {
        for x in x_min..x_max {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, color);
            }
        }
    }
}
