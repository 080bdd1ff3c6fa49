//! Image sampling: raster image in, target positions + colors out
//!
//! Three steps, each usable on its own:
//! 1. [`load_image`]  — decode from disk (fatal on failure)
//! 2. [`pixelate`]    — Lanczos resize to the working grid, RGBA8
//! 3. [`sample_grid`] — stride-subsample the grid and map every cell with
//!    non-zero alpha to a world-space target position and color
//!
//! The mapping places column 0 at x = 0 and scales columns across the world
//! width; rows run top-to-bottom in the image and top-to-bottom in world
//! height, with the image block centered vertically via an offset computed
//! from its aspect ratio. Fully transparent cells produce no particle.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;

use crate::error::SimError;
use crate::simulation::states::NVec2;

/// One sampled pixel: where its particle should end up, and its color.
#[derive(Debug, Clone)]
pub struct PixelSample {
    pub target: NVec2, // world-space target position
    pub color: [f32; 3], // RGB in [0, 1]
}

/// Decode an image from disk. Unreadable or corrupt input is fatal.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage, SimError> {
    image::open(path).map_err(SimError::Decode)
}

/// Resize to `target_width` preserving aspect ratio (Lanczos) and convert
/// to RGBA8. Height truncates like the original integer math and is kept
/// at least one row.
pub fn pixelate(img: &DynamicImage, target_width: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let aspect = h as f64 / w as f64;
    let target_height = ((target_width as f64 * aspect) as u32).max(1);
    img.resize_exact(target_width, target_height, FilterType::Lanczos3)
        .to_rgba8()
}

/// Subsample `grid` by `stride` on both axes and emit one sample per cell
/// with non-zero alpha.
pub fn sample_grid(grid: &RgbaImage, stride: u32, world_w: f64, world_h: f64) -> Vec<PixelSample> {
    let aspect = grid.height() as f64 / grid.width() as f64;

    // Grid dimensions after striding
    let ncols = grid.width().div_ceil(stride) as f64;
    let nrows = grid.height().div_ceil(stride) as f64;

    // Vertical block extent and centering offset
    let block_h = world_w * aspect;
    let offset = (world_h - block_h) / 2.0;

    let mut samples = Vec::new();
    for (yi, y) in (0..grid.height()).step_by(stride as usize).enumerate() {
        for (xi, x) in (0..grid.width()).step_by(stride as usize).enumerate() {
            let px = grid.get_pixel(x, y);
            let [r, g, b, a] = px.0;
            if a == 0 {
                continue;
            }
            let x_pos = (xi as f64 / ncols) * world_w;
            let y_pos = offset + block_h - (yi as f64 / nrows) * block_h;
            samples.push(PixelSample {
                target: NVec2::new(x_pos, y_pos),
                color: [
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                ],
            });
        }
    }
    samples
}
