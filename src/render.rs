use std::path::{Path, PathBuf};

use image::{GrayImage, ImageBuffer, ImageResult, Luma};
use log::debug;

use crate::simulation::Snapshot;

fn shade(density: f64) -> u8 {
    // NaN falls through both bounds and casts to 0.
    density.max(0.0).min(255.0) as u8
}

/// Grayscale picture of the density field, `cell_length` pixels per cell.
/// Ghost cells are not drawn.
pub fn density_image(snapshot: &Snapshot, cell_length: u32) -> GrayImage {
    let dims = snapshot.dims();
    let cell = cell_length.max(1);
    let width = dims.width() as u32 * cell;
    let height = dims.height() as u32 * cell;

    ImageBuffer::from_fn(width, height, |px, py| {
        let i = (px / cell) as usize + 1;
        let j = (py / cell) as usize + 1;
        Luma([shade(snapshot.density(i, j))])
    })
}

/// Writes `frame_NNNNN.png` into `dir` and returns its path.
pub fn save_frame(snapshot: &Snapshot, cell_length: u32, dir: &Path, index: usize) -> ImageResult<PathBuf> {
    let path = dir.join(format!("frame_{:05}.png", index));
    density_image(snapshot, cell_length).save(&path)?;
    debug!("wrote {}", path.display());
    Ok(path)
}
