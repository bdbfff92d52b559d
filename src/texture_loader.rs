use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use carousel::media::{Orientation, read_orientation};
use raylib::prelude::*;
use tracing::debug;

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read file {}", image_path.display()))?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow::anyhow!("failed to decode {}: {e}", image_path.display()))?;

    let orientation = read_orientation(image_path, &file_bytes);
    match orientation {
        Orientation::Rotated180 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Orientation::Rotated90Cw => image.rotate_cw(),
        Orientation::Rotated90Ccw => image.rotate_ccw(),
        Orientation::Normal => {}
    }
    if orientation != Orientation::Normal {
        debug!(path = %image_path.display(), ?orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("failed to create texture for {}: {e}", image_path.display()))?;

    // Pixels now live on the GPU
    drop(image);

    Ok(texture)
}
