use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use exif::{In, Reader, Tag, Value};
use rand::seq::SliceRandom;
use tracing::warn;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Image files of a directory, sorted by name ---
pub fn load_sorted_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("no image files found in {}", dir.display());
    }
    Ok(paths)
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

pub fn shuffle_paths(paths: &mut [PathBuf]) {
    paths.shuffle(&mut rand::rng());
}

/// EXIF orientations we correct for. Flipped variants are shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    Rotated180,
    Rotated90Cw,
    Rotated90Ccw,
}

impl Orientation {
    pub fn from_exif(value: u16) -> Self {
        match value {
            3 => Orientation::Rotated180,
            6 => Orientation::Rotated90Cw,
            8 => Orientation::Rotated90Ccw,
            _ => Orientation::Normal,
        }
    }
}

/// Orientation stored in the image's EXIF block. Only JPEGs are inspected;
/// anything unreadable counts as `Normal`.
pub fn read_orientation(path: &Path, bytes: &[u8]) -> Orientation {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "jpg" && extension != "jpeg" {
        return Orientation::Normal;
    }

    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            warn!(path = %path.display(), "could not read EXIF data: {e}");
            return Orientation::Normal;
        }
    };
    match exif.get_field(Tag::Orientation, In::PRIMARY).map(|field| &field.value) {
        Some(Value::Short(values)) => values.first().copied().map_or(Orientation::Normal, Orientation::from_exif),
        _ => Orientation::Normal,
    }
}

/// Caption for an image without one: its file stem.
pub fn caption_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default()
}
