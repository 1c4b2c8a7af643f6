/// Image sequence discovery for slice stacks.
use crate::error::{ConversionError, Result};
use constants::sampling::SUPPORTED_FILE_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists supported images in a directory ordered by file name.
/// Numbering the slices in their file names is what fixes their depth order.
pub fn load_image_sequence(input_dir: &Path) -> Result<Vec<PathBuf>> {
    load_image_sequence_with(input_dir, SUPPORTED_FILE_EXTENSIONS)
}

/// Same as [`load_image_sequence`] with an explicit lowercase extension set.
pub fn load_image_sequence_with(input_dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|e| ConversionError::io(input_dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConversionError::io(input_dir, e))?.path();

        // Subdirectories named like images are still not slices.
        if path.is_file() && has_supported_extension(&path, extensions) {
            images.push(path);
        }
    }

    images.sort_by_key(|path| file_name(path));

    if images.is_empty() {
        return Err(ConversionError::EmptySequence(input_dir.to_path_buf()));
    }

    for (i, image) in images.iter().enumerate() {
        debug!("slice {}: {}", i, image.display());
    }

    Ok(images)
}

fn has_supported_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
