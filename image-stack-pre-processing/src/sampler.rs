/// Per-slice image sampling into normalised positions and colours.
use crate::error::{ConversionError, Result};
use constants::sampling::ALPHA_THRESHOLD;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Resolution and alpha handling applied to every slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Skip pixels whose alpha is below the threshold.
    pub ignore_alpha: bool,
    /// Columns to sample, 0 keeps the native width.
    pub width_samples: u32,
    /// Rows to sample, 0 keeps the native height.
    pub height_samples: u32,
    /// Derive the unset (or height) sample count from the image aspect ratio.
    /// Width wins when both counts are given.
    pub maintain_aspect_ratio: bool,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            ignore_alpha: true,
            width_samples: 0,
            height_samples: 0,
            maintain_aspect_ratio: true,
        }
    }
}

/// A normalised image position with its RGB colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Column and row divided by the sampled grid size, each in [0, 1).
    pub position: [f64; 2],
    pub colour: [u8; 3],
}

/// Resolves the sample grid requested for an image of the given native size.
pub fn resolve_sample_counts(width: u32, height: u32, options: &SamplingOptions) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let aspect_ratio = height as f64 / width as f64;
    let mut width_samples = options.width_samples;
    let mut height_samples = options.height_samples;

    if options.maintain_aspect_ratio {
        if width_samples > 0 {
            height_samples = (width_samples as f64 * aspect_ratio).floor() as u32;
        } else if height_samples > 0 {
            width_samples = (height_samples as f64 / aspect_ratio).floor() as u32;
        }
    }

    if width_samples == 0 {
        width_samples = width;
    }
    if height_samples == 0 {
        height_samples = height;
    }

    (width_samples, height_samples)
}

/// Fits the native size inside the requested size without enlarging,
/// rounding the derived axis to the nearest pixel and never collapsing it below one.
pub fn thumbnail_size(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (mut x, mut y) = (width as u64, height as u64);
    let (max_x, max_y) = (max_width as u64, max_height as u64);

    if x > max_x {
        y = rounded_ratio(y * max_x, x).max(1);
        x = max_x;
    }
    if y > max_y {
        x = rounded_ratio(x * max_y, y).max(1);
        y = max_y;
    }

    (x.min(max_x) as u32, y.min(max_y) as u32)
}

fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

/// Decodes an image file and prepares its sample stream.
pub fn sample_image(path: &Path, options: &SamplingOptions) -> Result<ImageSamples> {
    let image = image::open(path).map_err(|source| ConversionError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let samples = ImageSamples::new(image, options);
    if samples.is_empty_grid() {
        warn!("{} resolves to an empty sample grid", path.display());
    }
    Ok(samples)
}

/// Column-major stream of samples over one resized image.
/// Consumed once; a fresh stream needs a fresh decode.
pub struct ImageSamples {
    pixels: RgbaImage,
    columns: u32,
    rows: u32,
    ignore_alpha: bool,
    x: u32,
    y: u32,
}

impl ImageSamples {
    pub fn new(image: DynamicImage, options: &SamplingOptions) -> Self {
        let (width, height) = image.dimensions();
        let (width_samples, height_samples) = resolve_sample_counts(width, height, options);
        let (columns, rows) = thumbnail_size(width, height, width_samples, height_samples);

        debug!(
            "native {}x{}, requested {}x{}, sampling {}x{}",
            width, height, width_samples, height_samples, columns, rows
        );

        let pixels = if (columns, rows) == (width, height) || columns == 0 || rows == 0 {
            image.to_rgba8()
        } else {
            image
                .resize_exact(columns, rows, FilterType::Lanczos3)
                .to_rgba8()
        };

        Self {
            pixels,
            columns,
            rows,
            ignore_alpha: options.ignore_alpha,
            x: 0,
            y: 0,
        }
    }

    /// Sampled grid size as (columns, rows).
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn is_empty_grid(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl Iterator for ImageSamples {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        while self.x < self.columns {
            if self.y >= self.rows {
                self.x += 1;
                self.y = 0;
                continue;
            }

            let (x, y) = (self.x, self.y);
            self.y += 1;

            let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
            if self.ignore_alpha && a < ALPHA_THRESHOLD {
                continue;
            }

            return Some(Sample {
                position: [
                    x as f64 / self.columns as f64,
                    y as f64 / self.rows as f64,
                ],
                colour: [r, g, b],
            });
        }
        None
    }
}
