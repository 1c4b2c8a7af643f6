/// Image stack to point cloud conversion orchestrating sampling and PLY output.
use crate::axis::AxisMapping;
use crate::error::Result;
use crate::manifest::ManifestGenerator;
use crate::ply_writer::PlyWriter;
use crate::sampler::sample_image;
use crate::sequence::load_image_sequence;
use crate::settings::ConversionSettings;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Outcome of a finished conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub images_processed: usize,
    pub points_written: u64,
    pub output: PathBuf,
    pub axis_mapping: AxisMapping,
    pub elapsed_seconds: f64,
}

/// Converts a directory of numbered slices into a single PLY point cloud.
/// Slices are processed one at a time and streamed straight to disk.
pub struct ImageStackConverter {
    /// Directory holding the image sequence.
    input_dir: PathBuf,
    /// Destination PLY file.
    output_path: PathBuf,
    settings: ConversionSettings,
    /// Optional JSON sidecar describing the run.
    manifest_path: Option<PathBuf>,
}

impl ImageStackConverter {
    pub fn new(input_dir: &Path, output_path: &Path, settings: ConversionSettings) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_path: output_path.to_path_buf(),
            settings,
            manifest_path: None,
        }
    }

    /// Also write a conversion manifest once the point cloud is complete.
    pub fn with_manifest(mut self, manifest_path: &Path) -> Self {
        self.manifest_path = Some(manifest_path.to_path_buf());
        self
    }

    /// Runs the whole pipeline. Configuration problems surface before the
    /// output file is created; any read or write failure aborts the run.
    pub fn convert(&self) -> Result<ConversionSummary> {
        let started = Instant::now();

        self.settings.bounding_box.validate()?;
        let mapping = self.settings.depth_direction.axis_mapping();
        let multiplier = self.settings.direction_multiplier();

        let sequence = load_image_sequence(&self.input_dir)?;
        let length = sequence.len();

        println!("{}", divider());
        println!("Images Found:    {}", length);

        let bb = &self.settings.bounding_box;
        let width_extent = bb.extent(mapping.width);
        let height_extent = bb.extent(mapping.height);
        let depth_extent = bb.extent(mapping.depth);
        self.print_mapping(&mapping);

        println!("{}", divider());
        println!("Start Processing Images");
        println!("{}", divider());

        let mut writer = PlyWriter::create(&self.output_path)?;
        let mut total_points: u64 = 0;

        let pb = ProgressBar::new(length as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} images ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Sampling slices");

        for (index, image_path) in sequence.iter().enumerate() {
            debug!("sampling slice {} of {}: {}", index + 1, length, image_path.display());

            let depth = (depth_extent / length as f64) * index as f64 * multiplier;

            for sample in sample_image(image_path, &self.settings.sampling)? {
                let position = mapping.place(
                    width_extent * sample.position[0],
                    height_extent * sample.position[1],
                    depth,
                );
                writer.write_point(position, sample.colour)?;
                total_points += 1;
            }

            pb.inc(1);
            pb.set_message(format!("{} points written", total_points));
            pb.suspend(|| {
                let count = format!("< {} / {} >", index + 1, length);
                let points = format!("Points Written: {}", total_points);
                println!("{:<20} {:<20}", count, points);
            });
        }

        pb.finish_with_message("Slices sampled");

        println!("{}", divider());
        println!("Updating header with vertex count: {}", total_points);
        let output = writer.finalize(total_points)?;

        let summary = ConversionSummary {
            images_processed: length,
            points_written: total_points,
            output,
            axis_mapping: mapping,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        };

        println!("{}", divider());
        println!("Output:          {}", summary.output.display());
        println!("Duration:        {:.1} min", summary.elapsed_seconds / 60.0);

        if let Some(manifest_path) = &self.manifest_path {
            ManifestGenerator::new(manifest_path).generate(
                self.settings,
                summary.clone(),
                &sequence,
            )?;
        }

        Ok(summary)
    }

    fn print_mapping(&self, mapping: &AxisMapping) {
        println!("{}", divider());
        println!("Width Index:     {}", mapping.width);
        println!("Height Index:    {}", mapping.height);
        println!("Depth Index:     {}", mapping.depth);
    }
}

/// Converts `input_dir` into the PLY file at `output_path`.
pub fn convert(
    input_dir: &Path,
    output_path: &Path,
    settings: &ConversionSettings,
) -> Result<ConversionSummary> {
    ImageStackConverter::new(input_dir, output_path, *settings).convert()
}

fn divider() -> String {
    "-".repeat(50)
}
