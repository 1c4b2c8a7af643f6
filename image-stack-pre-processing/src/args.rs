use clap::{ArgAction, Parser};
use image_stack_pre_processing::{BoundingBox, ConversionSettings, DepthDirection, SamplingOptions};
use std::ffi::OsString;
use std::path::PathBuf;

/// Convert an image sequence to a PLY point cloud.
#[derive(Parser, Debug, Clone)]
#[command(name = "img2ply", version, long_about = None)]
pub struct Args {
    /// Path to image sequence
    pub input: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "ply")]
    pub ply: PathBuf,

    /// Bounding box of object in x, y, z
    #[arg(
        short = 'b',
        long = "boundingBox",
        visible_alias = "bb",
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        required = true,
        allow_negative_numbers = true
    )]
    pub bounding_box: Vec<f64>,

    /// Direction in which the slices are facing (x, y or z)
    #[arg(long = "depthDirection", default_value = "z", value_parser = parse_direction)]
    pub depth_direction: DepthDirection,

    /// Reverse the placement of the slices
    #[arg(long = "depthInverse", action = ArgAction::Set, default_value = "false", value_parser = parse_flag)]
    pub depth_inverse: bool,

    /// Ignore pixels with an alpha value below 25
    #[arg(long = "ignoreAlpha", action = ArgAction::Set, default_value = "true", value_parser = parse_flag)]
    pub ignore_alpha: bool,

    /// Amount of width samples, if 0 every pixel is sampled
    #[arg(long = "widthSamples", default_value_t = 0)]
    pub width_samples: u32,

    /// Amount of height samples, if 0 every pixel is sampled
    #[arg(long = "heightSamples", default_value_t = 0)]
    pub height_samples: u32,

    /// Maintain aspect ratio of sample points
    #[arg(long = "maintainAspectRatio", action = ArgAction::Set, default_value = "true", value_parser = parse_flag)]
    pub maintain_aspect_ratio: bool,

    /// Write a JSON manifest describing the conversion
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parses the process arguments, also accepting the two-letter `-bb` flag.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    pub fn settings(&self) -> ConversionSettings {
        // clap guarantees exactly three extents.
        let bounding_box = BoundingBox::new(
            self.bounding_box[0],
            self.bounding_box[1],
            self.bounding_box[2],
        );

        ConversionSettings {
            bounding_box,
            depth_direction: self.depth_direction,
            inverse: self.depth_inverse,
            sampling: SamplingOptions {
                ignore_alpha: self.ignore_alpha,
                width_samples: self.width_samples,
                height_samples: self.height_samples,
                maintain_aspect_ratio: self.maintain_aspect_ratio,
            },
        }
    }
}

/// Rewrites `-bb` to `--bb`; clap short flags are a single character and would
/// read it as `-b b`. Tokens after a `--` terminator are left alone.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                arg
            } else if arg == "-bb" {
                OsString::from("--bb")
            } else {
                arg
            }
        })
        .collect()
}

/// Accepts yes/true/t/1 and no/false/f/0 in any case, rejecting everything else.
fn parse_flag(token: &str) -> Result<bool, String> {
    match token.to_lowercase().as_str() {
        "yes" | "true" | "t" | "1" => Ok(true),
        "no" | "false" | "f" | "0" => Ok(false),
        other => Err(format!("expected yes/true/t/1 or no/false/f/0, got '{}'", other)),
    }
}

fn parse_direction(token: &str) -> Result<DepthDirection, String> {
    token.parse().map_err(|e: image_stack_pre_processing::ConversionError| e.to_string())
}
