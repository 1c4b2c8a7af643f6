//! Converts numbered image slices into a coloured ASCII PLY point cloud.
//!
//! Each image in a directory becomes one slice of the cloud: its pixels are
//! spread over two axes of a bounding box and its position in the sorted
//! sequence sets the offset along the third.
pub mod axis;
pub mod bounds;
pub mod converter;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod ply_writer;
pub mod sampler;
pub mod sequence;
pub mod settings;

pub use axis::{AxisMapping, DepthDirection};
pub use bounds::BoundingBox;
pub use converter::{ConversionSummary, ImageStackConverter, convert};
pub use error::ConversionError;
pub use sampler::SamplingOptions;
pub use settings::ConversionSettings;
