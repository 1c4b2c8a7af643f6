/// Error types for image stack conversion.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid depth direction '{0}'! Valid arguments: 'x', 'y' or 'z'")]
    InvalidDepthDirection(String),
    #[error("No image sequence found in {}", .0.display())]
    EmptySequence(PathBuf),
    #[error("Invalid bounding box extent on {axis} axis: {value}")]
    InvalidBoundingBox { axis: char, value: f64 },
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Vertex count {0} does not fit the reserved header field")]
    VertexCountOverflow(u64),
    #[error("Declared vertex count {declared} does not match {written} written records")]
    VertexCountMismatch { declared: u64, written: u64 },
    #[error("Failed to move finished point cloud to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ConversionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
