/// Header text written before the vertex-count field
pub const PLY_HEADER_PREFIX: &str = "ply\nformat ascii 1.0\nelement vertex ";

/// Header text written after the vertex-count field
pub const PLY_HEADER_SUFFIX: &str = "\nproperty float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
end_header
";

/// Digits reserved for the vertex count so finalisation is a fixed-offset overwrite
pub const VERTEX_COUNT_WIDTH: usize = 10;

/// Largest vertex count the reserved field can hold
pub const MAX_VERTEX_COUNT: u64 = 9_999_999_999;

/// Byte offset of the vertex-count field from the start of the file
pub const VERTEX_COUNT_OFFSET: u64 = PLY_HEADER_PREFIX.len() as u64;
