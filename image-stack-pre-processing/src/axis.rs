/// Depth direction selection and the world axis permutation it implies.
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// World axis along which consecutive images are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthDirection {
    X,
    Y,
    #[default]
    Z,
}

impl DepthDirection {
    /// Axis permutation placing image width, image height and sequence depth.
    pub fn axis_mapping(self) -> AxisMapping {
        match self {
            DepthDirection::X => AxisMapping::new(2, 1, 0),
            DepthDirection::Y => AxisMapping::new(0, 2, 1),
            DepthDirection::Z => AxisMapping::new(0, 1, 2),
        }
    }
}

impl FromStr for DepthDirection {
    type Err = ConversionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "x" => Ok(DepthDirection::X),
            "y" => Ok(DepthDirection::Y),
            "z" => Ok(DepthDirection::Z),
            other => Err(ConversionError::InvalidDepthDirection(other.to_string())),
        }
    }
}

impl fmt::Display for DepthDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            DepthDirection::X => "x",
            DepthDirection::Y => "y",
            DepthDirection::Z => "z",
        };
        f.write_str(token)
    }
}

/// World axis index (0 = x, 1 = y, 2 = z) receiving each image dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl AxisMapping {
    fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Place a normalised image position and a depth offset into world space.
    pub fn place(&self, width_value: f64, height_value: f64, depth_value: f64) -> [f64; 3] {
        let mut position = [0.0; 3];
        position[self.width] = width_value;
        position[self.height] = height_value;
        position[self.depth] = depth_value;
        position
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }
}
