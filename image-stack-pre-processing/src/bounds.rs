/// World space extents used to scale normalised image coordinates
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Extent along a world axis index (0 = x, 1 = y, 2 = z)
    pub fn extent(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Reject extents that would put NaN or infinity into the output
    pub fn validate(&self) -> Result<(), ConversionError> {
        for (axis, value) in [('x', self.x), ('y', self.y), ('z', self.z)] {
            if !value.is_finite() {
                return Err(ConversionError::InvalidBoundingBox { axis, value });
            }
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl From<[f64; 3]> for BoundingBox {
    fn from(extents: [f64; 3]) -> Self {
        Self::new(extents[0], extents[1], extents[2])
    }
}
