/// Conversion parameters shared by the CLI and library callers
use crate::axis::DepthDirection;
use crate::bounds::BoundingBox;
use crate::sampler::SamplingOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// World extents the slices are mapped onto.
    pub bounding_box: BoundingBox,
    /// Axis the slices are stacked along.
    pub depth_direction: DepthDirection,
    /// Stack slices towards the negative depth axis.
    pub inverse: bool,
    #[serde(flatten)]
    pub sampling: SamplingOptions,
}

impl ConversionSettings {
    pub fn new(bounding_box: impl Into<BoundingBox>) -> Self {
        Self {
            bounding_box: bounding_box.into(),
            ..Self::default()
        }
    }

    pub fn depth_direction(mut self, direction: DepthDirection) -> Self {
        self.depth_direction = direction;
        self
    }

    pub fn inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn ignore_alpha(mut self, ignore_alpha: bool) -> Self {
        self.sampling.ignore_alpha = ignore_alpha;
        self
    }

    pub fn samples(mut self, width_samples: u32, height_samples: u32) -> Self {
        self.sampling.width_samples = width_samples;
        self.sampling.height_samples = height_samples;
        self
    }

    pub fn maintain_aspect_ratio(mut self, maintain: bool) -> Self {
        self.sampling.maintain_aspect_ratio = maintain;
        self
    }

    /// Sign applied to every depth offset.
    pub fn direction_multiplier(&self) -> f64 {
        if self.inverse { -1.0 } else { 1.0 }
    }
}
