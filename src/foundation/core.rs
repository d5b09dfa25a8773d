use crate::foundation::error::{AspectError, AspectResult};
use crate::foundation::math::is_positive_finite;

pub use kurbo::{Affine, Point, Vec2};

/// Absolute 0-based frame index of a keyframe on its event's timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Project video output settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputFormat {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Width-to-height ratio of one output pixel.
    pub pixel_aspect: f64,
}

impl OutputFormat {
    /// Create validated output settings.
    pub fn new(width: u32, height: u32, pixel_aspect: f64) -> AspectResult<Self> {
        let out = Self {
            width,
            height,
            pixel_aspect,
        };
        out.check().map_err(AspectError::validation)?;
        Ok(out)
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("output width and height must be > 0".to_string());
        }
        if !is_positive_finite(self.pixel_aspect) {
            return Err(format!(
                "output pixel aspect must be positive and finite, got {}",
                self.pixel_aspect
            ));
        }
        Ok(())
    }

    /// Displayed frame aspect: `pixel_aspect * width / height`.
    pub fn output_aspect(&self) -> f64 {
        self.pixel_aspect * f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
