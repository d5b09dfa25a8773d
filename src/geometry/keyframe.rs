use crate::foundation::core::{FrameIndex, Point};
use crate::geometry::bounds::Bounds;

/// Placement of a video region at one point in time.
///
/// `rotation` is in radians and records how far `bounds` has been turned about its
/// center relative to the upright rectangle it came from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Position on the event's timeline.
    #[serde(default)]
    pub frame: FrameIndex,
    /// Corner points of the region.
    pub bounds: Bounds,
    /// Current rotation in radians.
    #[serde(default)]
    pub rotation: f64,
}

impl Keyframe {
    /// Keyframe at frame 0 with the given bounds and rotation.
    pub fn new(bounds: Bounds, rotation: f64) -> Self {
        Self {
            frame: FrameIndex(0),
            bounds,
            rotation,
        }
    }

    /// Same keyframe placed at `frame`.
    pub fn at(mut self, frame: FrameIndex) -> Self {
        self.frame = frame;
        self
    }

    /// Center of the region, derived from the bounds.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Turn the region by `delta` radians about its center.
    pub fn rotate_by(&mut self, delta: f64) {
        self.bounds = self.bounds.rotated_about(delta, self.center());
        self.rotation += delta;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/keyframe.rs"]
mod tests;
