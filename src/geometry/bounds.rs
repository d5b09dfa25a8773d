use crate::foundation::core::{Affine, Point, Vec2};

/// Four corners of a (possibly rotated) rectangle, in winding order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
}

impl Bounds {
    /// Build from explicit corners.
    pub fn new(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Axis-aligned bounds spanning `(x0, y0)` to `(x1, y1)`.
    pub fn from_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        )
    }

    /// Corners as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    fn from_corners([top_left, top_right, bottom_right, bottom_left]: [Point; 4]) -> Self {
        Self::new(top_left, top_right, bottom_right, bottom_left)
    }

    /// Centroid of the four corners.
    pub fn center(&self) -> Point {
        let sum = self
            .corners()
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        (sum / 4.0).to_point()
    }

    /// Rotate every corner by `angle` radians about `center`.
    pub fn rotated_about(&self, angle: f64, center: Point) -> Self {
        if angle == 0.0 {
            return *self;
        }
        self.transformed(Affine::rotate_about(angle, center))
    }

    /// Apply an arbitrary affine map to every corner.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self::from_corners(self.corners().map(|p| affine * p))
    }

    /// `(|TR.x - TL.x|, |BL.y - TL.y|)`; only meaningful for axis-aligned bounds.
    pub fn axis_extents(&self) -> (f64, f64) {
        (
            (self.top_right.x - self.top_left.x).abs(),
            (self.bottom_left.y - self.top_left.y).abs(),
        )
    }

    /// Rescale the X coordinates around `cx`, leaving Y untouched.
    pub fn scale_x_about(&self, factor: f64, cx: f64) -> Self {
        Self::from_corners(
            self.corners()
                .map(|p| Point::new((p.x - cx) * factor + cx, p.y)),
        )
    }

    /// Rescale the Y coordinates around `cy`, leaving X untouched.
    pub fn scale_y_about(&self, factor: f64, cy: f64) -> Self {
        Self::from_corners(
            self.corners()
                .map(|p| Point::new(p.x, (p.y - cy) * factor + cy)),
        )
    }

    /// `true` when no corner coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.corners().iter().all(|p| p.is_finite())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bounds.rs"]
mod tests;
