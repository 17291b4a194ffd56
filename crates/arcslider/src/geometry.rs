use serde::{Deserialize, Serialize};

/// Side of the square the host screen gives the slider.
pub const DEFAULT_SIZE: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` on the circle of `radius` around `self`.
    pub fn on_circle(self, radius: f64, angle: f64) -> Self {
        Self::new(
            self.x + radius * angle.cos(),
            self.y + radius * angle.sin(),
        )
    }

    pub fn angle_from(self, center: Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Where the slider sits inside its host surface.
///
/// `radius` is the centre line of the stroked arc; ticks and the needle reach
/// out to `outer_radius`, the outer edge of the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub outer_radius: f64,
}

impl ArcGeometry {
    pub fn from_bounds(width: f64, height: f64, line_width: f64) -> Self {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let radius = (width.min(height) / 2.0 - line_width).max(0.0);
        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            outer_radius: radius + line_width / 2.0,
        }
    }

    pub fn needle_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Gradient axis: top-left to bottom-right corner of the bounds.
    pub fn gradient_axis(&self) -> (Point, Point) {
        (Point::default(), Point::new(self.width, self.height))
    }
}

impl Default for ArcGeometry {
    fn default() -> Self {
        Self::from_bounds(DEFAULT_SIZE, DEFAULT_SIZE, crate::config::DEFAULT_LINE_WIDTH)
    }
}
