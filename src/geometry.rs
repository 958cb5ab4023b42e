// ============================================================================
// POINTS & ROTATION
// ============================================================================

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// How rotated coordinates are snapped back onto the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// `f64::round`: halves go away from zero
    #[default]
    HalfAwayFromZero,
    /// `f64::ceil`, the first revision of the widget used this
    Ceil,
}

impl Rounding {
    pub fn apply(self, value: f64) -> i32 {
        match self {
            Rounding::HalfAwayFromZero => value.round() as i32,
            Rounding::Ceil => value.ceil() as i32,
        }
    }
}

/// Exact degrees to radians factor
pub const RADIANS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Truncated factor used by the first revision of the widget
pub const LEGACY_RADIANS_PER_DEGREE: f64 = 0.017;

/// Rotate `point` about the origin by `theta` radians.
///
/// The y axis points down, so positive angles turn clockwise on screen.
pub fn rotate(point: Point, theta: f64, rounding: Rounding) -> Point {
    let (sin, cos) = theta.sin_cos();
    let (x0, y0) = (point.x as f64, point.y as f64);
    Point::new(
        rounding.apply(x0 * cos - y0 * sin),
        rounding.apply(y0 * cos + x0 * sin),
    )
}

/// Rotate every point of `points`, preserving order
pub fn rotate_all(points: &[Point], theta: f64, rounding: Rounding) -> Vec<Point> {
    points
        .iter()
        .map(|&point| rotate(point, theta, rounding))
        .collect()
}
