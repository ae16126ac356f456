//! Geometry primitives shared by the paint layer and the device contract
//!
//! All coordinates are in device-independent pixels with the y axis pointing
//! down, matching the native 2D backend.

// ─────────────────────────────────────────────────────────────────────────────
// Points, Sizes, Vectors
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

/// 2D vector, also used for per-axis radii
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rectangles and Ellipses
// ─────────────────────────────────────────────────────────────────────────────

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle spanning two opposite corners, in any order
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(
            p1.x.min(p2.x),
            p1.y.min(p2.y),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// A rectangle with elliptical corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: Vec2,
}

impl RoundedRect {
    pub const fn new(rect: Rect, radius: Vec2) -> Self {
        Self { rect, radius }
    }

    /// Square corners
    pub const fn sharp(rect: Rect) -> Self {
        Self {
            rect,
            radius: Vec2::ZERO,
        }
    }
}

/// An axis-aligned ellipse
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: f32, radius_y: f32) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    /// The largest ellipse inscribed in `rect`
    pub fn inscribed(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            radius_x: rect.width() / 2.0,
            radius_y: rect.height() / 2.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Affine Matrix
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation in the backend's 3x2 layout
///
/// ```text
/// | a  b |      x' = a*x + c*y + tx
/// | c  d |      y' = b*x + d*y + ty
/// | tx ty|
/// ```
///
/// Points are row vectors, so `m1.then(&m2)` is the product `m1 × m2` and
/// transforms by `m1` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Clockwise rotation (y axis down) by `degrees`
    pub fn rotation(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Skew by `x_degrees` along the x axis and `y_degrees` along the y axis
    pub fn skew(x_degrees: f32, y_degrees: f32) -> Self {
        Self {
            elements: [
                1.0,
                y_degrees.to_radians().tan(),
                x_degrees.to_radians().tan(),
                1.0,
                0.0,
                0.0,
            ],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Apply `self` first, then `next`
    pub fn then(&self, next: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = next.elements;

        Affine2D {
            elements: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                tx1 * a2 + ty1 * c2 + tx2,
                tx1 * b2 + ty1 * d2 + ty2,
            ],
        }
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Affine2D, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}
