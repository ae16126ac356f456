//! Transformation - position, rotation, scale and skew composed lazily
//!
//! A `Transformation` stores its components separately and only multiplies
//! them into a matrix when the matrix is read after a change. Each one sits
//! on top of a base matrix inherited from its parent scope, so nested scopes
//! compose instead of starting over from identity.

use std::cell::Cell;

use easel_core::{Affine2D, Point, Vec2};

/// Normalize degrees into `[0, 360)`
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// 2D affine transform built from components
#[derive(Clone, Debug)]
pub struct Transformation {
    position: Point,
    scale: Vec2,
    /// Degrees, always in `[0, 360)`
    rotation: f32,
    /// Degrees along x and y
    skew: Vec2,
    base: Affine2D,
    /// `None` when a component changed since the last read
    cached: Cell<Option<Affine2D>>,
}

impl Transformation {
    /// Identity transformation with an identity base
    pub fn new() -> Self {
        Self::with_base(Affine2D::IDENTITY)
    }

    /// Identity components on top of `base`
    pub fn with_base(base: Affine2D) -> Self {
        Self {
            position: Point::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            skew: Vec2::ZERO,
            base,
            cached: Cell::new(None),
        }
    }

    /// The inherited matrix this transformation composes onto
    pub fn base(&self) -> Affine2D {
        self.base
    }

    pub fn set_base(&mut self, base: Affine2D) {
        if self.base != base {
            self.base = base;
            self.invalidate();
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        let position = Point::new(x, y);
        if self.position != position {
            self.position = position;
            self.invalidate();
        }
    }

    /// Move by a delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.set_position(self.position.x + dx, self.position.y + dy);
    }

    pub fn scale_factor(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, x: f32, y: f32) {
        let scale = Vec2::new(x, y);
        if self.scale != scale {
            self.scale = scale;
            self.invalidate();
        }
    }

    /// Multiply the current scale
    pub fn scale(&mut self, fx: f32, fy: f32) {
        self.set_scale(self.scale.x * fx, self.scale.y * fy);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        let rotation = normalize_degrees(degrees);
        if self.rotation != rotation {
            self.rotation = rotation;
            self.invalidate();
        }
    }

    /// Add to the current rotation
    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    pub fn skew_angles(&self) -> Vec2 {
        self.skew
    }

    pub fn set_skew(&mut self, x_degrees: f32, y_degrees: f32) {
        let skew = Vec2::new(x_degrees, y_degrees);
        if self.skew != skew {
            self.skew = skew;
            self.invalidate();
        }
    }

    /// Add to the current skew angles
    pub fn skew(&mut self, dx_degrees: f32, dy_degrees: f32) {
        self.set_skew(self.skew.x + dx_degrees, self.skew.y + dy_degrees);
    }

    /// Back to identity components; the base is kept
    pub fn reset(&mut self) {
        self.position = Point::ZERO;
        self.scale = Vec2::ONE;
        self.rotation = 0.0;
        self.skew = Vec2::ZERO;
        self.invalidate();
    }

    /// Whether the next [`matrix`](Self::matrix) call recomputes
    pub fn is_dirty(&self) -> bool {
        self.cached.get().is_none()
    }

    /// `Scale × Skew × Rotation × Translation × Base`
    pub fn matrix(&self) -> Affine2D {
        if let Some(matrix) = self.cached.get() {
            return matrix;
        }

        let matrix = Affine2D::scale(self.scale.x, self.scale.y)
            .then(&Affine2D::skew(self.skew.x, self.skew.y))
            .then(&Affine2D::rotation(self.rotation))
            .then(&Affine2D::translation(self.position.x, self.position.y))
            .then(&self.base);
        self.cached.set(Some(matrix));
        matrix
    }

    fn invalidate(&mut self) {
        self.cached.set(None);
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_rotation_normalization() {
        let mut t = Transformation::new();
        t.set_rotation(360.0);
        assert_eq!(t.rotation(), 0.0);

        t.set_rotation(-90.0);
        assert_eq!(t.rotation(), 270.0);

        t.rotate(180.0);
        assert_eq!(t.rotation(), 90.0);

        t.set_rotation(720.0 + 45.0);
        assert_eq!(t.rotation(), 45.0);

        let tiny = normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_full_turn_matches_zero() {
        let mut a = Transformation::new();
        a.set_position(3.0, 4.0);
        a.set_rotation(360.0);

        let mut b = Transformation::new();
        b.set_position(3.0, 4.0);
        b.set_rotation(0.0);

        assert_eq!(a.matrix(), b.matrix());
    }

    #[test]
    fn test_matrix_is_memoized() {
        let mut t = Transformation::new();
        assert!(t.is_dirty());
        let first = t.matrix();
        assert!(!t.is_dirty());
        assert_eq!(first, Affine2D::IDENTITY);

        t.translate(5.0, 0.0);
        assert!(t.is_dirty());
        assert_eq!(t.matrix(), Affine2D::translation(5.0, 0.0));

        // unchanged values keep the cache
        t.set_position(5.0, 0.0);
        assert!(!t.is_dirty());
    }

    #[test]
    fn test_component_order() {
        let mut t = Transformation::new();
        t.set_scale(2.0, 2.0);
        t.set_rotation(90.0);
        t.set_position(10.0, 0.0);

        // scaled, then rotated, then moved
        let p = t.matrix().transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_scale_is_multiplicative() {
        let mut t = Transformation::new();
        t.scale(2.0, 3.0);
        t.scale(2.0, 0.5);
        assert_eq!(t.scale_factor(), Vec2::new(4.0, 1.5));
    }

    #[test]
    fn test_child_composes_onto_base() {
        let mut parent = Transformation::new();
        parent.set_rotation(30.0);
        parent.set_position(100.0, 50.0);
        let m = parent.matrix();

        let mut child = Transformation::with_base(m);
        child.translate(7.0, -3.0);

        let expected = Affine2D::translation(7.0, -3.0).then(&m);
        assert!(child.matrix().approx_eq(&expected, EPS));
        assert!(!child.matrix().approx_eq(&Affine2D::translation(7.0, -3.0), EPS));
    }

    #[test]
    fn test_reset_keeps_base() {
        let base = Affine2D::translation(1.0, 2.0);
        let mut t = Transformation::with_base(base);
        t.rotate(45.0);
        t.skew(10.0, 0.0);
        t.reset();
        assert_eq!(t.matrix(), base);
    }
}
