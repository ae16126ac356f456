//! State stack - push/pop scoping of styles and transforms
//!
//! Styles and transforms live on two stacks so a transform scope can be
//! opened without touching the style and the other way round. Each stack sits
//! on a permanent entry (the default style, the base transform) that is never
//! popped, so there is always an active style and an active transform.

use easel_core::{Affine2D, GraphicsDevice};

use crate::style::RenderStyle;
use crate::transform::Transformation;

pub struct StateStack<D: GraphicsDevice> {
    // Boxed so a style keeps its address while the stack grows
    default_style: Box<RenderStyle<D>>,
    styles: Vec<Box<RenderStyle<D>>>,
    base_transform: Transformation,
    transforms: Vec<Transformation>,
}

impl<D: GraphicsDevice> StateStack<D> {
    pub fn new() -> Self {
        Self {
            default_style: Box::new(RenderStyle::new()),
            styles: Vec::new(),
            base_transform: Transformation::new(),
            transforms: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────────

    /// Activate a fresh style: no fill, no stroke, default modes
    pub fn push_style(&mut self) {
        self.styles.push(Box::new(RenderStyle::new()));
    }

    /// Drop the top style; returns false when only the default is left
    pub fn pop_style(&mut self) -> bool {
        if self.styles.pop().is_none() {
            tracing::trace!("StateStack::pop_style on empty stack");
            return false;
        }
        true
    }

    pub fn active_style(&self) -> &RenderStyle<D> {
        self.styles.last().unwrap_or(&self.default_style)
    }

    pub fn active_style_mut(&mut self) -> &mut RenderStyle<D> {
        self.styles.last_mut().unwrap_or(&mut self.default_style)
    }

    /// Number of styles including the default
    pub fn style_depth(&self) -> usize {
        self.styles.len() + 1
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transforms
    // ─────────────────────────────────────────────────────────────────────────

    /// Activate a new transform
    ///
    /// With `advance` it starts from the current matrix, so nested transforms
    /// compose; without it starts from identity.
    pub fn push_transform(&mut self, advance: bool) {
        let base = if advance {
            self.active_matrix()
        } else {
            Affine2D::IDENTITY
        };
        self.transforms.push(Transformation::with_base(base));
    }

    /// Drop the top transform; returns false when only the base is left
    pub fn pop_transform(&mut self) -> bool {
        if self.transforms.pop().is_none() {
            tracing::trace!("StateStack::pop_transform on empty stack");
            return false;
        }
        true
    }

    pub fn active_transform(&self) -> &Transformation {
        self.transforms.last().unwrap_or(&self.base_transform)
    }

    pub fn active_transform_mut(&mut self) -> &mut Transformation {
        self.transforms.last_mut().unwrap_or(&mut self.base_transform)
    }

    pub fn active_matrix(&self) -> Affine2D {
        self.active_transform().matrix()
    }

    /// Number of transforms including the base
    pub fn transform_depth(&self) -> usize {
        self.transforms.len() + 1
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Both
    // ─────────────────────────────────────────────────────────────────────────

    /// A fresh style plus a transform composed onto the current one
    pub fn push_state(&mut self) {
        self.push_style();
        self.push_transform(true);
    }

    pub fn pop_state(&mut self) -> bool {
        let style = self.pop_style();
        let transform = self.pop_transform();
        style || transform
    }

    /// Number of active states including the default
    pub fn depth(&self) -> usize {
        self.style_depth().max(self.transform_depth())
    }

    /// Drop every pushed entry and reset the base transform
    ///
    /// The default style survives, so settings made outside any push carry
    /// over to the next frame.
    pub fn reset(&mut self) {
        if !self.styles.is_empty() || !self.transforms.is_empty() {
            tracing::debug!(
                "StateStack::reset dropping {} styles and {} transforms left pushed",
                self.styles.len(),
                self.transforms.len()
            );
        }
        self.styles.clear();
        self.transforms.clear();
        self.base_transform = Transformation::new();
    }
}

impl<D: GraphicsDevice> Default for StateStack<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushKind;
    use easel_core::recording::RecordingDevice;
    use easel_core::{Point, Vec2};

    type Stack = StateStack<RecordingDevice>;

    #[test]
    fn test_pop_never_evicts_default() {
        let mut stack = Stack::new();
        assert_eq!(stack.depth(), 1);
        assert!(!stack.pop_state());
        assert!(!stack.pop_style());
        assert!(!stack.pop_transform());
        assert_eq!(stack.depth(), 1);

        stack.push_state();
        stack.push_state();
        assert_eq!(stack.depth(), 3);
        for _ in 0..5 {
            stack.pop_state();
            assert!(stack.depth() >= 1);
        }
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_balanced_push_pop_restores_same_style() {
        let mut stack = Stack::new();
        stack.push_state();
        let before: *const RenderStyle<RecordingDevice> = stack.active_style();

        for _ in 0..8 {
            stack.push_state();
        }
        assert!(!std::ptr::eq(before, stack.active_style()));
        for _ in 0..8 {
            stack.pop_state();
        }
        assert!(std::ptr::eq(before, stack.active_style()));
    }

    #[test]
    fn test_pushed_style_starts_fresh() {
        let mut stack = Stack::new();
        stack.active_style_mut().active_fill = Some(BrushKind::Solid);
        stack.active_style_mut().set_stroke_weight(4.0);

        stack.push_style();
        assert_eq!(stack.active_style().active_fill, None);
        assert_eq!(stack.active_style().stroke_weight, 1.0);

        stack.pop_style();
        assert_eq!(stack.active_style().active_fill, Some(BrushKind::Solid));
        assert_eq!(stack.active_style().stroke_weight, 4.0);
    }

    #[test]
    fn test_advanced_transform_composes() {
        let mut stack = Stack::new();
        stack.active_transform_mut().set_rotation(30.0);
        stack.active_transform_mut().set_position(40.0, 10.0);
        let parent = stack.active_matrix();

        stack.push_transform(true);
        assert_eq!(stack.active_matrix(), parent);
        stack.active_transform_mut().translate(5.0, 6.0);

        let expected = Affine2D::translation(5.0, 6.0).then(&parent);
        assert!(stack.active_matrix().approx_eq(&expected, 1e-4));

        stack.pop_transform();
        assert_eq!(stack.active_matrix(), parent);
    }

    #[test]
    fn test_unadvanced_transform_starts_at_identity() {
        let mut stack = Stack::new();
        stack.active_transform_mut().set_scale(3.0, 3.0);
        stack.push_transform(false);
        assert_eq!(stack.active_matrix(), Affine2D::IDENTITY);
    }

    #[test]
    fn test_reset_clears_everything_but_default_style() {
        let mut stack = Stack::new();
        stack.active_style_mut().active_stroke = Some(BrushKind::Radial);
        stack.active_transform_mut().translate(10.0, 0.0);
        stack.push_state();
        stack.push_transform(true);
        stack.push_style();

        stack.reset();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.active_matrix(), Affine2D::IDENTITY);
        assert_eq!(stack.active_style().active_stroke, Some(BrushKind::Radial));
    }

    #[test]
    fn test_nested_transforms_map_points() {
        let mut stack = Stack::new();
        stack.active_transform_mut().translate(100.0, 0.0);
        stack.push_transform(true);
        stack.active_transform_mut().set_scale(2.0, 2.0);
        stack.push_transform(true);
        stack.active_transform_mut().translate(1.0, 1.0);

        // innermost first: +1, then x2, then +100
        let p = stack.active_matrix().transform_point(Point::new(0.0, 0.0));
        assert_eq!(p, Point::new(102.0, 2.0));
        assert_eq!(stack.active_transform().scale_factor(), Vec2::ONE);
    }
}
