//! Render style - what the next primitive is drawn with

use easel_core::{GraphicsDevice, InterpolationMode, Point, Rect, TextFormat};

use crate::brush::{BrushKind, BrushSet};
use crate::shape::Shape;
use crate::stroke::StrokeStyle;

/// How the four numbers passed to `rect`, `ellipse` or `image` are read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// x, y of the top-left corner, then width and height
    #[default]
    Corner,
    /// Two opposite corners
    Corners,
    /// Center, then width and height
    Center,
    /// Center, then half width and half height
    Radius,
}

impl DrawMode {
    /// Resolve the four parameters into a rectangle
    pub fn resolve(self, a: f32, b: f32, c: f32, d: f32) -> Rect {
        match self {
            DrawMode::Corner => Rect::new(a, b, c, d),
            DrawMode::Corners => Rect::from_corners(Point::new(a, b), Point::new(c, d)),
            DrawMode::Center => Rect::new(a - c / 2.0, b - d / 2.0, c, d),
            DrawMode::Radius => Rect::new(a - c, b - d, c * 2.0, d * 2.0),
        }
    }
}

/// Brush selection, stroke settings, draw modes and the shape builder
pub struct RenderStyle<D: GraphicsDevice> {
    pub fill: BrushSet<D>,
    pub stroke: BrushSet<D>,
    /// Selector into `fill`; `None` means no fill
    pub active_fill: Option<BrushKind>,
    /// Selector into `stroke`; `None` means no stroke
    pub active_stroke: Option<BrushKind>,
    pub stroke_weight: f32,
    pub stroke_style: StrokeStyle<D>,
    pub rect_mode: DrawMode,
    pub ellipse_mode: DrawMode,
    pub image_mode: DrawMode,
    pub image_interpolation: InterpolationMode,
    pub text_format: TextFormat,
    pub shape: Shape<D>,
}

impl<D: GraphicsDevice> RenderStyle<D> {
    /// No fill, no stroke, weight 1
    pub fn new() -> Self {
        Self {
            fill: BrushSet::new(),
            stroke: BrushSet::new(),
            active_fill: None,
            active_stroke: None,
            stroke_weight: 1.0,
            stroke_style: StrokeStyle::new(),
            rect_mode: DrawMode::Corner,
            ellipse_mode: DrawMode::Center,
            image_mode: DrawMode::Corner,
            image_interpolation: InterpolationMode::Linear,
            text_format: TextFormat::default(),
            shape: Shape::new(),
        }
    }

    /// The native fill brush, or `None` when fill is off or unavailable
    pub fn fill_brush(&self) -> Option<&D::Brush> {
        self.active_fill.and_then(|kind| self.fill.get(kind))
    }

    /// The native stroke brush, or `None` when stroke is off or unavailable
    pub fn stroke_brush(&self) -> Option<&D::Brush> {
        self.active_stroke.and_then(|kind| self.stroke.get(kind))
    }

    pub fn set_stroke_weight(&mut self, weight: f32) {
        self.stroke_weight = weight.max(0.0);
    }

    /// Rebuild the stroke style if a stroke will be drawn with it
    pub fn prepare(&mut self, device: &mut D) {
        if self.stroke_brush().is_some() {
            self.stroke_style.get(device);
        }
    }

    /// Resolved fill and stroke for the next primitive
    pub fn paint(&self) -> Paint<'_, D> {
        Paint {
            fill: self.fill_brush(),
            stroke: self.stroke_brush(),
            weight: self.stroke_weight,
            stroke_style: self.stroke_style.current(),
        }
    }
}

/// Borrowed native resources for one fill-then-stroke draw
pub struct Paint<'a, D: GraphicsDevice> {
    pub fill: Option<&'a D::Brush>,
    pub stroke: Option<&'a D::Brush>,
    pub weight: f32,
    pub stroke_style: Option<&'a D::StrokeStyle>,
}

impl<'a, D: GraphicsDevice> Paint<'a, D> {
    /// Fill, then stroke on top; either is skipped when its brush is missing
    pub fn apply<F, S>(&self, device: &mut D, fill: F, stroke: S)
    where
        F: FnOnce(&mut D, &D::Brush),
        S: FnOnce(&mut D, &D::Brush, f32, Option<&D::StrokeStyle>),
    {
        if let Some(brush) = self.fill {
            fill(device, brush);
        }
        if let Some(brush) = self.stroke {
            stroke(device, brush, self.weight, self.stroke_style);
        }
    }
}

impl<D: GraphicsDevice> Default for RenderStyle<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::recording::RecordingDevice;
    use easel_core::Color;

    #[test]
    fn test_draw_modes() {
        let r = DrawMode::Corner.resolve(200.0, 200.0, 100.0, 100.0);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (200.0, 200.0, 300.0, 300.0));

        let r = DrawMode::Center.resolve(100.0, 100.0, 50.0, 50.0);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (75.0, 75.0, 125.0, 125.0));

        let r = DrawMode::Corners.resolve(30.0, 40.0, 10.0, 20.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 20.0, 20.0));

        let r = DrawMode::Radius.resolve(50.0, 50.0, 10.0, 5.0);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (40.0, 45.0, 60.0, 55.0));
    }

    #[test]
    fn test_active_brushes_are_selectors() {
        let mut device = RecordingDevice::new();
        let mut style = RenderStyle::<RecordingDevice>::new();
        assert!(style.fill_brush().is_none());
        assert!(style.stroke_brush().is_none());

        // selected but never created
        style.active_fill = Some(BrushKind::Linear);
        assert!(style.fill_brush().is_none());

        style.fill.solid.set_color(&mut device, Color::RED).unwrap();
        style.active_fill = Some(BrushKind::Solid);
        assert!(style.fill_brush().is_some());
        assert!(style.stroke_brush().is_none());
    }

    #[test]
    fn test_stroke_weight_is_clamped() {
        let mut style = RenderStyle::<RecordingDevice>::new();
        style.set_stroke_weight(-3.0);
        assert_eq!(style.stroke_weight, 0.0);
    }
}
