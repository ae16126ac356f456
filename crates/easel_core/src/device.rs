//! Native Device Contract
//!
//! The `GraphicsDevice` trait is everything the paint layer needs from the
//! native 2D backend: resource creation, in-place resource updates, path
//! building through a geometry sink, and a single transform register that
//! applies to every draw call.
//!
//! Handles are associated types owned by whoever created them. Dropping a
//! handle releases the native resource; the device never tracks ownership.
//!
//! # Example
//!
//! ```ignore
//! fn paint<D: GraphicsDevice>(device: &mut D) -> Result<()> {
//!     let brush = device.create_solid_color_brush(Color::RED)?;
//!     device.set_transform(&Affine2D::translation(10.0, 10.0));
//!     device.fill_ellipse(Ellipse::new(Point::ZERO, 5.0, 5.0), &brush);
//!     Ok(())
//! }
//! ```

use crate::color::Color;
use crate::error::Result;
use crate::geometry::{Affine2D, Ellipse, Point, Rect, RoundedRect, Size, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// How overlapping figures decide what is inside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    #[default]
    Alternate,
    Winding,
}

/// Per-segment rendering flags applied to a whole path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathSegment {
    #[default]
    None,
    /// Segments are filled but never stroked
    Unstroked,
    /// Joins between segments are always round
    RoundLineJoin,
}

/// Whether a figure takes part in filling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FigureBegin {
    #[default]
    Filled,
    Hollow,
}

/// How a figure ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FigureEnd {
    Open,
    #[default]
    Closed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepDirection {
    CounterClockwise,
    #[default]
    Clockwise,
}

/// Picks between the two arcs that join the same endpoints
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcSize {
    #[default]
    Small,
    Large,
}

/// Cubic Bezier segment from the current point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Quadratic Bezier segment from the current point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticBezierSegment {
    pub control: Point,
    pub end: Point,
}

/// Elliptical arc segment from the current point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub end: Point,
    pub radius: Vec2,
    /// Rotation of the ellipse in degrees
    pub rotation: f32,
    pub sweep: SweepDirection,
    pub arc_size: ArcSize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapStyle {
    #[default]
    Flat,
    Square,
    Round,
    Triangle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
    MiterOrBevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    /// Uses the explicit dash array
    Custom,
}

/// Everything a native stroke style is built from, apart from the dashes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyleProperties {
    pub start_cap: CapStyle,
    pub end_cap: CapStyle,
    pub dash_cap: CapStyle,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub dash_style: DashStyle,
    pub dash_offset: f32,
}

impl Default for StrokeStyleProperties {
    fn default() -> Self {
        Self {
            start_cap: CapStyle::Flat,
            end_cap: CapStyle::Flat,
            dash_cap: CapStyle::Flat,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            dash_style: DashStyle::Solid,
            dash_offset: 0.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Brush Types
// ─────────────────────────────────────────────────────────────────────────────

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 to 1.0
    pub offset: f32,
    pub color: Color,
}

/// How a bitmap brush covers area outside the bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtendMode {
    #[default]
    Clamp,
    Wrap,
    Mirror,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    NearestNeighbor,
    #[default]
    Linear,
}

/// Sampling properties of a bitmap brush
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitmapBrushProperties {
    pub extend_x: ExtendMode,
    pub extend_y: ExtendMode,
    pub interpolation: InterpolationMode,
    pub opacity: f32,
}

impl Default for BitmapBrushProperties {
    fn default() -> Self {
        Self {
            extend_x: ExtendMode::Clamp,
            extend_y: ExtendMode::Clamp,
            interpolation: InterpolationMode::Linear,
            opacity: 1.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Font selection for `draw_text`
#[derive(Clone, Debug, PartialEq)]
pub struct TextFormat {
    pub family: String,
    pub size: f32,
    pub align: TextAlign,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            family: "Segoe UI".to_string(),
            size: 12.0,
            align: TextAlign::Leading,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Device Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The native 2D device
///
/// Creation calls may fail; mutation and draw calls are fire-and-forget, as
/// the backend reports their failures at `end_draw`.
pub trait GraphicsDevice {
    /// Any paint source usable by fill and draw calls
    type Brush;
    /// Immutable gradient stop collection
    type GradientStops;
    /// Pixel data on the device; cloning shares the same bitmap
    type Bitmap: Clone;
    type StrokeStyle;
    type PathGeometry;
    /// Writer that fills a path geometry, valid until closed
    type GeometrySink;

    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    fn begin_draw(&mut self);

    /// Present the frame; `Err(DeviceLost)` means the target must be recreated
    fn end_draw(&mut self) -> Result<()>;

    /// Rebuild the render target after a device loss
    fn recreate(&mut self) -> Result<()>;

    fn resize(&mut self, size: Size);

    fn size(&self) -> Size;

    fn clear(&mut self, color: Color);

    /// Replace the single current transform
    fn set_transform(&mut self, matrix: &Affine2D);

    // ─────────────────────────────────────────────────────────────────────────
    // Brushes
    // ─────────────────────────────────────────────────────────────────────────

    fn create_solid_color_brush(&mut self, color: Color) -> Result<Self::Brush>;

    fn set_solid_color(&mut self, brush: &mut Self::Brush, color: Color);

    fn create_gradient_stops(&mut self, stops: &[GradientStop]) -> Result<Self::GradientStops>;

    fn create_linear_gradient_brush(
        &mut self,
        start: Point,
        end: Point,
        stops: &Self::GradientStops,
    ) -> Result<Self::Brush>;

    fn set_linear_start(&mut self, brush: &mut Self::Brush, start: Point);

    fn set_linear_end(&mut self, brush: &mut Self::Brush, end: Point);

    fn create_radial_gradient_brush(
        &mut self,
        center: Point,
        origin_offset: Point,
        radius: Vec2,
        stops: &Self::GradientStops,
    ) -> Result<Self::Brush>;

    fn set_radial_center(&mut self, brush: &mut Self::Brush, center: Point);

    fn set_radial_origin_offset(&mut self, brush: &mut Self::Brush, offset: Point);

    fn set_radial_radius(&mut self, brush: &mut Self::Brush, radius: Vec2);

    fn create_bitmap_brush(
        &mut self,
        bitmap: &Self::Bitmap,
        properties: BitmapBrushProperties,
    ) -> Result<Self::Brush>;

    fn set_bitmap_brush_image(&mut self, brush: &mut Self::Brush, bitmap: &Self::Bitmap);

    fn set_bitmap_brush_extend_x(&mut self, brush: &mut Self::Brush, mode: ExtendMode);

    fn set_bitmap_brush_extend_y(&mut self, brush: &mut Self::Brush, mode: ExtendMode);

    fn set_bitmap_brush_interpolation(&mut self, brush: &mut Self::Brush, mode: InterpolationMode);

    fn set_brush_opacity(&mut self, brush: &mut Self::Brush, opacity: f32);

    // ─────────────────────────────────────────────────────────────────────────
    // Stroke Styles, Bitmaps
    // ─────────────────────────────────────────────────────────────────────────

    fn create_stroke_style(
        &mut self,
        properties: &StrokeStyleProperties,
        dashes: &[f32],
    ) -> Result<Self::StrokeStyle>;

    /// Create a bitmap from tightly packed RGBA8 pixels
    fn create_bitmap(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<Self::Bitmap>;

    fn bitmap_size(&self, bitmap: &Self::Bitmap) -> Size;

    // ─────────────────────────────────────────────────────────────────────────
    // Path Geometry
    // ─────────────────────────────────────────────────────────────────────────

    fn create_path_geometry(&mut self) -> Result<Self::PathGeometry>;

    /// Open the one and only sink of a fresh path geometry
    fn open_geometry(&mut self, geometry: &mut Self::PathGeometry) -> Result<Self::GeometrySink>;

    fn set_fill_mode(&mut self, sink: &mut Self::GeometrySink, mode: FillMode);

    fn set_segment_flags(&mut self, sink: &mut Self::GeometrySink, flags: PathSegment);

    fn begin_figure(&mut self, sink: &mut Self::GeometrySink, start: Point, begin: FigureBegin);

    fn add_line(&mut self, sink: &mut Self::GeometrySink, point: Point);

    fn add_bezier(&mut self, sink: &mut Self::GeometrySink, segment: BezierSegment);

    fn add_quadratic_bezier(
        &mut self,
        sink: &mut Self::GeometrySink,
        segment: QuadraticBezierSegment,
    );

    fn add_arc(&mut self, sink: &mut Self::GeometrySink, segment: ArcSegment);

    fn end_figure(&mut self, sink: &mut Self::GeometrySink, end: FigureEnd);

    /// Finalize the geometry; afterwards it is immutable and renderable
    fn close_sink(&mut self, sink: Self::GeometrySink) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    fn fill_geometry(&mut self, geometry: &Self::PathGeometry, brush: &Self::Brush);

    fn draw_geometry(
        &mut self,
        geometry: &Self::PathGeometry,
        brush: &Self::Brush,
        width: f32,
        style: Option<&Self::StrokeStyle>,
    );

    fn fill_rounded_rectangle(&mut self, rect: RoundedRect, brush: &Self::Brush);

    fn draw_rounded_rectangle(
        &mut self,
        rect: RoundedRect,
        brush: &Self::Brush,
        width: f32,
        style: Option<&Self::StrokeStyle>,
    );

    fn fill_ellipse(&mut self, ellipse: Ellipse, brush: &Self::Brush);

    fn draw_ellipse(
        &mut self,
        ellipse: Ellipse,
        brush: &Self::Brush,
        width: f32,
        style: Option<&Self::StrokeStyle>,
    );

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        brush: &Self::Brush,
        width: f32,
        style: Option<&Self::StrokeStyle>,
    );

    /// Draw `source` (or the whole bitmap) into `dest`
    fn draw_bitmap(
        &mut self,
        bitmap: &Self::Bitmap,
        dest: Rect,
        opacity: f32,
        interpolation: InterpolationMode,
        source: Option<Rect>,
    );

    fn draw_text(&mut self, text: &str, layout: Rect, format: &TextFormat, brush: &Self::Brush);
}
