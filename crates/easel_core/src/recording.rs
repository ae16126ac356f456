//! Headless recording device
//!
//! `RecordingDevice` implements [`GraphicsDevice`] without a GPU. Draw calls
//! are recorded as [`DeviceCommand`]s, resources live in slotmap arenas so
//! their parameters can be inspected, and every trait method bumps a call
//! counter keyed by its name. Tests use it to observe exactly what the paint
//! layer asked the native device to do.
//!
//! ```ignore
//! let mut device = RecordingDevice::new();
//! let brush = device.create_solid_color_brush(Color::RED)?;
//! device.fill_ellipse(Ellipse::new(Point::ZERO, 4.0, 4.0), &brush);
//! assert_eq!(device.calls("fill_ellipse"), 1);
//! ```
//!
//! Resources are never freed individually; they live as long as the device.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::color::Color;
use crate::device::*;
use crate::error::{GraphicsError, Result};
use crate::geometry::{Affine2D, Ellipse, Point, Rect, RoundedRect, Size, Vec2};

new_key_type! {
    pub struct BrushKey;
    pub struct StopsKey;
    pub struct BitmapKey;
    pub struct StrokeStyleKey;
    pub struct GeometryKey;
}

// ─────────────────────────────────────────────────────────────────────────────
// Handles
// ─────────────────────────────────────────────────────────────────────────────

/// Uniquely owned brush handle
#[derive(Debug, PartialEq, Eq)]
pub struct RecordingBrush(pub BrushKey);

#[derive(Debug)]
pub struct RecordingStops(pub StopsKey);

#[derive(Debug)]
pub struct RecordingStrokeStyle(pub StrokeStyleKey);

#[derive(Debug)]
pub struct RecordingGeometry(pub GeometryKey);

#[derive(Debug)]
pub struct RecordingSink(pub GeometryKey);

// ─────────────────────────────────────────────────────────────────────────────
// Recorded Resources
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of resource a failure should be injected into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Brush,
    GradientStops,
    StrokeStyle,
    Bitmap,
    PathGeometry,
    GeometrySink,
    SinkClose,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BrushRecord {
    Solid {
        color: Color,
    },
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point,
        origin_offset: Point,
        radius: Vec2,
        stops: Vec<GradientStop>,
    },
    Bitmap {
        bitmap: BitmapKey,
        properties: BitmapBrushProperties,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedBrush {
    pub kind: BrushRecord,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedSegment {
    Line(Point),
    Bezier(BezierSegment),
    QuadraticBezier(QuadraticBezierSegment),
    Arc(ArcSegment),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedFigure {
    pub start: Point,
    pub begin: FigureBegin,
    pub segments: Vec<RecordedSegment>,
    /// `None` while the figure is still open in the sink
    pub end: Option<FigureEnd>,
}

impl RecordedFigure {
    /// Start point followed by every segment end point
    pub fn points(&self) -> Vec<Point> {
        let mut points = vec![self.start];
        points.extend(self.segments.iter().map(|segment| match segment {
            RecordedSegment::Line(p) => *p,
            RecordedSegment::Bezier(s) => s.end,
            RecordedSegment::QuadraticBezier(s) => s.end,
            RecordedSegment::Arc(s) => s.end,
        }));
        points
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedGeometry {
    pub fill_mode: FillMode,
    pub segment_flags: PathSegment,
    pub figures: Vec<RecordedFigure>,
    pub opened: bool,
    pub closed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedStrokeStyle {
    pub properties: StrokeStyleProperties,
    pub dashes: SmallVec<[f32; 4]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedBitmap {
    pub width: u32,
    pub height: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded frame-level or draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCommand {
    BeginDraw,
    EndDraw,
    Clear(Color),
    SetTransform(Affine2D),
    FillGeometry {
        geometry: GeometryKey,
        brush: BrushKey,
    },
    DrawGeometry {
        geometry: GeometryKey,
        brush: BrushKey,
        width: f32,
        style: Option<StrokeStyleKey>,
    },
    FillRoundedRectangle {
        rect: RoundedRect,
        brush: BrushKey,
    },
    DrawRoundedRectangle {
        rect: RoundedRect,
        brush: BrushKey,
        width: f32,
        style: Option<StrokeStyleKey>,
    },
    FillEllipse {
        ellipse: Ellipse,
        brush: BrushKey,
    },
    DrawEllipse {
        ellipse: Ellipse,
        brush: BrushKey,
        width: f32,
        style: Option<StrokeStyleKey>,
    },
    DrawLine {
        from: Point,
        to: Point,
        brush: BrushKey,
        width: f32,
        style: Option<StrokeStyleKey>,
    },
    DrawBitmap {
        bitmap: BitmapKey,
        dest: Rect,
        opacity: f32,
        interpolation: InterpolationMode,
        source: Option<Rect>,
    },
    DrawText {
        text: String,
        layout: Rect,
        format: TextFormat,
        brush: BrushKey,
    },
}

impl DeviceCommand {
    /// True for commands that put pixels on the target
    pub fn is_draw(&self) -> bool {
        !matches!(
            self,
            DeviceCommand::BeginDraw | DeviceCommand::EndDraw | DeviceCommand::SetTransform(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Device
// ─────────────────────────────────────────────────────────────────────────────

/// GPU-less [`GraphicsDevice`] that records everything it is asked to do
pub struct RecordingDevice {
    size: Size,
    transform: Affine2D,
    in_draw: bool,
    lost: bool,
    commands: Vec<DeviceCommand>,
    calls: FxHashMap<&'static str, usize>,
    failures: FxHashMap<ResourceKind, usize>,
    brushes: SlotMap<BrushKey, RecordedBrush>,
    stops: SlotMap<StopsKey, Vec<GradientStop>>,
    bitmaps: SlotMap<BitmapKey, RecordedBitmap>,
    stroke_styles: SlotMap<StrokeStyleKey, RecordedStrokeStyle>,
    geometries: SlotMap<GeometryKey, RecordedGeometry>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::with_size(Size::new(800.0, 600.0))
    }

    pub fn with_size(size: Size) -> Self {
        Self {
            size,
            transform: Affine2D::IDENTITY,
            in_draw: false,
            lost: false,
            commands: Vec::new(),
            calls: FxHashMap::default(),
            failures: FxHashMap::default(),
            brushes: SlotMap::with_key(),
            stops: SlotMap::with_key(),
            bitmaps: SlotMap::with_key(),
            stroke_styles: SlotMap::with_key(),
            geometries: SlotMap::with_key(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded commands that draw something
    pub fn draw_commands(&self) -> Vec<&DeviceCommand> {
        self.commands.iter().filter(|c| c.is_draw()).collect()
    }

    /// How many times the trait method `name` was called
    pub fn calls(&self, name: &str) -> usize {
        self.calls.get(name).copied().unwrap_or(0)
    }

    /// Forget recorded commands and call counts, keeping resources
    pub fn reset_log(&mut self) {
        self.commands.clear();
        self.calls.clear();
    }

    /// Make the next creation of `kind` fail
    pub fn fail_next(&mut self, kind: ResourceKind) {
        *self.failures.entry(kind).or_default() += 1;
    }

    /// Make the next `end_draw` report a lost device
    pub fn lose_device(&mut self) {
        self.lost = true;
    }

    pub fn is_drawing(&self) -> bool {
        self.in_draw
    }

    /// The transform most recently set
    pub fn transform(&self) -> Affine2D {
        self.transform
    }

    pub fn brush(&self, key: BrushKey) -> Option<&RecordedBrush> {
        self.brushes.get(key)
    }

    pub fn geometry(&self, key: GeometryKey) -> Option<&RecordedGeometry> {
        self.geometries.get(key)
    }

    pub fn stroke_style(&self, key: StrokeStyleKey) -> Option<&RecordedStrokeStyle> {
        self.stroke_styles.get(key)
    }

    pub fn bitmap(&self, key: BitmapKey) -> Option<&RecordedBitmap> {
        self.bitmaps.get(key)
    }

    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    fn count(&mut self, name: &'static str) {
        *self.calls.entry(name).or_default() += 1;
    }

    fn check_failure(&mut self, kind: ResourceKind, resource: &'static str) -> Result<()> {
        match self.failures.get_mut(&kind) {
            Some(pending) if *pending > 0 => {
                *pending -= 1;
                Err(GraphicsError::creation(resource, "injected failure"))
            }
            _ => Ok(()),
        }
    }

    fn insert_brush(&mut self, kind: BrushRecord) -> RecordingBrush {
        RecordingBrush(self.brushes.insert(RecordedBrush { kind, opacity: 1.0 }))
    }

    fn brush_mut(&mut self, brush: &RecordingBrush) -> Option<&mut RecordedBrush> {
        self.brushes.get_mut(brush.0)
    }

    fn figure_mut(&mut self, sink: &RecordingSink) -> Option<&mut RecordedFigure> {
        self.geometries
            .get_mut(sink.0)
            .and_then(|g| g.figures.last_mut())
            .filter(|f| f.end.is_none())
    }

    fn push_segment(&mut self, sink: &RecordingSink, segment: RecordedSegment) {
        match self.figure_mut(sink) {
            Some(figure) => figure.segments.push(segment),
            None => tracing::warn!("RecordingDevice: segment added without an open figure"),
        }
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for RecordingDevice {
    type Brush = RecordingBrush;
    type GradientStops = RecordingStops;
    type Bitmap = BitmapKey;
    type StrokeStyle = RecordingStrokeStyle;
    type PathGeometry = RecordingGeometry;
    type GeometrySink = RecordingSink;

    fn begin_draw(&mut self) {
        self.count("begin_draw");
        self.in_draw = true;
        self.commands.push(DeviceCommand::BeginDraw);
    }

    fn end_draw(&mut self) -> Result<()> {
        self.count("end_draw");
        self.in_draw = false;
        self.commands.push(DeviceCommand::EndDraw);
        if self.lost {
            return Err(GraphicsError::DeviceLost);
        }
        Ok(())
    }

    fn recreate(&mut self) -> Result<()> {
        self.count("recreate");
        self.lost = false;
        self.transform = Affine2D::IDENTITY;
        Ok(())
    }

    fn resize(&mut self, size: Size) {
        self.count("resize");
        self.size = size;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.count("clear");
        self.commands.push(DeviceCommand::Clear(color));
    }

    fn set_transform(&mut self, matrix: &Affine2D) {
        self.count("set_transform");
        self.transform = *matrix;
        self.commands.push(DeviceCommand::SetTransform(*matrix));
    }

    fn create_solid_color_brush(&mut self, color: Color) -> Result<RecordingBrush> {
        self.count("create_solid_color_brush");
        self.check_failure(ResourceKind::Brush, "solid color brush")?;
        Ok(self.insert_brush(BrushRecord::Solid { color }))
    }

    fn set_solid_color(&mut self, brush: &mut RecordingBrush, color: Color) {
        self.count("set_solid_color");
        if let Some(RecordedBrush {
            kind: BrushRecord::Solid { color: c },
            ..
        }) = self.brush_mut(brush)
        {
            *c = color;
        }
    }

    fn create_gradient_stops(&mut self, stops: &[GradientStop]) -> Result<RecordingStops> {
        self.count("create_gradient_stops");
        self.check_failure(ResourceKind::GradientStops, "gradient stop collection")?;
        Ok(RecordingStops(self.stops.insert(stops.to_vec())))
    }

    fn create_linear_gradient_brush(
        &mut self,
        start: Point,
        end: Point,
        stops: &RecordingStops,
    ) -> Result<RecordingBrush> {
        self.count("create_linear_gradient_brush");
        self.check_failure(ResourceKind::Brush, "linear gradient brush")?;
        let stops = self.stops.get(stops.0).cloned().unwrap_or_default();
        Ok(self.insert_brush(BrushRecord::Linear { start, end, stops }))
    }

    fn set_linear_start(&mut self, brush: &mut RecordingBrush, start: Point) {
        self.count("set_linear_start");
        if let Some(RecordedBrush {
            kind: BrushRecord::Linear { start: s, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *s = start;
        }
    }

    fn set_linear_end(&mut self, brush: &mut RecordingBrush, end: Point) {
        self.count("set_linear_end");
        if let Some(RecordedBrush {
            kind: BrushRecord::Linear { end: e, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *e = end;
        }
    }

    fn create_radial_gradient_brush(
        &mut self,
        center: Point,
        origin_offset: Point,
        radius: Vec2,
        stops: &RecordingStops,
    ) -> Result<RecordingBrush> {
        self.count("create_radial_gradient_brush");
        self.check_failure(ResourceKind::Brush, "radial gradient brush")?;
        let stops = self.stops.get(stops.0).cloned().unwrap_or_default();
        Ok(self.insert_brush(BrushRecord::Radial {
            center,
            origin_offset,
            radius,
            stops,
        }))
    }

    fn set_radial_center(&mut self, brush: &mut RecordingBrush, center: Point) {
        self.count("set_radial_center");
        if let Some(RecordedBrush {
            kind: BrushRecord::Radial { center: c, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *c = center;
        }
    }

    fn set_radial_origin_offset(&mut self, brush: &mut RecordingBrush, offset: Point) {
        self.count("set_radial_origin_offset");
        if let Some(RecordedBrush {
            kind: BrushRecord::Radial { origin_offset, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *origin_offset = offset;
        }
    }

    fn set_radial_radius(&mut self, brush: &mut RecordingBrush, radius: Vec2) {
        self.count("set_radial_radius");
        if let Some(RecordedBrush {
            kind: BrushRecord::Radial { radius: r, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *r = radius;
        }
    }

    fn create_bitmap_brush(
        &mut self,
        bitmap: &BitmapKey,
        properties: BitmapBrushProperties,
    ) -> Result<RecordingBrush> {
        self.count("create_bitmap_brush");
        self.check_failure(ResourceKind::Brush, "bitmap brush")?;
        Ok(RecordingBrush(self.brushes.insert(RecordedBrush {
            kind: BrushRecord::Bitmap {
                bitmap: *bitmap,
                properties,
            },
            opacity: properties.opacity,
        })))
    }

    fn set_bitmap_brush_image(&mut self, brush: &mut RecordingBrush, bitmap: &BitmapKey) {
        self.count("set_bitmap_brush_image");
        if let Some(RecordedBrush {
            kind: BrushRecord::Bitmap { bitmap: b, .. },
            ..
        }) = self.brush_mut(brush)
        {
            *b = *bitmap;
        }
    }

    fn set_bitmap_brush_extend_x(&mut self, brush: &mut RecordingBrush, mode: ExtendMode) {
        self.count("set_bitmap_brush_extend_x");
        if let Some(RecordedBrush {
            kind: BrushRecord::Bitmap { properties, .. },
            ..
        }) = self.brush_mut(brush)
        {
            properties.extend_x = mode;
        }
    }

    fn set_bitmap_brush_extend_y(&mut self, brush: &mut RecordingBrush, mode: ExtendMode) {
        self.count("set_bitmap_brush_extend_y");
        if let Some(RecordedBrush {
            kind: BrushRecord::Bitmap { properties, .. },
            ..
        }) = self.brush_mut(brush)
        {
            properties.extend_y = mode;
        }
    }

    fn set_bitmap_brush_interpolation(
        &mut self,
        brush: &mut RecordingBrush,
        mode: InterpolationMode,
    ) {
        self.count("set_bitmap_brush_interpolation");
        if let Some(RecordedBrush {
            kind: BrushRecord::Bitmap { properties, .. },
            ..
        }) = self.brush_mut(brush)
        {
            properties.interpolation = mode;
        }
    }

    fn set_brush_opacity(&mut self, brush: &mut RecordingBrush, opacity: f32) {
        self.count("set_brush_opacity");
        if let Some(record) = self.brush_mut(brush) {
            record.opacity = opacity;
            if let BrushRecord::Bitmap { properties, .. } = &mut record.kind {
                properties.opacity = opacity;
            }
        }
    }

    fn create_stroke_style(
        &mut self,
        properties: &StrokeStyleProperties,
        dashes: &[f32],
    ) -> Result<RecordingStrokeStyle> {
        self.count("create_stroke_style");
        self.check_failure(ResourceKind::StrokeStyle, "stroke style")?;
        Ok(RecordingStrokeStyle(self.stroke_styles.insert(
            RecordedStrokeStyle {
                properties: *properties,
                dashes: SmallVec::from_slice(dashes),
            },
        )))
    }

    fn create_bitmap(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<BitmapKey> {
        self.count("create_bitmap");
        self.check_failure(ResourceKind::Bitmap, "bitmap")?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GraphicsError::creation(
                "bitmap",
                format!("expected {} bytes of RGBA, got {}", expected, rgba.len()),
            ));
        }
        Ok(self.bitmaps.insert(RecordedBitmap { width, height }))
    }

    fn bitmap_size(&self, bitmap: &BitmapKey) -> Size {
        self.bitmaps
            .get(*bitmap)
            .map(|b| Size::new(b.width as f32, b.height as f32))
            .unwrap_or(Size::ZERO)
    }

    fn create_path_geometry(&mut self) -> Result<RecordingGeometry> {
        self.count("create_path_geometry");
        self.check_failure(ResourceKind::PathGeometry, "path geometry")?;
        Ok(RecordingGeometry(
            self.geometries.insert(RecordedGeometry::default()),
        ))
    }

    fn open_geometry(&mut self, geometry: &mut RecordingGeometry) -> Result<RecordingSink> {
        self.count("open_geometry");
        self.check_failure(ResourceKind::GeometrySink, "geometry sink")?;
        let record = self
            .geometries
            .get_mut(geometry.0)
            .ok_or_else(|| GraphicsError::creation("geometry sink", "unknown geometry"))?;
        if record.opened {
            return Err(GraphicsError::creation(
                "geometry sink",
                "geometry was already opened",
            ));
        }
        record.opened = true;
        Ok(RecordingSink(geometry.0))
    }

    fn set_fill_mode(&mut self, sink: &mut RecordingSink, mode: FillMode) {
        self.count("set_fill_mode");
        if let Some(g) = self.geometries.get_mut(sink.0) {
            g.fill_mode = mode;
        }
    }

    fn set_segment_flags(&mut self, sink: &mut RecordingSink, flags: PathSegment) {
        self.count("set_segment_flags");
        if let Some(g) = self.geometries.get_mut(sink.0) {
            g.segment_flags = flags;
        }
    }

    fn begin_figure(&mut self, sink: &mut RecordingSink, start: Point, begin: FigureBegin) {
        self.count("begin_figure");
        if let Some(g) = self.geometries.get_mut(sink.0) {
            g.figures.push(RecordedFigure {
                start,
                begin,
                segments: Vec::new(),
                end: None,
            });
        }
    }

    fn add_line(&mut self, sink: &mut RecordingSink, point: Point) {
        self.count("add_line");
        self.push_segment(sink, RecordedSegment::Line(point));
    }

    fn add_bezier(&mut self, sink: &mut RecordingSink, segment: BezierSegment) {
        self.count("add_bezier");
        self.push_segment(sink, RecordedSegment::Bezier(segment));
    }

    fn add_quadratic_bezier(&mut self, sink: &mut RecordingSink, segment: QuadraticBezierSegment) {
        self.count("add_quadratic_bezier");
        self.push_segment(sink, RecordedSegment::QuadraticBezier(segment));
    }

    fn add_arc(&mut self, sink: &mut RecordingSink, segment: ArcSegment) {
        self.count("add_arc");
        self.push_segment(sink, RecordedSegment::Arc(segment));
    }

    fn end_figure(&mut self, sink: &mut RecordingSink, end: FigureEnd) {
        self.count("end_figure");
        if let Some(figure) = self.figure_mut(sink) {
            figure.end = Some(end);
        }
    }

    fn close_sink(&mut self, sink: RecordingSink) -> Result<()> {
        self.count("close_sink");
        if let Err(err) = self.check_failure(ResourceKind::SinkClose, "geometry") {
            return Err(GraphicsError::GeometryClose(err.to_string()));
        }
        let geometry = self
            .geometries
            .get_mut(sink.0)
            .ok_or_else(|| GraphicsError::GeometryClose("unknown geometry".to_string()))?;
        if geometry.figures.iter().any(|f| f.end.is_none()) {
            return Err(GraphicsError::GeometryClose(
                "figure was never ended".to_string(),
            ));
        }
        geometry.closed = true;
        Ok(())
    }

    fn fill_geometry(&mut self, geometry: &RecordingGeometry, brush: &RecordingBrush) {
        self.count("fill_geometry");
        self.commands.push(DeviceCommand::FillGeometry {
            geometry: geometry.0,
            brush: brush.0,
        });
    }

    fn draw_geometry(
        &mut self,
        geometry: &RecordingGeometry,
        brush: &RecordingBrush,
        width: f32,
        style: Option<&RecordingStrokeStyle>,
    ) {
        self.count("draw_geometry");
        self.commands.push(DeviceCommand::DrawGeometry {
            geometry: geometry.0,
            brush: brush.0,
            width,
            style: style.map(|s| s.0),
        });
    }

    fn fill_rounded_rectangle(&mut self, rect: RoundedRect, brush: &RecordingBrush) {
        self.count("fill_rounded_rectangle");
        self.commands.push(DeviceCommand::FillRoundedRectangle {
            rect,
            brush: brush.0,
        });
    }

    fn draw_rounded_rectangle(
        &mut self,
        rect: RoundedRect,
        brush: &RecordingBrush,
        width: f32,
        style: Option<&RecordingStrokeStyle>,
    ) {
        self.count("draw_rounded_rectangle");
        self.commands.push(DeviceCommand::DrawRoundedRectangle {
            rect,
            brush: brush.0,
            width,
            style: style.map(|s| s.0),
        });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, brush: &RecordingBrush) {
        self.count("fill_ellipse");
        self.commands.push(DeviceCommand::FillEllipse {
            ellipse,
            brush: brush.0,
        });
    }

    fn draw_ellipse(
        &mut self,
        ellipse: Ellipse,
        brush: &RecordingBrush,
        width: f32,
        style: Option<&RecordingStrokeStyle>,
    ) {
        self.count("draw_ellipse");
        self.commands.push(DeviceCommand::DrawEllipse {
            ellipse,
            brush: brush.0,
            width,
            style: style.map(|s| s.0),
        });
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        brush: &RecordingBrush,
        width: f32,
        style: Option<&RecordingStrokeStyle>,
    ) {
        self.count("draw_line");
        self.commands.push(DeviceCommand::DrawLine {
            from,
            to,
            brush: brush.0,
            width,
            style: style.map(|s| s.0),
        });
    }

    fn draw_bitmap(
        &mut self,
        bitmap: &BitmapKey,
        dest: Rect,
        opacity: f32,
        interpolation: InterpolationMode,
        source: Option<Rect>,
    ) {
        self.count("draw_bitmap");
        self.commands.push(DeviceCommand::DrawBitmap {
            bitmap: *bitmap,
            dest,
            opacity,
            interpolation,
            source,
        });
    }

    fn draw_text(&mut self, text: &str, layout: Rect, format: &TextFormat, brush: &RecordingBrush) {
        self.count("draw_text");
        self.commands.push(DeviceCommand::DrawText {
            text: text.to_string(),
            layout,
            format: format.clone(),
            brush: brush.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_commands() {
        let mut device = RecordingDevice::new();
        let brush = device.create_solid_color_brush(Color::RED).unwrap();
        device.fill_ellipse(Ellipse::new(Point::ZERO, 2.0, 2.0), &brush);

        assert_eq!(device.calls("create_solid_color_brush"), 1);
        assert_eq!(device.calls("fill_ellipse"), 1);
        assert_eq!(device.calls("draw_ellipse"), 0);
        assert_eq!(device.draw_commands().len(), 1);

        device.reset_log();
        assert!(device.commands().is_empty());
        assert_eq!(device.calls("fill_ellipse"), 0);
        assert_eq!(device.brush_count(), 1);
    }

    #[test]
    fn test_injected_failure_is_consumed_once() {
        let mut device = RecordingDevice::new();
        device.fail_next(ResourceKind::Brush);

        assert!(device.create_solid_color_brush(Color::RED).is_err());
        assert!(device.create_solid_color_brush(Color::RED).is_ok());
    }

    #[test]
    fn test_geometry_records_figures() {
        let mut device = RecordingDevice::new();
        let mut geometry = device.create_path_geometry().unwrap();
        let mut sink = device.open_geometry(&mut geometry).unwrap();

        device.begin_figure(&mut sink, Point::ZERO, FigureBegin::Filled);
        device.add_line(&mut sink, Point::new(1.0, 0.0));
        device.end_figure(&mut sink, FigureEnd::Closed);
        device.close_sink(sink).unwrap();

        let record = device.geometry(geometry.0).unwrap();
        assert!(record.closed);
        assert_eq!(record.figures.len(), 1);
        assert_eq!(
            record.figures[0].points(),
            vec![Point::ZERO, Point::new(1.0, 0.0)]
        );

        assert!(device.open_geometry(&mut geometry).is_err());
    }

    #[test]
    fn test_close_rejects_open_figure() {
        let mut device = RecordingDevice::new();
        let mut geometry = device.create_path_geometry().unwrap();
        let mut sink = device.open_geometry(&mut geometry).unwrap();
        device.begin_figure(&mut sink, Point::ZERO, FigureBegin::Filled);

        assert!(matches!(
            device.close_sink(sink),
            Err(GraphicsError::GeometryClose(_))
        ));
    }

    #[test]
    fn test_bitmap_size_validation() {
        let mut device = RecordingDevice::new();
        assert!(device.create_bitmap(2, 2, &[0; 15]).is_err());

        let bitmap = device.create_bitmap(2, 3, &[0; 24]).unwrap();
        assert_eq!(device.bitmap_size(&bitmap), Size::new(2.0, 3.0));
    }

    #[test]
    fn test_device_loss() {
        let mut device = RecordingDevice::new();
        device.lose_device();
        device.begin_draw();
        assert_eq!(device.end_draw(), Err(GraphicsError::DeviceLost));
        device.recreate().unwrap();
        device.begin_draw();
        assert!(device.end_draw().is_ok());
    }
}
