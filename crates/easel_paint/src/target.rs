//! Render target - the sketch drawing API
//!
//! `RenderTarget` owns the device (through [`GraphicsContext`]) and the
//! [`StateStack`], and turns sketch calls into device calls:
//!
//! ```ignore
//! let mut target = RenderTarget::with_device(device);
//!
//! target.begin_draw();
//! target.background(Color::WHITE);
//! target.fill(Color::rgb8(182, 40, 210));
//! target.rect(200.0, 200.0, 100.0, 100.0);
//!
//! target.push();
//! target.translate(50.0, 50.0);
//! target.rotate(45.0);
//! target.no_fill();
//! target.stroke(Color::BLACK);
//! target.square(0.0, 0.0, 20.0);
//! target.pop();
//! target.end_draw()?;
//! ```
//!
//! Primitives are filled first and stroked on top. A primitive whose brush is
//! missing (not selected, or its creation failed) is skipped for that part;
//! nothing here panics on a device error.

use easel_core::{
    Affine2D, ArcSize, CapStyle, Color, DashStyle, Ellipse, ExtendMode, FigureEnd, FillMode,
    GraphicsContext, GraphicsDevice, GraphicsError, InterpolationMode, LineJoin, PathSegment,
    Point, Rect, Result, RoundedRect, Size, SweepDirection, TextAlign, Vec2,
};

use crate::brush::{BrushKind, BrushSet};
use crate::image::Image;
use crate::shape::Shape;
use crate::stack::StateStack;
use crate::style::{DrawMode, RenderStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Fill,
    Stroke,
}

/// The sketch-facing drawing surface
pub struct RenderTarget<D: GraphicsDevice> {
    context: GraphicsContext<D>,
    states: StateStack<D>,
    /// Matrix last sent to the device this frame
    applied_transform: Option<Affine2D>,
    drawing: bool,
}

impl<D: GraphicsDevice> RenderTarget<D> {
    pub fn new(context: GraphicsContext<D>) -> Self {
        Self {
            context,
            states: StateStack::new(),
            applied_transform: None,
            drawing: false,
        }
    }

    pub fn with_device(device: D) -> Self {
        Self::new(GraphicsContext::with_device(device))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a device; any previous device and its resources are dropped
    pub fn setup(&mut self, device: D) {
        self.release_resources();
        self.context.setup(device);
    }

    /// Release every native resource and hand the device back
    pub fn cleanup(&mut self) -> Option<D> {
        self.release_resources();
        self.context.cleanup()
    }

    /// Recover from a lost device
    ///
    /// Every brush, stroke style, shape and image made for the old target is
    /// invalid afterwards, so the whole state stack is dropped as well.
    pub fn recreate(&mut self) -> Result<()> {
        self.release_resources();
        self.context.device_mut()?.recreate()
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_ready()
    }

    pub fn context(&self) -> &GraphicsContext<D> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GraphicsContext<D> {
        &mut self.context
    }

    pub fn device(&self) -> Option<&D> {
        self.context.device().ok()
    }

    pub fn device_mut(&mut self) -> Option<&mut D> {
        self.context.device_mut().ok()
    }

    pub fn states(&self) -> &StateStack<D> {
        &self.states
    }

    pub fn active_style(&self) -> &RenderStyle<D> {
        self.states.active_style()
    }

    pub fn size(&self) -> Size {
        self.device().map(|device| device.size()).unwrap_or_default()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Ok(device) = self.context.device_mut() {
            device.resize(Size::new(width as f32, height as f32));
        }
    }

    /// Upload RGBA8 pixels as an image usable with `image` and `fill_image`
    pub fn create_image(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<Image<D>> {
        Image::from_rgba(&mut self.context, width, height, pixels)
    }

    fn release_resources(&mut self) {
        // a fresh stack drops every brush, stroke style and geometry
        self.states = StateStack::new();
        self.applied_transform = None;
        self.drawing = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    pub fn begin_draw(&mut self) {
        let Ok(device) = self.context.device_mut() else {
            tracing::warn!("RenderTarget::begin_draw without a device");
            return;
        };
        device.begin_draw();
        self.applied_transform = None;
        self.drawing = true;
    }

    /// Finish the frame; the state stack is reset either way
    ///
    /// Returns `GraphicsError::DeviceLost` when the device has to be recreated.
    pub fn end_draw(&mut self) -> Result<()> {
        self.states.reset();
        self.applied_transform = None;
        self.drawing = false;

        let result = self.context.device_mut()?.end_draw();
        if let Err(err) = &result {
            match err {
                GraphicsError::DeviceLost => tracing::warn!("RenderTarget::end_draw: device lost"),
                _ => tracing::error!("RenderTarget::end_draw: {}", err),
            }
        }
        result
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Drop every pushed state and reset the base transform
    pub fn reset_states(&mut self) {
        self.states.reset();
    }

    /// Clear the whole target; ignores the current transform
    pub fn background(&mut self, color: Color) {
        if let Ok(device) = self.context.device_mut() {
            device.clear(color);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fill and stroke
    // ─────────────────────────────────────────────────────────────────────────

    pub fn fill(&mut self, color: Color) {
        self.select(Role::Fill, BrushKind::Solid, |device, set| {
            set.solid.set_color(device, color)
        });
    }

    pub fn no_fill(&mut self) {
        self.states.active_style_mut().active_fill = None;
    }

    pub fn stroke(&mut self, color: Color) {
        self.select(Role::Stroke, BrushKind::Solid, |device, set| {
            set.solid.set_color(device, color)
        });
    }

    pub fn no_stroke(&mut self) {
        self.states.active_style_mut().active_stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.states.active_style_mut().set_stroke_weight(weight);
    }

    /// Fill with a gradient from `start` to `end`, colors evenly spaced
    pub fn fill_linear_gradient(&mut self, start: Point, end: Point, colors: &[Color]) {
        self.select(Role::Fill, BrushKind::Linear, |device, set| {
            linear(device, set, start, end, colors)
        });
    }

    pub fn stroke_linear_gradient(&mut self, start: Point, end: Point, colors: &[Color]) {
        self.select(Role::Stroke, BrushKind::Linear, |device, set| {
            linear(device, set, start, end, colors)
        });
    }

    /// Fill with a radial gradient; `origin_offset` is relative to `center`
    pub fn fill_radial_gradient(
        &mut self,
        center: Point,
        origin_offset: Point,
        radius: Vec2,
        colors: &[Color],
    ) {
        self.select(Role::Fill, BrushKind::Radial, |device, set| {
            radial(device, set, center, origin_offset, radius, colors)
        });
    }

    pub fn stroke_radial_gradient(
        &mut self,
        center: Point,
        origin_offset: Point,
        radius: Vec2,
        colors: &[Color],
    ) {
        self.select(Role::Stroke, BrushKind::Radial, |device, set| {
            radial(device, set, center, origin_offset, radius, colors)
        });
    }

    /// Fill with a tiled or clamped image
    pub fn fill_image(&mut self, image: &Image<D>, extend_x: ExtendMode, extend_y: ExtendMode) {
        self.select(Role::Fill, BrushKind::Bitmap, |device, set| {
            bitmap(device, set, image, extend_x, extend_y)
        });
    }

    pub fn stroke_image(&mut self, image: &Image<D>, extend_x: ExtendMode, extend_y: ExtendMode) {
        self.select(Role::Stroke, BrushKind::Bitmap, |device, set| {
            bitmap(device, set, image, extend_x, extend_y)
        });
    }

    /// Run `configure` on the active style's brush set, then select `kind`
    ///
    /// The selection happens even if configuring failed: the brush is then
    /// missing and that part of every primitive is skipped.
    fn select<F>(&mut self, role: Role, kind: BrushKind, configure: F)
    where
        F: FnOnce(&mut D, &mut BrushSet<D>) -> Result<()>,
    {
        let device = match self.context.device_mut() {
            Ok(device) => device,
            Err(err) => {
                tracing::warn!("RenderTarget: {:?} {:?} brush ignored: {}", role, kind, err);
                return;
            }
        };

        let style = self.states.active_style_mut();
        let set = match role {
            Role::Fill => &mut style.fill,
            Role::Stroke => &mut style.stroke,
        };
        if let Err(err) = configure(device, set) {
            tracing::warn!("RenderTarget: {:?} {:?} brush unavailable: {}", role, kind, err);
        }
        match role {
            Role::Fill => style.active_fill = Some(kind),
            Role::Stroke => style.active_stroke = Some(kind),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stroke style
    // ─────────────────────────────────────────────────────────────────────────

    /// Start, end and dash caps
    pub fn stroke_cap(&mut self, cap: CapStyle) {
        self.states.active_style_mut().stroke_style.set_caps(cap);
    }

    pub fn stroke_join(&mut self, join: LineJoin) {
        self.states.active_style_mut().stroke_style.set_line_join(join);
    }

    pub fn stroke_miter_limit(&mut self, limit: f32) {
        self.states.active_style_mut().stroke_style.set_miter_limit(limit);
    }

    pub fn stroke_dash_style(&mut self, style: DashStyle) {
        self.states.active_style_mut().stroke_style.set_dash_style(style);
    }

    /// Custom dash pattern in multiples of the stroke weight
    pub fn stroke_dashes(&mut self, dashes: &[f32]) {
        self.states.active_style_mut().stroke_style.set_dashes(dashes);
    }

    pub fn stroke_dash_offset(&mut self, offset: f32) {
        self.states.active_style_mut().stroke_style.set_dash_offset(offset);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modes and text settings
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rect_mode(&mut self, mode: DrawMode) {
        self.states.active_style_mut().rect_mode = mode;
    }

    pub fn ellipse_mode(&mut self, mode: DrawMode) {
        self.states.active_style_mut().ellipse_mode = mode;
    }

    pub fn image_mode(&mut self, mode: DrawMode) {
        self.states.active_style_mut().image_mode = mode;
    }

    pub fn image_interpolation(&mut self, mode: InterpolationMode) {
        self.states.active_style_mut().image_interpolation = mode;
    }

    pub fn text_size(&mut self, size: f32) {
        self.states.active_style_mut().text_format.size = size.max(0.0);
    }

    pub fn text_font(&mut self, family: &str) {
        self.states.active_style_mut().text_format.family = family.to_string();
    }

    pub fn text_align(&mut self, align: TextAlign) {
        self.states.active_style_mut().text_format.align = align;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transforms and scoping
    // ─────────────────────────────────────────────────────────────────────────

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.states.active_transform_mut().translate(dx, dy);
    }

    /// Rotate clockwise by `degrees`
    pub fn rotate(&mut self, degrees: f32) {
        self.states.active_transform_mut().rotate(degrees);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.states.active_transform_mut().scale(sx, sy);
    }

    pub fn skew(&mut self, x_degrees: f32, y_degrees: f32) {
        self.states.active_transform_mut().skew(x_degrees, y_degrees);
    }

    /// Open a transform scope composed onto the current one
    pub fn push_matrix(&mut self) {
        self.states.push_transform(true);
    }

    pub fn pop_matrix(&mut self) {
        if !self.states.pop_transform() {
            tracing::debug!("RenderTarget::pop_matrix without push_matrix");
        }
    }

    /// Undo translate/rotate/scale/skew made in the current scope
    pub fn reset_matrix(&mut self) {
        self.states.active_transform_mut().reset();
    }

    /// Open a scope with a fresh style and a composed transform
    pub fn push(&mut self) {
        self.states.push_state();
    }

    /// Close the scope opened by the matching [`push`](Self::push)
    ///
    /// Pops one style and one transform. `push_matrix`/`pop_matrix` pairs
    /// inside a `push`/`pop` scope must be balanced before this call.
    pub fn pop(&mut self) {
        if !self.states.pop_state() {
            tracing::debug!("RenderTarget::pop without push");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Rectangle, read through the rect mode
    pub fn rect(&mut self, a: f32, b: f32, c: f32, d: f32) {
        self.rounded_rect(a, b, c, d, 0.0, 0.0);
    }

    pub fn rounded_rect(&mut self, a: f32, b: f32, c: f32, d: f32, radius_x: f32, radius_y: f32) {
        self.paint("rect", |device, style| {
            let rect = RoundedRect::new(
                style.rect_mode.resolve(a, b, c, d),
                Vec2::new(radius_x, radius_y),
            );
            style.paint().apply(
                device,
                |device, brush| device.fill_rounded_rectangle(rect, brush),
                |device, brush, width, stroke| {
                    device.draw_rounded_rectangle(rect, brush, width, stroke)
                },
            );
        });
    }

    pub fn square(&mut self, x: f32, y: f32, extent: f32) {
        self.rect(x, y, extent, extent);
    }

    /// Ellipse, read through the ellipse mode
    pub fn ellipse(&mut self, a: f32, b: f32, c: f32, d: f32) {
        self.paint("ellipse", |device, style| {
            let ellipse = Ellipse::inscribed(style.ellipse_mode.resolve(a, b, c, d));
            style.paint().apply(
                device,
                |device, brush| device.fill_ellipse(ellipse, brush),
                |device, brush, width, stroke| device.draw_ellipse(ellipse, brush, width, stroke),
            );
        });
    }

    pub fn circle(&mut self, x: f32, y: f32, extent: f32) {
        self.ellipse(x, y, extent, extent);
    }

    /// A dot the size of the stroke weight, in the stroke brush
    pub fn point(&mut self, x: f32, y: f32) {
        self.paint("point", |device, style| {
            let paint = style.paint();
            if let Some(brush) = paint.stroke {
                let r = paint.weight / 2.0;
                device.fill_ellipse(Ellipse::new(Point::new(x, y), r, r), brush);
            }
        });
    }

    /// Stroke-only line
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.paint("line", |device, style| {
            let paint = style.paint();
            if let Some(brush) = paint.stroke {
                device.draw_line(
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    brush,
                    paint.weight,
                    paint.stroke_style,
                );
            }
        });
    }

    pub fn triangle(&mut self, p1: Point, p2: Point, p3: Point) {
        self.polygon("triangle", &[p1, p2, p3]);
    }

    pub fn quad(&mut self, p1: Point, p2: Point, p3: Point, p4: Point) {
        self.polygon("quad", &[p1, p2, p3, p4]);
    }

    fn polygon(&mut self, op: &'static str, points: &[Point]) {
        self.paint(op, |device, style| {
            let fill_mode = style.shape.fill_mode();
            match Shape::<D>::polygon(device, points, FigureEnd::Closed, fill_mode) {
                Ok(geometry) => style.paint().apply(
                    device,
                    |device, brush| device.fill_geometry(&geometry, brush),
                    |device, brush, width, stroke| {
                        device.draw_geometry(&geometry, brush, width, stroke)
                    },
                ),
                Err(err) => tracing::error!("RenderTarget::{}: {}", op, err),
            }
        });
    }

    /// Image at its natural size, placed through the image mode
    pub fn image(&mut self, image: &Image<D>, x: f32, y: f32) {
        let Size { width, height } = image.size();
        let (c, d) = match self.states.active_style().image_mode {
            DrawMode::Corner | DrawMode::Center => (width, height),
            DrawMode::Corners => (x + width, y + height),
            DrawMode::Radius => (width / 2.0, height / 2.0),
        };
        self.image_sized(image, x, y, c, d);
    }

    pub fn image_sized(&mut self, image: &Image<D>, a: f32, b: f32, c: f32, d: f32) {
        self.draw_image(image, a, b, c, d, None);
    }

    /// Draw the `source` region of the image into the destination
    pub fn image_region(&mut self, image: &Image<D>, a: f32, b: f32, c: f32, d: f32, source: Rect) {
        self.draw_image(image, a, b, c, d, Some(source));
    }

    fn draw_image(
        &mut self,
        image: &Image<D>,
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        source: Option<Rect>,
    ) {
        self.paint("image", |device, style| {
            let dest = style.image_mode.resolve(a, b, c, d);
            device.draw_bitmap(image.bitmap(), dest, 1.0, style.image_interpolation, source);
        });
    }

    /// Text laid out from `(x, y)` to the bottom-right of the target, in the fill brush
    pub fn text(&mut self, text: &str, x: f32, y: f32) {
        let size = self.size();
        let layout = Rect::new(x, y, (size.width - x).max(0.0), (size.height - y).max(0.0));
        self.text_in(text, layout);
    }

    /// Text laid out inside `layout`, in the fill brush
    pub fn text_in(&mut self, text: &str, layout: Rect) {
        self.paint("text", |device, style| {
            if let Some(brush) = style.fill_brush() {
                device.draw_text(text, layout, &style.text_format, brush);
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shapes
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a new shape on the active style
    pub fn begin_shape(&mut self) {
        self.build("begin_shape", |shape, device| shape.begin(device));
    }

    pub fn vertex(&mut self, x: f32, y: f32) {
        self.build("vertex", |shape, device| shape.vertex(device, Point::new(x, y)));
    }

    pub fn bezier_vertex(&mut self, c1: Point, c2: Point, end: Point) {
        self.build("bezier_vertex", |shape, device| shape.bezier(device, c1, c2, end));
    }

    pub fn quadratic_vertex(&mut self, control: Point, end: Point) {
        self.build("quadratic_vertex", |shape, device| {
            shape.quadratic_bezier(device, control, end)
        });
    }

    pub fn arc_vertex(
        &mut self,
        end: Point,
        radius: Vec2,
        rotation: f32,
        sweep: SweepDirection,
        arc_size: ArcSize,
    ) {
        self.build("arc_vertex", |shape, device| {
            shape.arc(device, end, radius, rotation, sweep, arc_size)
        });
    }

    /// Finish the shape and draw it
    pub fn end_shape(&mut self, end: FigureEnd) {
        if self.build("end_shape", |shape, device| shape.end(device, end)) {
            self.shape();
        }
    }

    /// Draw the last finished shape again
    pub fn shape(&mut self) {
        self.paint("shape", |device, style| {
            let Some(geometry) = style.shape.geometry() else {
                tracing::debug!("RenderTarget::shape: no finished shape");
                return;
            };
            style.paint().apply(
                device,
                |device, brush| device.fill_geometry(geometry, brush),
                |device, brush, width, stroke| device.draw_geometry(geometry, brush, width, stroke),
            );
        });
    }

    /// Fill rule for the next shape; ignored while a shape is being built
    pub fn shape_fill_mode(&mut self, mode: FillMode) {
        if let Err(err) = self.states.active_style_mut().shape.set_fill_mode(mode) {
            tracing::debug!("RenderTarget::shape_fill_mode: {}", err);
        }
    }

    pub fn shape_segment_flag(&mut self, flag: PathSegment) {
        if let Err(err) = self.states.active_style_mut().shape.set_segment_flag(flag) {
            tracing::debug!("RenderTarget::shape_segment_flag: {}", err);
        }
    }

    /// Run a builder step; the shape logs its own protocol errors
    fn build<F>(&mut self, op: &'static str, step: F) -> bool
    where
        F: FnOnce(&mut Shape<D>, &mut D) -> Result<()>,
    {
        let Ok(device) = self.context.device_mut() else {
            tracing::warn!("RenderTarget::{} without a device", op);
            return false;
        };
        step(&mut self.states.active_style_mut().shape, device).is_ok()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Sync the transform, rebuild the stroke style if needed, then draw
    fn paint<F>(&mut self, op: &'static str, draw: F)
    where
        F: FnOnce(&mut D, &RenderStyle<D>),
    {
        let Ok(device) = self.context.device_mut() else {
            tracing::warn!("RenderTarget::{} without a device", op);
            return;
        };
        if !self.drawing {
            tracing::trace!("RenderTarget::{} outside begin_draw/end_draw", op);
        }

        let matrix = self.states.active_matrix();
        if self.applied_transform != Some(matrix) {
            device.set_transform(&matrix);
            self.applied_transform = Some(matrix);
        }

        let style = self.states.active_style_mut();
        style.prepare(device);
        draw(device, style);
    }
}

fn linear<D: GraphicsDevice>(
    device: &mut D,
    set: &mut BrushSet<D>,
    start: Point,
    end: Point,
    colors: &[Color],
) -> Result<()> {
    set.linear.set_start(device, start);
    set.linear.set_end(device, end);
    set.linear.set_colors(device, colors)
}

fn radial<D: GraphicsDevice>(
    device: &mut D,
    set: &mut BrushSet<D>,
    center: Point,
    origin_offset: Point,
    radius: Vec2,
    colors: &[Color],
) -> Result<()> {
    set.radial.set_center(device, center);
    set.radial.set_origin_offset(device, origin_offset);
    set.radial.set_radius(device, radius);
    set.radial.set_colors(device, colors)
}

fn bitmap<D: GraphicsDevice>(
    device: &mut D,
    set: &mut BrushSet<D>,
    image: &Image<D>,
    extend_x: ExtendMode,
    extend_y: ExtendMode,
) -> Result<()> {
    set.bitmap.set_extend_mode_x(device, extend_x);
    set.bitmap.set_extend_mode_y(device, extend_y);
    set.bitmap.set_image(device, image, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::recording::{DeviceCommand, RecordingDevice};

    fn target() -> RenderTarget<RecordingDevice> {
        let mut target = RenderTarget::with_device(RecordingDevice::new());
        target.begin_draw();
        target
    }

    fn device(target: &RenderTarget<RecordingDevice>) -> &RecordingDevice {
        target.device().unwrap()
    }

    #[test]
    fn test_transform_sent_once_per_change() {
        let mut target = target();
        target.fill(Color::RED);
        target.rect(0.0, 0.0, 10.0, 10.0);
        target.rect(5.0, 5.0, 10.0, 10.0);
        assert_eq!(device(&target).calls("set_transform"), 1);

        target.translate(3.0, 0.0);
        target.rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(device(&target).calls("set_transform"), 2);
        assert_eq!(
            device(&target).transform(),
            Affine2D::translation(3.0, 0.0)
        );
    }

    #[test]
    fn test_begin_draw_invalidates_applied_transform() {
        let mut target = target();
        target.fill(Color::RED);
        target.rect(0.0, 0.0, 1.0, 1.0);
        target.end_draw().unwrap();

        target.begin_draw();
        target.rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(device(&target).calls("set_transform"), 2);
    }

    #[test]
    fn test_fill_before_stroke() {
        let mut target = target();
        target.fill(Color::RED);
        target.stroke(Color::BLACK);
        target.ellipse(50.0, 50.0, 20.0, 10.0);

        let draws = device(&target).draw_commands();
        assert_eq!(draws.len(), 2);
        assert!(matches!(draws[0], DeviceCommand::FillEllipse { .. }));
        assert!(matches!(draws[1], DeviceCommand::DrawEllipse { .. }));
    }

    #[test]
    fn test_line_and_point_use_stroke_only() {
        let mut target = target();
        target.fill(Color::RED);
        target.line(0.0, 0.0, 10.0, 10.0);
        target.point(5.0, 5.0);
        assert!(device(&target).draw_commands().is_empty());

        target.stroke(Color::BLACK);
        target.stroke_weight(4.0);
        target.line(0.0, 0.0, 10.0, 10.0);
        target.point(5.0, 5.0);

        let draws = device(&target).draw_commands();
        assert_eq!(draws.len(), 2);
        assert!(matches!(draws[0], DeviceCommand::DrawLine { width, .. } if *width == 4.0));
        match &draws[1] {
            DeviceCommand::FillEllipse { ellipse, .. } => {
                assert_eq!(*ellipse, Ellipse::new(Point::new(5.0, 5.0), 2.0, 2.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_device_is_silent() {
        let mut target = RenderTarget::<RecordingDevice>::new(GraphicsContext::new());
        target.begin_draw();
        target.fill(Color::RED);
        target.rect(0.0, 0.0, 10.0, 10.0);
        target.begin_shape();
        assert!(matches!(target.end_draw(), Err(GraphicsError::NoDevice)));
    }

    #[test]
    fn test_stroke_style_built_lazily_once() {
        let mut target = target();
        target.stroke(Color::BLACK);
        target.stroke_join(LineJoin::Round);
        target.line(0.0, 0.0, 1.0, 1.0);
        target.line(0.0, 0.0, 2.0, 2.0);
        assert_eq!(device(&target).calls("create_stroke_style"), 1);

        target.stroke_dashes(&[2.0, 1.0]);
        target.line(0.0, 0.0, 3.0, 3.0);
        assert_eq!(device(&target).calls("create_stroke_style"), 2);
    }

    #[test]
    fn test_recreate_drops_style() {
        let mut target = target();
        target.fill(Color::RED);
        target.device_mut().unwrap().lose_device();
        assert_eq!(target.end_draw(), Err(GraphicsError::DeviceLost));

        target.recreate().unwrap();
        assert!(target.active_style().fill_brush().is_none());
        assert_eq!(device(&target).calls("recreate"), 1);

        target.begin_draw();
        assert!(target.end_draw().is_ok());
    }

    #[test]
    fn test_cleanup_returns_device() {
        let mut target = target();
        target.fill(Color::RED);
        let device = target.cleanup().unwrap();
        assert!(device.brush_count() > 0);
        assert!(!target.is_ready());
        assert!(target.active_style().fill_brush().is_none());
    }
}
