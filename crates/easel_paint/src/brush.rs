//! Brushes - lazily created native paint sources
//!
//! Every wrapper keeps its parameters on the Rust side and owns at most one
//! native brush. Setters are idempotent: an equal value does no native work.
//! Scalar properties are pushed into the existing native brush in place;
//! gradient stops cannot be edited natively, so changing colors recreates
//! both the stop collection and the brush.

use smallvec::SmallVec;

use easel_core::{
    BitmapBrushProperties, Color, ExtendMode, GradientStop, GraphicsDevice, GraphicsError,
    ImageId, InterpolationMode, Point, Result, Vec2,
};

use crate::image::Image;

/// Spread `colors` evenly over `[0, 1]`; a single color sits at 0
pub fn even_stops(colors: &[Color]) -> SmallVec<[GradientStop; 4]> {
    let last = colors.len().saturating_sub(1).max(1) as f32;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| GradientStop {
            offset: i as f32 / last,
            color: *color,
        })
        .collect()
}

fn log_failure<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        tracing::error!("{}", err);
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Solid
// ─────────────────────────────────────────────────────────────────────────────

pub struct SolidColorBrush<D: GraphicsDevice> {
    color: Color,
    brush: Option<D::Brush>,
}

impl<D: GraphicsDevice> SolidColorBrush<D> {
    pub fn new() -> Self {
        Self {
            color: Color::BLACK,
            brush: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Update the native brush in place, creating it on first use
    pub fn set_color(&mut self, device: &mut D, color: Color) -> Result<()> {
        if let Some(brush) = &mut self.brush {
            if self.color != color {
                device.set_solid_color(brush, color);
                self.color = color;
            }
            return Ok(());
        }
        self.color = color;
        self.brush = Some(log_failure(device.create_solid_color_brush(color))?);
        Ok(())
    }

    pub fn brush(&self) -> Option<&D::Brush> {
        self.brush.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Linear Gradient
// ─────────────────────────────────────────────────────────────────────────────

pub struct LinearGradientBrush<D: GraphicsDevice> {
    start: Point,
    end: Point,
    colors: SmallVec<[Color; 4]>,
    stops: Option<D::GradientStops>,
    brush: Option<D::Brush>,
}

impl<D: GraphicsDevice> LinearGradientBrush<D> {
    pub fn new() -> Self {
        Self {
            start: Point::ZERO,
            end: Point::ZERO,
            colors: SmallVec::new(),
            stops: None,
            brush: None,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn set_start(&mut self, device: &mut D, start: Point) {
        if self.start == start {
            return;
        }
        self.start = start;
        if let Some(brush) = &mut self.brush {
            device.set_linear_start(brush, start);
        }
    }

    pub fn set_end(&mut self, device: &mut D, end: Point) {
        if self.end == end {
            return;
        }
        self.end = end;
        if let Some(brush) = &mut self.brush {
            device.set_linear_end(brush, end);
        }
    }

    /// Replace the stops, recreating the native brush
    pub fn set_colors(&mut self, device: &mut D, colors: &[Color]) -> Result<()> {
        if self.brush.is_some() && self.colors.as_slice() == colors {
            return Ok(());
        }
        self.colors = SmallVec::from_slice(colors);
        self.brush = None;
        self.stops = None;

        if colors.is_empty() {
            return log_failure(Err(GraphicsError::creation(
                "linear gradient brush",
                "no colors",
            )));
        }

        let stops = log_failure(device.create_gradient_stops(&even_stops(colors)))?;
        let brush = log_failure(device.create_linear_gradient_brush(self.start, self.end, &stops))?;
        self.stops = Some(stops);
        self.brush = Some(brush);
        Ok(())
    }

    pub fn brush(&self) -> Option<&D::Brush> {
        self.brush.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Radial Gradient
// ─────────────────────────────────────────────────────────────────────────────

pub struct RadialGradientBrush<D: GraphicsDevice> {
    center: Point,
    origin_offset: Point,
    radius: Vec2,
    colors: SmallVec<[Color; 4]>,
    stops: Option<D::GradientStops>,
    brush: Option<D::Brush>,
}

impl<D: GraphicsDevice> RadialGradientBrush<D> {
    pub fn new() -> Self {
        Self {
            center: Point::ZERO,
            origin_offset: Point::ZERO,
            radius: Vec2::ZERO,
            colors: SmallVec::new(),
            stops: None,
            brush: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn origin_offset(&self) -> Point {
        self.origin_offset
    }

    pub fn radius(&self) -> Vec2 {
        self.radius
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn set_center(&mut self, device: &mut D, center: Point) {
        if self.center == center {
            return;
        }
        self.center = center;
        if let Some(brush) = &mut self.brush {
            device.set_radial_center(brush, center);
        }
    }

    pub fn set_origin_offset(&mut self, device: &mut D, offset: Point) {
        if self.origin_offset == offset {
            return;
        }
        self.origin_offset = offset;
        if let Some(brush) = &mut self.brush {
            device.set_radial_origin_offset(brush, offset);
        }
    }

    pub fn set_radius(&mut self, device: &mut D, radius: Vec2) {
        if self.radius == radius {
            return;
        }
        self.radius = radius;
        if let Some(brush) = &mut self.brush {
            device.set_radial_radius(brush, radius);
        }
    }

    /// Replace the stops, recreating the native brush
    pub fn set_colors(&mut self, device: &mut D, colors: &[Color]) -> Result<()> {
        if self.brush.is_some() && self.colors.as_slice() == colors {
            return Ok(());
        }
        self.colors = SmallVec::from_slice(colors);
        self.brush = None;
        self.stops = None;

        if colors.is_empty() {
            return log_failure(Err(GraphicsError::creation(
                "radial gradient brush",
                "no colors",
            )));
        }

        let stops = log_failure(device.create_gradient_stops(&even_stops(colors)))?;
        let brush = log_failure(device.create_radial_gradient_brush(
            self.center,
            self.origin_offset,
            self.radius,
            &stops,
        ))?;
        self.stops = Some(stops);
        self.brush = Some(brush);
        Ok(())
    }

    pub fn brush(&self) -> Option<&D::Brush> {
        self.brush.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bitmap
// ─────────────────────────────────────────────────────────────────────────────

pub struct BitmapBrush<D: GraphicsDevice> {
    image: Option<ImageId>,
    properties: BitmapBrushProperties,
    brush: Option<D::Brush>,
}

impl<D: GraphicsDevice> BitmapBrush<D> {
    pub fn new() -> Self {
        Self {
            image: None,
            properties: BitmapBrushProperties::default(),
            brush: None,
        }
    }

    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    pub fn properties(&self) -> BitmapBrushProperties {
        self.properties
    }

    /// Bind `image`, rebinding the existing native brush when there is one
    pub fn set_image(&mut self, device: &mut D, image: &Image<D>, opacity: f32) -> Result<()> {
        if let Some(brush) = &mut self.brush {
            if self.image != Some(image.id()) {
                device.set_bitmap_brush_image(brush, image.bitmap());
            }
            if self.properties.opacity != opacity {
                device.set_brush_opacity(brush, opacity);
            }
        } else {
            let properties = BitmapBrushProperties {
                opacity,
                ..self.properties
            };
            self.brush = Some(log_failure(
                device.create_bitmap_brush(image.bitmap(), properties),
            )?);
        }
        self.image = Some(image.id());
        self.properties.opacity = opacity;
        Ok(())
    }

    pub fn set_interpolation_mode(&mut self, device: &mut D, mode: InterpolationMode) {
        if self.properties.interpolation == mode {
            return;
        }
        self.properties.interpolation = mode;
        if let Some(brush) = &mut self.brush {
            device.set_bitmap_brush_interpolation(brush, mode);
        }
    }

    pub fn set_extend_mode_x(&mut self, device: &mut D, mode: ExtendMode) {
        if self.properties.extend_x == mode {
            return;
        }
        self.properties.extend_x = mode;
        if let Some(brush) = &mut self.brush {
            device.set_bitmap_brush_extend_x(brush, mode);
        }
    }

    pub fn set_extend_mode_y(&mut self, device: &mut D, mode: ExtendMode) {
        if self.properties.extend_y == mode {
            return;
        }
        self.properties.extend_y = mode;
        if let Some(brush) = &mut self.brush {
            device.set_bitmap_brush_extend_y(brush, mode);
        }
    }

    pub fn brush(&self) -> Option<&D::Brush> {
        self.brush.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Brush Set
// ─────────────────────────────────────────────────────────────────────────────

/// Which brush of a set is selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushKind {
    Solid,
    Linear,
    Radial,
    Bitmap,
}

/// One brush of every kind, for a single role (fill or stroke)
pub struct BrushSet<D: GraphicsDevice> {
    pub solid: SolidColorBrush<D>,
    pub linear: LinearGradientBrush<D>,
    pub radial: RadialGradientBrush<D>,
    pub bitmap: BitmapBrush<D>,
}

impl<D: GraphicsDevice> BrushSet<D> {
    pub fn new() -> Self {
        Self {
            solid: SolidColorBrush::new(),
            linear: LinearGradientBrush::new(),
            radial: RadialGradientBrush::new(),
            bitmap: BitmapBrush::new(),
        }
    }

    /// The native brush of `kind`, if it has been created
    pub fn get(&self, kind: BrushKind) -> Option<&D::Brush> {
        match kind {
            BrushKind::Solid => self.solid.brush(),
            BrushKind::Linear => self.linear.brush(),
            BrushKind::Radial => self.radial.brush(),
            BrushKind::Bitmap => self.bitmap.brush(),
        }
    }
}

macro_rules! impl_default {
    ($($ty:ident),*) => {
        $(
            impl<D: GraphicsDevice> Default for $ty<D> {
                fn default() -> Self {
                    Self::new()
                }
            }
        )*
    };
}

impl_default!(
    SolidColorBrush,
    LinearGradientBrush,
    RadialGradientBrush,
    BitmapBrush,
    BrushSet
);
