//! Easel Core
//!
//! Foundational types shared by every Easel crate:
//!
//! - **Geometry**: points, rectangles, ellipses and the 3x2 affine matrix
//! - **Color**: RGBA colors with sketch-friendly constructors
//! - **Device contract**: the `GraphicsDevice` trait the native 2D backend implements
//! - **Context**: `GraphicsContext`, the explicit owner of the device lifecycle
//! - **Recording**: a headless device that records every call, for tests and tooling
//!
//! # Example
//!
//! ```rust
//! use easel_core::{Color, Ellipse, GraphicsContext, GraphicsDevice, Point};
//! use easel_core::recording::RecordingDevice;
//!
//! let mut context = GraphicsContext::with_device(RecordingDevice::new());
//! let device = context.device_mut().unwrap();
//!
//! let brush = device.create_solid_color_brush(Color::RED).unwrap();
//! device.fill_ellipse(Ellipse::new(Point::new(10.0, 10.0), 5.0, 5.0), &brush);
//! assert_eq!(device.calls("fill_ellipse"), 1);
//! ```

pub mod color;
pub mod context;
pub mod device;
pub mod error;
pub mod geometry;
pub mod recording;

pub use color::Color;
pub use context::{GraphicsContext, ImageId};
pub use device::{
    ArcSegment, ArcSize, BezierSegment, BitmapBrushProperties, CapStyle, DashStyle, ExtendMode,
    FigureBegin, FigureEnd, FillMode, GradientStop, GraphicsDevice, InterpolationMode, LineJoin,
    PathSegment, QuadraticBezierSegment, StrokeStyleProperties, SweepDirection, TextAlign,
    TextFormat,
};
pub use error::{GraphicsError, Result, ShapeError};
pub use geometry::{Affine2D, Ellipse, Point, Rect, RoundedRect, Size, Vec2};
