//! Easel Paint
//!
//! The stateful drawing layer between a sketch and its native device.
//!
//! # Features
//!
//! - Fill and stroke with solid colors, linear and radial gradients or images
//! - Lazily rebuilt stroke styles (caps, joins, dashes)
//! - `begin_shape` / `vertex` / `end_shape` path building with curves and arcs
//! - Nested `push` / `pop` scopes over styles and transforms
//! - Rect, ellipse and image modes
//!
//! # Example
//!
//! ```rust
//! use easel_core::recording::RecordingDevice;
//! use easel_core::{Color, FigureEnd};
//! use easel_paint::RenderTarget;
//!
//! let mut target = RenderTarget::with_device(RecordingDevice::new());
//! target.begin_draw();
//! target.fill(Color::rgb8(182, 40, 210));
//! target.begin_shape();
//! target.vertex(10.0, 10.0);
//! target.vertex(40.0, 10.0);
//! target.vertex(25.0, 35.0);
//! target.end_shape(FigureEnd::Closed);
//! target.end_draw().unwrap();
//!
//! assert_eq!(target.device().unwrap().calls("fill_geometry"), 1);
//! ```

pub mod brush;
pub mod image;
pub mod shape;
pub mod stack;
pub mod stroke;
pub mod style;
pub mod target;
pub mod transform;

/// How `end_shape` finishes the figure
pub use easel_core::FigureEnd as EndStyle;

pub use brush::{
    BitmapBrush, BrushKind, BrushSet, LinearGradientBrush, RadialGradientBrush, SolidColorBrush,
};
pub use image::Image;
pub use shape::Shape;
pub use stack::StateStack;
pub use stroke::StrokeStyle;
pub use style::{DrawMode, Paint, RenderStyle};
pub use target::RenderTarget;
pub use transform::Transformation;
