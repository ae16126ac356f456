//! Easel Sketch Runner
//!
//! Drives a [`Sketch`] frame by frame over any [`GraphicsDevice`], with a
//! TOML configuration and `tracing` based logging.
//!
//! # Example
//!
//! ```rust
//! use easel_app::{SketchConfig, SketchRunner};
//! use easel_core::recording::RecordingDevice;
//! use easel_core::Color;
//! use easel_paint::RenderTarget;
//!
//! let config = SketchConfig::from_toml_str("background = [255, 255, 255, 255]").unwrap();
//! let sketch = |target: &mut RenderTarget<RecordingDevice>| {
//!     target.fill(Color::rgb8(182, 40, 210));
//!     target.circle(400.0, 300.0, 120.0);
//! };
//!
//! let mut runner = SketchRunner::new(config, RecordingDevice::new(), sketch);
//! assert_eq!(runner.run_frames(3).unwrap(), 3);
//! ```
//!
//! [`GraphicsDevice`]: easel_core::GraphicsDevice

pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod sketch;

pub use config::SketchConfig;
pub use error::{EaselError, Result};
pub use logging::init_logging;
pub use runner::{FrameOutcome, SketchRunner};
pub use sketch::Sketch;

/// Prelude module - import everything a sketch needs
pub mod prelude {
    pub use crate::config::SketchConfig;
    pub use crate::error::{EaselError, Result};
    pub use crate::runner::{FrameOutcome, SketchRunner};
    pub use crate::sketch::Sketch;

    pub use easel_core::{Color, GraphicsDevice, Point, Rect, Size, Vec2};
    pub use easel_paint::{DrawMode, EndStyle, Image, RenderTarget};
}
