//! Sketch runner - the per-frame loop
//!
//! ```text
//! begin_draw ─▶ background ─▶ Sketch::draw ─▶ reset states ─▶ end_draw
//!                                                               │
//!                                      device lost ◀────────────┘
//!                                           │
//!                                 recreate, setup again
//! ```

use std::time::Instant;

use easel_core::{Color, GraphicsDevice, GraphicsError};
use easel_paint::RenderTarget;

use crate::config::SketchConfig;
use crate::error::Result;
use crate::sketch::Sketch;

/// What happened to a single frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The device was lost; the frame was dropped and the device recreated
    Abandoned,
}

pub struct SketchRunner<D: GraphicsDevice, S: Sketch<D>> {
    config: SketchConfig,
    target: RenderTarget<D>,
    sketch: S,
    frame_count: u64,
    needs_setup: bool,
}

impl<D: GraphicsDevice, S: Sketch<D>> SketchRunner<D, S> {
    /// Attach `device` and size it from `config`; `setup` runs on the first frame
    pub fn new(config: SketchConfig, device: D, sketch: S) -> Self {
        let mut target = RenderTarget::with_device(device);
        target.resize(config.width, config.height);
        tracing::debug!(
            "SketchRunner: '{}' at {}x{}, {} fps",
            config.title,
            config.width,
            config.height,
            config.frame_rate
        );
        Self {
            config,
            target,
            sketch,
            frame_count: 0,
            needs_setup: true,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn target(&self) -> &RenderTarget<D> {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut RenderTarget<D> {
        &mut self.target
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    /// Frames presented so far; abandoned frames are not counted
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Render one frame
    ///
    /// A lost device is not an error here: the frame is dropped, the device
    /// recreated and the sketch set up again before the next frame.
    pub fn frame(&mut self) -> Result<FrameOutcome> {
        if !self.target.is_ready() {
            return Err(GraphicsError::NoDevice.into());
        }

        if self.needs_setup {
            self.needs_setup = false;
            self.sketch.setup(&mut self.target);
        }

        self.target.begin_draw();
        if let Some(rgba) = self.config.background {
            self.target.background(Color::from(rgba));
        }
        self.sketch.draw(&mut self.target);
        self.target.reset_states();

        match self.target.end_draw() {
            Ok(()) => {
                self.frame_count += 1;
                Ok(FrameOutcome::Presented)
            }
            Err(GraphicsError::DeviceLost) => {
                tracing::warn!(
                    "SketchRunner: device lost after {} frames; recreating",
                    self.frame_count
                );
                self.target.recreate()?;
                self.needs_setup = true;
                Ok(FrameOutcome::Abandoned)
            }
            Err(err) => {
                tracing::error!("SketchRunner: frame failed: {}", err);
                Err(err.into())
            }
        }
    }

    /// Render `frames` frames back to back; returns how many were presented
    pub fn run_frames(&mut self, frames: u64) -> Result<u64> {
        let start = self.frame_count;
        for _ in 0..frames {
            self.frame()?;
        }
        Ok(self.frame_count - start)
    }

    /// Render `frames` frames paced at the configured frame rate
    pub fn run(&mut self, frames: u64) -> Result<u64> {
        let interval = self.config.frame_interval();
        let start = self.frame_count;
        for _ in 0..frames {
            let began = Instant::now();
            self.frame()?;
            if let Some(rest) = interval.checked_sub(began.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(self.frame_count - start)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!("SketchRunner: ignoring resize to {}x{}", width, height);
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.target.resize(width, height);
    }

    /// Release every resource and hand back the device and the sketch
    pub fn shutdown(mut self) -> (Option<D>, S) {
        tracing::debug!("SketchRunner: shutdown after {} frames", self.frame_count);
        let device = self.target.cleanup();
        (device, self.sketch)
    }
}
