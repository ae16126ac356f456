//! Graphics context
//!
//! `GraphicsContext` owns the native device between `setup` and `cleanup`.
//! Everything that creates native resources borrows the device through it,
//! so there is no process-wide factory or device singleton.
//!
//! ```ignore
//! let mut context = GraphicsContext::new();
//! context.setup(device);
//! let brush = context.device_mut()?.create_solid_color_brush(Color::RED)?;
//! context.cleanup();
//! ```

use crate::device::GraphicsDevice;
use crate::error::{GraphicsError, Result};

/// Unique identifier for an image created through a context
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// Generates unique image IDs
#[derive(Debug, Default)]
pub struct ImageIdGenerator {
    next: u64,
}

impl ImageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> ImageId {
        let id = ImageId(self.next);
        self.next += 1;
        id
    }
}

/// Owner of the native device and its lifecycle
pub struct GraphicsContext<D: GraphicsDevice> {
    device: Option<D>,
    image_ids: ImageIdGenerator,
}

impl<D: GraphicsDevice> GraphicsContext<D> {
    /// A context with no device; call [`setup`](Self::setup) before drawing
    pub fn new() -> Self {
        Self {
            device: None,
            image_ids: ImageIdGenerator::new(),
        }
    }

    /// A context that is already set up
    pub fn with_device(device: D) -> Self {
        let mut context = Self::new();
        context.setup(device);
        context
    }

    /// Install the device, replacing any previous one
    pub fn setup(&mut self, device: D) {
        if self.device.replace(device).is_some() {
            tracing::debug!("GraphicsContext::setup replaced an existing device");
        } else {
            tracing::debug!("GraphicsContext set up");
        }
    }

    /// Drop the device; returns it so callers can inspect or reuse it
    pub fn cleanup(&mut self) -> Option<D> {
        let device = self.device.take();
        if device.is_some() {
            tracing::debug!("GraphicsContext cleaned up");
        }
        device
    }

    pub fn is_ready(&self) -> bool {
        self.device.is_some()
    }

    pub fn device(&self) -> Result<&D> {
        self.device.as_ref().ok_or(GraphicsError::NoDevice)
    }

    pub fn device_mut(&mut self) -> Result<&mut D> {
        self.device.as_mut().ok_or(GraphicsError::NoDevice)
    }

    /// Reserve an id for a new image
    pub fn next_image_id(&mut self) -> ImageId {
        self.image_ids.next()
    }
}

impl<D: GraphicsDevice> Default for GraphicsContext<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingDevice;

    #[test]
    fn test_lifecycle() {
        let mut context = GraphicsContext::<RecordingDevice>::new();
        assert!(!context.is_ready());
        assert_eq!(context.device().err(), Some(GraphicsError::NoDevice));

        context.setup(RecordingDevice::new());
        assert!(context.is_ready());
        assert!(context.device_mut().is_ok());

        assert!(context.cleanup().is_some());
        assert!(!context.is_ready());
        assert!(context.cleanup().is_none());
    }

    #[test]
    fn test_image_ids_are_unique() {
        let mut context = GraphicsContext::<RecordingDevice>::new();
        let a = context.next_image_id();
        let b = context.next_image_id();
        assert_ne!(a, b);
    }
}
