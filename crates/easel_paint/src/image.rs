//! Images living on the native device

use easel_core::{GraphicsContext, GraphicsDevice, ImageId, Result, Size};

/// A bitmap uploaded to the device
///
/// Cloning an `Image` shares the same native bitmap.
pub struct Image<D: GraphicsDevice> {
    id: ImageId,
    bitmap: D::Bitmap,
    size: Size,
}

impl<D: GraphicsDevice> Image<D> {
    /// Upload tightly packed RGBA8 pixels
    pub fn from_rgba(
        context: &mut GraphicsContext<D>,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        let device = context.device_mut()?;
        let bitmap = device.create_bitmap(width, height, pixels)?;
        let size = device.bitmap_size(&bitmap);
        let id = context.next_image_id();
        tracing::debug!("Created image {:?} ({}x{})", id, width, height);
        Ok(Self { id, bitmap, size })
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn bitmap(&self) -> &D::Bitmap {
        &self.bitmap
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }
}

impl<D: GraphicsDevice> Clone for Image<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            bitmap: self.bitmap.clone(),
            size: self.size,
        }
    }
}

impl<D: GraphicsDevice> std::fmt::Debug for Image<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("size", &self.size)
            .finish()
    }
}
