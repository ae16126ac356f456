//! The sketch trait

use easel_core::GraphicsDevice;
use easel_paint::RenderTarget;

/// User drawing code driven by a [`SketchRunner`](crate::SketchRunner)
///
/// `setup` runs before the first frame, and again after the device has been
/// lost, since every resource it created is gone by then. `draw` runs once per
/// frame between `begin_draw` and `end_draw`.
pub trait Sketch<D: GraphicsDevice> {
    fn setup(&mut self, _target: &mut RenderTarget<D>) {}

    fn draw(&mut self, target: &mut RenderTarget<D>);
}

/// A closure is a sketch with an empty setup
impl<D, F> Sketch<D> for F
where
    D: GraphicsDevice,
    F: FnMut(&mut RenderTarget<D>),
{
    fn draw(&mut self, target: &mut RenderTarget<D>) {
        self(target)
    }
}
