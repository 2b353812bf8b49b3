//! Low-level rasterizer contract and the bundled implementations.
//!
//! The scene never touches pixels itself. Each frame it resolves node state,
//! culls, orders, and then issues the calls below in paint order. Anything
//! that can blit an image region and fill/stroke axis-aligned geometry can
//! back a [`RenderingServer`](crate::server::RenderingServer).
//!
//! Convention:
//! - all coordinates are screen pixels (canvas transform already applied)
//! - colors are premultiplied RGBA in encoded sRGB space (`paint::Color`)

mod recording;
mod software;

use std::path::Path;

use anyhow::Result;

use crate::coords::{Rect, RectI, Vec2};
use crate::paint::{BlendMode, Color, Flip, ScaleMode};
use crate::texture::{LoadedImage, NativeTexture};

pub use recording::{RasterCall, RecordingRasterizer};
pub use software::{SoftwareRasterizer, SoftwareRasterizerConfig};

/// One textured draw: copy `src` texels into `dst`, rotated about `dst`'s center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Blit {
    pub texture: NativeTexture,
    pub src: RectI,
    pub dst: Rect,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    pub flip: Flip,
    pub modulate: Color,
    pub blend: BlendMode,
    pub scale_mode: ScaleMode,
}

/// Backend collaborator driven by the render pass.
pub trait Rasterizer {
    /// Color used by the next [`clear`](Self::clear).
    fn set_clear_color(&mut self, color: Color);

    fn clear(&mut self);

    /// Makes the frame drawn since the last `clear` visible.
    fn present(&mut self);

    fn blit(&mut self, blit: &Blit);

    fn fill_rect(&mut self, rect: Rect, color: Color, blend: BlendMode);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, blend: BlendMode);

    /// Decodes the image at `path` and uploads it.
    ///
    /// Called without the scene lock held; may block on I/O.
    fn load_image(&mut self, path: &Path) -> Result<LoadedImage>;

    /// Releases an uploaded image. Called exactly once per loaded image.
    fn destroy_image(&mut self, native: NativeTexture);
}
