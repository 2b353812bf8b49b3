//! Draw primitives owned by canvas nodes.
//!
//! Every kind answers the same two questions:
//! - `local_draw_rect`: bounds in the owning node's local space
//! - `emit`: the low-level call(s) for this primitive, given resolved node state
//!
//! Extending the set:
//! - add a module here with the payload type and its `CanvasScene` attach helper
//! - add a variant to [`DrawPrimitive`] and its two match arms

pub(crate) mod line;
pub(crate) mod polyline;
pub(crate) mod rect;
pub(crate) mod rect_batch;
pub(crate) mod region;
pub(crate) mod texture;

use crate::coords::{Rect, Transform2D, Viewport};
use crate::raster::Rasterizer;

use super::ResolvedNode;

pub use line::LinePrimitive;
pub use polyline::PolylinePrimitive;
pub use rect::RectPrimitive;
pub use rect_batch::RectBatchPrimitive;
pub use region::TextureRegionPrimitive;
pub use texture::TexturePrimitive;

#[derive(Debug, Clone)]
pub enum DrawPrimitive {
    Texture(TexturePrimitive),
    TextureRegion(TextureRegionPrimitive),
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
    RectBatch(RectBatchPrimitive),
}

impl DrawPrimitive {
    /// Bounds in the owning node's local space, ignoring ancestors.
    ///
    /// `None` for a textured primitive whose texture has been released; such a
    /// primitive draws nothing and is never on screen.
    pub fn local_draw_rect(&self) -> Option<Rect> {
        match self {
            DrawPrimitive::Texture(p) => p.local_draw_rect(),
            DrawPrimitive::TextureRegion(p) => p.local_draw_rect(),
            DrawPrimitive::Line(p) => Some(p.local_draw_rect()),
            DrawPrimitive::Polyline(p) => Some(p.local_draw_rect()),
            DrawPrimitive::Rect(p) => Some(p.local_draw_rect()),
            DrawPrimitive::RectBatch(p) => Some(p.local_draw_rect()),
        }
    }

    /// Bounds in screen space: `canvas_transform * global_transform` applied
    /// to [`local_draw_rect`](Self::local_draw_rect).
    pub fn screen_rect(&self, global: Transform2D, viewport: &Viewport) -> Option<Rect> {
        let local = self.local_draw_rect()?;
        Some(screen_transform(global, viewport).transform_rect(local))
    }

    /// Issues this primitive's draw call(s).
    pub fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        match self {
            DrawPrimitive::Texture(p) => p.emit(node, viewport, raster),
            DrawPrimitive::TextureRegion(p) => p.emit(node, viewport, raster),
            DrawPrimitive::Line(p) => p.emit(node, viewport, raster),
            DrawPrimitive::Polyline(p) => p.emit(node, viewport, raster),
            DrawPrimitive::Rect(p) => p.emit(node, viewport, raster),
            DrawPrimitive::RectBatch(p) => p.emit(node, viewport, raster),
        }
    }
}

#[inline]
pub(crate) fn screen_transform(global: Transform2D, viewport: &Viewport) -> Transform2D {
    viewport.canvas_transform * global
}
