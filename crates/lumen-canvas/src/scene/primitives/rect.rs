use crate::coords::{Rect, Viewport};
use crate::handle::Handle;
use crate::paint::Color;
use crate::raster::Rasterizer;
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};

use super::screen_transform;

/// Solid axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub color: Color,
}

impl RectPrimitive {
    #[inline]
    pub fn local_draw_rect(&self) -> Rect {
        self.rect.normalized()
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        let screen = screen_transform(node.transform, viewport);
        raster.fill_rect(
            screen.transform_rect(self.rect).floored(),
            self.color * node.modulate,
            node.blend_mode,
        );
    }
}

impl CanvasScene {
    /// Attaches a filled rectangle to `node`. No-op if `rect` has no area.
    pub fn canvas_item_add_rect(&mut self, node: Handle, rect: Rect, color: Color) {
        if rect.normalized().is_empty() {
            return;
        }
        self.attach(node, DrawPrimitive::Rect(RectPrimitive { rect, color }));
    }
}
