use crate::coords::{Rect, Viewport};
use crate::handle::Handle;
use crate::paint::Color;
use crate::raster::Rasterizer;
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};

use super::screen_transform;

/// Many same-colored rectangles culled as one unit (their union).
#[derive(Debug, Clone, PartialEq)]
pub struct RectBatchPrimitive {
    pub rects: Vec<Rect>,
    pub color: Color,
}

impl RectBatchPrimitive {
    pub fn local_draw_rect(&self) -> Rect {
        let mut rects = self.rects.iter().copied();
        let Some(first) = rects.next() else { return Rect::default() };
        rects.fold(first.normalized(), Rect::union)
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        let screen = screen_transform(node.transform, viewport);
        let color = self.color * node.modulate;

        for rect in &self.rects {
            raster.fill_rect(screen.transform_rect(*rect).floored(), color, node.blend_mode);
        }
    }
}

impl CanvasScene {
    /// Attaches a rectangle batch to `node`. No-op for an empty list.
    pub fn canvas_item_add_rects(&mut self, node: Handle, rects: Vec<Rect>, color: Color) {
        if rects.is_empty() {
            return;
        }
        self.attach(node, DrawPrimitive::RectBatch(RectBatchPrimitive { rects, color }));
    }
}
