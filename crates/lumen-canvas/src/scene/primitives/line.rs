use crate::coords::{Rect, Vec2, Viewport};
use crate::handle::Handle;
use crate::paint::Color;
use crate::raster::Rasterizer;
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};

use super::screen_transform;

/// Single line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

impl LinePrimitive {
    #[inline]
    pub fn local_draw_rect(&self) -> Rect {
        Rect::from_points(self.from, self.to)
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        let screen = screen_transform(node.transform, viewport);
        raster.draw_line(
            screen.transform_point(self.from).round(),
            screen.transform_point(self.to).round(),
            self.color * node.modulate,
            node.blend_mode,
        );
    }
}

impl CanvasScene {
    /// Attaches a line segment to `node`.
    pub fn canvas_item_add_line(&mut self, node: Handle, from: Vec2, to: Vec2, color: Color) {
        self.attach(node, DrawPrimitive::Line(LinePrimitive { from, to, color }));
    }
}
