use crate::coords::{Rect, Vec2, Viewport};
use crate::handle::Handle;
use crate::paint::Color;
use crate::raster::Rasterizer;
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};

use super::screen_transform;

/// Connected line strip; `n` points draw `n - 1` segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<Vec2>,
    pub color: Color,
}

impl PolylinePrimitive {
    pub fn local_draw_rect(&self) -> Rect {
        let mut points = self.points.iter().copied();
        let Some(first) = points.next() else { return Rect::default() };
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Rect::from_origin_size(min, max - min)
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        if self.points.len() < 2 {
            return;
        }
        let screen = screen_transform(node.transform, viewport);
        let color = self.color * node.modulate;

        for pair in self.points.windows(2) {
            raster.draw_line(
                screen.transform_point(pair[0]).round(),
                screen.transform_point(pair[1]).round(),
                color,
                node.blend_mode,
            );
        }
    }
}

impl CanvasScene {
    /// Attaches a line strip to `node`. No-op for an empty point list.
    pub fn canvas_item_add_lines(&mut self, node: Handle, points: Vec<Vec2>, color: Color) {
        if points.is_empty() {
            return;
        }
        self.attach(node, DrawPrimitive::Polyline(PolylinePrimitive { points, color }));
    }
}
