use crate::coords::Viewport;
use crate::raster::Rasterizer;
use crate::scene::CanvasScene;

/// Counters for one render pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Nodes that reached culling (globally visible, with primitives).
    pub nodes: usize,
    pub emitted: usize,
    pub culled: usize,
}

/// Culls and emits every live node back-to-front.
///
/// Nodes are ordered by global z-index, ties in creation order. A node that
/// is globally hidden or has no primitives is skipped; each remaining
/// primitive is emitted only if its screen rect overlaps the viewport.
///
/// Clear and present are the caller's concern.
pub fn draw_canvas_items(
    scene: &mut CanvasScene,
    viewport: &Viewport,
    raster: &mut dyn Rasterizer,
) -> FrameStats {
    scene.rebuild_paint_order();

    let screen = viewport.screen_rect();
    let mut stats = FrameStats::default();

    for handle in scene.paint_order() {
        let Some(node) = scene.canvas_item(handle) else { continue };
        if node.primitives().is_empty() {
            continue;
        }
        let Some(resolved) = scene.resolve(handle) else { continue };
        if !resolved.visible {
            continue;
        }
        stats.nodes += 1;

        for primitive in node.primitives() {
            let Some(bounds) = primitive.screen_rect(resolved.transform, viewport) else {
                log::trace!("skipped primitive of {handle:?} with a released texture");
                continue;
            };
            if bounds.overlaps(screen) {
                primitive.emit(&resolved, viewport, raster);
                stats.emitted += 1;
            } else {
                log::trace!("culled primitive of {handle:?} at {bounds:?}");
                stats.culled += 1;
            }
        }
    }

    stats
}
