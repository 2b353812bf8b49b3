use std::sync::Weak;

use crate::coords::{Rect, RectI, Transform2D, Vec2, Viewport};
use crate::handle::Handle;
use crate::paint::{Color, Flip};
use crate::raster::{Blit, Rasterizer};
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};
use crate::texture::Texture;

use super::screen_transform;

/// Sub-rectangle of a texture (sprite sheets, tile sets).
#[derive(Debug, Clone)]
pub struct TextureRegionPrimitive {
    pub texture: Weak<Texture>,
    /// Source texels; the drawn size is the region size, not the texture size.
    pub region: RectI,
    pub transform: Transform2D,
    pub modulate: Color,
    pub flip: Flip,
}

impl TextureRegionPrimitive {
    /// `None` once the texture has been released.
    pub fn local_draw_rect(&self) -> Option<Rect> {
        (self.texture.strong_count() > 0).then(|| self.region_rect())
    }

    fn region_rect(&self) -> Rect {
        self.transform
            .transform_rect(Rect::from_origin_size(Vec2::zero(), self.region.size()))
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        let Some(texture) = self.texture.upgrade() else { return };
        let screen = screen_transform(node.transform, viewport);

        raster.blit(&Blit {
            texture: texture.native(),
            src: self.region,
            dst: screen.transform_rect(self.region_rect()).floored(),
            rotation: screen.rotation + self.transform.rotation,
            flip: self.flip,
            modulate: self.modulate * node.modulate,
            blend: node.blend_mode,
            scale_mode: node.scale_mode,
        });
    }
}

impl CanvasScene {
    /// Attaches a texture-region draw to `node`.
    ///
    /// No-op unless both handles are live and `region` has area.
    pub fn canvas_item_add_texture_region(
        &mut self,
        texture: Handle,
        node: Handle,
        region: RectI,
        flip: Flip,
        modulate: Color,
        transform: Transform2D,
    ) {
        if !region.has_area() {
            return;
        }
        let Some(texture) = self.texture_ref(texture) else { return };
        self.attach(
            node,
            DrawPrimitive::TextureRegion(TextureRegionPrimitive {
                texture,
                region,
                transform,
                modulate,
                flip,
            }),
        );
    }
}
