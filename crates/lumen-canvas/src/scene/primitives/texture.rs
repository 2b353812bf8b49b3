use std::sync::Weak;

use crate::coords::{Rect, RectI, Transform2D, Vec2, Viewport};
use crate::handle::Handle;
use crate::paint::{Color, Flip};
use crate::raster::{Blit, Rasterizer};
use crate::scene::{CanvasScene, DrawPrimitive, ResolvedNode};
use crate::texture::Texture;

use super::screen_transform;

/// Whole-texture quad.
#[derive(Debug, Clone)]
pub struct TexturePrimitive {
    pub texture: Weak<Texture>,
    /// Placement relative to the node: offset, scale, and extra rotation.
    pub transform: Transform2D,
    pub modulate: Color,
    pub flip: Flip,
}

impl TexturePrimitive {
    /// `None` once the texture has been released.
    pub fn local_draw_rect(&self) -> Option<Rect> {
        let texture = self.texture.upgrade()?;
        Some(
            self.transform
                .transform_rect(Rect::from_origin_size(Vec2::zero(), texture.size())),
        )
    }

    pub(super) fn emit(&self, node: &ResolvedNode, viewport: &Viewport, raster: &mut dyn Rasterizer) {
        let Some(texture) = self.texture.upgrade() else { return };
        let screen = screen_transform(node.transform, viewport);
        let info = texture.info();

        let local = self
            .transform
            .transform_rect(Rect::from_origin_size(Vec2::zero(), texture.size()));

        raster.blit(&Blit {
            texture: texture.native(),
            src: RectI::new(0, 0, info.width as i32, info.height as i32),
            dst: screen.transform_rect(local).floored(),
            rotation: screen.rotation + self.transform.rotation,
            flip: self.flip,
            modulate: self.modulate * node.modulate,
            blend: node.blend_mode,
            scale_mode: node.scale_mode,
        });
    }
}

impl CanvasScene {
    /// Attaches a whole-texture draw to `node`.
    ///
    /// No-op unless both handles are live.
    pub fn canvas_item_add_texture(
        &mut self,
        texture: Handle,
        node: Handle,
        flip: Flip,
        modulate: Color,
        transform: Transform2D,
    ) {
        let Some(texture) = self.texture_ref(texture) else { return };
        self.attach(
            node,
            DrawPrimitive::Texture(TexturePrimitive { texture, transform, modulate, flip }),
        );
    }
}
