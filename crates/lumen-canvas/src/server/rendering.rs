use std::path::Path;

use crate::coords::{Transform2D, Viewport};
use crate::handle::Handle;
use crate::paint::Color;
use crate::raster::Rasterizer;
use crate::scene::CanvasScene;
use crate::texture::{release_queue, LoadedImage, ReleaseQueue, TextureInfo};

use super::{draw_canvas_items, FrameStats, ServerConfig, SharedScene};

/// Retained 2D renderer driving one [`Rasterizer`].
///
/// The server lives on the render thread. The scene it draws is shared
/// through [`SharedScene`]; native images released anywhere are destroyed
/// here, at the next frame boundary.
#[derive(Debug)]
pub struct RenderingServer<R: Rasterizer> {
    scene: SharedScene,
    release: ReleaseQueue,
    rasterizer: R,
    viewport: Viewport,
    background: Color,
    frame_index: u64,
}

impl<R: Rasterizer> RenderingServer<R> {
    pub fn new(mut rasterizer: R, config: ServerConfig) -> Self {
        let (sender, release) = release_queue();
        rasterizer.set_clear_color(config.background);

        log::debug!(
            "rendering server created ({}x{})",
            config.viewport.width,
            config.viewport.height
        );

        Self {
            scene: SharedScene::new(CanvasScene::new(sender)),
            release,
            rasterizer,
            viewport: config.viewport,
            background: config.background,
            frame_index: 0,
        }
    }

    /// Scene handle; clone it to mutate from other execution contexts.
    #[inline]
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Decodes and uploads the image at `path`, then registers it.
    ///
    /// Decoding happens without the scene lock. On failure the error is
    /// logged and nothing is registered.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Option<Handle> {
        let path = path.as_ref();
        match self.rasterizer.load_image(path) {
            Ok(image) => Some(self.scene.lock().register_texture(image)),
            Err(err) => {
                log::warn!("texture load failed: {err:#}");
                None
            }
        }
    }

    /// Registers an image the caller already uploaded to this server's
    /// rasterizer.
    pub fn register_image(&self, image: LoadedImage) -> Handle {
        self.scene.lock().register_texture(image)
    }

    pub fn texture_info(&self, texture: Handle) -> Option<TextureInfo> {
        self.scene.lock().texture_info(texture)
    }

    /// Releases a node or texture. Unknown handles are ignored.
    pub fn destroy(&self, handle: Handle) {
        self.scene.lock().destroy(handle);
    }

    // ── viewport ──────────────────────────────────────────────────────────

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn screen_size(&self) -> (f32, f32) {
        (self.viewport.width, self.viewport.height)
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn set_canvas_transform(&mut self, transform: Transform2D) {
        self.viewport.canvas_transform = transform;
    }

    /// `None` for an unknown node; otherwise whether the node would draw
    /// entirely on screen.
    pub fn is_visible_inside_viewport(&self, node: Handle) -> Option<bool> {
        self.scene
            .lock()
            .canvas_item_is_visible_inside_viewport(node, &self.viewport)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Takes effect from the next frame's clear.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Runs one render pass: clear, cull and emit in paint order, set the
    /// clear color, present.
    pub fn render(&mut self) -> FrameStats {
        self.reclaim_textures();

        if !self.viewport.is_valid() {
            log::warn!("skipping frame with invalid viewport {:?}", self.viewport);
            return FrameStats::default();
        }

        self.rasterizer.clear();
        let stats = {
            let mut scene = self.scene.lock();
            draw_canvas_items(&mut scene, &self.viewport, &mut self.rasterizer)
        };
        self.rasterizer.set_clear_color(self.background);
        self.rasterizer.present();

        self.reclaim_textures();
        self.frame_index += 1;

        log::debug!(
            "frame {}: {} nodes, {} emitted, {} culled",
            self.frame_index,
            stats.nodes,
            stats.emitted,
            stats.culled
        );
        stats
    }

    /// Releases every registered texture and destroys native images whose
    /// last holder is gone. Also runs on drop.
    pub fn shutdown(&mut self) {
        self.scene.lock().release_all_textures();
        self.reclaim_textures();
    }

    // ── rasterizer ────────────────────────────────────────────────────────

    #[inline]
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    #[inline]
    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    fn reclaim_textures(&mut self) {
        let mut count = 0usize;
        for native in self.release.drain() {
            self.rasterizer.destroy_image(native);
            count += 1;
        }
        if count > 0 {
            log::debug!("destroyed {count} native images");
        }
    }
}

impl<R: Rasterizer> Drop for RenderingServer<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
