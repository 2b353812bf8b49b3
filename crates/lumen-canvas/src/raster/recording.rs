use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::coords::{Rect, Vec2};
use crate::paint::{BlendMode, Color};
use crate::texture::{LoadedImage, NativeTexture, PixelFormat};

use super::{Blit, Rasterizer};

/// One call received by a [`RecordingRasterizer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    SetClearColor(Color),
    Clear,
    Present,
    Blit(Blit),
    FillRect { rect: Rect, color: Color, blend: BlendMode },
    DrawLine { from: Vec2, to: Vec2, color: Color, blend: BlendMode },
    LoadImage(PathBuf),
    DestroyImage(NativeTexture),
}

/// Rasterizer that draws nothing and remembers every call.
///
/// Images are "decoded" from a table registered with
/// [`insert_image`](Self::insert_image); unknown paths fail to load.
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    calls: Vec<RasterCall>,
    images: HashMap<PathBuf, (u32, u32, PixelFormat)>,
    live: Vec<NativeTexture>,
    next_native: u64,
}

impl RecordingRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `path` loadable with the given dimensions.
    pub fn insert_image(&mut self, path: impl Into<PathBuf>, width: u32, height: u32, format: PixelFormat) {
        self.images.insert(path.into(), (width, height, format));
    }

    #[inline]
    pub fn calls(&self) -> &[RasterCall] {
        &self.calls
    }

    /// Returns recorded calls and starts a fresh log.
    pub fn take_calls(&mut self) -> Vec<RasterCall> {
        std::mem::take(&mut self.calls)
    }

    /// Draw calls only (blits, fills, lines), in issue order.
    pub fn draw_calls(&self) -> impl Iterator<Item = &RasterCall> {
        self.calls.iter().filter(|c| {
            matches!(c, RasterCall::Blit(_) | RasterCall::FillRect { .. } | RasterCall::DrawLine { .. })
        })
    }

    /// Images loaded and not yet destroyed.
    #[inline]
    pub fn live_images(&self) -> &[NativeTexture] {
        &self.live
    }
}

impl Rasterizer for RecordingRasterizer {
    fn set_clear_color(&mut self, color: Color) {
        self.calls.push(RasterCall::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.calls.push(RasterCall::Clear);
    }

    fn present(&mut self) {
        self.calls.push(RasterCall::Present);
    }

    fn blit(&mut self, blit: &Blit) {
        self.calls.push(RasterCall::Blit(*blit));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, blend: BlendMode) {
        self.calls.push(RasterCall::FillRect { rect, color, blend });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, blend: BlendMode) {
        self.calls.push(RasterCall::DrawLine { from, to, color, blend });
    }

    fn load_image(&mut self, path: &Path) -> Result<LoadedImage> {
        self.calls.push(RasterCall::LoadImage(path.to_path_buf()));
        let &(width, height, format) = self
            .images
            .get(path)
            .ok_or_else(|| anyhow!("no image registered at {}", path.display()))?;

        self.next_native += 1;
        let native = NativeTexture(self.next_native);
        self.live.push(native);
        Ok(LoadedImage { native, width, height, format })
    }

    fn destroy_image(&mut self, native: NativeTexture) {
        self.calls.push(RasterCall::DestroyImage(native));
        self.live.retain(|&n| n != native);
    }
}
