//! Texture resources.
//!
//! A [`Texture`] wraps the rasterizer's native image with its cached size and
//! format. The registry holds the only strong reference; draw primitives hold
//! a `Weak` that resolves to nothing once the texture is released. When the
//! last strong reference goes away the native image is posted to the release
//! queue, and the render thread hands it to `Rasterizer::destroy_image`.

mod format;
mod release;

use crate::coords::Vec2;

pub use format::PixelFormat;
pub use release::{release_queue, ReleaseQueue, ReleaseSender};

/// Rasterizer-assigned identifier of an uploaded image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NativeTexture(pub u64);

/// Result of a successful decode-and-upload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LoadedImage {
    pub native: NativeTexture,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// Public snapshot of a texture's metadata.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub native: NativeTexture,
}

impl TextureInfo {
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Debug)]
pub struct Texture {
    native: NativeTexture,
    width: u32,
    height: u32,
    format: PixelFormat,
    release: ReleaseSender,
}

impl Texture {
    pub fn new(image: LoadedImage, release: ReleaseSender) -> Self {
        Self {
            native: image.native,
            width: image.width,
            height: image.height,
            format: image.format,
            release,
        }
    }

    #[inline]
    pub fn native(&self) -> NativeTexture {
        self.native
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn info(&self) -> TextureInfo {
        TextureInfo {
            width: self.width,
            height: self.height,
            format: self.format,
            native: self.native,
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.release.post(self.native);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn image(id: u64) -> LoadedImage {
        LoadedImage { native: NativeTexture(id), width: 64, height: 32, format: PixelFormat::Rgba8 }
    }

    #[test]
    fn drop_posts_native_exactly_once() {
        let (tx, queue) = release_queue();
        let tex = Arc::new(Texture::new(image(3), tx));
        let weak = Arc::downgrade(&tex);

        drop(tex);
        assert!(weak.upgrade().is_none());
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec![NativeTexture(3)]);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn temporary_holder_delays_release() {
        let (tx, queue) = release_queue();
        let tex = Arc::new(Texture::new(image(9), tx));
        let borrowed = Arc::downgrade(&tex).upgrade();

        drop(tex);
        assert_eq!(queue.drain().count(), 0);
        drop(borrowed);
        assert_eq!(queue.drain().count(), 1);
    }

    #[test]
    fn info_reports_size_and_format() {
        let (tx, _queue) = release_queue();
        let info = Texture::new(image(1), tx).info();
        assert_eq!(info.size(), (64, 32));
        assert_eq!(info.format, PixelFormat::Rgba8);
        assert!(info.format.has_alpha());
    }
}
