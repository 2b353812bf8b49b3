/// How a draw call combines with the framebuffer.
///
/// With `src`/`dst` premultiplied:
/// - `None`: `dst = src`
/// - `Blend`: `dst = src + dst * (1 - src.a)`
/// - `Add`: `dst.rgb = src.rgb + dst.rgb`, alpha unchanged
/// - `Modulate`: `dst.rgb = src.rgb * dst.rgb`, alpha unchanged
/// - `Multiply`: `dst.rgb = src.rgb * dst.rgb + dst.rgb * (1 - src.a)`, alpha unchanged
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    None,
    #[default]
    Blend,
    Add,
    Modulate,
    Multiply,
}

/// Texture filtering used when a blit is scaled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ScaleMode {
    #[default]
    Nearest,
    Linear,
}

/// Mirroring applied to a textured blit, in destination space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    #[inline]
    pub fn horizontal(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    #[inline]
    pub fn vertical(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }
}
