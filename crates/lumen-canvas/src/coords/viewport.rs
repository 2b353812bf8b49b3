use super::{Rect, Transform2D, Vec2};

/// Screen size plus the canvas-to-screen ("camera") transform.
///
/// Every draw rectangle is mapped through `canvas_transform` before it is
/// culled against `[0, 0, width, height]` and before it is emitted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub canvas_transform: Transform2D,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height, canvas_transform: Transform2D::IDENTITY }
    }

    #[inline]
    pub fn with_canvas_transform(self, canvas_transform: Transform2D) -> Self {
        Self { canvas_transform, ..self }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The screen rectangle draw bounds are culled against.
    #[inline]
    pub fn screen_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
