use core::ops::Mul;

use super::{Rect, Vec2};

/// Rotation + translation + scale, the only transform nodes carry.
///
/// Composition (`parent * child`):
/// - rotation: `parent.rotation + child.rotation`
/// - origin: `parent.origin + parent.scale ⊙ child.origin`
/// - scale: `parent.scale ⊙ child.scale`
///
/// The product is associative, so a node's global transform is the product of
/// its ancestors' local transforms taken root-first. Rotation never moves
/// bounds; it is forwarded to the blitter as an angle about the destination
/// center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: Vec2,
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        rotation: 0.0,
        origin: Vec2::zero(),
        scale: Vec2::one(),
    };

    #[inline]
    pub const fn new(rotation: f32, origin: Vec2, scale: Vec2) -> Self {
        Self { rotation, origin, scale }
    }

    #[inline]
    pub const fn from_origin(origin: Vec2) -> Self {
        Self { rotation: 0.0, origin, scale: Vec2::one() }
    }

    #[inline]
    pub fn with_scale(self, scale: Vec2) -> Self {
        Self { scale, ..self }
    }

    #[inline]
    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    #[inline]
    pub fn transform_point(self, p: Vec2) -> Vec2 {
        self.origin + p.scale_by(self.scale)
    }

    /// Maps `rect` into the parent space; the result is normalized so negative
    /// scales still produce non-negative extents.
    #[inline]
    pub fn transform_rect(self, rect: Rect) -> Rect {
        Rect::from_origin_size(self.transform_point(rect.origin), rect.size.scale_by(self.scale))
            .normalized()
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2D {
    type Output = Transform2D;

    #[inline]
    fn mul(self, child: Transform2D) -> Transform2D {
        Transform2D {
            rotation: self.rotation + child.rotation,
            origin: self.transform_point(child.origin),
            scale: self.scale.scale_by(child.scale),
        }
    }
}
