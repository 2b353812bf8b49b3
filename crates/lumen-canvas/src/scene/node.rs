use crate::coords::Transform2D;
use crate::handle::Handle;
use crate::paint::{BlendMode, Color, ScaleMode};

use super::{DrawPrimitive, ZIndex};

/// Retained scene-graph element: local visual state plus owned primitives.
///
/// Only local state lives here. Global transform, modulation, visibility and
/// z-index depend on the ancestor chain and are resolved by
/// [`CanvasScene`](super::CanvasScene) on every query, so they cannot go stale.
#[derive(Debug, Clone)]
pub struct CanvasNode {
    pub(crate) transform: Transform2D,
    pub(crate) modulate: Color,
    pub(crate) visible: bool,
    pub(crate) blend_mode: BlendMode,
    pub(crate) scale_mode: ScaleMode,
    pub(crate) z_index: ZIndex,
    pub(crate) z_relative: bool,
    /// Weak by construction: resolved through the registry, absent once released.
    pub(crate) parent: Option<Handle>,
    pub(crate) primitives: Vec<DrawPrimitive>,
}

impl CanvasNode {
    pub fn new() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            modulate: Color::WHITE,
            visible: true,
            blend_mode: BlendMode::default(),
            scale_mode: ScaleMode::default(),
            z_index: ZIndex::default(),
            z_relative: false,
            parent: None,
            primitives: Vec::new(),
        }
    }

    #[inline]
    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    #[inline]
    pub fn modulate(&self) -> Color {
        self.modulate
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[inline]
    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z_index
    }

    #[inline]
    pub fn is_z_relative(&self) -> bool {
        self.z_relative
    }

    /// Draw primitives in attach order.
    #[inline]
    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }
}

impl Default for CanvasNode {
    fn default() -> Self {
        Self::new()
    }
}

/// A node's state after composing it with its ancestors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedNode {
    pub transform: Transform2D,
    pub modulate: Color,
    pub visible: bool,
    pub z_index: ZIndex,
    pub blend_mode: BlendMode,
    pub scale_mode: ScaleMode,
}
