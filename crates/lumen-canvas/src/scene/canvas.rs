use std::sync::{Arc, Weak};

use crate::coords::{Transform2D, Viewport};
use crate::handle::{Handle, HandleAllocator, Registry};
use crate::paint::{BlendMode, Color, ScaleMode};
use crate::texture::{LoadedImage, ReleaseSender, Texture, TextureInfo};

use super::{CanvasNode, DrawPrimitive, ResolvedNode, SortKey, ZIndex};

/// Upper bound on ancestor walks. Re-parenting keeps the graph acyclic; this
/// only bounds the work if that ever fails.
pub const MAX_ANCESTOR_DEPTH: usize = 1024;

/// Retained canvas state: texture and node registries plus the node graph.
///
/// Both registries draw handles from one allocator, so a handle is meaningful
/// to at most one of them. Every mutator is a no-op for an unknown handle and
/// every accessor returns `None` for one.
///
/// Performance characteristics:
/// - handle operations are O(1)
/// - global-state queries are O(depth of the ancestor chain)
/// - [`rebuild_paint_order`](Self::rebuild_paint_order) reuses its buffer; no
///   per-frame allocation once warmed
#[derive(Debug)]
pub struct CanvasScene {
    allocator: HandleAllocator,
    textures: Registry<Arc<Texture>>,
    nodes: Registry<CanvasNode>,
    release: ReleaseSender,
    paint_order: Vec<(SortKey, Handle)>,
}

impl CanvasScene {
    /// `release` receives native images once their last holder lets go.
    pub fn new(release: ReleaseSender) -> Self {
        Self {
            allocator: HandleAllocator::new(),
            textures: Registry::new(),
            nodes: Registry::new(),
            release,
            paint_order: Vec::new(),
        }
    }

    // ── textures ──────────────────────────────────────────────────────────

    /// Registers an already uploaded image and returns its handle.
    pub fn register_texture(&mut self, image: LoadedImage) -> Handle {
        let texture = Arc::new(Texture::new(image, self.release.clone()));
        let handle = self.textures.create(&mut self.allocator, texture);
        log::debug!("texture {handle:?} registered ({}x{} {:?})", image.width, image.height, image.format);
        handle
    }

    pub fn texture_info(&self, texture: Handle) -> Option<TextureInfo> {
        self.textures.resolve(texture).map(|t| t.info())
    }

    #[inline]
    pub fn texture_exists(&self, texture: Handle) -> bool {
        self.textures.exists(texture)
    }

    /// Releases a texture. Primitives still pointing at it stop drawing.
    ///
    /// Returns whether anything was released.
    pub fn release_texture(&mut self, texture: Handle) -> bool {
        let released = self.textures.release(texture).is_some();
        if released {
            log::debug!("texture {texture:?} released");
        }
        released
    }

    /// Releases every texture (server shutdown).
    pub(crate) fn release_all_textures(&mut self) {
        let count = self.textures.drain().count();
        if count > 0 {
            log::debug!("released {count} textures");
        }
    }

    pub(crate) fn texture_ref(&self, texture: Handle) -> Option<Weak<Texture>> {
        self.textures.resolve(texture).map(Arc::downgrade)
    }

    // ── canvas items ──────────────────────────────────────────────────────

    /// Creates a root node with identity transform, white modulation, visible,
    /// z-index 0 (absolute) and no primitives.
    pub fn create_canvas_item(&mut self) -> Handle {
        let handle = self.nodes.create(&mut self.allocator, CanvasNode::new());
        log::debug!("canvas item {handle:?} created");
        handle
    }

    #[inline]
    pub fn canvas_item_exists(&self, node: Handle) -> bool {
        self.nodes.exists(node)
    }

    /// Releases a node. Its children are kept and become root-relative.
    ///
    /// Returns whether anything was released.
    pub fn release_canvas_item(&mut self, node: Handle) -> bool {
        let released = self.nodes.release(node).is_some();
        if released {
            log::debug!("canvas item {node:?} released");
        }
        released
    }

    /// Releases `handle` from whichever registry owns it.
    pub fn destroy(&mut self, handle: Handle) {
        if !self.release_canvas_item(handle) {
            self.release_texture(handle);
        }
    }

    #[inline]
    pub fn canvas_item(&self, node: Handle) -> Option<&CanvasNode> {
        self.nodes.resolve(node)
    }

    #[inline]
    pub fn canvas_item_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub(crate) fn attach(&mut self, node: Handle, primitive: DrawPrimitive) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.primitives.push(primitive);
        }
    }

    /// Drops every primitive on `node`; the node itself stays.
    pub fn canvas_item_clear(&mut self, node: Handle) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.primitives.clear();
        }
    }

    // ── local mutators ────────────────────────────────────────────────────

    pub fn canvas_item_set_transform(&mut self, node: Handle, transform: Transform2D) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.transform = transform;
        }
    }

    pub fn canvas_item_set_modulate(&mut self, node: Handle, modulate: Color) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.modulate = modulate;
        }
    }

    pub fn canvas_item_set_visible(&mut self, node: Handle, visible: bool) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.visible = visible;
        }
    }

    pub fn canvas_item_set_blend_mode(&mut self, node: Handle, blend_mode: BlendMode) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.blend_mode = blend_mode;
        }
    }

    pub fn canvas_item_set_scale_mode(&mut self, node: Handle, scale_mode: ScaleMode) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.scale_mode = scale_mode;
        }
    }

    pub fn canvas_item_set_zindex(&mut self, node: Handle, z_index: i32) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.z_index = ZIndex(z_index);
        }
    }

    pub fn canvas_item_set_zindex_relative(&mut self, node: Handle, relative: bool) {
        if let Some(n) = self.nodes.resolve_mut(node) {
            n.z_relative = relative;
        }
    }

    /// Re-parents `node`.
    ///
    /// - an unknown parent, `Handle::INVALID`, or `node` itself detaches to root
    /// - a parent that descends from `node` is rejected and nothing changes
    pub fn canvas_item_set_parent(&mut self, node: Handle, parent: Handle) {
        if !self.nodes.exists(node) {
            return;
        }

        let new_parent = if parent == node || !self.nodes.exists(parent) {
            None
        } else if self.descends_from(parent, node) {
            log::warn!("rejected re-parenting {node:?} under {parent:?} (cycle or depth limit)");
            return;
        } else {
            Some(parent)
        };

        if let Some(n) = self.nodes.resolve_mut(node) {
            n.parent = new_parent;
        }
    }

    // ── local accessors ───────────────────────────────────────────────────

    pub fn canvas_item_get_transform(&self, node: Handle) -> Option<Transform2D> {
        self.nodes.resolve(node).map(CanvasNode::transform)
    }

    pub fn canvas_item_get_modulate(&self, node: Handle) -> Option<Color> {
        self.nodes.resolve(node).map(CanvasNode::modulate)
    }

    pub fn canvas_item_is_visible(&self, node: Handle) -> Option<bool> {
        self.nodes.resolve(node).map(CanvasNode::is_visible)
    }

    pub fn canvas_item_get_blend_mode(&self, node: Handle) -> Option<BlendMode> {
        self.nodes.resolve(node).map(CanvasNode::blend_mode)
    }

    pub fn canvas_item_get_scale_mode(&self, node: Handle) -> Option<ScaleMode> {
        self.nodes.resolve(node).map(CanvasNode::scale_mode)
    }

    pub fn canvas_item_get_zindex(&self, node: Handle) -> Option<i32> {
        self.nodes.resolve(node).map(|n| n.z_index.get())
    }

    pub fn canvas_item_is_zindex_relative(&self, node: Handle) -> Option<bool> {
        self.nodes.resolve(node).map(CanvasNode::is_z_relative)
    }

    /// The live parent, if any. A released parent reads as `None`.
    pub fn canvas_item_get_parent(&self, node: Handle) -> Option<Handle> {
        self.nodes
            .resolve(node)?
            .parent
            .filter(|&p| self.nodes.exists(p))
    }

    // ── global accessors ──────────────────────────────────────────────────

    /// `global(parent) * local(node)`, resolved up to the root.
    pub fn canvas_item_get_global_transform(&self, node: Handle) -> Option<Transform2D> {
        let n = self.nodes.resolve(node)?;
        // Associativity lets the product be accumulated leaf-to-root.
        Some(
            self.ancestors(node)
                .fold(n.transform, |acc, (_, ancestor)| ancestor.transform * acc),
        )
    }

    pub fn canvas_item_get_global_modulate(&self, node: Handle) -> Option<Color> {
        let n = self.nodes.resolve(node)?;
        Some(
            self.ancestors(node)
                .fold(n.modulate, |acc, (_, ancestor)| ancestor.modulate * acc),
        )
    }

    /// Visible iff the node and every live ancestor are visible.
    pub fn canvas_item_is_globally_visible(&self, node: Handle) -> Option<bool> {
        let n = self.nodes.resolve(node)?;
        Some(n.visible && self.ancestors(node).all(|(_, ancestor)| ancestor.visible))
    }

    /// Sort key: `local` for absolute nodes and roots; for relative nodes,
    /// `global(parent) + local`.
    pub fn canvas_item_get_global_zindex(&self, node: Handle) -> Option<i32> {
        Some(self.global_zindex(node)?.get())
    }

    fn global_zindex(&self, node: Handle) -> Option<ZIndex> {
        let n = self.nodes.resolve(node)?;
        let mut z = n.z_index;
        let mut relative = n.z_relative;

        for (_, ancestor) in self.ancestors(node) {
            if !relative {
                break;
            }
            z = z + ancestor.z_index;
            relative = ancestor.z_relative;
        }

        Some(z)
    }

    /// Everything the render pass needs about `node`, resolved in one call.
    pub fn resolve(&self, node: Handle) -> Option<ResolvedNode> {
        let n = self.nodes.resolve(node)?;
        let mut transform = n.transform;
        let mut modulate = n.modulate;
        let mut visible = n.visible;

        for (_, ancestor) in self.ancestors(node) {
            transform = ancestor.transform * transform;
            modulate = ancestor.modulate * modulate;
            visible &= ancestor.visible;
        }

        Some(ResolvedNode {
            transform,
            modulate,
            visible,
            z_index: self.global_zindex(node)?,
            blend_mode: n.blend_mode,
            scale_mode: n.scale_mode,
        })
    }

    /// `None` for an unknown node; `false` when the node is globally hidden or
    /// has no primitives; otherwise whether every primitive's screen rect
    /// overlaps the viewport. A primitive with a released texture never does.
    pub fn canvas_item_is_visible_inside_viewport(
        &self,
        node: Handle,
        viewport: &Viewport,
    ) -> Option<bool> {
        let n = self.nodes.resolve(node)?;
        let resolved = self.resolve(node)?;

        if !resolved.visible || n.primitives.is_empty() {
            return Some(false);
        }

        let screen = viewport.screen_rect();
        Some(
            n.primitives
                .iter()
                .all(|p| {
                    p.screen_rect(resolved.transform, viewport)
                        .is_some_and(|bounds| bounds.overlaps(screen))
                }),
        )
    }

    // ── ordering ──────────────────────────────────────────────────────────

    /// Re-sorts all live nodes by resolved global z-index, ties in creation order.
    pub fn rebuild_paint_order(&mut self) {
        let mut order = std::mem::take(&mut self.paint_order);
        order.clear();
        order.extend(self.nodes.iter().filter_map(|(handle, _)| {
            let z = self.global_zindex(handle)?;
            Some((SortKey::new(z, handle.raw()), handle))
        }));
        order.sort_by(|a, b| a.0.cmp(&b.0));
        self.paint_order = order;
    }

    /// Node handles back-to-front, as of the last
    /// [`rebuild_paint_order`](Self::rebuild_paint_order).
    pub fn paint_order(&self) -> impl Iterator<Item = Handle> + '_ {
        self.paint_order.iter().map(|&(_, handle)| handle)
    }

    // ── graph walks ───────────────────────────────────────────────────────

    /// Live ancestors of `node`, nearest first. Stops at the root, at a
    /// released parent, or after [`MAX_ANCESTOR_DEPTH`] steps.
    pub fn ancestors(&self, node: Handle) -> Ancestors<'_> {
        Ancestors {
            nodes: &self.nodes,
            next: self.nodes.resolve(node).and_then(|n| n.parent),
            depth: 0,
        }
    }

    /// Whether `ancestor` appears on `node`'s parent chain. A chain that hits
    /// the depth guard counts as "yes" so it can never be extended.
    fn descends_from(&self, node: Handle, ancestor: Handle) -> bool {
        let mut walk = self.ancestors(node);
        for (handle, _) in walk.by_ref() {
            if handle == ancestor {
                return true;
            }
        }
        walk.depth >= MAX_ANCESTOR_DEPTH
    }
}

/// Parent-chain iterator returned by [`CanvasScene::ancestors`].
pub struct Ancestors<'a> {
    nodes: &'a Registry<CanvasNode>,
    next: Option<Handle>,
    depth: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Handle, &'a CanvasNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.depth >= MAX_ANCESTOR_DEPTH {
            // Only a live parent beyond the guard means the chain was cut.
            if self.next.take().is_some_and(|h| self.nodes.exists(h)) {
                log::warn!("ancestor walk exceeded {MAX_ANCESTOR_DEPTH} levels; truncating");
            }
            return None;
        }
        let handle = self.next.take()?;
        let node = self.nodes.resolve(handle)?;
        self.next = node.parent;
        self.depth += 1;
        Some((handle, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, RectI, Vec2};
    use crate::paint::Flip;
    use crate::texture::{release_queue, NativeTexture, PixelFormat, ReleaseQueue};

    fn scene() -> (CanvasScene, ReleaseQueue) {
        let (tx, rx) = release_queue();
        (CanvasScene::new(tx), rx)
    }

    fn image(id: u64, width: u32, height: u32) -> LoadedImage {
        LoadedImage { native: NativeTexture(id), width, height, format: PixelFormat::Rgba8 }
    }

    fn t(ox: f32, oy: f32, sx: f32, sy: f32) -> Transform2D {
        Transform2D::new(0.0, Vec2::new(ox, oy), Vec2::new(sx, sy))
    }

    fn chain(scene: &mut CanvasScene) -> (Handle, Handle, Handle) {
        let a = scene.create_canvas_item();
        let b = scene.create_canvas_item();
        let c = scene.create_canvas_item();
        scene.canvas_item_set_parent(b, a);
        scene.canvas_item_set_parent(c, b);
        (a, b, c)
    }

    // ── handles ───────────────────────────────────────────────────────────

    #[test]
    fn handles_are_strictly_increasing_across_kinds() {
        let (mut s, _q) = scene();
        let n = s.create_canvas_item();
        let tex = s.register_texture(image(1, 4, 4));
        let m = s.create_canvas_item();
        assert!(n < tex && tex < m);
        assert!(!s.canvas_item_exists(tex));
        assert!(!s.texture_exists(n));
    }

    #[test]
    fn invalid_handle_mutators_are_noops_and_accessors_empty() {
        let (mut s, _q) = scene();
        let ghost = Handle::from_raw(42);
        s.canvas_item_set_visible(ghost, false);
        s.canvas_item_set_zindex(ghost, 3);
        s.canvas_item_add_rect(ghost, Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(s.canvas_item_get_global_transform(ghost), None);
        assert_eq!(s.canvas_item_get_global_zindex(ghost), None);
        assert_eq!(s.canvas_item_is_globally_visible(ghost), None);
        assert_eq!(s.texture_info(ghost), None);
        assert_eq!(s.canvas_item_count(), 0);
    }

    #[test]
    fn destroy_releases_either_kind_once() {
        let (mut s, q) = scene();
        let n = s.create_canvas_item();
        let tex = s.register_texture(image(5, 4, 4));

        s.destroy(n);
        s.destroy(tex);
        s.destroy(tex);

        assert!(!s.canvas_item_exists(n));
        assert!(!s.texture_exists(tex));
        assert_eq!(q.drain().collect::<Vec<_>>(), vec![NativeTexture(5)]);
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn global_transform_composes_root_down() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        let (la, lb, lc) = (t(10.0, 0.0, 2.0, 2.0), t(1.0, 1.0, 0.5, 1.0), t(4.0, 2.0, 1.0, 3.0));
        s.canvas_item_set_transform(a, la);
        s.canvas_item_set_transform(b, lb);
        s.canvas_item_set_transform(c, lc);

        assert_eq!(s.canvas_item_get_global_transform(c), Some((la * lb) * lc));
        assert_eq!(s.canvas_item_get_global_transform(b), Some(la * lb));
    }

    #[test]
    fn parent_mutation_is_seen_immediately() {
        let (mut s, _q) = scene();
        let (a, _b, c) = chain(&mut s);
        s.canvas_item_set_transform(a, t(5.0, 5.0, 1.0, 1.0));
        assert_eq!(s.canvas_item_get_global_transform(c).map(|g| g.origin), Some(Vec2::new(5.0, 5.0)));
        s.canvas_item_set_transform(a, t(7.0, 1.0, 1.0, 1.0));
        assert_eq!(s.canvas_item_get_global_transform(c).map(|g| g.origin), Some(Vec2::new(7.0, 1.0)));
    }

    #[test]
    fn released_parent_makes_child_root_relative() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_transform(a, t(100.0, 0.0, 1.0, 1.0));
        s.canvas_item_set_transform(b, t(1.0, 0.0, 1.0, 1.0));
        s.canvas_item_set_visible(a, false);

        s.release_canvas_item(b);

        assert_eq!(s.canvas_item_get_parent(c), None);
        assert_eq!(s.canvas_item_get_global_transform(c), Some(Transform2D::IDENTITY));
        assert_eq!(s.canvas_item_is_globally_visible(c), Some(true));
        assert!(s.canvas_item_exists(a));
    }

    // ── modulation / visibility ──────────────────────────────────────────

    #[test]
    fn global_modulate_multiplies_chain() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_modulate(a, Color::from_premul(0.5, 0.5, 0.5, 0.5));
        s.canvas_item_set_modulate(b, Color::from_premul(0.5, 1.0, 1.0, 1.0));
        assert_eq!(s.canvas_item_get_global_modulate(c), Some(Color::from_premul(0.25, 0.5, 0.5, 0.5)));
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_visible(a, false);
        assert_eq!(s.canvas_item_is_globally_visible(b), Some(false));
        assert_eq!(s.canvas_item_is_globally_visible(c), Some(false));
        assert_eq!(s.canvas_item_is_visible(c), Some(true));

        s.canvas_item_set_visible(a, true);
        assert_eq!(s.canvas_item_is_globally_visible(c), Some(true));
    }

    // ── z-index ───────────────────────────────────────────────────────────

    #[test]
    fn absolute_zindex_ignores_parent() {
        let (mut s, _q) = scene();
        let (a, b, _c) = chain(&mut s);
        s.canvas_item_set_zindex(a, 10);
        s.canvas_item_set_zindex(b, 2);
        assert_eq!(s.canvas_item_get_global_zindex(b), Some(2));
    }

    #[test]
    fn relative_zindex_accumulates_through_relative_parents() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_zindex(a, 10);
        s.canvas_item_set_zindex(b, 2);
        s.canvas_item_set_zindex(c, 1);
        s.canvas_item_set_zindex_relative(b, true);
        s.canvas_item_set_zindex_relative(c, true);

        assert_eq!(s.canvas_item_get_global_zindex(b), Some(12));
        assert_eq!(s.canvas_item_get_global_zindex(c), Some(13));

        // An absolute parent stops the accumulation at its own local value.
        s.canvas_item_set_zindex_relative(b, false);
        assert_eq!(s.canvas_item_get_global_zindex(c), Some(3));
    }

    #[test]
    fn relative_root_uses_local_zindex() {
        let (mut s, _q) = scene();
        let n = s.create_canvas_item();
        s.canvas_item_set_zindex(n, -4);
        s.canvas_item_set_zindex_relative(n, true);
        assert_eq!(s.canvas_item_get_global_zindex(n), Some(-4));
    }

    #[test]
    fn paint_order_is_z_then_creation() {
        let (mut s, _q) = scene();
        let first = s.create_canvas_item();
        let top = s.create_canvas_item();
        let second = s.create_canvas_item();
        let back = s.create_canvas_item();
        s.canvas_item_set_zindex(top, 5);
        s.canvas_item_set_zindex(back, -1);

        s.rebuild_paint_order();
        assert_eq!(s.paint_order().collect::<Vec<_>>(), vec![back, first, second, top]);
    }

    // ── re-parenting ──────────────────────────────────────────────────────

    #[test]
    fn reparent_under_descendant_is_rejected() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_parent(a, c);
        assert_eq!(s.canvas_item_get_parent(a), None);
        assert_eq!(s.canvas_item_get_parent(b), Some(a));
        assert_eq!(s.canvas_item_get_parent(c), Some(b));
    }

    #[test]
    fn reparent_to_self_or_invalid_detaches() {
        let (mut s, _q) = scene();
        let (a, b, c) = chain(&mut s);
        s.canvas_item_set_parent(c, c);
        assert_eq!(s.canvas_item_get_parent(c), None);
        s.canvas_item_set_parent(b, Handle::INVALID);
        assert_eq!(s.canvas_item_get_parent(b), None);
        s.canvas_item_set_parent(b, a);
        s.canvas_item_set_parent(b, a);
        assert_eq!(s.canvas_item_get_parent(b), Some(a));
    }

    #[test]
    fn texture_handle_is_not_a_parent() {
        let (mut s, _q) = scene();
        let n = s.create_canvas_item();
        let tex = s.register_texture(image(1, 2, 2));
        s.canvas_item_set_parent(n, tex);
        assert_eq!(s.canvas_item_get_parent(n), None);
    }

    #[test]
    fn chain_at_depth_guard_resolves_fully_and_stops_growing() {
        let (mut s, _q) = scene();
        let root = s.create_canvas_item();
        s.canvas_item_set_transform(root, t(1.0, 0.0, 1.0, 1.0));

        let mut leaf = root;
        for _ in 0..MAX_ANCESTOR_DEPTH {
            let n = s.create_canvas_item();
            s.canvas_item_set_transform(n, t(1.0, 0.0, 1.0, 1.0));
            s.canvas_item_set_parent(n, leaf);
            leaf = n;
        }

        assert_eq!(s.ancestors(leaf).count(), MAX_ANCESTOR_DEPTH);
        let global = s.canvas_item_get_global_transform(leaf).unwrap();
        assert_eq!(global.origin.x, (MAX_ANCESTOR_DEPTH + 1) as f32);

        let beyond = s.create_canvas_item();
        s.canvas_item_set_parent(beyond, leaf);
        assert_eq!(s.canvas_item_get_parent(beyond), None);
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn scaled_quad_scenario() {
        let (mut s, _q) = scene();
        let tex = s.register_texture(image(1, 64, 32));
        assert_eq!(s.texture_info(tex).map(|i| i.size()), Some((64, 32)));

        let n = s.create_canvas_item();
        s.canvas_item_set_transform(n, t(10.0, 10.0, 2.0, 2.0));
        s.canvas_item_add_texture(tex, n, Flip::None, Color::WHITE, Transform2D::IDENTITY);

        let prim = s.canvas_item(n).unwrap().primitives()[0].clone();
        assert_eq!(prim.local_draw_rect(), Some(Rect::new(0.0, 0.0, 64.0, 32.0)));

        let global = s.canvas_item_get_global_transform(n).unwrap();
        assert_eq!(global.origin, Vec2::new(10.0, 10.0));
        assert_eq!(global.scale, Vec2::new(2.0, 2.0));
        assert_eq!(
            prim.screen_rect(global, &Viewport::new(800.0, 600.0)),
            Some(Rect::new(10.0, 10.0, 128.0, 64.0))
        );
    }

    #[test]
    fn region_draw_uses_region_size() {
        let (mut s, _q) = scene();
        let tex = s.register_texture(image(1, 64, 64));
        let n = s.create_canvas_item();
        s.canvas_item_add_texture_region(tex, n, RectI::new(16, 16, 8, 4), Flip::None, Color::WHITE, Transform2D::IDENTITY);
        let rect = s.canvas_item(n).and_then(|n| n.primitives()[0].local_draw_rect());
        assert_eq!(rect, Some(Rect::new(0.0, 0.0, 8.0, 4.0)));
    }

    #[test]
    fn degenerate_attachments_are_ignored() {
        let (mut s, _q) = scene();
        let tex = s.register_texture(image(1, 8, 8));
        let n = s.create_canvas_item();

        s.canvas_item_add_texture_region(tex, n, RectI::new(0, 0, 0, 8), Flip::None, Color::WHITE, Transform2D::IDENTITY);
        s.canvas_item_add_rect(n, Rect::new(0.0, 0.0, 5.0, 0.0), Color::WHITE);
        s.canvas_item_add_lines(n, Vec::new(), Color::WHITE);
        s.canvas_item_add_rects(n, Vec::new(), Color::WHITE);
        s.canvas_item_add_texture(Handle::from_raw(999), n, Flip::None, Color::WHITE, Transform2D::IDENTITY);

        assert_eq!(s.canvas_item(n).map(|n| n.primitives().len()), Some(0));
    }

    #[test]
    fn released_texture_leaves_no_bounds() {
        let (mut s, q) = scene();
        let tex = s.register_texture(image(8, 16, 16));
        let n = s.create_canvas_item();
        s.canvas_item_add_texture(tex, n, Flip::None, Color::WHITE, Transform2D::IDENTITY);

        s.release_texture(tex);

        assert_eq!(q.drain().count(), 1);
        let rect = s.canvas_item(n).and_then(|n| n.primitives()[0].local_draw_rect());
        assert_eq!(rect, None);
    }

    #[test]
    fn clear_empties_primitives_but_keeps_node() {
        let (mut s, _q) = scene();
        let n = s.create_canvas_item();
        s.canvas_item_add_line(n, Vec2::zero(), Vec2::new(3.0, 0.0), Color::WHITE);
        s.canvas_item_add_rects(n, vec![Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(4.0, 4.0, 2.0, 2.0)], Color::WHITE);
        assert_eq!(
            s.canvas_item(n).and_then(|n| n.primitives()[1].local_draw_rect()),
            Some(Rect::new(0.0, 0.0, 6.0, 6.0))
        );

        s.canvas_item_clear(n);
        assert!(s.canvas_item_exists(n));
        assert_eq!(s.canvas_item(n).map(|n| n.primitives().len()), Some(0));
    }

    // ── viewport queries ──────────────────────────────────────────────────

    #[test]
    fn visible_inside_viewport_requires_every_primitive_on_screen() {
        let (mut s, _q) = scene();
        let viewport = Viewport::new(100.0, 100.0);
        let n = s.create_canvas_item();
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &viewport), Some(false));

        s.canvas_item_add_rect(n, Rect::new(10.0, 10.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &viewport), Some(true));

        s.canvas_item_add_rect(n, Rect::new(500.0, 10.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &viewport), Some(false));

        assert_eq!(s.canvas_item_is_visible_inside_viewport(Handle::INVALID, &viewport), None);
    }

    #[test]
    fn camera_moves_content_out_of_view() {
        let (mut s, _q) = scene();
        let n = s.create_canvas_item();
        s.canvas_item_add_rect(n, Rect::new(10.0, 10.0, 10.0, 10.0), Color::WHITE);

        let camera = Viewport::new(100.0, 100.0).with_canvas_transform(t(-50.0, 0.0, 1.0, 1.0));
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &camera), Some(false));
    }

    #[test]
    fn released_texture_is_not_visible_inside_viewport() {
        let (mut s, _q) = scene();
        let viewport = Viewport::new(100.0, 100.0);
        let tex = s.register_texture(image(1, 16, 16));
        let n = s.create_canvas_item();
        s.canvas_item_add_texture(tex, n, Flip::None, Color::WHITE, Transform2D::IDENTITY);
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &viewport), Some(true));

        s.release_texture(tex);
        assert_eq!(s.canvas_item_is_visible_inside_viewport(n, &viewport), Some(false));
    }
}
