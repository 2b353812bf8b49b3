//! Retained canvas scene: node graph, draw primitives, and ordering.
//!
//! Responsibilities:
//! - own textures and canvas nodes behind [`Handle`](crate::handle::Handle)s
//! - resolve global transform / modulation / visibility / z-index on demand
//! - provide deterministic paint order (global z-index + creation order)
//! - keep primitive-specific code isolated per file under `scene::primitives`

mod canvas;
mod key;
mod node;
mod z_index;

pub mod primitives;

pub use canvas::{Ancestors, CanvasScene, MAX_ANCESTOR_DEPTH};
pub use key::SortKey;
pub use node::{CanvasNode, ResolvedNode};
pub use primitives::DrawPrimitive;
pub use z_index::ZIndex;
