//! Coordinate and geometry types shared by the scene and the rasterizers.
//!
//! Canonical canvas space:
//! - pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Screen space is canvas space mapped through the viewport's canvas transform.

mod rect;
mod transform;
mod vec2;
mod viewport;

pub use rect::{Rect, RectI};
pub use transform::Transform2D;
pub use vec2::Vec2;
pub use viewport::Viewport;
