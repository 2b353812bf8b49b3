//! Paint model shared between the scene and rasterizers.
//!
//! Scope:
//! - color representation (premultiplied alpha, encoded sRGB channels)
//! - per-node raster state (blend mode, scale mode)
//! - blit mirroring
//!
//! Geometry types remain in `coords`.

mod color;
mod mode;

pub use color::Color;
pub use mode::{BlendMode, Flip, ScaleMode};
