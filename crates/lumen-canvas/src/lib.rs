//! Lumen canvas crate.
//!
//! A retained-mode 2D rendering layer. Textures and canvas nodes live behind
//! opaque [`Handle`](handle::Handle)s; a [`RenderingServer`](server::RenderingServer)
//! resolves the node hierarchy, culls against the viewport, orders by z-index
//! and drives a [`Rasterizer`](raster::Rasterizer) once per frame.

pub mod coords;
pub mod handle;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
pub mod server;
pub mod texture;
