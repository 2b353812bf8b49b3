//! Rendering server: owns the rasterizer and viewport, shares the scene.
//!
//! Intended usage:
//! - one [`RenderingServer`] on the render thread, calling
//!   [`render`](RenderingServer::render) once per frame
//! - other execution contexts mutate the scene through clones of
//!   [`SharedScene`]

mod config;
mod pass;
mod rendering;
mod shared;

pub use config::ServerConfig;
pub use pass::{draw_canvas_items, FrameStats};
pub use rendering::RenderingServer;
pub use shared::SharedScene;
