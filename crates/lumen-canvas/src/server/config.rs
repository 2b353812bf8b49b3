use crate::coords::Viewport;
use crate::paint::Color;

/// Server configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ServerConfig {
    /// Clear color applied at the end of each frame.
    pub background: Color,
    pub viewport: Viewport,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            background: Color::from_srgb_u8(77, 77, 77, 255),
            viewport: Viewport::default(),
        }
    }
}
