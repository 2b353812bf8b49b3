use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use lumen_canvas::coords::{Rect, RectI, Transform2D, Vec2, Viewport};
use lumen_canvas::handle::Handle;
use lumen_canvas::logging::{init_logging, LoggingConfig};
use lumen_canvas::paint::{BlendMode, Color, Flip};
use lumen_canvas::raster::{SoftwareRasterizer, SoftwareRasterizerConfig};
use lumen_canvas::scene::CanvasScene;
use lumen_canvas::server::{RenderingServer, ServerConfig};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const FRAMES: u32 = 8;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("lumen-studio.png"));

    let raster = SoftwareRasterizer::new(SoftwareRasterizerConfig { width: WIDTH, height: HEIGHT });
    let config = ServerConfig {
        viewport: Viewport::new(WIDTH as f32, HEIGHT as f32),
        ..ServerConfig::default()
    };
    let mut server = RenderingServer::new(raster, config);

    let checker = server.rasterizer_mut().upload(&checkerboard(32, 8));
    let texture = server.register_image(checker);

    let sprites = server.scene().with(|scene| build_scene(scene, texture));

    for frame in 0..FRAMES {
        let t = frame as f32 / FRAMES as f32;
        server.scene().with(|scene| {
            scene.canvas_item_set_transform(
                sprites,
                Transform2D::from_origin(Vec2::new(360.0 + 120.0 * t, 150.0)),
            );
        });
        server.set_canvas_transform(Transform2D::from_origin(Vec2::new(-8.0 * t, 0.0)));
        let stats = server.render();
        log::info!("frame {frame}: {} emitted, {} culled", stats.emitted, stats.culled);
    }

    server
        .rasterizer()
        .frame()
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote {}", output.display());

    Ok(())
}

/// Backdrop, a textured sprite group, and a few overlays.
///
/// Returns the sprite group's root so the caller can animate it.
fn build_scene(scene: &mut CanvasScene, texture: Handle) -> Handle {
    let backdrop = scene.create_canvas_item();
    scene.canvas_item_set_zindex(backdrop, -10);
    scene.canvas_item_add_rect(
        backdrop,
        Rect::new(20.0, 20.0, 600.0, 320.0),
        Color::from_srgb_u8(30, 34, 44, 255),
    );
    scene.canvas_item_add_rects(
        backdrop,
        (0..6)
            .map(|i| Rect::new(40.0 + i as f32 * 96.0, 300.0, 80.0, 24.0))
            .collect(),
        Color::from_srgb_u8(60, 70, 90, 255),
    );

    let grid = scene.create_canvas_item();
    scene.canvas_item_set_zindex(grid, -5);
    for i in 0..=8 {
        let x = 40.0 + i as f32 * 70.0;
        scene.canvas_item_add_line(grid, Vec2::new(x, 40.0), Vec2::new(x, 280.0), Color::from_srgb_u8(80, 90, 110, 255));
    }

    let sprites = scene.create_canvas_item();
    let quad = scene.create_canvas_item();
    scene.canvas_item_set_parent(quad, sprites);
    scene.canvas_item_add_texture(
        texture,
        quad,
        Flip::None,
        Color::WHITE,
        Transform2D::IDENTITY.with_scale(Vec2::new(3.0, 3.0)),
    );

    let tinted = scene.create_canvas_item();
    scene.canvas_item_set_parent(tinted, sprites);
    scene.canvas_item_set_transform(tinted, Transform2D::from_origin(Vec2::new(-200.0, 20.0)));
    scene.canvas_item_set_modulate(tinted, Color::from_straight(1.0, 0.6, 0.3, 1.0));
    scene.canvas_item_add_texture_region(
        texture,
        tinted,
        RectI::new(0, 0, 16, 16),
        Flip::Horizontal,
        Color::WHITE,
        Transform2D::IDENTITY.with_scale(Vec2::new(4.0, 4.0)).with_rotation(15.0),
    );

    let glow = scene.create_canvas_item();
    scene.canvas_item_set_parent(glow, sprites);
    scene.canvas_item_set_zindex(glow, 1);
    scene.canvas_item_set_zindex_relative(glow, true);
    scene.canvas_item_set_blend_mode(glow, BlendMode::Add);
    scene.canvas_item_add_rect(glow, Rect::new(16.0, 16.0, 64.0, 64.0), Color::from_straight(0.2, 0.3, 0.6, 0.5));

    let outline = scene.create_canvas_item();
    scene.canvas_item_set_zindex(outline, 10);
    scene.canvas_item_add_lines(
        outline,
        vec![
            Vec2::new(20.0, 20.0),
            Vec2::new(620.0, 20.0),
            Vec2::new(620.0, 340.0),
            Vec2::new(20.0, 340.0),
            Vec2::new(20.0, 20.0),
        ],
        Color::from_srgb_u8(220, 220, 230, 255),
    );

    sprites
}

fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([200, 60, 80, 255])
        }
    })
}
