use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ColorType, DynamicImage, Rgba, RgbaImage};

use crate::coords::{Rect, RectI, Vec2};
use crate::paint::{BlendMode, Color, ScaleMode};
use crate::texture::{LoadedImage, NativeTexture, PixelFormat};

use super::{Blit, Rasterizer};

/// Framebuffer configuration.
#[derive(Debug, Clone)]
pub struct SoftwareRasterizerConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SoftwareRasterizerConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// Decoded image, stored premultiplied.
#[derive(Debug)]
struct Surface {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Surface {
    #[inline]
    fn texel(&self, x: i32, y: i32) -> Color {
        self.texels[y as usize * self.width as usize + x as usize]
    }
}

/// CPU rasterizer drawing into an RGBA8 framebuffer.
///
/// Drawing goes to a premultiplied back buffer; [`present`](Rasterizer::present)
/// converts it to the straight-alpha [`frame`](Self::frame) image.
#[derive(Debug)]
pub struct SoftwareRasterizer {
    width: u32,
    height: u32,
    back: Vec<Color>,
    front: RgbaImage,
    clear_color: Color,
    images: HashMap<NativeTexture, Surface>,
    next_native: u64,
    frames_presented: u64,
}

impl SoftwareRasterizer {
    pub fn new(config: SoftwareRasterizerConfig) -> Self {
        let (width, height) = (config.width, config.height);
        Self {
            width,
            height,
            back: vec![Color::transparent(); width as usize * height as usize],
            front: RgbaImage::new(width, height),
            clear_color: Color::transparent(),
            images: HashMap::new(),
            next_native: 0,
            frames_presented: 0,
        }
    }

    /// Resizes the framebuffer. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.back = vec![Color::transparent(); width as usize * height as usize];
        self.front = RgbaImage::new(width, height);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The most recently presented frame.
    #[inline]
    pub fn frame(&self) -> &RgbaImage {
        &self.front
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[inline]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Uploads an in-memory image (procedural textures, tests).
    pub fn upload(&mut self, image: &RgbaImage) -> LoadedImage {
        self.insert_surface(image, PixelFormat::Rgba8)
    }

    fn insert_surface(&mut self, image: &RgbaImage, format: PixelFormat) -> LoadedImage {
        let texels = image
            .pixels()
            .map(|p| Color::from_srgb_u8(p[0], p[1], p[2], p[3]))
            .collect();

        self.next_native += 1;
        let native = NativeTexture(self.next_native);
        let (width, height) = image.dimensions();
        self.images.insert(native, Surface { width, height, texels });

        LoadedImage { native, width, height, format }
    }

    fn upload_dynamic(&mut self, image: DynamicImage) -> LoadedImage {
        let format = pixel_format(image.color());
        self.insert_surface(&image.to_rgba8(), format)
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.back.fill(self.clear_color);
    }

    fn present(&mut self) {
        let width = self.width as usize;
        let back = &self.back;
        self.front = RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(back[y as usize * width + x as usize].to_srgb_u8())
        });
        self.frames_presented += 1;
    }

    fn blit(&mut self, blit: &Blit) {
        let Some(surface) = self.images.get(&blit.texture) else {
            log::warn!("blit from unknown image {:?}", blit.texture);
            return;
        };
        let mut target = Target { pixels: &mut self.back, width: self.width, height: self.height };

        let dst = blit.dst.normalized();
        let Some(src) = clip_region(blit.src, surface) else { return };
        if dst.is_empty() {
            return;
        }

        let center = dst.center();
        let half = dst.size * 0.5;
        let (sin, cos) = blit.rotation.to_radians().sin_cos();
        let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);

        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ];
        let (min, max) = corners.iter().fold(
            (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
            |(min, max), &c| {
                let p = rotate(c) + center;
                (min.min(p), max.max(p))
            },
        );
        let Some((x0, y0, x1, y1)) = target.clip_span(min, max) else { return };

        for py in y0..y1 {
            for px in x0..x1 {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                // Inverse rotation back into the unrotated destination rect.
                let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) + half;
                if local.x < 0.0 || local.y < 0.0 || local.x >= dst.size.x || local.y >= dst.size.y {
                    continue;
                }

                let mut u = local.x / dst.size.x;
                let mut v = local.y / dst.size.y;
                if blit.flip.horizontal() {
                    u = 1.0 - u;
                }
                if blit.flip.vertical() {
                    v = 1.0 - v;
                }

                let sx = src.x as f32 + u * src.w as f32;
                let sy = src.y as f32 + v * src.h as f32;
                let texel = sample(surface, src, sx, sy, blit.scale_mode);
                target.blend(px, py, texel * blit.modulate, blit.blend);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, blend: BlendMode) {
        let rect = rect.normalized();
        let mut target = Target { pixels: &mut self.back, width: self.width, height: self.height };
        let min = rect.min().round();
        let max = rect.max().round();
        let Some((x0, y0, x1, y1)) = target.clip_span(min, max) else { return };

        for py in y0..y1 {
            for px in x0..x1 {
                target.blend(px, py, color, blend);
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, blend: BlendMode) {
        let mut target = Target { pixels: &mut self.back, width: self.width, height: self.height };
        let Some(((x0, y0), (x1, y1))) = target.clip_segment(from, to) else { return };

        let (mut x, mut y) = (x0.round() as i64, y0.round() as i64);
        let (x_end, y_end) = (x1.round() as i64, y1.round() as i64);

        // Bresenham, endpoints inclusive.
        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            target.blend(x as i32, y as i32, color, blend);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn load_image(&mut self, path: &Path) -> Result<LoadedImage> {
        let image = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?;
        anyhow::ensure!(
            image.width() > 0 && image.height() > 0,
            "image {} has zero size",
            path.display()
        );
        Ok(self.upload_dynamic(image))
    }

    fn destroy_image(&mut self, native: NativeTexture) {
        if self.images.remove(&native).is_none() {
            log::warn!("destroy of unknown image {native:?}");
        }
    }
}

/// Mutable view of the back buffer.
struct Target<'a> {
    pixels: &'a mut [Color],
    width: u32,
    height: u32,
}

impl Target<'_> {
    /// Pixel span covering `[min, max)`, clipped to the framebuffer.
    fn clip_span(&self, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.width as i32);
        let y1 = (max.y.ceil() as i32).min(self.height as i32);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Liang-Barsky clip of a segment to the pixel-center box
    /// `[0, width - 1] x [0, height - 1]`, in f64.
    fn clip_segment(&self, from: Vec2, to: Vec2) -> Option<((f64, f64), (f64, f64))> {
        if !from.is_finite() || !to.is_finite() || self.width == 0 || self.height == 0 {
            return None;
        }
        let max_x = f64::from(self.width - 1);
        let max_y = f64::from(self.height - 1);
        let (fx, fy) = (f64::from(from.x), f64::from(from.y));
        let (dx, dy) = (f64::from(to.x) - fx, f64::from(to.y) - fy);

        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [(-dx, fx), (dx, max_x - fx), (-dy, fy), (dy, max_y - fy)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| ((fx + dx * t).clamp(0.0, max_x), (fy + dy * t).clamp(0.0, max_y));
        Some((at(t0), at(t1)))
    }

    #[inline]
    fn blend(&mut self, x: i32, y: i32, src: Color, mode: BlendMode) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = blend(self.pixels[idx], src, mode);
    }
}

fn blend(dst: Color, src: Color, mode: BlendMode) -> Color {
    let out = match mode {
        BlendMode::None => src,
        BlendMode::Blend => {
            let k = 1.0 - src.a;
            Color::from_premul(src.r + dst.r * k, src.g + dst.g * k, src.b + dst.b * k, src.a + dst.a * k)
        }
        BlendMode::Add => Color::from_premul(src.r + dst.r, src.g + dst.g, src.b + dst.b, dst.a),
        BlendMode::Modulate => Color::from_premul(src.r * dst.r, src.g * dst.g, src.b * dst.b, dst.a),
        BlendMode::Multiply => {
            let k = 1.0 - src.a;
            Color::from_premul(
                src.r * dst.r + dst.r * k,
                src.g * dst.g + dst.g * k,
                src.b * dst.b + dst.b * k,
                dst.a,
            )
        }
    };
    out.clamped()
}

fn clip_region(region: RectI, surface: &Surface) -> Option<RectI> {
    let (w, h) = (surface.width as i32, surface.height as i32);
    let x0 = region.x.clamp(0, w);
    let y0 = region.y.clamp(0, h);
    let x1 = region.x.saturating_add(region.w).clamp(0, w);
    let y1 = region.y.saturating_add(region.h).clamp(0, h);
    let clipped = RectI::new(x0, y0, x1 - x0, y1 - y0);
    clipped.has_area().then_some(clipped)
}

fn sample(surface: &Surface, region: RectI, sx: f32, sy: f32, mode: ScaleMode) -> Color {
    let (min_x, max_x) = (region.x, region.x + region.w - 1);
    let (min_y, max_y) = (region.y, region.y + region.h - 1);

    match mode {
        ScaleMode::Nearest => {
            surface.texel((sx.floor() as i32).clamp(min_x, max_x), (sy.floor() as i32).clamp(min_y, max_y))
        }
        ScaleMode::Linear => {
            let fx = sx - 0.5;
            let fy = sy - 0.5;
            let ix = fx.floor();
            let iy = fy.floor();
            let (tx, ty) = (fx - ix, fy - iy);
            let x0 = (ix as i32).clamp(min_x, max_x);
            let y0 = (iy as i32).clamp(min_y, max_y);
            let x1 = (x0 + 1).min(max_x);
            let y1 = (y0 + 1).min(max_y);

            let top = lerp(surface.texel(x0, y0), surface.texel(x1, y0), tx);
            let bottom = lerp(surface.texel(x0, y1), surface.texel(x1, y1), tx);
            lerp(top, bottom, ty)
        }
    }
}

#[inline]
fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::from_premul(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

fn pixel_format(color: ColorType) -> PixelFormat {
    match color {
        ColorType::L8 => PixelFormat::L8,
        ColorType::La8 => PixelFormat::La8,
        ColorType::Rgb8 => PixelFormat::Rgb8,
        ColorType::Rgba8 => PixelFormat::Rgba8,
        ColorType::L16 => PixelFormat::L16,
        ColorType::La16 => PixelFormat::La16,
        ColorType::Rgb16 => PixelFormat::Rgb16,
        ColorType::Rgba16 => PixelFormat::Rgba16,
        ColorType::Rgb32F => PixelFormat::Rgb32F,
        ColorType::Rgba32F => PixelFormat::Rgba32F,
        _ => PixelFormat::Other,
    }
}
