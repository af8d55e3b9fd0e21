//! CPU raster backend.
//!
//! [`PixelSurface`] implements [`Renderer`] against an owned RGBA8 buffer
//! sized to the viewport. Circles are rasterized with a bounding-box scan
//! and a ~1px soft edge; lines are stepped with DDA. Everything alpha-blends
//! the foreground color over what is already there, so overlapping faint
//! connection lines darken the way canvas compositing does.
//!
//! The buffer is what the GPU blit uploads each frame; [`frame`]
//! exposes the bytes.
//!
//! [`frame`]: PixelSurface::frame

use std::collections::HashMap;

use glam::Vec2;

use crate::renderer::{Renderer, Transform};

/// One packed pixel, byte order R, G, B, A.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A CPU-rasterized drawing surface.
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    background: Rgba,
    foreground: Rgba,
    transforms: HashMap<String, Transform>,
}

impl PixelSurface {
    /// Create a surface cleared to white with a black foreground, the
    /// preloader palette.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_colors(width, height, Rgba::WHITE, Rgba::BLACK)
    }

    /// Create a surface with explicit background and foreground colors.
    pub fn with_colors(width: u32, height: u32, background: Rgba, foreground: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; (width * height) as usize],
            background,
            foreground,
            transforms: HashMap::new(),
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new viewport size and clear to the background.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; (width * height) as usize];
    }

    /// The frame as tightly packed RGBA8 bytes, row-major.
    pub fn frame(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// The last transform applied to a target. The pixel backend has no
    /// retained elements to move, so transforms are kept queryable for the
    /// host instead.
    pub fn transform(&self, target: &str) -> Option<Transform> {
        self.transforms.get(target).copied()
    }

    /// Blend the foreground color over the pixel at `(x, y)` with the given
    /// alpha. Out-of-bounds coordinates are clipped.
    fn blend(&mut self, x: i32, y: i32, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let offset = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[offset];
        let blend_channel = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8
        };
        self.pixels[offset] = Rgba::new(
            blend_channel(self.foreground.r, dst.r),
            blend_channel(self.foreground.g, dst.g),
            blend_channel(self.foreground.b, dst.b),
            255,
        );
    }
}

impl Renderer for PixelSurface {
    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, opacity: f32) {
        let min_x = (center.x - radius - 1.0).floor() as i32;
        let max_x = (center.x + radius + 1.0).ceil() as i32;
        let min_y = (center.y - radius - 1.0).floor() as i32;
        let max_y = (center.y + radius + 1.0).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                // Soft ~1px edge: full inside, linear falloff across the rim.
                let coverage = (radius - p.distance(center) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, coverage * opacity);
                }
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, opacity: f32) {
        // Hairline DDA; sub-pixel widths thin out via alpha instead of
        // geometry, which is all the connection pass needs.
        let alpha = opacity * width.clamp(0.0, 1.0);
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            self.blend(from.x.floor() as i32, from.y.floor() as i32, alpha);
            return;
        }

        let step = delta / steps as f32;
        let mut p = from;
        for _ in 0..=steps {
            self.blend(p.x.floor() as i32, p.y.floor() as i32, alpha);
            p += step;
        }
    }

    fn apply_transform(&mut self, target: &str, transform: Transform) {
        let merged = match self.transforms.get(target) {
            Some(existing) => existing.merged(transform),
            None => transform,
        };
        self.transforms.insert(target.to_string(), merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_background() {
        let mut surface = PixelSurface::new(4, 4);
        surface.draw_circle(Vec2::new(2.0, 2.0), 1.5, 1.0);
        surface.clear();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(surface.pixel(x, y), Some(Rgba::WHITE));
            }
        }
    }

    #[test]
    fn test_circle_darkens_center() {
        let mut surface = PixelSurface::new(16, 16);
        surface.draw_circle(Vec2::new(8.0, 8.0), 3.0, 1.0);

        let center = surface.pixel(8, 8).unwrap();
        assert_eq!(center, Rgba::new(0, 0, 0, 255));
        // Far corner untouched.
        assert_eq!(surface.pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_opacity_blends_partially() {
        let mut surface = PixelSurface::new(8, 8);
        surface.draw_circle(Vec2::new(4.0, 4.0), 2.0, 0.5);

        let center = surface.pixel(4, 4).unwrap();
        assert!(center.r > 0 && center.r < 255);
        assert_eq!(center.r, center.g);
        assert_eq!(center.g, center.b);
    }

    #[test]
    fn test_line_touches_endpoints() {
        let mut surface = PixelSurface::new(32, 32);
        surface.draw_line(Vec2::new(2.0, 2.0), Vec2::new(20.0, 20.0), 1.0, 1.0);

        assert_ne!(surface.pixel(2, 2), Some(Rgba::WHITE));
        assert_ne!(surface.pixel(20, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut surface = PixelSurface::new(8, 8);
        surface.draw_circle(Vec2::new(-10.0, -10.0), 3.0, 1.0);
        surface.draw_line(
            Vec2::new(-5.0, 4.0),
            Vec2::new(50.0, 4.0),
            1.0,
            1.0,
        );
        // No panic, and in-bounds spans of the line did land.
        assert_ne!(surface.pixel(4, 4), Some(Rgba::WHITE));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = PixelSurface::new(4, 4);
        surface.resize(10, 6);
        assert_eq!(surface.width(), 10);
        assert_eq!(surface.height(), 6);
        assert_eq!(surface.frame().len(), 10 * 6 * 4);
    }

    #[test]
    fn test_transforms_retained_and_merged() {
        use crate::renderer::Transform;

        let mut surface = PixelSurface::new(4, 4);
        surface.apply_transform("ring", Transform::new().rotation_y(36.0));
        surface.apply_transform("ring", Transform::new().origin_depth(800.0));

        let t = surface.transform("ring").unwrap();
        assert_eq!(t.rotation_y, Some(36.0));
        assert_eq!(t.origin_depth, Some(800.0));
    }
}
