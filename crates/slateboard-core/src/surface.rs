//! Mutable raster surface the whiteboard draws onto.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Composite `self` over `dst` (source-over, non-premultiplied).
    pub fn over(self, dst: Rgba) -> Rgba {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let sa = self.a as u32;
        let da = dst.a as u32;
        let out_a = sa + da * (255 - sa) / 255;
        if out_a == 0 {
            return Rgba::transparent();
        }
        let blend = |s: u8, d: u8| -> u8 {
            let s = s as u32;
            let d = d as u32;
            ((s * sa + d * da * (255 - sa) / 255) / out_a) as u8
        };
        Rgba::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            out_a as u8,
        )
    }
}

/// A 2D grid of pixels, width x height fixed at creation.
///
/// All drawing operations mutate the surface in place. Dimensions never
/// change for the lifetime of the surface; loading an image of different
/// size requires constructing a new surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<Rgba>,
}

impl RasterSurface {
    /// Create a surface filled with the given background color.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Raw pixel data in row-major order.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Get a pixel, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Write a pixel. Returns false if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
            true
        } else {
            false
        }
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Reset the surface to its background color.
    pub fn clear(&mut self) {
        let background = self.background;
        self.fill(background);
    }

    /// Clamp a point into the surface bounds.
    ///
    /// Pointer capture commonly reports positions slightly outside the
    /// surface during fast movement, so callers clamp rather than reject.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, (self.width - 1) as f64),
            point.y.clamp(0.0, (self.height - 1) as f64),
        )
    }

    /// Overwrite the surface with foreign pixel data of identical size.
    /// Returns false (and leaves the surface untouched) on a size mismatch.
    pub fn blit(&mut self, pixels: &[Rgba]) -> bool {
        if pixels.len() != self.pixels.len() {
            return false;
        }
        self.pixels.copy_from_slice(pixels);
        true
    }
}
