//! The raster surface the filters draw on.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

/// Fully opaque black, the default line color.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A mutable RGBA image owned by the caller and borrowed by each filter for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    img: RgbaImage
}

impl Image {
    /// Create a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self { img: RgbaImage::new(width, height) }
    }

    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self { img: RgbaImage::from_pixel(width, height, color) }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.img.get_pixel_checked(x, y).copied()
    }

    /// Pixels outside the image are dropped, like a clipped drawing surface.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if let Some(p) = self.img.get_pixel_mut_checked(x, y) {
            *p = color;
        }
    }

    /// Draw a straight segment, both endpoints included.
    ///
    /// Endpoints may lie outside the image, only the visible part is drawn.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
        draw_line_segment_mut(
            &mut self.img,
            (from.0 as f32, from.1 as f32),
            (to.0 as f32, to.1 as f32),
            color
        );
    }

    /// Copy every pixel into a linear buffer, column after column.
    ///
    /// The pixel at `(x, y)` lands at index `x * height + y`.
    pub fn snapshot_column_major(&self) -> Vec<Rgba<u8>> {
        let height = self.height();
        let mut pix = Vec::with_capacity(self.width() as usize * height as usize);

        for x in 0..self.width() {
            for y in 0..height {
                pix.push(*self.img.get_pixel(x, y));
            }
        }

        pix
    }

    pub fn as_inner(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_inner(self) -> RgbaImage {
        self.img
    }
}

impl From<RgbaImage> for Image {
    fn from(img: RgbaImage) -> Self {
        Self { img }
    }
}
