use image::Rgba;
use itertools::iproduct;
use log::{debug, warn};
use rand::RngCore;
use error::{RenderError, Result};
use crate::filters::Filter;
use crate::images::Image;

/// The side of a tile when none is given
pub const DEFAULT_BLOCK_SIZE: u32 = 3;

/// Pixelate the image by flattening square tiles to their mean color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    block_size: u32
}

impl Block {
    pub fn new(block_size: u32) -> Result<Self> {
        if block_size == 0 {
            warn!(target: "Captcha", "Rejected a block filter with a block size of 0");
            return Err(RenderError::InvalidConfiguration("the block size must be greater than 0".into()).into());
        }

        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Flatten the tile whose top-left corner is `(x0, y0)`, clipped to the image.
    ///
    /// Red, green and blue become the floored mean of the tile, alpha stays per pixel.
    fn flatten_tile(&self, i: &mut Image, x0: u32, y0: u32) {
        let x1 = x0.saturating_add(self.block_size).min(i.width());
        let y1 = y0.saturating_add(self.block_size).min(i.height());

        let mut sum = [0u64; 3];
        for (y, x) in iproduct!(y0..y1, x0..x1) {
            if let Some(Rgba([r, g, b, _])) = i.get_pixel(x, y) {
                sum[0] += r as u64;
                sum[1] += g as u64;
                sum[2] += b as u64;
            }
        }

        let count = (x1 - x0) as u64 * (y1 - y0) as u64;
        if count == 0 {
            return;
        }
        let mean = sum.map(|c| (c / count) as u8);

        for (y, x) in iproduct!(y0..y1, x0..x1) {
            if let Some(Rgba([_, _, _, a])) = i.get_pixel(x, y) {
                i.put_pixel(x, y, Rgba([mean[0], mean[1], mean[2], a]));
            }
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self { block_size: DEFAULT_BLOCK_SIZE }
    }
}

impl Filter for Block {
    fn apply_with_rng(&self, i: &mut Image, _rng: &mut dyn RngCore) -> Result<()> {
        debug!(target: "Captcha", "Pixelating a {}x{} image with {}px tiles", i.width(), i.height(), self.block_size);

        let step = self.block_size as usize;
        let origins: Vec<(u32, u32)> = iproduct!(
            (0..i.height()).step_by(step),
            (0..i.width()).step_by(step)
        ).collect();

        for (y0, x0) in origins {
            self.flatten_tile(i, x0, y0);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use image::Rgba;
    use error::{Error, RenderError};
    use crate::filters::{Block, Filter};
    use crate::images::Image;

    /// Every pixel gets a distinct opaque color.
    fn gradient(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height);
        for x in 0..width {
            for y in 0..height {
                img.put_pixel(x, y, Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8, 255]));
            }
        }
        img
    }

    #[test]
    fn zero_block_size_is_rejected() {
        assert!(matches!(Block::new(0), Err(Error::Render(RenderError::InvalidConfiguration(_)))));
    }

    #[test]
    fn default_block_size() {
        assert_eq!(Block::default().block_size(), 3);
        assert_eq!(Block::new(3).unwrap(), Block::default());
    }

    #[test]
    fn unit_blocks_are_a_no_op() {
        let original = gradient(13, 9);
        let mut img = original.clone();

        Block::new(1).unwrap().apply(&mut img).unwrap();

        assert_eq!(img, original);
    }

    #[test]
    fn tiles_are_uniform() {
        let mut img = gradient(21, 21);
        Block::default().apply(&mut img).unwrap();

        assert_eq!((img.width(), img.height()), (21, 21));

        let mut tiles = 0;
        for ty in 0..7 {
            for tx in 0..7 {
                let corner = img.get_pixel(tx * 3, ty * 3).unwrap();
                for y in ty * 3..ty * 3 + 3 {
                    for x in tx * 3..tx * 3 + 3 {
                        assert_eq!(img.get_pixel(x, y), Some(corner));
                    }
                }
                tiles += 1;
            }
        }
        assert_eq!(tiles, 49);
    }

    #[test]
    fn tile_holds_the_floored_mean() {
        let mut img = Image::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 0, 255, 255]));
        img.put_pixel(1, 0, Rgba([21, 1, 0, 255]));

        Block::new(2).unwrap().apply(&mut img).unwrap();

        assert_eq!(img.get_pixel(0, 0), Some(Rgba([15, 0, 127, 255])));
        assert_eq!(img.get_pixel(1, 0), Some(Rgba([15, 0, 127, 255])));
    }

    #[test]
    fn alpha_is_kept_per_pixel() {
        let mut img = Image::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 10]));
        img.put_pixel(1, 0, Rgba([100, 100, 100, 200]));

        Block::new(2).unwrap().apply(&mut img).unwrap();

        assert_eq!(img.get_pixel(0, 0), Some(Rgba([50, 50, 50, 10])));
        assert_eq!(img.get_pixel(1, 0), Some(Rgba([50, 50, 50, 200])));
    }

    #[test]
    fn partial_tiles_are_clipped() {
        let mut img = gradient(5, 4);
        Block::new(3).unwrap().apply(&mut img).unwrap();

        assert_eq!((img.width(), img.height()), (5, 4));

        // the right column of tiles is 2 pixels wide, the bottom row 1 pixel high
        let corner = img.get_pixel(3, 3).unwrap();
        assert_eq!(img.get_pixel(4, 3), Some(corner));

        let corner = img.get_pixel(3, 0).unwrap();
        for (x, y) in [(4, 0), (3, 2), (4, 2)] {
            assert_eq!(img.get_pixel(x, y), Some(corner));
        }
    }

    #[test]
    fn block_larger_than_image() {
        let mut img = gradient(4, 4);
        Block::new(100).unwrap().apply(&mut img).unwrap();

        let first = img.get_pixel(0, 0).unwrap();
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(img.get_pixel(x, y), Some(first));
            }
        }
    }

    #[test]
    fn degenerate_images() {
        let mut empty = Image::new(0, 0);
        Block::default().apply(&mut empty).unwrap();
        assert_eq!((empty.width(), empty.height()), (0, 0));

        let mut flat = Image::new(5, 0);
        Block::default().apply(&mut flat).unwrap();
        assert_eq!((flat.width(), flat.height()), (5, 0));

        let original = gradient(1, 1);
        let mut single = original.clone();
        Block::default().apply(&mut single).unwrap();
        assert_eq!(single, original);
    }
}
