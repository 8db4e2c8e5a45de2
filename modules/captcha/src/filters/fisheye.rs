use image::Rgba;
use log::debug;
use rand::{Rng, RngCore};
use error::Result;
use crate::filters::Filter;
use crate::images::{BLACK, Image};

/// Overlay a grid on the image, then bulge the middle of it like a fisheye lens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FishEye {
    horizontal: Rgba<u8>,
    vertical: Rgba<u8>
}

impl FishEye {
    pub fn new(horizontal: Rgba<u8>, vertical: Rgba<u8>) -> Self {
        Self { horizontal, vertical }
    }

    pub fn horizontal_color(&self) -> Rgba<u8> {
        self.horizontal
    }

    pub fn vertical_color(&self) -> Rgba<u8> {
        self.vertical
    }

    /// Draw the evenly spaced grid, horizontal lines first.
    pub fn draw_grid(&self, i: &mut Image) {
        let (width, height) = (i.width(), i.height());

        debug!(
            target: "Captcha",
            "Drawing a {}x{} grid on a {width}x{height} image",
            stripe_positions(height).count(),
            stripe_positions(width).count()
        );

        for y in stripe_positions(height) {
            i.draw_line((0, y as i64), (width as i64, y as i64), self.horizontal);
        }

        for x in stripe_positions(width) {
            i.draw_line((x as i64, 0), (x as i64, height as i64), self.vertical);
        }
    }
}

impl Default for FishEye {
    fn default() -> Self {
        Self::new(BLACK, BLACK)
    }
}

impl Filter for FishEye {
    fn apply_with_rng(&self, i: &mut Image, rng: &mut dyn RngCore) -> Result<()> {
        self.draw_grid(i);

        let distance = pick_distance(i.width(), rng);
        warp(i, distance);

        Ok(())
    }
}

/// Gap between two grid lines along an axis of `extent` pixels.
pub fn stripe_spacing(extent: u32) -> u32 {
    extent / (extent / 7 + 1)
}

/// Offsets of the grid lines along an axis: every multiple of the spacing below `extent`.
pub fn stripe_positions(extent: u32) -> impl Iterator<Item = u32> {
    let space = stripe_spacing(extent);

    std::iter::successors((space > 0).then_some(space), move |p| p.checked_add(space))
        .take_while(move |p| *p < extent)
}

/// `g(s) = -3/4 s³ + 3/2 s² + 1/4 s` on `[0, 1]`, zero below and the identity above.
pub fn fisheye_formula(s: f64) -> f64 {
    if s < 0.0 {
        return 0.0;
    }
    if s > 1.0 {
        return s;
    }

    -0.75 * s * s * s + 1.5 * s * s + 0.25 * s
}

/// Radius of the lens, uniform in `[width / 4, width / 3]`.
pub fn pick_distance(width: u32, rng: &mut dyn RngCore) -> u32 {
    rng.gen_range(width / 4..=width / 3)
}

/// Remap every pixel closer than `distance` to the center from a snapshot of the image.
///
/// The center itself is copied onto itself. Pixels at or beyond `distance` are left as they are.
pub fn warp(i: &mut Image, distance: u32) {
    let (width, height) = (i.width() as i64, i.height() as i64);
    let (w_mid, h_mid) = (width / 2, height / 2);
    let distance = distance as f64;

    debug!(target: "Captcha", "Warping a {width}x{height} image around ({w_mid}, {h_mid}) with a radius of {distance}");

    let pix = i.snapshot_column_major();

    for x in 0..width {
        for y in 0..height {
            let rel_x = x - w_mid;
            let rel_y = y - h_mid;

            let d1 = ((rel_x * rel_x + rel_y * rel_y) as f64).sqrt();
            if d1 >= distance || d1 == 0.0 {
                continue;
            }

            let scale = fisheye_formula(d1 / distance) * distance / d1;
            let src_x = w_mid + (scale * rel_x as f64) as i64;
            let src_y = h_mid + (scale * rel_y as f64) as i64;

            if !(0..width).contains(&src_x) || !(0..height).contains(&src_y) {
                continue;
            }

            if let Some(color) = pix.get((src_x * height + src_y) as usize) {
                i.put_pixel(x as u32, y as u32, *color);
            }
        }
    }
}
