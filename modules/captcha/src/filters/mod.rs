//! Filters to disturb and transform CAPTCHAs.

mod block;
mod fisheye;

use rand::RngCore;
use error::Result;
use super::images::Image;

// reexports
pub use super::filters::block::{Block, DEFAULT_BLOCK_SIZE};
pub use super::filters::fisheye::{FishEye, fisheye_formula, pick_distance, stripe_positions, stripe_spacing, warp};

/// A destructive, single-pass transform of an image.
///
/// The image keeps its dimensions. Applying a filter twice distorts it further.
pub trait Filter: Send + Sync {
    /// Apply the filter, drawing any randomness from `rng`.
    fn apply_with_rng(&self, i: &mut Image, rng: &mut dyn RngCore) -> Result<()>;

    fn apply(&self, i: &mut Image) -> Result<()> {
        self.apply_with_rng(i, &mut rand::thread_rng())
    }
}
