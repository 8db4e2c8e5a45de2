//! Image distortions applied to a rendered CAPTCHA before it is sent.
//!
//! Each filter borrows the caller's [`images::Image`] for one call and mutates it in place.

pub mod config;
pub mod filters;
pub mod images;

pub use config::{RendererConfig, load_from};
pub use filters::{Block, Filter, FishEye};
pub use images::Image;
