//! Data models for glideshow.

mod slide;

pub use slide::{default_slides, Slide};
