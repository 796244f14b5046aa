//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;

use crate::models::Slide;
use crate::utils::resolve_link;

/// One slide as the page renders it.
pub struct SlideCard {
    pub index: usize,
    pub image: String,
    pub alt: String,
    pub title: String,
    pub description: String,
    /// Action button target, already resolved.
    pub href: String,
    pub active: bool,
}

impl SlideCard {
    pub fn from_slides(slides: &[Slide], current: usize) -> Vec<Self> {
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| Self {
                index,
                image: slide.image.clone(),
                alt: slide.alt_text().to_string(),
                title: slide.title.clone(),
                description: slide.description.clone(),
                href: resolve_link(&slide.link),
                active: index == current,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "carousel.html")]
pub struct CarouselTemplate {
    pub interval_ms: u64,
    /// Set when the slide fetch failed; replaces the carousel with a reload prompt.
    pub error_message: Option<String>,
    pub slides: Vec<SlideCard>,
}
