//! Carousel state model.
//!
//! Pure data and transitions; timing and fetching live in
//! [`super::component`].

use crate::models::{default_slides, Slide};
use crate::utils::resolve_link;

/// Message shown when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "No slides are available.";

/// State of one mounted carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    current: usize,
    slides: Vec<Slide>,
    loading: bool,
    last_error: Option<String>,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the carousel should display right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselView<'a> {
    /// Waiting for the slide service.
    Loading,
    /// The fetch failed or produced nothing; offer a reload.
    Failed { message: &'a str },
    /// All slides stacked, `current` visible.
    Showing { slides: &'a [Slide], current: usize },
}

impl CarouselState {
    /// Initial state: built-in slides as a placeholder, fetch pending.
    pub fn new() -> Self {
        Self {
            current: 0,
            slides: default_slides(),
            loading: true,
            last_error: None,
        }
    }

    /// A state that is already loaded with `slides`.
    pub fn loaded(slides: Vec<Slide>) -> Self {
        Self {
            current: 0,
            slides,
            loading: false,
            last_error: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Record the outcome of the slide fetch.
    ///
    /// Only the first outcome is applied; returns whether this call changed
    /// anything. An empty successful result keeps the placeholder slides.
    pub fn finish_loading(&mut self, outcome: Result<Vec<Slide>, String>) -> bool {
        if !self.loading {
            return false;
        }
        match outcome {
            Ok(slides) => {
                if !slides.is_empty() {
                    self.slides = slides;
                    if self.current >= self.slides.len() {
                        self.current = 0;
                    }
                }
                self.last_error = None;
            }
            Err(message) => self.last_error = Some(message),
        }
        self.loading = false;
        true
    }

    /// Step forward, wrapping to the first slide.
    pub fn advance(&mut self) {
        let count = self.slides.len();
        if count > 0 {
            self.current = (self.current + 1) % count;
        }
    }

    /// Step back, wrapping to the last slide.
    pub fn previous(&mut self) {
        let count = self.slides.len();
        if count > 0 {
            self.current = (self.current + count - 1) % count;
        }
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.slides.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> CarouselView<'_> {
        if self.loading {
            return CarouselView::Loading;
        }
        if let Some(message) = self.last_error.as_deref() {
            return CarouselView::Failed { message };
        }
        if self.slides.is_empty() {
            return CarouselView::Failed {
                message: EMPTY_MESSAGE,
            };
        }
        CarouselView::Showing {
            slides: &self.slides,
            current: self.current,
        }
    }

    /// URL the action button opens for the active slide.
    pub fn action_target(&self) -> Option<String> {
        self.current_slide().map(|s| resolve_link(&s.link))
    }
}
