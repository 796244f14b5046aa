//! Carousel page.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::super::template_structs::{CarouselTemplate, SlideCard};
use super::super::AppState;
use crate::carousel::{Carousel, CarouselView, LocalSlideService, MountOptions};

/// Render the carousel with its slides loaded.
///
/// The component is mounted against the server's own slide source, so the
/// page shows exactly what `/api/slides` would return. The browser script
/// takes over the timer from there.
pub async fn carousel_page(State(state): State<AppState>) -> impl IntoResponse {
    let options = MountOptions::from(&state.settings.carousel);
    let service = Arc::new(LocalSlideService::new(Arc::clone(&state.source)));
    let carousel = Carousel::mount(service, options);
    let snapshot = carousel.loaded().await;
    carousel.unmount();

    let interval_ms = u64::try_from(options.interval.as_millis()).unwrap_or(u64::MAX);
    // `loaded()` only returns while loading if the carousel is gone; the
    // placeholder slides are still the right thing to show.
    let template = match snapshot.view() {
        CarouselView::Failed { message } => CarouselTemplate {
            interval_ms,
            error_message: Some(message.to_string()),
            slides: Vec::new(),
        },
        CarouselView::Showing { slides, current } => CarouselTemplate {
            interval_ms,
            error_message: None,
            slides: SlideCard::from_slides(slides, current),
        },
        CarouselView::Loading => CarouselTemplate {
            interval_ms,
            error_message: None,
            slides: SlideCard::from_slides(snapshot.slides(), snapshot.current()),
        },
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}
