//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the carousel page.
pub const CSS: &str = include_str!("carousel.css");

/// Browser-side timer, navigation and action button.
pub const JS: &str = include_str!("carousel.js");
