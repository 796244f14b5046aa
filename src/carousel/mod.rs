//! Carousel presentation: state model, lifecycle and slide service clients.

mod component;
mod service;
mod state;
mod timer;

pub use component::{Carousel, MountOptions};
pub use service::{HttpSlideService, LocalSlideService, ServiceError, SlideService, SLIDES_PATH};
pub use state::{CarouselState, CarouselView, EMPTY_MESSAGE};
pub use timer::AdvanceTimer;
