//! Shared utility functions.

mod link;

pub use link::resolve_link;
