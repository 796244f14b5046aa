//! glideshow - full-screen image carousel fed from a Notion database.
//!
//! Slides come from a Notion database when credentials are configured and
//! from a built-in set otherwise, or whenever anything goes wrong upstream.

pub mod carousel;
pub mod cli;
pub mod config;
pub mod models;
pub mod notion;
pub mod server;
pub mod slides;
pub mod utils;
