//! Slide listing command.

use console::style;

use crate::cli::icons::{arrow, warning};
use crate::config::Settings;
use crate::models::default_slides;
use crate::slides::get_slides;
use crate::utils::resolve_link;

/// Fetch slides the same way `/api/slides` does and print them.
pub async fn cmd_slides(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let slides = if settings.carousel.remote_enabled {
        get_slides(&settings.notion).await
    } else {
        default_slides()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&slides)?);
        return Ok(());
    }

    if slides == default_slides() {
        eprintln!("{} Showing built-in slides", warning());
    }

    for (index, slide) in slides.iter().enumerate() {
        println!(
            "{} {} {}",
            style(format!("{:>2}.", index + 1)).dim(),
            style(&slide.title).bold(),
            style(format!("(id {})", slide.id)).dim()
        );
        for line in slide.description.lines() {
            println!("    {}", line);
        }
        println!("    {} {}", arrow(), resolve_link(&slide.link));
        println!("    {}", style(&slide.image).dim());
    }
    println!();
    println!("{} slides", slides.len());

    Ok(())
}
