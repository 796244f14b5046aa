//! Terminal carousel player.

use std::future::Future;
use std::sync::Arc;

use console::style;
use tokio::sync::watch;

use crate::carousel::{Carousel, CarouselState, CarouselView, HttpSlideService, MountOptions};
use crate::cli::icons::{arrow, error, success};
use crate::config::Settings;

/// Mount a carousel against the server at `url` and print each slide as it
/// becomes active. Stops on Ctrl+C or after `cycles` full passes.
pub async fn cmd_play(settings: &Settings, url: &str, cycles: Option<usize>) -> anyhow::Result<()> {
    let service = HttpSlideService::new(url, settings.notion.request_timeout)?;
    println!("{} Loading slides from {}", arrow(), service.endpoint());

    let options = MountOptions::from(&settings.carousel);
    let carousel = Carousel::mount(Arc::new(service), options);

    let state = carousel.loaded().await;
    if let CarouselView::Failed { message } = state.view() {
        eprintln!("{} {}", error(), message);
        carousel.unmount();
        anyhow::bail!("Could not load slides from {}", url);
    }

    println!(
        "{} {} slides, advancing every {}ms (Ctrl+C to stop)",
        success(),
        state.slides().len(),
        options.interval.as_millis()
    );
    print_slide(&state);

    let mut rx = carousel.subscribe();
    follow(&mut rx, cycles, interrupted(), print_slide).await;

    carousel.unmount();
    println!("{} Stopped", arrow());
    Ok(())
}

/// Resolves on Ctrl+C; never resolves if the signal cannot be watched.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    println!();
}

/// Follow a loaded carousel, calling `on_change` whenever the active slide
/// changes, until `cycles` full passes have elapsed or `stop` resolves.
///
/// A pass is one timer step per slide, so a single-slide carousel completes
/// a pass on every step. Returns the number of steps observed.
async fn follow<S, F>(
    rx: &mut watch::Receiver<CarouselState>,
    cycles: Option<usize>,
    stop: S,
    mut on_change: F,
) -> usize
where
    S: Future<Output = ()>,
    F: FnMut(&CarouselState),
{
    let (mut shown, count) = {
        let state = rx.borrow_and_update();
        (state.current(), state.slides().len())
    };
    let limit = cycles.map(|c| c.saturating_mul(count));
    let mut steps = 0usize;
    if limit == Some(0) {
        return steps;
    }

    tokio::pin!(stop);
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                steps += 1;
                if limit.is_some_and(|limit| steps >= limit) {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if state.current() != shown {
                    shown = state.current();
                    on_change(&state);
                }
            }
            _ = &mut stop => break,
        }
    }
    steps
}

fn print_slide(state: &CarouselState) {
    let Some(slide) = state.current_slide() else {
        return;
    };
    println!();
    println!(
        "{} {}",
        style(format!("[{}/{}]", state.current() + 1, state.slides().len())).dim(),
        style(&slide.title).bold()
    );
    for line in slide.description.lines() {
        println!("  {}", line);
    }
    if let Some(target) = state.action_target() {
        println!("  {} {}", arrow(), style(target).underlined());
    }
}
