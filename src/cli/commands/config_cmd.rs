//! Configuration management commands.

use console::style;

use crate::config::{Settings, API_KEY_VARS, DATABASE_ID_VARS};

/// Print the resolved configuration. The API key is never shown.
pub fn cmd_config_show(settings: &Settings) -> anyhow::Result<()> {
    let notion = &settings.notion;
    let set_or_missing = |value: Option<&str>, vars: &[&str]| match value {
        Some(v) if !v.is_empty() => style(v.to_string()).green(),
        _ => style(format!("not set ({})", vars.join(" / "))).yellow(),
    };

    println!("{}", style("[notion]").bold());
    println!(
        "  api_key        {}",
        if notion.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            style("<set>".to_string()).green()
        } else {
            set_or_missing(None, API_KEY_VARS)
        }
    );
    println!(
        "  database_id    {}",
        set_or_missing(notion.database_id.as_deref(), DATABASE_ID_VARS)
    );
    println!("  api_base       {}", notion.api_base);
    println!("  api_version    {}", notion.api_version);
    println!("  title_property {}", notion.title_property);
    println!("  sort_property  {}", notion.sort_property);
    println!("  timeout        {}s", notion.request_timeout.as_secs());
    println!("  max_pages      {}", notion.max_pages);

    println!("{}", style("[carousel]").bold());
    println!("  remote         {}", settings.carousel.remote_enabled);
    println!(
        "  interval       {}ms",
        settings.carousel.interval.as_millis()
    );

    println!("{}", style("[server]").bold());
    println!("  bind           {}", settings.server.bind);

    Ok(())
}
