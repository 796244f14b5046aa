//! Configuration management for glideshow.
//!
//! Settings are resolved in three layers, later layers winning:
//! built-in defaults, an optional config file (`--config`, or a
//! `glideshow.toml`/`.json` discovered by prefer), then environment
//! variables. Each environment-backed setting accepts an ordered list of
//! variable names so the same deployment works with both runtime names
//! (`NOTION_API_KEY`) and build-time names (`VITE_NOTION_API_KEY`).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment names for the Notion integration token.
pub const API_KEY_VARS: &[&str] = &["NOTION_API_KEY", "VITE_NOTION_API_KEY"];

/// Environment names for the Notion database id.
pub const DATABASE_ID_VARS: &[&str] = &["NOTION_DATABASE_ID", "VITE_NOTION_DATABASE_ID"];

/// Environment names for the remote-fetch feature flag.
pub const USE_REMOTE_VARS: &[&str] = &["USE_NOTION_API", "VITE_USE_NOTION_API"];

/// Environment names for the Notion API base URL.
pub const API_BASE_VARS: &[&str] = &["NOTION_API_BASE_URL"];

/// Environment names for the carousel advance interval in milliseconds.
pub const INTERVAL_VARS: &[&str] = &["SLIDE_INTERVAL_MS"];

/// Environment names for the server bind address.
pub const BIND_VARS: &[&str] = &["GLIDESHOW_BIND"];

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_NAME: &str = "glideshow";

/// Notion API endpoint.
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Notion API version header value.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Default carousel advance interval.
pub const DEFAULT_INTERVAL_MS: u64 = 3000;

/// Default bind address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config format '{path}' (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// Source of environment variables.
///
/// Production code reads the process environment; tests hand in a map.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Return the first non-empty value among `names`, in order.
pub fn resolve_var(env: &dyn EnvSource, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        env.var(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Parse a boolean flag value. Unrecognized values yield `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Notion connection settings.
#[derive(Clone, PartialEq)]
pub struct NotionSettings {
    /// Integration token. `None` disables remote fetching.
    pub api_key: Option<String>,
    /// Database holding one page per slide.
    pub database_id: Option<String>,
    /// API base URL (overridable for tests and proxies).
    pub api_base: String,
    /// `Notion-Version` header value.
    pub api_version: String,
    /// Title property read for the slide title.
    pub title_property: String,
    /// Number property used for ordering.
    pub sort_property: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Upper bound on pages followed per paginated listing.
    pub max_pages: usize,
}

// Hand-written so the token never lands in logs.
impl fmt::Debug for NotionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("title_property", &self.title_property)
            .field("sort_property", &self.sort_property)
            .field("request_timeout", &self.request_timeout)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: None,
            api_base: DEFAULT_NOTION_API_BASE.to_string(),
            api_version: DEFAULT_NOTION_VERSION.to_string(),
            title_property: "이름".to_string(),
            sort_property: "id".to_string(),
            request_timeout: Duration::from_secs(30),
            max_pages: 10,
        }
    }
}

/// Both credentials needed to query Notion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotionCredentials<'a> {
    pub api_key: &'a str,
    pub database_id: &'a str,
}

impl NotionSettings {
    /// Credentials, if both are present and non-empty.
    pub fn credentials(&self) -> Option<NotionCredentials<'_>> {
        let api_key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        let database_id = self.database_id.as_deref().filter(|d| !d.is_empty())?;
        Some(NotionCredentials {
            api_key,
            database_id,
        })
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    /// Whether the carousel asks the slide service for remote content at all.
    pub remote_enabled: bool,
    /// Time between automatic advances.
    pub interval: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            remote_enabled: true,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Bind address: `port`, `host`, or `host:port`.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub notion: NotionSettings,
    pub carousel: CarouselSettings,
    pub server: ServerSettings,
}

/// `[notion]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotionFileConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub api_base: Option<String>,
    pub api_version: Option<String>,
    pub title_property: Option<String>,
    pub sort_property: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_pages: Option<usize>,
}

/// `[carousel]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselFileConfig {
    pub remote_enabled: Option<bool>,
    pub interval_ms: Option<u64>,
}

/// `[server]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerFileConfig {
    pub bind: Option<String>,
}

/// On-disk configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub notion: NotionFileConfig,
    pub carousel: CarouselFileConfig,
    pub server: ServerFileConfig,
}

impl FileConfig {
    /// Read and parse a config file; the format follows the extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        match path.extension().and_then(|e| e.to_str()).unwrap_or("toml") {
            "toml" => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            "json" => serde_json::from_str(&text).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Overlay file values onto settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        let notion = &self.notion;
        let target = &mut settings.notion;
        if let Some(ref v) = notion.api_key {
            target.api_key = Some(v.clone());
        }
        if let Some(ref v) = notion.database_id {
            target.database_id = Some(v.clone());
        }
        if let Some(ref v) = notion.api_base {
            target.api_base = v.clone();
        }
        if let Some(ref v) = notion.api_version {
            target.api_version = v.clone();
        }
        if let Some(ref v) = notion.title_property {
            target.title_property = v.clone();
        }
        if let Some(ref v) = notion.sort_property {
            target.sort_property = v.clone();
        }
        if let Some(secs) = notion.request_timeout_secs {
            target.request_timeout = Duration::from_secs(secs);
        }
        if let Some(pages) = notion.max_pages {
            if pages == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "notion.max_pages".to_string(),
                    value: pages.to_string(),
                    reason: "must be at least 1",
                });
            }
            target.max_pages = pages;
        }

        if let Some(enabled) = self.carousel.remote_enabled {
            settings.carousel.remote_enabled = enabled;
        }
        if let Some(ms) = self.carousel.interval_ms {
            settings.carousel.interval = interval_from_millis("carousel.interval_ms", ms)?;
        }

        if let Some(ref bind) = self.server.bind {
            settings.server.bind = bind.clone();
        }
        Ok(())
    }
}

fn interval_from_millis(key: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: ms.to_string(),
            reason: "interval must be positive",
        });
    }
    Ok(Duration::from_millis(ms))
}

impl Settings {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars (first non-empty name in each group wins):
    /// - `NOTION_API_KEY` / `VITE_NOTION_API_KEY`
    /// - `NOTION_DATABASE_ID` / `VITE_NOTION_DATABASE_ID`
    /// - `USE_NOTION_API` / `VITE_USE_NOTION_API`: "true" or "false"
    /// - `NOTION_API_BASE_URL`
    /// - `SLIDE_INTERVAL_MS`
    /// - `GLIDESHOW_BIND`
    pub fn apply_env(&mut self, env: &dyn EnvSource) -> Result<(), ConfigError> {
        if let Some(key) = resolve_var(env, API_KEY_VARS) {
            self.notion.api_key = Some(key);
        }
        if let Some(id) = resolve_var(env, DATABASE_ID_VARS) {
            self.notion.database_id = Some(id);
        }
        if let Some(base) = resolve_var(env, API_BASE_VARS) {
            self.notion.api_base = base;
        }
        if let Some(flag) = resolve_var(env, USE_REMOTE_VARS) {
            match parse_flag(&flag) {
                Some(enabled) => self.carousel.remote_enabled = enabled,
                None => tracing::warn!(
                    "Ignoring unrecognized remote-fetch flag value {:?}",
                    flag
                ),
            }
        }
        if let Some(raw) = resolve_var(env, INTERVAL_VARS) {
            let ms = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: INTERVAL_VARS[0].to_string(),
                value: raw.clone(),
                reason: "expected milliseconds as an integer",
            })?;
            self.carousel.interval = interval_from_millis(INTERVAL_VARS[0], ms)?;
        }
        if let Some(bind) = resolve_var(env, BIND_VARS) {
            self.server.bind = bind;
        }
        Ok(())
    }
}

/// Options controlling where settings are loaded from.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file; must exist when given. Otherwise the file is
    /// discovered with prefer.
    pub config_path: Option<PathBuf>,
}

/// Locate a `glideshow.*` config file in prefer's standard search paths.
pub async fn discover_config_file() -> Option<PathBuf> {
    match prefer::load(CONFIG_NAME).await {
        Ok(found) => found.source_path().map(|p| p.to_path_buf()),
        Err(_) => {
            tracing::debug!("No {} config file found; using defaults", CONFIG_NAME);
            None
        }
    }
}

/// Load settings from defaults, config file, and environment.
pub async fn load_settings(
    options: &LoadOptions,
    env: &dyn EnvSource,
) -> Result<Settings, ConfigError> {
    let config_path = match options.config_path {
        Some(ref path) => Some(path.clone()),
        None => discover_config_file().await,
    };
    load_settings_from(config_path.as_deref(), env).await
}

/// Load settings from an optional config file plus the environment.
pub async fn load_settings_from(
    config_path: Option<&Path>,
    env: &dyn EnvSource,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(path) = config_path {
        tracing::debug!("Loading config file: {}", path.display());
        FileConfig::load_from_path(path)
            .await?
            .apply_to_settings(&mut settings)?;
    }

    settings.apply_env(env)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_var_prefers_first_name() {
        let e = env(&[
            ("NOTION_API_KEY", "runtime"),
            ("VITE_NOTION_API_KEY", "build"),
        ]);
        assert_eq!(resolve_var(&e, API_KEY_VARS).as_deref(), Some("runtime"));
    }

    #[test]
    fn test_resolve_var_falls_back_to_alias() {
        let e = env(&[("NOTION_API_KEY", "  "), ("VITE_NOTION_API_KEY", "build")]);
        assert_eq!(resolve_var(&e, API_KEY_VARS).as_deref(), Some("build"));
        assert_eq!(resolve_var(&e, DATABASE_ID_VARS), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_credentials_require_both_values() {
        let mut notion = NotionSettings::default();
        assert!(notion.credentials().is_none());

        notion.api_key = Some("secret".to_string());
        assert!(notion.credentials().is_none());

        notion.database_id = Some(String::new());
        assert!(notion.credentials().is_none());

        notion.database_id = Some("db".to_string());
        let creds = notion.credentials().unwrap();
        assert_eq!(creds.api_key, "secret");
        assert_eq!(creds.database_id, "db");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let notion = NotionSettings {
            api_key: Some("secret_abc".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", notion);
        assert!(!debug.contains("secret_abc"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_env_overrides() {
        let e = env(&[
            ("VITE_NOTION_API_KEY", "key"),
            ("NOTION_DATABASE_ID", "db"),
            ("VITE_USE_NOTION_API", "false"),
            ("SLIDE_INTERVAL_MS", "1000"),
            ("GLIDESHOW_BIND", "0.0.0.0:8080"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(&e).unwrap();

        assert_eq!(settings.notion.api_key.as_deref(), Some("key"));
        assert_eq!(settings.notion.database_id.as_deref(), Some("db"));
        assert!(!settings.carousel.remote_enabled);
        assert_eq!(settings.carousel.interval, Duration::from_millis(1000));
        assert_eq!(settings.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(&env(&[("SLIDE_INTERVAL_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = settings
            .apply_env(&env(&[("SLIDE_INTERVAL_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.carousel.remote_enabled);
        assert_eq!(settings.carousel.interval, Duration::from_millis(3000));
        assert_eq!(settings.notion.api_base, DEFAULT_NOTION_API_BASE);
        assert_eq!(settings.notion.api_version, "2022-06-28");
        assert_eq!(settings.notion.sort_property, "id");
    }

    #[tokio::test]
    async fn test_file_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glideshow.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[notion]
api_key = "from-file"
database_id = "db-file"
title_property = "Name"

[carousel]
interval_ms = 5000

[server]
bind = "8081"
"#
        )
        .unwrap();

        let options = LoadOptions {
            config_path: Some(path),
        };
        let settings = load_settings(&options, &env(&[("NOTION_API_KEY", "from-env")]))
            .await
            .unwrap();

        assert_eq!(settings.notion.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.notion.database_id.as_deref(), Some("db-file"));
        assert_eq!(settings.notion.title_property, "Name");
        assert_eq!(settings.carousel.interval, Duration::from_millis(5000));
        assert_eq!(settings.server.bind, "8081");
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_error() {
        let options = LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/glideshow.toml")),
        };
        let err = load_settings(&options, &env(&[])).await.unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[tokio::test]
    async fn test_no_file_uses_defaults_and_env() {
        let settings = load_settings_from(None, &env(&[("SLIDE_INTERVAL_MS", "750")]))
            .await
            .unwrap();
        assert_eq!(settings.carousel.interval, Duration::from_millis(750));
        assert_eq!(settings.notion, NotionSettings::default());
    }

    #[tokio::test]
    async fn test_json_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glideshow.json");
        std::fs::write(
            &path,
            r#"{"carousel": {"remote_enabled": false}, "server": {"bind": "9090"}}"#,
        )
        .unwrap();

        let settings = load_settings_from(Some(&path), &env(&[])).await.unwrap();
        assert!(!settings.carousel.remote_enabled);
        assert_eq!(settings.server.bind, "9090");
    }

    #[tokio::test]
    async fn test_unsupported_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glideshow.ini");
        std::fs::write(&path, "[server]\nbind=1\n").unwrap();
        let err = load_settings_from(Some(&path), &env(&[])).await.unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[tokio::test]
    async fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[notion]\napi_kee = \"typo\"\n").unwrap();
        let err = FileConfig::load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
